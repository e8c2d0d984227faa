use actix_web::{post, web, Responder};
use tracing::debug;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::ApplicantInput,
};

#[post("/credit-score")]
pub async fn index(
    state: web::Data<AppState<State>>,
    data: web::Json<ApplicantInput>,
) -> Result<impl Responder, Error> {
    data.validate()?;
    let result = state.backend.generate_credit_score(&data).await?;

    debug!(
        "Scored {}: composite {} ({}), {}",
        data.name, result.composite_score, result.risk_band, result.decision
    );

    Ok(web::Json(result))
}
