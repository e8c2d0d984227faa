use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::BackendMode,
};

#[get("/version")]
pub async fn version() -> Result<impl Responder, Error> {
    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

    Ok(web::Json(VersionResponse { version: VERSION }))
}

#[get("/health")]
pub async fn health(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(HealthResponse {
        status: "ok",
        backend: state.backend.mode(),
    }))
}

#[derive(Debug, Serialize)]
pub struct VersionResponse<'a> {
    pub version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: BackendMode,
}
