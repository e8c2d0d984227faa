use actix_web::{get, post, web, HttpResponse};

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::SaveResult,
};

async fn save(
    state: &AppState<State>,
    data: &SaveResult,
) -> Result<HttpResponse, Error> {
    if data.name.trim().is_empty() {
        return Err(Error::FieldNotExist(String::from("name")));
    }

    state.backend.save_result(data).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn list(state: &AppState<State>) -> Result<HttpResponse, Error> {
    let items = state.backend.get_beneficiaries().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/results")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    data: web::Json<SaveResult>,
) -> Result<HttpResponse, Error> {
    save(&state, &data).await
}

#[get("/results")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    list(&state).await
}

#[post("/save")]
pub async fn post_save(
    state: web::Data<AppState<State>>,
    data: web::Json<SaveResult>,
) -> Result<HttpResponse, Error> {
    save(&state, &data).await
}

#[get("/beneficiaries")]
pub async fn get_beneficiaries(
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    list(&state).await
}
