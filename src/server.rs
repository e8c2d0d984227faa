use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    dev::Server, error::JsonPayloadError, http::header, middleware, web, App,
    HttpServer,
};
use tracing::info;

use crate::{
    configuration::{AppState, State},
    controller::{credit_score, misc, results},
    error::Error,
};

const JSON_LIMIT: usize = 4096;

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

/// Registers the `/api` scope and the JSON extractor settings.
pub fn routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _| match err {
            JsonPayloadError::Overflow { .. }
            | JsonPayloadError::OverflowKnownLength { .. } => {
                Error::PayloadTooLarge(err.to_string()).into()
            },
            _ => Error::InvalidInput(err.to_string()).into(),
        });

    cfg.app_data(json_config).service(
        web::scope("/api")
            .service(credit_score::index)
            .service(results::post_index)
            .service(results::get_index)
            .service(results::post_save)
            .service(results::get_beneficiaries)
            .service(misc::version)
            .service(misc::health),
    );
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;
    info!("Listening on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        let static_dir = app_state.config.static_dir.to_owned();

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes)
            .configure(move |cfg| {
                if let Some(dir) = static_dir {
                    cfg.service(Files::new("/", dir).index_file("index.html"));
                }
            })
    })
    .bind((host, port))?
    .disable_signals()
    .run();

    Ok(server)
}

#[cfg(test)]
pub(crate) fn test_state() -> web::Data<AppState<State>> {
    use crate::{
        configuration::Config,
        provider::{Backend, MemoryStore},
    };

    let state = State::with_backend(
        Config::default(),
        Backend::mock(MemoryStore::new()),
    );
    web::Data::new(AppState::new(state))
}
