use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use reqwest::Error as REQWEST_ERROR;
use serde_json::Error as JSON_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseIntError,
    str::ParseBoolError as PARSE_BOOL_ERROR,
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("Field not exists: {0}")]
    FieldNotExist(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),

    #[error("Result store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request - client sent invalid input
            Error::FieldNotExist(_)
            | Error::InvalidInput(_)
            | Error::JsonError(_)
            | Error::INT(_)
            | Error::ParseBoolError(_) => StatusCode::BAD_REQUEST,

            // 413 Payload Too Large - body over the JSON limit
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,

            // 504 Gateway Timeout - upstream timed out
            Error::ReqwestError(e) if e.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            },

            // 502 Bad Gateway - remote backend failed
            Error::ReqwestError(_) | Error::UpstreamStatus(_) => {
                StatusCode::BAD_GATEWAY
            },

            // 503 Service Unavailable - store cannot take the operation
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error - everything else
            Error::Io(_)
            | Error::URL(_)
            | Error::VAR(_)
            | Error::TokioJoinError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        HttpResponse::build(status).json(body)
    }
}
