use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Unknown database alias: {alias}")]
    UnknownDatabase { alias: String },

    #[error("Unknown entity: {group}.{name}")]
    UnknownEntity { group: String, name: String },

    #[error("Entity already registered: {entity}")]
    AlreadyRegistered { entity: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            RouterError::UnknownDatabase { alias } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "unknown_database".to_string(),
                    message: format!("Database alias '{}' is not configured", alias),
                    database: Some(alias.clone()),
                },
            ),
            RouterError::UnknownEntity { group, name } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "unknown_entity".to_string(),
                    message: format!("Entity '{}.{}' is not registered", group, name),
                    database: None,
                },
            ),
            RouterError::AlreadyRegistered { entity } => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "already_registered".to_string(),
                    message: format!("Entity '{}' is already registered", entity),
                    database: None,
                },
            ),
            RouterError::Config { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "config_error".to_string(),
                    message: message.clone(),
                    database: None,
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
