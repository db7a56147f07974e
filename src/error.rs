use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VacancyError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VacancyResult<T> = Result<T, VacancyError>;

impl IntoResponse for VacancyError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            VacancyError::NotFound { .. } => {
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                };
                (StatusCode::NOT_FOUND, body)
            }
            VacancyError::MissingParameter(_) | VacancyError::InvalidParameter { .. } => {
                let body = ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: self.to_string(),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            VacancyError::Database(_) | VacancyError::Config(_) | VacancyError::Io(_) => {
                error!(error = %self, "request failed");
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
