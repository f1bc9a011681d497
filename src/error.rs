use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::export::ExportError;
use crate::model::validation::ValidationError;
use crate::store::StoreError;

/// Failures raised by the employee service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Employee is not found or has left the organization.")]
    NotFound { id: u64 },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything a handler can answer with besides success.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Export(_) | ServiceError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InvalidArgument(_) | ApiError::Validation(_) => {
                debug!(error = %self, "Rejected request")
            }
            ApiError::Service(ServiceError::NotFound { id }) => {
                warn!(employee_id = id, "Employee not found")
            }
            ApiError::Service(ServiceError::Export(err)) => {
                error!(error = ?err, "Error during export")
            }
            ApiError::Service(ServiceError::Store(err)) => {
                error!(error = %err, "Employee store failure")
            }
        }

        let body = match self {
            ApiError::InvalidArgument(message) => json!({ "message": message }),
            ApiError::Validation(err) => json!({
                "message": "Validation failed",
                "errors": err.messages(),
            }),
            ApiError::Service(ServiceError::NotFound { .. }) => {
                json!({ "message": self.to_string() })
            }
            ApiError::Service(ServiceError::Export(err)) => json!({
                "message": format!("An error occurred during export: {err}")
            }),
            ApiError::Service(ServiceError::Store(_)) => {
                json!({ "message": "An unexpected error occurred" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
