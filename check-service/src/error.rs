use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::scoring::Rejection;
use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("{rejection}")]
    Rejected {
        check_id: String,
        rejection: Rejection,
    },
    #[error("Could not compute score.")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for CheckError {
    fn status_code(&self) -> StatusCode {
        match self {
            CheckError::Upload(e) => e.status(),
            CheckError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CheckError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            CheckError::Rejected {
                check_id,
                rejection,
            } => ErrorResponse {
                success: false,
                check_id: Some(check_id.clone()),
                error: rejection.to_string(),
                warnings: vec![rejection.error.to_string()],
            },
            other => ErrorResponse::new(other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
