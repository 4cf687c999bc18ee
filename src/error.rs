use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::response::{ApiResponse, Meta};

/// Shown to callers in place of any storage failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Not enough stock for one of your items.")]
    InsufficientStock { product_id: Uuid },

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Transaction, connection, and other infrastructure failures. Their detail is
    /// logged, never shown.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_)
        )
    }

    /// Expected outcomes of a checkout attempt that the user can act on.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_) | AppError::EmptyCart | AppError::InsufficientStock { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::EmptyCart | AppError::InsufficientStock { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to put in front of a user.
    pub fn public_message(&self) -> String {
        if self.is_storage_failure() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_storage_failure() {
            tracing::error!(error = ?self, "request failed with storage error");
        }

        let status = self.status_code();
        let message = self.public_message();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
