//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Each error kind keeps its own status code: validation 400, auth failure
//! 401, not-found 404, conflict 409, internal 500. Error bodies are JSON
//! `{"message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CartError, OrderError, ProductError, UserError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// User operation failed.
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// Product operation failed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    /// Whether this error is the server's fault rather than the client's.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Internal(_) => true,
            Self::User(UserError::Repository(_) | UserError::PasswordHash)
            | Self::Product(ProductError::Repository(_))
            | Self::Cart(CartError::Repository(_))
            | Self::Order(OrderError::Repository(_)) => true,
            _ => false,
        }
    }

    /// Status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => repository_status(err),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::User(err) => match err {
                UserError::InvalidUserName(_) => StatusCode::BAD_REQUEST,
                UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                UserError::NotFound => StatusCode::NOT_FOUND,
                UserError::UserNameTaken => StatusCode::CONFLICT,
                UserError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
                UserError::Repository(err) => repository_status(err),
            },
            Self::Product(err) => match err {
                ProductError::MissingName
                | ProductError::NameTooLong
                | ProductError::NegativePrice
                | ProductError::NegativeStock => StatusCode::BAD_REQUEST,
                ProductError::NotFound => StatusCode::NOT_FOUND,
                ProductError::Repository(err) => repository_status(err),
            },
            Self::Cart(err) => match err {
                CartError::InvalidAmount | CartError::AmountOutOfRange => StatusCode::BAD_REQUEST,
                CartError::UserNotFound
                | CartError::ProductNotFound
                | CartError::LineNotFound => StatusCode::NOT_FOUND,
                CartError::AlreadyInCart | CartError::InsufficientStock => StatusCode::CONFLICT,
                CartError::Repository(err) => repository_status(err),
            },
            Self::Order(err) => match err {
                OrderError::InvalidAmount | OrderError::EmptyOrder => StatusCode::BAD_REQUEST,
                OrderError::UserNotFound
                | OrderError::ProductNotFound
                | OrderError::LineNotFound => StatusCode::NOT_FOUND,
                OrderError::InsufficientStock => StatusCode::CONFLICT,
                OrderError::Repository(err) => repository_status(err),
            },
        }
    }

    /// Client-facing message for this error.
    ///
    /// Server errors never expose internal details.
    fn message(&self) -> String {
        if self.is_server_error() {
            return "internal server error".to_owned();
        }

        match self {
            Self::User(err) => err.to_string(),
            Self::Product(err) => err.to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Order(err) => err.to_string(),
            Self::Database(err) => repository_message(err),
            Self::Internal(_) => "internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Status code for a repository error that reached the edge unmapped.
fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Client-facing message for a repository error that reached the edge unmapped.
fn repository_message(err: &RepositoryError) -> String {
    match err {
        RepositoryError::NotFound => "not found".to_owned(),
        RepositoryError::Conflict(msg) => msg.clone(),
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            "internal server error".to_owned()
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sundry_core::UserNameError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::User(UserError::NotFound);
        assert_eq!(err.to_string(), "User error: user not found");

        let err = AppError::Cart(CartError::InsufficientStock);
        assert_eq!(err.to_string(), "Cart error: insufficient stock");
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            get_status(AppError::User(UserError::InvalidUserName(
                UserNameError::Empty
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Product(ProductError::MissingName)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::InvalidAmount)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::EmptyOrder)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_failure_maps_to_401() {
        assert_eq!(
            get_status(AppError::User(UserError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            get_status(AppError::User(UserError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::LineNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::ProductNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            get_status(AppError::User(UserError::UserNameTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::AlreadyInCart)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::InsufficientStock)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_maps_to_500() {
        assert_eq!(
            get_status(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::User(UserError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Internal("connection pool exhausted".to_owned());
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn test_client_errors_keep_fixed_messages() {
        let err = AppError::User(UserError::UserNameTaken);
        assert_eq!(err.message(), "user name already exists");

        let err = AppError::User(UserError::InvalidCredentials);
        assert_eq!(err.message(), "invalid user name or password");
    }
}
