use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use subwire_types::api::ErrorResponse;

/// Failures surfaced to callers. Everything except `Internal` is a client
/// input or state conflict and is never retried.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Username already registered")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Already subscribed or pending confirmation")]
    DuplicateSubscription,

    #[error("Subscription not found")]
    SubscriptionNotFound,

    #[error("Subscription already confirmed")]
    AlreadyConfirmed,

    /// The request could not be extracted: bad JSON, query or path.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateUsername | Self::DuplicateSubscription | Self::AlreadyConfirmed => {
                StatusCode::BAD_REQUEST
            }
            Self::UserNotFound | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ServiceError {
                fn from(rejection: $rejection) -> Self {
                    Self::Rejected {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, QueryRejection, PathRejection);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            error!("Request failed: {:#}", e);
        }
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_map_to_bad_request() {
        assert_eq!(ServiceError::DuplicateUsername.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::DuplicateSubscription.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::AlreadyConfirmed.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        assert_eq!(ServiceError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::SubscriptionNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ServiceError::from(anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn rejections_keep_their_status_and_text() {
        let err = ServiceError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field `subscribe_to_username`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `subscribe_to_username`");
    }
}
