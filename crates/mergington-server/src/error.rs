use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mergington_core::ActivityError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit status codes
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 422 through the `anyhow::Error` chain without
/// widening the `ActivityError` enum with request-shape concerns.
#[derive(Debug)]
struct UnprocessableError(String);

impl std::fmt::Display for UnprocessableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UnprocessableError {}

/// Carries an explicit HTTP 404 for routes that match no activity or asset.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

/// Carries an explicit HTTP 405 for known paths hit with the wrong method.
#[derive(Debug)]
struct MethodNotAllowedError;

impl std::fmt::Display for MethodNotAllowedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Method Not Allowed")
    }
}

impl std::error::Error for MethodNotAllowedError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. Bodies are `{"detail": "..."}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 422 Unprocessable Entity error (missing request input).
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self(UnprocessableError(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    /// Construct a 405 Method Not Allowed error.
    pub fn method_not_allowed() -> Self {
        Self(MethodNotAllowedError.into())
    }

    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<UnprocessableError>().is_some() {
            return StatusCode::UNPROCESSABLE_ENTITY;
        }
        if self.0.downcast_ref::<NotFoundError>().is_some() {
            return StatusCode::NOT_FOUND;
        }
        if self.0.downcast_ref::<MethodNotAllowedError>().is_some() {
            return StatusCode::METHOD_NOT_ALLOWED;
        }

        match self.0.downcast_ref::<ActivityError>() {
            Some(ActivityError::ActivityNotFound(_)) => StatusCode::NOT_FOUND,
            Some(ActivityError::AlreadySignedUp { .. } | ActivityError::NotRegistered { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Some(
                ActivityError::CatalogNotFound(_)
                | ActivityError::Io(_)
                | ActivityError::Yaml(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %format!("{:#}", self.0), "request failed");
        }

        let body = serde_json::json!({ "detail": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn activity_not_found_maps_to_404() {
        let err = AppError(ActivityError::ActivityNotFound("Chess".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_signed_up_maps_to_400() {
        let err = AppError(
            ActivityError::AlreadySignedUp {
                activity: "Chess Club".into(),
                email: "a@mergington.edu".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_registered_maps_to_400() {
        let err = AppError(
            ActivityError::NotRegistered {
                activity: "Chess Club".into(),
                email: "a@mergington.edu".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(ActivityError::Io(io_err).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn foreign_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unprocessable_constructor_maps_to_422() {
        let err = AppError::unprocessable("email query parameter is required");
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        let err = AppError::not_found("Not Found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn method_not_allowed_constructor_maps_to_405() {
        let err = AppError::method_not_allowed();
        assert_eq!(err.0.to_string(), "Method Not Allowed");
        assert_eq!(err.into_response().status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn from_activity_error_keeps_detail_text() {
        let err: AppError = ActivityError::ActivityNotFound("Nope".into()).into();
        assert_eq!(err.0.to_string(), "Activity not found");
    }

    #[test]
    fn response_is_json() {
        let err = AppError(ActivityError::ActivityNotFound("x".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
