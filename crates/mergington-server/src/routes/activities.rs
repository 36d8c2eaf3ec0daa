use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use mergington_core::Directory;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    fn require(self) -> Result<String, AppError> {
        let email = self
            .email
            .ok_or_else(|| AppError::unprocessable("email query parameter is required"))?;
        // Query decoding replaces invalid UTF-8 with U+FFFD instead of failing.
        if email.contains(char::REPLACEMENT_CHARACTER) {
            return Err(AppError::unprocessable("email must be valid UTF-8"));
        }
        Ok(email)
    }
}

/// Extractor rejections are plain text; route them through `AppError` so
/// every error body has the same JSON shape.
fn student_email(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<String, AppError> {
    let Query(query) = query.map_err(|e| AppError::unprocessable(e.body_text()))?;
    query.require()
}

/// A path segment that does not decode to a string cannot name an activity.
fn activity_name(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path.map(|Path(name)| name).map_err(|e| {
        tracing::debug!("rejected activity path: {}", e.body_text());
        AppError::not_found("Activity not found")
    })
}

/// GET /activities — the whole activity table, in catalog order.
pub async fn list_activities(State(app): State<AppState>) -> Json<Directory> {
    Json(app.store.list())
}

/// POST /activities/{name}/signup?email= — add a student to an activity.
pub async fn signup(
    State(app): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = student_email(query)?;
    let activity = activity_name(path)?;
    let message = app.store.signup(&activity, &email)?;
    tracing::info!(%activity, %email, "signed up");

    Ok(Json(serde_json::json!({ "message": message })))
}

/// DELETE /activities/{name}/unregister?email= — remove a student from an activity.
pub async fn unregister(
    State(app): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = student_email(query)?;
    let activity = activity_name(path)?;
    let message = app.store.unregister(&activity, &email)?;
    tracing::info!(%activity, %email, "unregistered");

    Ok(Json(serde_json::json!({ "message": message })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use mergington_core::ActivityStore;

    fn state() -> AppState {
        AppState::new(ActivityStore::seeded())
    }

    fn email(e: &str) -> Result<Query<EmailQuery>, QueryRejection> {
        Ok(Query(EmailQuery {
            email: Some(e.to_string()),
        }))
    }

    fn name(n: &str) -> Result<Path<String>, PathRejection> {
        Ok(Path(n.to_string()))
    }

    #[tokio::test]
    async fn list_returns_seeded_table() {
        let Json(dir) = list_activities(State(state())).await;
        assert!(dir.get("Basketball Team").is_some());
        assert!(dir.get("Tennis Club").is_some());
    }

    #[tokio::test]
    async fn signup_returns_message() {
        let app = state();
        let Json(body) = signup(
            State(app.clone()),
            name("Chess Club"),
            email("new@mergington.edu"),
        )
        .await
        .unwrap();
        assert_eq!(body["message"], "Signed up new@mergington.edu for Chess Club");
        assert!(app
            .store
            .get("Chess Club")
            .unwrap()
            .is_registered("new@mergington.edu"));
    }

    #[tokio::test]
    async fn signup_without_email_is_422() {
        let err = signup(
            State(state()),
            name("Chess Club"),
            Ok(Query(EmailQuery { email: None })),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn unregister_unknown_email_is_400() {
        let err = unregister(
            State(state()),
            name("Debate Team"),
            email("ghost@mergington.edu"),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn signup_rejects_lossily_decoded_email() {
        let app = state();
        let err = signup(State(app.clone()), name("Chess Club"), email("\u{FFFD}"))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(app.store.get("Chess Club").unwrap().enrolled(), 2);
    }
}
