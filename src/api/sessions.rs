//! Session endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PostSessionRequest};
use crate::app::{DeleteSession, GetSession, SetSession};
use crate::domain::{
    validate_session_key, validate_session_value, DomainError, SessionValidationError,
    SessionValue, StoredValue,
};

/// POST /session
pub async fn post_session(
    State(state): State<AppState>,
    Json(request): Json<PostSessionRequest>,
) -> Result<StatusCode, ApiError> {
    validate_session_key(&request.session_key).map_err(DomainError::from)?;

    let value = validate_session_value(request.session_value).map_err(DomainError::from)?;

    debug!(key = %request.session_key, fields = value.len(), "Setting session");

    state
        .app
        .commands
        .set_session
        .handle(SetSession::new(request.session_key, value))
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// GET /session/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionValue>, ApiError> {
    validate_session_key(&session_id).map_err(DomainError::from)?;

    let stored = state
        .app
        .queries
        .get_session
        .handle(GetSession::new(session_id.clone()))
        .await?;

    match stored {
        StoredValue::Found(data) => Ok(Json(SessionValue::decode(&data)?)),
        StoredValue::NotFound => Err(ApiError::not_found(format!(
            "Session '{}' not found",
            session_id
        ))),
    }
}

/// DELETE /session/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_session_key(&session_id).map_err(DomainError::from)?;

    state
        .app
        .commands
        .delete_session
        .handle(DeleteSession::new(session_id))
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// GET and DELETE on `/session/` with nothing after the slash
pub async fn missing_session_id() -> ApiError {
    DomainError::from(SessionValidationError::EmptyKey).into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        Router,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::app::Application;
    use crate::domain::session::MockSessionRepository;

    use super::*;

    fn router_with(repository: MockSessionRepository) -> Router {
        create_router(AppState::new(Application::new(Arc::new(repository))))
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Bytes) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_post_session_accepted() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_set()
            .withf(|key, value| {
                key == "abc" && SessionValue::decode(value).unwrap() == SessionValue::new().with_field("x", 1)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let (status, body) = send(
            router_with(repository),
            Method::POST,
            "/session",
            Some(r#"{"sessionKey":"abc","sessionValue":{"x":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_post_session_empty_key_never_reaches_repository() {
        let mut repository = MockSessionRepository::new();
        repository.expect_set().times(0);

        let (status, body) = send(
            router_with(repository),
            Method::POST,
            "/session",
            Some(r#"{"sessionKey":"","sessionValue":{"x":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["message"], "SessionKey cannot be empty");
    }

    #[tokio::test]
    async fn test_post_session_null_value_is_bad_request() {
        let mut repository = MockSessionRepository::new();
        repository.expect_set().times(0);

        let (status, body) = send(
            router_with(repository),
            Method::POST,
            "/session",
            Some(r#"{"sessionKey":"abc","sessionValue":null}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["message"], "SessionValue cannot be empty");
    }

    #[tokio::test]
    async fn test_post_session_bad_bodies_are_bad_request() {
        for body in [None, Some(""), Some("{not json"), Some(r#"{"sessionKey":"abc","sessionValue":[1]}"#)] {
            let mut repository = MockSessionRepository::new();
            repository.expect_set().times(0);

            let (status, _) = send(router_with(repository), Method::POST, "/session", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        }
    }

    #[tokio::test]
    async fn test_post_session_repository_failure_is_internal_error() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_set()
            .times(1)
            .returning(|_, _| Err(DomainError::cache("connection refused")));

        let (status, body) = send(
            router_with(repository),
            Method::POST,
            "/session",
            Some(r#"{"sessionKey":"abc","sessionValue":{"x":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["message"], "Internal server error");
        assert_eq!(body["error"]["type"], "server_error");
    }

    #[tokio::test]
    async fn test_get_session_ok() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_get()
            .withf(|key| key == "abc")
            .times(1)
            .returning(|_| Ok(StoredValue::found(&br#"{"x":1}"#[..])));

        let (status, body) = send(router_with(repository), Method::GET, "/session/abc", None).await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_get_session_not_found() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_get()
            .times(1)
            .returning(|_| Ok(StoredValue::NotFound));

        let (status, body) = send(router_with(repository), Method::GET, "/session/abc", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_get_session_repository_failure_is_internal_error() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_get()
            .times(1)
            .returning(|_| Err(DomainError::cache("Repository error")));

        let (status, _) = send(router_with(repository), Method::GET, "/session/abc", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_session_undecodable_value_is_internal_error() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_get()
            .times(1)
            .returning(|_| Ok(StoredValue::found(&b"aValue"[..])));

        let (status, _) = send(router_with(repository), Method::GET, "/session/abc", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_empty_session_id_is_bad_request() {
        for method in [Method::GET, Method::DELETE] {
            let mut repository = MockSessionRepository::new();
            repository.expect_get().times(0);
            repository.expect_delete().times(0);

            let (status, _) = send(router_with(repository), method.clone(), "/session/", None).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "method: {}", method);
        }
    }

    #[tokio::test]
    async fn test_delete_session_accepted() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_delete()
            .withf(|key| key == "abc")
            .times(1)
            .returning(|_| Ok(0));

        let (status, body) = send(router_with(repository), Method::DELETE, "/session/abc", None).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_delete_session_repository_failure_is_internal_error() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|_| Err(DomainError::cache("Repository error")));

        let (status, _) = send(router_with(repository), Method::DELETE, "/session/abc", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
