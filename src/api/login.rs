// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};

use crate::auth::{AuthError, AuthOutcome, LoginForm};
use crate::state::AppState;

/// Exchange form credentials for a token.
///
/// On success the token is returned in the `Authorization` response header
/// as `Bearer <token>` and the body is empty. Every failure is a bare 401.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Authenticated; token in the Authorization header",
            headers(("Authorization" = String, description = "Bearer <token>"))),
        (status = 401, description = "Authentication failed"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AuthError> {
    // An unreadable body is treated like one with no fields
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable login body");
            LoginForm::default()
        }
    };

    match state.gate.authenticate(form).await? {
        AuthOutcome::Authenticated { token, .. } => {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AuthError::InternalError(e.to_string()))?;
            Ok((StatusCode::OK, [(AUTHORIZATION, value)]).into_response())
        }
        AuthOutcome::Rejected(_) => Err(AuthError::Rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SigningSecret;
    use crate::models::JoinRequest;
    use crate::store::{AccountRepository, InMemoryAccountStore};
    use chrono::Duration;
    use std::sync::Arc;

    const SECRET: &str = "test-secret-please-use-32-bytes+";

    async fn state_with_alice() -> AppState {
        let store = Arc::new(InMemoryAccountStore::new());
        store
            .create(JoinRequest {
                username: "alice".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        AppState::new(
            crate::auth::TokenCodec::new(SigningSecret::new(SECRET).unwrap()),
            store,
            Duration::hours(1),
        )
    }

    fn form(username: &str, password: &str) -> Result<Form<LoginForm>, FormRejection> {
        Ok(Form(LoginForm {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }))
    }

    #[tokio::test]
    async fn success_sets_bearer_header() {
        let state = state_with_alice().await;
        let response = login(State(state.clone()), form("alice", "correct horse"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers()[AUTHORIZATION].to_str().unwrap();
        let token = header.strip_prefix("Bearer ").unwrap();
        assert_eq!(state.codec.username(token).unwrap(), "alice");
        assert_eq!(state.codec.role(token).unwrap(), "ROLE_USER");
    }

    #[tokio::test]
    async fn bad_password_is_rejected() {
        let state = state_with_alice().await;
        let result = login(State(state), form("alice", "wrong")).await;
        assert!(matches!(result, Err(AuthError::Rejected)));
    }
}
