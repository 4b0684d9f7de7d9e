// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Form};

use crate::{error::ApiError, models::JoinRequest, state::AppState};

/// Register a new account.
///
/// The request goes to the account store as-is; the store enforces the
/// username rules, uniqueness and hashing.
#[utoipa::path(
    post,
    path = "/join",
    tag = "Auth",
    request_body(content = JoinRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created", body = String),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Invalid username or password"),
    )
)]
pub async fn join(
    State(state): State<AppState>,
    Form(request): Form<JoinRequest>,
) -> Result<&'static str, ApiError> {
    state.accounts.create(request).await?;
    Ok("ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SigningSecret;
    use axum::http::StatusCode;

    fn state() -> AppState {
        AppState::with_secret(SigningSecret::new("test-secret-please-use-32-bytes+").unwrap())
    }

    fn request(username: &str, password: &str) -> Form<JoinRequest> {
        Form(JoinRequest {
            username: username.into(),
            password: password.into(),
        })
    }

    #[tokio::test]
    async fn join_returns_ok() {
        let body = join(State(state()), request("alice", "pw")).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn duplicate_join_conflicts() {
        let state = state();
        join(State(state.clone()), request("alice", "pw")).await.unwrap();

        let err = join(State(state), request("alice", "other")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_join_is_unprocessable() {
        let err = join(State(state()), request("alice", "")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
