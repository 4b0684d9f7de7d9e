// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token filter.
//!
//! Runs in front of the protected routes and installs a [`SecurityContext`]
//! in the request extensions:
//!
//! - no `Authorization` header: anonymous context, request continues;
//! - anything other than `Bearer <token>`: 401;
//! - bad signature, malformed or expired token: 401;
//! - otherwise: authenticated context with the token's principal.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/", get(main_page))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), verify_token));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::codec::TokenCodec;
use super::{AuthError, SecurityContext};
use crate::state::AppState;

/// Authentication middleware function.
pub async fn verify_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_context(request.headers(), &state.codec) {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error_code = e.error_code(), "bearer token refused");
            e.into_response()
        }
    }
}

/// Work out the security context for a set of request headers.
pub fn resolve_context(headers: &HeaderMap, codec: &TokenCodec) -> Result<SecurityContext, AuthError> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Ok(SecurityContext::anonymous());
    };

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)?;

    let principal = codec.verify(token)?;
    Ok(SecurityContext::authenticated(principal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ManualClock, SigningSecret};
    use axum::http::HeaderValue;
    use chrono::{DateTime, Duration};
    use std::sync::Arc;

    fn codec() -> (TokenCodec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let codec = TokenCodec::with_clock(
            SigningSecret::new("test-secret-please-use-32-bytes+").unwrap(),
            clock.clone(),
        );
        (codec, clock)
    }

    fn bearer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn no_header_is_anonymous() {
        let (codec, _) = codec();
        let ctx = resolve_context(&HeaderMap::new(), &codec).unwrap();
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn valid_token_authenticates() {
        let (codec, _) = codec();
        let token = codec.issue("alice", "ROLE_USER", Duration::hours(1)).unwrap();

        let ctx = resolve_context(&bearer(&format!("Bearer {token}")), &codec).unwrap();
        assert_eq!(ctx.current().unwrap().username, "alice");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let (codec, _) = codec();
        let result = resolve_context(&bearer("Basic YWxpY2U6cHc="), &codec);
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));

        let result = resolve_context(&bearer("Bearer "), &codec);
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let (codec, clock) = codec();
        let token = codec.issue("alice", "ROLE_USER", Duration::minutes(1)).unwrap();
        clock.advance(Duration::minutes(2));

        let result = resolve_context(&bearer(&format!("Bearer {token}")), &codec);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let (codec, _) = codec();
        let result = resolve_context(&bearer("Bearer not-a-token"), &codec);
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }
}
