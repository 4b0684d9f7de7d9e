// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the current principal.
//!
//! Use the `CurrentUser` extractor in handlers behind the token filter:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(principal): CurrentUser) -> impl IntoResponse {
//!     // principal.username, principal.role
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Principal, SecurityContext};

/// Principal of the current request.
///
/// Reads the [`SecurityContext`] installed by
/// [`verify_token`](super::middleware::verify_token). Rejects with
/// `Unauthenticated` when the filter did not run or the request carried no
/// token.
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<SecurityContext>()
            .ok_or(AuthError::Unauthenticated)?;

        Ok(CurrentUser(context.current()?.clone()))
    }
}
