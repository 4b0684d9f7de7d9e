// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped security context.
//!
//! The token filter builds one [`SecurityContext`] per request and stores it
//! in the request extensions. Handlers read it through the
//! [`CurrentUser`](super::extractor::CurrentUser) extractor; nothing else
//! writes to it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;

/// Authenticated identity derived from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    /// Account name (token `username` claim)
    pub username: String,
    /// Granted authority (token `role` claim)
    pub role: String,
}

/// Identity state of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    /// Context for a request that carried no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// The principal for this request, or `Unauthenticated` if there is none.
    pub fn current(&self) -> Result<&Principal, AuthError> {
        self.principal.as_ref().ok_or(AuthError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
