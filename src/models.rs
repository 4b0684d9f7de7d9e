// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request bodies accepted by the public endpoints. Both `/login` and
//! `/join` take `application/x-www-form-urlencoded` bodies; the login form
//! lives in [`crate::auth::credentials`] because the gate owns its parsing.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Registration
// =============================================================================

/// New account request for `POST /join`.
///
/// Handed to the account store unchanged; trimming, validation, uniqueness
/// and hashing all happen there.
#[derive(Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct JoinRequest {
    /// Desired account name.
    pub username: String,
    /// Plain-text password. Hashed by the store, never kept as-is.
    pub password: String,
}

impl fmt::Debug for JoinRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
