// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login form parsing.

use std::fmt;

use serde::Deserialize;
use utoipa::ToSchema;

/// Raw `application/x-www-form-urlencoded` login body.
///
/// Both fields are optional at this layer so a missing field becomes a
/// rejected attempt instead of a framework-level 422.
#[derive(Default, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Username and password for a single authentication attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which field was absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Username,
    Password,
}

impl Credentials {
    /// Pull credentials out of the form. The username is trimmed; the
    /// password is taken as-is.
    pub fn extract(form: LoginForm) -> Result<Self, MissingField> {
        let username = form
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(MissingField::Username)?;

        let password = form
            .password
            .filter(|p| !p.is_empty())
            .ok_or(MissingField::Password)?;

        Ok(Self { username, password })
    }
}
