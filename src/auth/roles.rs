// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Granted authorities for stored accounts.

use serde::{Deserialize, Serialize};

/// Authorities an account can be granted.
///
/// Tokens and responses carry the authority string (`ROLE_USER`,
/// `ROLE_ADMIN`), not the enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular account. New accounts get this least privileged authority.
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrative account
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}
