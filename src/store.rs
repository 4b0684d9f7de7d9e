// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account storage.
//!
//! The store is the collaborator behind both public endpoints: `/join`
//! creates accounts through [`AccountRepository`], and `/login` checks
//! passwords through [`CredentialVerifier`](crate::auth::CredentialVerifier).
//! It owns username rules, uniqueness and password hashing.
//!
//! Only an in-memory implementation exists; accounts are lost on restart.

use async_trait::async_trait;

use crate::auth::Role;
use crate::models::JoinRequest;

pub mod accounts;
pub mod password;

pub use accounts::InMemoryAccountStore;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// Longest accepted password, in characters.
pub const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("username '{0}' is already taken")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("account storage failure: {0}")]
    Internal(String),
}

/// Creates accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account with the default role.
    async fn create(&self, request: JoinRequest) -> Result<(), AccountError> {
        self.create_with_roles(request, vec![Role::default()]).await
    }

    async fn create_with_roles(
        &self,
        request: JoinRequest,
        roles: Vec<Role>,
    ) -> Result<(), AccountError>;
}
