// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login gate: credentials in, signed token out.
//!
//! ## Flow
//!
//! 1. Extract username/password from the form. A missing field rejects the
//!    attempt without calling the verifier.
//! 2. Hand the credentials to the injected [`CredentialVerifier`].
//! 3. On success, issue a token for the account's first granted role.
//!
//! Each attempt is independent: no retries, no lockout, no session.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use super::codec::{TokenCodec, TokenError};
use super::context::Principal;
use super::credentials::{Credentials, LoginForm, MissingField};
use super::roles::Role;

/// Account returned by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub username: String,
    /// Granted roles, most significant first.
    pub roles: Vec<Role>,
}

/// Why the verifier refused the credentials. Never shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("unknown user")]
    UnknownUser,

    #[error("bad password")]
    BadPassword,

    #[error("credential check unavailable")]
    Unavailable,
}

/// Checks a username/password pair against stored accounts.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<VerifiedAccount, VerificationError>;
}

/// Internal reason for a rejected attempt, for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingCredentials(MissingField),
    BadCredentials,
    NoGrantedRole,
}

/// Result of one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated { principal: Principal, token: String },
    Rejected(RejectReason),
}

#[derive(Clone)]
pub struct AuthenticationGate {
    verifier: Arc<dyn CredentialVerifier>,
    codec: Arc<TokenCodec>,
    token_ttl: Duration,
}

impl AuthenticationGate {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        codec: Arc<TokenCodec>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            verifier,
            codec,
            token_ttl,
        }
    }

    /// Run one attempt. Only token encoding failures are errors; every
    /// credential problem is an `AuthOutcome::Rejected`.
    pub async fn authenticate(&self, form: LoginForm) -> Result<AuthOutcome, TokenError> {
        let credentials = match Credentials::extract(form) {
            Ok(credentials) => credentials,
            Err(field) => {
                return Ok(self.reject(None, RejectReason::MissingCredentials(field)));
            }
        };

        let account = match self
            .verifier
            .verify(&credentials.username, &credentials.password)
            .await
        {
            Ok(account) => account,
            Err(err) => {
                tracing::debug!(username = %credentials.username, error = %err, "credential check failed");
                return Ok(self.reject(Some(&credentials.username), RejectReason::BadCredentials));
            }
        };

        self.on_success(account)
    }

    fn on_success(&self, account: VerifiedAccount) -> Result<AuthOutcome, TokenError> {
        let Some(role) = account.roles.first() else {
            return Ok(self.reject(Some(&account.username), RejectReason::NoGrantedRole));
        };

        let principal = Principal {
            username: account.username,
            role: role.authority().to_string(),
        };
        let token = self
            .codec
            .issue(&principal.username, &principal.role, self.token_ttl)?;

        tracing::info!(username = %principal.username, role = %principal.role, "login succeeded");
        Ok(AuthOutcome::Authenticated { principal, token })
    }

    fn reject(&self, username: Option<&str>, reason: RejectReason) -> AuthOutcome {
        tracing::warn!(username = username.unwrap_or("<none>"), ?reason, "login rejected");
        AuthOutcome::Rejected(reason)
    }
}
