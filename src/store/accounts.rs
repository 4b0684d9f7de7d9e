// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ring::rand::SystemRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::password::PasswordHash;
use super::{AccountError, AccountRepository, MAX_PASSWORD_LEN, MAX_USERNAME_LEN};
use crate::auth::gate::{CredentialVerifier, VerificationError, VerifiedAccount};
use crate::auth::Role;
use crate::models::JoinRequest;

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: PasswordHash,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

/// Accounts keyed by username.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    rng: SystemRandom,
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            rng: SystemRandom::new(),
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    pub async fn find(&self, username: &str) -> Option<Account> {
        self.accounts.read().await.get(username).cloned()
    }
}

fn validate(request: &JoinRequest) -> Result<String, AccountError> {
    let username = request.username.trim();

    if username.is_empty() {
        return Err(AccountError::Validation("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AccountError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AccountError::Validation(
            "username must not contain whitespace".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(AccountError::Validation("password is required".to_string()));
    }
    if request.password.chars().count() > MAX_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }

    Ok(username.to_string())
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn create_with_roles(
        &self,
        request: JoinRequest,
        roles: Vec<Role>,
    ) -> Result<(), AccountError> {
        let username = validate(&request)?;

        // Cheap check first so duplicates don't pay for hashing
        if self.accounts.read().await.contains_key(&username) {
            return Err(AccountError::Conflict(username));
        }

        let rng = self.rng.clone();
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || PasswordHash::new(&password, &rng))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&username) {
            return Err(AccountError::Conflict(username));
        }

        let account = Account {
            id: Uuid::new_v4(),
            username: username.clone(),
            password_hash,
            roles,
            created_at: Utc::now(),
        };
        tracing::info!(username = %account.username, id = %account.id, "account created");
        accounts.insert(username, account);
        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryAccountStore {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<VerifiedAccount, VerificationError> {
        let account = self.find(username).await;

        // Unknown users pay the same hashing cost as real ones
        let stored = account
            .as_ref()
            .map_or_else(PasswordHash::decoy, |a| a.password_hash.clone());
        let password = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || stored.matches(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password check task failed");
                VerificationError::Unavailable
            })?;

        let Some(account) = account else {
            return Err(VerificationError::UnknownUser);
        };
        if !matches {
            return Err(VerificationError::BadPassword);
        }

        Ok(VerifiedAccount {
            username: account.username,
            roles: account.roles,
        })
    }
}
