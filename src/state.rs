// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{AuthenticationGate, CredentialVerifier, SigningSecret, TokenCodec};
use crate::config::AppConfig;
use crate::store::{AccountRepository, InMemoryAccountStore};

/// Shared, read-only handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub gate: AuthenticationGate,
    pub accounts: Arc<dyn AccountRepository>,
}

impl AppState {
    /// Wire the gate and the registration endpoint to the same store.
    pub fn new(codec: TokenCodec, store: Arc<InMemoryAccountStore>, token_ttl: Duration) -> Self {
        let codec = Arc::new(codec);
        let verifier: Arc<dyn CredentialVerifier> = store.clone();
        Self {
            gate: AuthenticationGate::new(verifier, codec.clone(), token_ttl),
            codec,
            accounts: store,
        }
    }

    pub fn from_config(config: &AppConfig, store: Arc<InMemoryAccountStore>) -> Self {
        Self::new(TokenCodec::new(config.secret.clone()), store, config.token_ttl)
    }

    /// State with a fresh store, for tests.
    pub fn with_secret(secret: SigningSecret) -> Self {
        Self::new(
            TokenCodec::new(secret),
            Arc::new(InMemoryAccountStore::new()),
            Duration::hours(10),
        )
    }
}
