// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use authgate_server::{
    api::router,
    auth::Role,
    config::AppConfig,
    models::JoinRequest,
    state::AppState,
    store::{AccountError, AccountRepository, InMemoryAccountStore},
    telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    let store = Arc::new(InMemoryAccountStore::new());
    let state = AppState::from_config(&config, store);

    if let Some(seed) = &config.seed_admin {
        let request = JoinRequest {
            username: seed.username.clone(),
            password: seed.password.clone(),
        };
        match state
            .accounts
            .create_with_roles(request, vec![Role::Admin, Role::User])
            .await
        {
            Ok(()) => tracing::info!(username = %seed.username, "seeded admin account"),
            Err(AccountError::Conflict(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!(
        addr = %config.bind_addr,
        token_ttl_secs = config.token_ttl.num_seconds(),
        "Authgate server listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
