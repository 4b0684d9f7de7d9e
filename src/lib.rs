// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authgate - Stateless JWT Authentication Service
//!
//! Exchanges form credentials for an HS256 token, guards protected routes
//! with that token and registers new accounts.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, login gate, token filter and identity extractor
//! - `config` - Environment configuration
//! - `store` - In-memory account storage and password hashing
//! - `telemetry` - Logging setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
