// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless HS256 token authentication.
//!
//! ## Auth Flow
//!
//! 1. Client posts `username`/`password` as a form to `/login`
//! 2. [`AuthenticationGate`] checks them through the injected
//!    [`CredentialVerifier`] and issues a token
//! 3. The token comes back as `Authorization: Bearer <token>`
//! 4. Later requests send the same header; the [`verify_token`] filter
//!    verifies it and installs a [`SecurityContext`]
//! 5. Handlers read the principal with the [`CurrentUser`] extractor
//!
//! ## Security
//!
//! - One signing secret per process, at least 32 bytes, never rotated in place
//! - Only HS256 is accepted; `alg: none` and foreign algorithms are refused
//! - Wrong password and unknown user produce the same empty 401

pub mod clock;
pub mod codec;
pub mod context;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod middleware;
pub mod roles;
pub mod secret;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{TokenClaims, TokenCodec, TokenError};
pub use context::{Principal, SecurityContext};
pub use credentials::{Credentials, LoginForm};
pub use error::AuthError;
pub use extractor::CurrentUser;
pub use gate::{AuthOutcome, AuthenticationGate, CredentialVerifier, VerifiedAccount};
pub use middleware::verify_token;
pub use roles::Role;
pub use secret::SigningSecret;
