// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token issuance and verification.
//!
//! ## Wire Format
//!
//! `base64url(header).base64url(payload).base64url(signature)` with the
//! payload claims:
//!
//! | Claim | Type | Meaning |
//! |-------|------|---------|
//! | `username` | string | authenticated account |
//! | `role` | string | first granted authority (e.g. `ROLE_USER`) |
//! | `iat` | seconds since epoch | issued at |
//! | `exp` | seconds since epoch | expires at |
//!
//! ## Expiry
//!
//! [`TokenCodec::decode`] only checks structure and signature. Expiry is a
//! separate call ([`TokenCodec::is_expired`]) so callers decide how to report
//! it. [`TokenCodec::verify`] does both for the request filter.

use std::collections::HashSet;
use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::context::Principal;
use super::secret::SigningSecret;

/// The only algorithm this service signs or accepts.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token verification and encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

/// Payload carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub role: String,
    /// Issued at (seconds since Unix epoch)
    pub iat: i64,
    /// Expires at (seconds since Unix epoch)
    pub exp: i64,
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Principal {
            username: claims.username,
            role: claims.role,
        }
    }
}

#[derive(Deserialize)]
struct SegmentHeader {
    alg: String,
}

/// Issues and verifies tokens with a single process-wide secret.
///
/// Cheap to share behind an `Arc`; holds no mutable state.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(secret: SigningSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: SigningSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Sign a token for `username`/`role` that expires `ttl` from now.
    pub fn issue(&self, username: &str, role: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token lifetime overflows".to_string()))?;

        let claims = TokenClaims {
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Parse the token and verify its signature. Does not check expiry.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        check_structure(token)?;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                // Header and payload were already checked, so a base64 failure
                // here can only come from the signature segment.
                ErrorKind::Base64(_) => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            },
        )?;

        Ok(data.claims)
    }

    /// `true` when the token's `exp` is strictly before now.
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.decode(token)?;
        Ok(self.claims_expired(&claims))
    }

    pub fn username(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token)?.username)
    }

    pub fn role(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token)?.role)
    }

    /// Decode, verify and reject expired tokens in one pass.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let claims = self.decode(token)?;
        if self.claims_expired(&claims) {
            return Err(TokenError::Expired);
        }
        Ok(claims.into())
    }

    /// Compares against the full-precision clock, so a token is expired
    /// from the first instant after `exp`.
    fn claims_expired(&self, claims: &TokenClaims) -> bool {
        DateTime::from_timestamp(claims.exp, 0).is_none_or(|exp| exp < self.clock.now())
    }
}

/// Reject anything that is not three segments with base64url JSON header and
/// payload, and any header that does not name HS256.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let header_bytes = Base64UrlUnpadded::decode_vec(segments[0])
        .map_err(|_| TokenError::Malformed("header is not base64url".to_string()))?;
    let header: SegmentHeader = serde_json::from_slice(&header_bytes)
        .map_err(|_| TokenError::Malformed("header is not a JSON object".to_string()))?;

    let payload_bytes = Base64UrlUnpadded::decode_vec(segments[1])
        .map_err(|_| TokenError::Malformed("payload is not base64url".to_string()))?;
    serde_json::from_slice::<serde_json::Value>(&payload_bytes)
        .map_err(|_| TokenError::Malformed("payload is not JSON".to_string()))?;

    if header.alg != "HS256" {
        return Err(TokenError::InvalidSignature);
    }

    Ok(())
}
