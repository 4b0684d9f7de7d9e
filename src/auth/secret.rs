// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC signing secret.
//!
//! The secret is read once at startup and handed to [`TokenCodec`] by value.
//! Replacing it means restarting the process, which invalidates every token
//! issued under the previous secret.
//!
//! [`TokenCodec`]: super::codec::TokenCodec

use std::fmt;

/// Minimum key length for HS256 (256 bits).
pub const MIN_SECRET_BYTES: usize = 32;

/// Error returned when the configured secret cannot be used for signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("signing secret is empty")]
    Empty,

    #[error("signing secret is {actual} bytes, at least {minimum} are required for HS256")]
    TooShort { actual: usize, minimum: usize },
}

/// Validated HMAC key material, used verbatim as the HS256 key.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, SecretError> {
        let bytes = secret.into().into_bytes();

        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(SecretError::TooShort {
                actual: bytes.len(),
                minimum: MIN_SECRET_BYTES,
            });
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(<{} bytes redacted>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_32_byte_secret() {
        let secret = SigningSecret::new("test-secret-please-use-32-bytes+").unwrap();
        assert_eq!(secret.as_bytes().len(), 32);
    }

    #[test]
    fn rejects_short_secret() {
        let err = SigningSecret::new("too-short").unwrap_err();
        assert_eq!(
            err,
            SecretError::TooShort {
                actual: 9,
                minimum: MIN_SECRET_BYTES
            }
        );
    }

    #[test]
    fn rejects_empty_secret() {
        assert_eq!(SigningSecret::new("").unwrap_err(), SecretError::Empty);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let secret = SigningSecret::new("test-secret-please-use-32-bytes+").unwrap();
        let printed = format!("{secret:?}");
        assert!(!printed.contains("test-secret"));
        assert!(printed.contains("32 bytes"));
    }
}
