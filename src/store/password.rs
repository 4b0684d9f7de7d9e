// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Salted PBKDF2-HMAC-SHA256 password hashes.

use std::num::NonZeroU32;

use ring::{
    pbkdf2,
    rand::{SecureRandom, SystemRandom},
};

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

const ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Stored form of a password. Never holds the plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    hash: [u8; HASH_LEN],
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// The system RNG refused to produce a salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to generate password salt")]
pub struct SaltError;

impl PasswordHash {
    pub fn new(password: &str, rng: &SystemRandom) -> Result<Self, SaltError> {
        let mut salt = [0u8; SALT_LEN];
        rng.fill(&mut salt).map_err(|_| SaltError)?;
        Ok(Self::with_salt(password, salt))
    }

    fn with_salt(password: &str, salt: [u8; SALT_LEN]) -> Self {
        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(ALGORITHM, ITERATIONS, &salt, password.as_bytes(), &mut hash);
        Self { salt, hash }
    }

    /// Constant-time comparison against `password`.
    pub fn matches(&self, password: &str) -> bool {
        pbkdf2::verify(ALGORITHM, ITERATIONS, &self.salt, password.as_bytes(), &self.hash).is_ok()
    }

    /// A hash no password matches, used to spend the same time on unknown
    /// usernames as on real ones.
    pub fn decoy() -> Self {
        Self {
            salt: [0u8; SALT_LEN],
            hash: [0u8; HASH_LEN],
        }
    }
}
