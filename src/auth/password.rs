//! Password Hashing
//! Mission: One-way salted bcrypt digests; plaintext never leaves this module

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::debug;

/// bcrypt hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. A fresh salt is drawn on every call, so the
    /// same input never yields the same digest twice.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        hash(plaintext, self.cost).context("Failed to hash password")
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// A malformed digest is a mismatch, not an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                debug!("Rejecting malformed password digest: {}", e);
                false
            }
        }
    }
}
