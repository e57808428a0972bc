//! Password digests.
//!
//! bcrypt is deliberately slow, so hashing and verification run on tokio's
//! blocking pool.

use crate::ResultEngine;

/// Work factor used in production.
pub const DEFAULT_HASH_COST: u32 = 10;

/// One-way salted hashing of plaintext passwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hasher {
    cost: u32,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl Hasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted digest of `password`.
    pub async fn hash(&self, password: String) -> ResultEngine<String> {
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(digest)
    }

    /// Check `password` against a digest produced by [`Hasher::hash`].
    pub async fn verify(&self, password: String, digest: String) -> ResultEngine<bool> {
        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest)).await??;
        Ok(matches)
    }
}
