use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fresh random salt per hash. The salt and the cost
/// parameters travel inside the PHC string, so verification never needs
/// the configuration that produced a digest.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    decoy: OnceLock<String>,
}

impl PasswordHasher {
    /// Create a hasher with the given cost factor (Argon2 iteration count)
    /// and the default memory size.
    ///
    /// # Errors
    /// * `InvalidParameters` - Cost factor rejected by Argon2
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        Self::with_memory(cost, Params::DEFAULT_M_COST)
    }

    /// Create a hasher with explicit iteration count and memory size in KiB.
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters rejected by Argon2
    pub fn with_memory(cost: u32, memory_kib: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            params,
            decoy: OnceLock::new(),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false on mismatch and on a digest that does not parse.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        // Parameters are taken from the digest, not from `self`.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against a throwaway digest built with this
    /// hasher's parameters. Always false.
    ///
    /// Lets a lookup miss cost the same as a wrong password.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self
            .decoy
            .get_or_init(|| self.hash("decoy-password").unwrap_or_default());

        std::hint::black_box(self.verify(password, decoy));
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
            decoy: OnceLock::new(),
        }
    }
}
