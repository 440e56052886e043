use super::errors::PasswordError;

/// Largest input bcrypt consumes. Longer passwords are rejected, never truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Provides adaptive one-way password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with the bcrypt default cost
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Create a password hasher with an explicit bcrypt cost factor.
    ///
    /// # Arguments
    /// * `cost` - Work factor (4..=31), every increment doubles hashing time
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured bcrypt cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Uses bcrypt with a random salt embedded in the output.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (includes version, cost, salt, and hash)
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds 72 bytes
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `VerificationFailed` - Stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let matches = bcrypt::verify(password, hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        if matches {
            Ok(())
        } else {
            Err(PasswordError::Mismatch)
        }
    }

    /// Spend one full-cost verification on a placeholder hash.
    ///
    /// Used when there is no stored hash to check against, so that path
    /// costs the same as a wrong password.
    pub fn verify_placeholder(&self, password: &str) {
        let _ = self.verify(password, &self.placeholder_hash());
    }

    /// Well-formed bcrypt string at the configured cost (all-zero salt and digest).
    fn placeholder_hash(&self) -> String {
        format!("$2b${:02}${}", self.cost, ".".repeat(53))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
