use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted, cost-tunable password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Cost factor used by [`PasswordHasher::new`].
    pub const DEFAULT_COST: u32 = 12;

    /// Smallest cost bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// Largest cost bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// Create a new password hasher with the default cost factor.
    ///
    /// # Returns
    /// PasswordHasher instance using cost 12
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a password hasher with an explicit cost factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (log2 of the number of rounds)
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range bcrypt supports
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    /// Configured cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a random salt on every call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt><digest>`), self-describing for verification
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Salt and cost are read from the stored hash. A hash that cannot be parsed
    /// is treated as a mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(PasswordHasher::MIN_COST).expect("valid cost")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
        assert!(!hasher.verify("my_secure_passwore", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_hash_embeds_cost_and_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("password").expect("Failed to hash password");
        let second = hasher.hash("password").expect("Failed to hash password");

        assert!(first.starts_with("$2b$04$"));
        assert_ne!(first, second);
        assert!(hasher.verify("password", &second));
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::new().cost(), 12);
    }

    #[test]
    fn test_with_cost_out_of_range() {
        assert!(matches!(
            PasswordHasher::with_cost(3),
            Err(PasswordError::InvalidCost(3))
        ));
        assert!(matches!(
            PasswordHasher::with_cost(32),
            Err(PasswordError::InvalidCost(32))
        ));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
    }
}
