use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

// =============================================================================
// Secret Hashing
// =============================================================================

/// Hash a secret (account password or API key) with Argon2id
///
/// Returns the PHC string, which embeds the algorithm parameters and salt so
/// the hash can be verified later without extra state.
pub fn hash_secret(plain_text: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plain_text.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

// =============================================================================
// Credential Verification
// =============================================================================

/// Verify a presented password against one stored hash
///
/// Strict boolean: a mismatch, an empty hash, or a hash that cannot be parsed
/// all return `false`.
pub fn verify_password(presented: &str, stored_hash: &str) -> bool {
    if stored_hash.is_empty() {
        return false;
    }

    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Unparseable credential hash: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(presented.as_bytes(), &parsed)
        .is_ok()
}

/// Verify a presented API key against the configured reference hashes
///
/// Returns `true` when any reference matches and `false` when the set is
/// empty or nothing matches.
pub fn verify_api_key(presented: &str, references: &[String]) -> bool {
    references
        .iter()
        .any(|reference| verify_password(presented, reference))
}
