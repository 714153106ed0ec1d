//! Password hashing.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with the given bcrypt cost.
///
/// # Errors
///
/// [`PasswordError::Bcrypt`] for an invalid cost, [`PasswordError::Join`]
/// if the blocking task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Compare a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// A malformed stored hash is [`PasswordError::Bcrypt`], not a mismatch.
/// [`PasswordError::Join`] if the blocking task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}
