//! bcrypt on the blocking pool; a hash takes long enough to stall the
//! runtime otherwise.

use super::IdentityError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, IdentityError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| IdentityError::Hashing(format!("Hashing task failed: {e}")))?
        .map_err(|e| IdentityError::Hashing(e.to_string()))
}

/// `false` for a wrong password. A malformed stored hash is an error.
pub async fn verify_password(password: String, hash: String) -> Result<bool, IdentityError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| IdentityError::Hashing(format!("Verification task failed: {e}")))?
        .map_err(|e| IdentityError::Hashing(e.to_string()))
}
