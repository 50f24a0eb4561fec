use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::ApiError;

/// Hashes a password with bcrypt on the blocking pool.
///
/// `cost` defaults to [`DEFAULT_COST`]; tests pass a low cost to stay fast.
pub async fn hash_password(password: &str, cost: Option<u32>) -> Result<String, ApiError> {
    let password = password.to_string();
    let cost = cost.unwrap_or(DEFAULT_COST);

    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, ApiError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    let outcome = tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| ApiError::Internal(format!("password verification task failed: {e}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be checked");
            Ok(false)
        }
    }
}
