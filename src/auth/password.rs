use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hashed).unwrap());
        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_verify_with_garbage_hash() {
        // bcrypt rejects strings that are not hashes at all.
        match verify_password("anything", "definitely-not-a-bcrypt-hash") {
            Err(AppError::Internal(msg)) => assert!(msg.contains("Failed to verify password")),
            Ok(true) => panic!("garbage hash must not verify"),
            Ok(false) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
