//! Argon2id 密码哈希

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::ToolError;

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_password(password: &str) -> Result<(), ToolError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ToolError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// 生成 PHC 格式的哈希串，每次调用使用新的随机盐
pub fn hash_password(password: &str) -> Result<String, ToolError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ToolError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("ngoquyen938").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("ngoquyen938", &hash));
        assert!(!verify_password("ngoquyen939", &hash));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
        assert!(!verify_password("whatever", ""));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("mậtkhẩu1").is_ok());
        assert!(validate_password("12345678").is_ok());
    }
}
