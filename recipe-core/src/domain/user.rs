//! User domain model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::password;
use super::result::{Error, Result};

/// A user account, identified by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Always stored normalized (see [`User::normalize_email`])
    pub email: String,
    pub name: String,
    /// Argon2id PHC string; `None` means the password is unusable
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create an active, unprivileged user with an unusable password
    ///
    /// Fails if the email is blank.
    pub fn new(email: &str) -> Result<Self> {
        let email = Self::normalize_email(email);
        if email.is_empty() {
            return Err(Error::validation("Users must have an email address"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            name: String::new(),
            password_hash: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        })
    }

    /// Normalize an email for storage and lookup: trimmed and fully lowercased
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Hash and store a new password
    pub fn set_password(&mut self, raw: &str) -> Result<()> {
        self.password_hash = Some(password::hash_password(raw)?);
        Ok(())
    }

    /// Mark the password as unusable
    pub fn set_unusable_password(&mut self) {
        self.password_hash = None;
    }

    pub fn has_usable_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Check a raw password against the stored hash
    pub fn check_password(&self, raw: &str) -> bool {
        match &self.password_hash {
            Some(hash) => password::verify_password(raw, hash),
            None => false,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("test@example.com").unwrap();
        assert_eq!(user.email, "test@example.com");
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(!user.has_usable_password());
    }

    #[test]
    fn test_email_normalization_lowercases_whole_address() {
        assert_eq!(
            User::normalize_email("janbrandewijn@MYDOMAIN.COM"),
            "janbrandewijn@mydomain.com"
        );
        assert_eq!(User::normalize_email(" Jan@Example.Com "), "jan@example.com");
    }

    #[test]
    fn test_blank_email_rejected() {
        assert!(matches!(User::new(""), Err(Error::Validation(_))));
        assert!(matches!(User::new("   "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_password_roundtrip() {
        let mut user = User::new("a@b.com").unwrap();
        assert!(!user.check_password("Password123"));

        user.set_password("Password123").unwrap();
        assert!(user.check_password("Password123"));
        assert!(!user.check_password("wrong"));

        user.set_unusable_password();
        assert!(!user.check_password("Password123"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = User::new("a@b.com").unwrap();
        user.set_password("secret").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_display_is_email() {
        let user = User::new("Someone@Example.com").unwrap();
        assert_eq!(user.to_string(), "someone@example.com");
    }
}
