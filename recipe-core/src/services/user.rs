//! User service - account creation and credential checks

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::Repository;

/// Optional fields applied when creating a user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl ExtraFields {
    /// Staff + superuser flags set
    pub fn superuser() -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..Self::default()
        }
    }
}

/// User manager
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn Repository>,
    min_password_length: usize,
}

impl UserService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            min_password_length: 0,
        }
    }

    /// Reject passwords shorter than `len` characters (0 disables the check)
    pub fn with_min_password_length(mut self, len: usize) -> Self {
        self.min_password_length = len;
        self
    }

    /// Create and store a regular user
    ///
    /// The email is required and stored normalized. A `None` password leaves
    /// the account with an unusable password.
    pub fn create_user(&self, email: Option<&str>, password: Option<&str>) -> Result<User> {
        self.create_user_with(email, password, ExtraFields::default())
    }

    /// Create and store a user with staff and superuser flags set
    pub fn create_superuser(&self, email: Option<&str>, password: Option<&str>) -> Result<User> {
        self.create_user_with(email, password, ExtraFields::superuser())
    }

    /// Create and store a user with extra fields applied
    ///
    /// All validation happens before the repository is touched.
    pub fn create_user_with(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: ExtraFields,
    ) -> Result<User> {
        let email = email.ok_or_else(|| Error::validation("Users must have an email address"))?;
        let mut user = User::new(email)?;

        if let Some(raw) = password {
            self.check_password_policy(raw)?;
            user.set_password(raw)?;
        }

        if let Some(name) = extra.name {
            user.name = name;
        }
        if let Some(active) = extra.is_active {
            user.is_active = active;
        }
        user.is_staff = extra.is_staff;
        user.is_superuser = extra.is_superuser;

        self.repository.insert_user(&user)?;
        Ok(user)
    }

    /// Look up a user by email, in any casing
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository
            .get_user_by_email(&User::normalize_email(email))
    }

    pub fn get(&self, id: Uuid) -> Result<User> {
        self.repository
            .get_user(id)?
            .ok_or_else(|| Error::not_found(format!("user {}", id)))
    }

    pub fn list(&self) -> Result<Vec<User>> {
        self.repository.list_users()
    }

    /// Return the user if the email exists, the account is active and the password matches
    pub fn check_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        Ok(self
            .get_by_email(email)?
            .filter(|u| u.is_active && u.check_password(password)))
    }

    /// Replace a user's password
    pub fn set_password(&self, id: Uuid, raw: &str) -> Result<User> {
        self.check_password_policy(raw)?;
        let mut user = self.get(id)?;
        user.set_password(raw)?;
        self.repository.update_user(&user)?;
        Ok(user)
    }

    fn check_password_policy(&self, raw: &str) -> Result<()> {
        if raw.chars().count() < self.min_password_length {
            return Err(Error::validation(format!(
                "password must be at least {} characters",
                self.min_password_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRepository;

    fn service() -> (Arc<MemoryRepository>, UserService) {
        let repo = Arc::new(MemoryRepository::new());
        let service = UserService::new(repo.clone());
        (repo, service)
    }

    #[test]
    fn test_create_user_with_email_successful() {
        let (_, users) = service();
        let email = "janbrandewijn@mydomain.com";
        let password = "Password123";

        let user = users.create_user(Some(email), Some(password)).unwrap();

        assert_eq!(user.email, email);
        assert!(user.check_password(password));
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
    }

    #[test]
    fn test_create_user_with_email_normalized() {
        let (_, users) = service();
        let email = "janbrandewijn@MYDOMAIN.COM";

        let user = users.create_user(Some(email), Some("Password123")).unwrap();

        assert_eq!(user.email, email.to_lowercase());
    }

    #[test]
    fn test_create_user_invalid_email() {
        let (repo, users) = service();

        let err = users.create_user(None, Some("pass123")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = users.create_user(Some(""), Some("pass123")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(repo.is_empty());
    }

    #[test]
    fn test_create_superuser_successful() {
        let (_, users) = service();

        let user = users
            .create_superuser(Some("janbrandewijn@mydomain.com"), Some("Password123"))
            .unwrap();

        assert!(user.is_staff);
        assert!(user.is_superuser);

        let stored = users.get(user.id).unwrap();
        assert!(stored.is_staff);
        assert!(stored.is_superuser);
    }

    #[test]
    fn test_duplicate_email_in_other_casing_conflicts() {
        let (_, users) = service();
        users.create_user(Some("jan@example.com"), None).unwrap();

        let err = users.create_user(Some("JAN@Example.com"), None).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_user_without_password_cannot_log_in() {
        let (_, users) = service();
        let user = users.create_user(Some("nopass@example.com"), None).unwrap();
        assert!(!user.has_usable_password());
        assert!(users.check_credentials("nopass@example.com", "").unwrap().is_none());
    }

    #[test]
    fn test_check_credentials() {
        let (_, users) = service();
        users
            .create_user(Some("jan@example.com"), Some("Password123"))
            .unwrap();

        assert!(users
            .check_credentials("JAN@EXAMPLE.COM", "Password123")
            .unwrap()
            .is_some());
        assert!(users.check_credentials("jan@example.com", "nope").unwrap().is_none());
        assert!(users.check_credentials("who@example.com", "Password123").unwrap().is_none());
    }

    #[test]
    fn test_inactive_user_rejected() {
        let (_, users) = service();
        let extra = ExtraFields {
            is_active: Some(false),
            ..ExtraFields::default()
        };
        users
            .create_user_with(Some("off@example.com"), Some("pw"), extra)
            .unwrap();

        assert!(users.check_credentials("off@example.com", "pw").unwrap().is_none());
    }

    #[test]
    fn test_min_password_length() {
        let (repo, users) = service();
        let users = users.with_min_password_length(8);

        let err = users.create_user(Some("short@example.com"), Some("abc")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.is_empty());

        let user = users
            .create_user(Some("long@example.com"), Some("abcdefgh"))
            .unwrap();
        assert!(users.set_password(user.id, "tiny").is_err());

        let user = users.set_password(user.id, "new-password").unwrap();
        assert!(user.check_password("new-password"));
        assert!(users.get(user.id).unwrap().check_password("new-password"));
    }
}
