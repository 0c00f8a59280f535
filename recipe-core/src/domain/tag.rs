//! Tag domain model

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A label a user attaches to their recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
        }
    }

    /// Validate tag data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("tag name cannot be empty");
        }
        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_str() {
        let tag = Tag::new(Uuid::new_v4(), "Vegan");
        assert_eq!(tag.to_string(), tag.name);
    }

    #[test]
    fn test_tag_validation() {
        let mut tag = Tag::new(Uuid::new_v4(), "Dessert");
        assert!(tag.validate().is_ok());

        tag.name = "  ".to_string();
        assert!(tag.validate().is_err());
    }
}
