//! Fixture service - seed data loading
//!
//! Seed documents are JSON:
//! ```json
//! {
//!   "users": [{ "email": "a@example.com", "password": "pw", "superuser": false }],
//!   "tags": [{ "user": "a@example.com", "name": "Vegan" }],
//!   "ingredients": [{ "user": "a@example.com", "name": "Salt" }],
//!   "recipes": [{
//!     "user": "a@example.com", "title": "Salad", "timeMinutes": 10, "price": "3.50",
//!     "tags": ["Vegan"], "ingredients": ["Salt"], "image": "salad.jpg"
//!   }]
//! }
//! ```
//! Owners are referenced by email, tags and ingredients by name within the
//! owner's catalog. Everything goes through the services, so the usual
//! validation applies.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{CatalogService, NewRecipe};
use super::user::{ExtraFields, UserService};
use crate::domain::result::{Error, Result};
use crate::domain::User;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureDocument {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub tags: Vec<NamedFixture>,
    #[serde(default)]
    pub ingredients: Vec<NamedFixture>,
    #[serde(default)]
    pub recipes: Vec<RecipeFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub superuser: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A tag or ingredient
#[derive(Debug, Clone, Deserialize)]
pub struct NamedFixture {
    pub user: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFixture {
    pub user: String,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Original upload file name; stored as a generated path
    #[serde(default)]
    pub image: Option<String>,
}

/// Counts of records created by a load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixtureReport {
    pub users: usize,
    pub tags: usize,
    pub ingredients: usize,
    pub recipes: usize,
}

pub struct FixtureService {
    users: UserService,
    catalog: CatalogService,
}

impl FixtureService {
    pub fn new(users: UserService, catalog: CatalogService) -> Self {
        Self { users, catalog }
    }

    /// Load a seed document from a JSON file
    pub fn load_file(&self, path: &Path) -> Result<FixtureReport> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&content)
    }

    pub fn load_str(&self, json: &str) -> Result<FixtureReport> {
        let doc: FixtureDocument = serde_json::from_str(json)?;
        self.load(doc)
    }

    /// Load a seed document. Stops at the first invalid record; records
    /// created before it are kept.
    pub fn load(&self, doc: FixtureDocument) -> Result<FixtureReport> {
        let mut report = FixtureReport::default();

        for fixture in doc.users {
            let mut extra = fixture.extra;
            if fixture.superuser {
                extra.is_staff = true;
                extra.is_superuser = true;
            }
            self.users.create_user_with(
                fixture.email.as_deref(),
                fixture.password.as_deref(),
                extra,
            )?;
            report.users += 1;
        }

        for fixture in doc.tags {
            let owner = self.owner(&fixture.user)?;
            self.catalog.create_tag(owner.id, &fixture.name)?;
            report.tags += 1;
        }

        for fixture in doc.ingredients {
            let owner = self.owner(&fixture.user)?;
            self.catalog.create_ingredient(owner.id, &fixture.name)?;
            report.ingredients += 1;
        }

        for fixture in doc.recipes {
            let owner = self.owner(&fixture.user)?;
            let mut new = NewRecipe::new(owner.id, fixture.title, fixture.time_minutes, fixture.price);
            new.link = fixture.link;
            new.tags = self.resolve_tags(owner.id, &fixture.tags)?;
            new.ingredients = self.resolve_ingredients(owner.id, &fixture.ingredients)?;

            let recipe = self.catalog.create_recipe(new)?;
            if let Some(filename) = fixture.image.as_deref() {
                self.catalog.set_recipe_image(recipe.id, filename)?;
            }
            report.recipes += 1;
        }

        Ok(report)
    }

    fn owner(&self, email: &str) -> Result<User> {
        self.users
            .get_by_email(email)?
            .ok_or_else(|| Error::not_found(format!("user with email '{}'", email)))
    }

    fn resolve_tags(&self, owner: Uuid, names: &[String]) -> Result<Vec<Uuid>> {
        let tags = self.catalog.list_tags(owner)?;
        names
            .iter()
            .map(|name| {
                tags.iter()
                    .find(|t| &t.name == name)
                    .map(|t| t.id)
                    .ok_or_else(|| Error::not_found(format!("tag '{}'", name)))
            })
            .collect()
    }

    fn resolve_ingredients(&self, owner: Uuid, names: &[String]) -> Result<Vec<Uuid>> {
        let ingredients = self.catalog.list_ingredients(owner)?;
        names
            .iter()
            .map(|name| {
                ingredients
                    .iter()
                    .find(|i| &i.name == name)
                    .map(|i| i.id)
                    .ok_or_else(|| Error::not_found(format!("ingredient '{}'", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryRepository;

    const SEED: &str = r#"{
        "users": [
            { "email": "Cook@Example.com", "password": "Password123", "name": "Cook" },
            { "email": "admin@example.com", "password": "adminpass", "superuser": true }
        ],
        "tags": [{ "user": "cook@example.com", "name": "Vegan" }],
        "ingredients": [
            { "user": "cook@example.com", "name": "Salt" },
            { "user": "cook@example.com", "name": "Cucumber" }
        ],
        "recipes": [{
            "user": "cook@example.com",
            "title": "Cucumber salad",
            "timeMinutes": 10,
            "price": "3.5",
            "tags": ["Vegan"],
            "ingredients": ["Cucumber", "Salt"],
            "image": "salad.jpg"
        }]
    }"#;

    fn services() -> (UserService, CatalogService, FixtureService) {
        let repo = Arc::new(MemoryRepository::new());
        let users = UserService::new(repo.clone());
        let catalog = CatalogService::new(repo);
        let fixtures = FixtureService::new(users.clone(), catalog.clone());
        (users, catalog, fixtures)
    }

    #[test]
    fn test_load_seed() {
        let (users, catalog, fixtures) = services();

        let report = fixtures.load_str(SEED).unwrap();
        assert_eq!(
            report,
            FixtureReport {
                users: 2,
                tags: 1,
                ingredients: 2,
                recipes: 1
            }
        );

        let cook = users.get_by_email("cook@example.com").unwrap().unwrap();
        assert_eq!(cook.email, "cook@example.com");
        assert_eq!(cook.name, "Cook");
        assert!(cook.check_password("Password123"));
        assert!(!cook.is_superuser);

        let admin = users.get_by_email("admin@example.com").unwrap().unwrap();
        assert!(admin.is_staff && admin.is_superuser);

        let recipes = catalog.list_recipes(cook.id).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].to_string(), "Cucumber salad");
        assert_eq!(recipes[0].price.to_string(), "3.50");
        assert_eq!(recipes[0].ingredients.len(), 2);
        let image = recipes[0].image.as_deref().unwrap();
        assert!(image.starts_with("uploads/recipe/") && image.ends_with(".jpg"));
    }

    #[test]
    fn test_missing_email_fails() {
        let (_, _, fixtures) = services();
        let err = fixtures
            .load_str(r#"{ "users": [{ "password": "pass123" }] }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_unknown_tag_reference() {
        let (_, _, fixtures) = services();
        let doc = r#"{
            "users": [{ "email": "a@example.com" }],
            "recipes": [{ "user": "a@example.com", "title": "T", "timeMinutes": 1,
                          "price": "1.00", "tags": ["Nope"] }]
        }"#;
        assert!(matches!(fixtures.load_str(doc), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        let (_, _, fixtures) = services();
        assert!(matches!(fixtures.load_str("{"), Err(Error::Json(_))));
    }
}
