//! In-memory repository implementation
//!
//! Stands in for a database-backed store. All tables live behind a single
//! `RwLock` so multi-table reads see a consistent snapshot.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Ingredient, Recipe, Tag, User};
use crate::ports::Repository;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    tags: HashMap<Uuid, Tag>,
    ingredients: HashMap<Uuid, Ingredient>,
    recipes: HashMap<Uuid, Recipe>,
}

/// Thread-safe in-memory repository
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves the maps intact, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Total number of stored records across all tables
    pub fn len(&self) -> usize {
        let tables = self.read();
        tables.users.len() + tables.tags.len() + tables.ingredients.len() + tables.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn email_taken(tables: &Tables, email: &str, except: Option<Uuid>) -> bool {
    tables
        .users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

impl Repository for MemoryRepository {
    fn insert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.write();
        if tables.users.contains_key(&user.id) {
            return Err(Error::conflict(format!("user {} already exists", user.id)));
        }
        if email_taken(&tables, &user.email, None) {
            return Err(Error::conflict(format!(
                "a user with email '{}' already exists",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let mut tables = self.write();
        if !tables.users.contains_key(&user.id) {
            return Err(Error::not_found(format!("user {}", user.id)));
        }
        if email_taken(&tables, &user.email, Some(user.id)) {
            return Err(Error::conflict(format!(
                "a user with email '{}' already exists",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.read().users.get(&id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.read().users.values().find(|u| u.email == email).cloned())
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.read().users.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    fn insert_tag(&self, tag: &Tag) -> Result<()> {
        let mut tables = self.write();
        if tables.tags.contains_key(&tag.id) {
            return Err(Error::conflict(format!("tag {} already exists", tag.id)));
        }
        tables.tags.insert(tag.id, tag.clone());
        Ok(())
    }

    fn get_tag(&self, id: Uuid) -> Result<Option<Tag>> {
        Ok(self.read().tags.get(&id).cloned())
    }

    fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = self
            .read()
            .tags
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<()> {
        let mut tables = self.write();
        if tables.ingredients.contains_key(&ingredient.id) {
            return Err(Error::conflict(format!(
                "ingredient {} already exists",
                ingredient.id
            )));
        }
        tables.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(())
    }

    fn get_ingredient(&self, id: Uuid) -> Result<Option<Ingredient>> {
        Ok(self.read().ingredients.get(&id).cloned())
    }

    fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>> {
        let mut ingredients: Vec<Ingredient> = self
            .read()
            .ingredients
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ingredients)
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<()> {
        let mut tables = self.write();
        if tables.recipes.contains_key(&recipe.id) {
            return Err(Error::conflict(format!("recipe {} already exists", recipe.id)));
        }
        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    fn modify_recipe(
        &self,
        id: Uuid,
        apply: &mut dyn FnMut(&mut Recipe) -> Result<()>,
    ) -> Result<Recipe> {
        let mut tables = self.write();
        let existing = tables
            .recipes
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("recipe {}", id)))?;
        let mut recipe = existing.clone();
        apply(&mut recipe)?;
        *existing = recipe.clone();
        Ok(recipe)
    }

    fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>> {
        Ok(self.read().recipes.get(&id).cloned())
    }

    fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .read()
            .recipes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(recipes)
    }
}
