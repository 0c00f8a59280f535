//! Catalog service - tags, ingredients and recipes

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::upload::UploadPathGenerator;
use crate::adapters::ids::RandomIdGenerator;
use crate::domain::result::{Error, Result};
use crate::domain::{Ingredient, Recipe, Tag};
use crate::ports::{IdGenerator, Repository};

/// Input for [`CatalogService::create_recipe`]
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: Option<String>,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl NewRecipe {
    pub fn new(user_id: Uuid, title: impl Into<String>, time_minutes: u32, price: Decimal) -> Self {
        Self {
            user_id,
            title: title.into(),
            time_minutes,
            price,
            link: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }
}

/// A recipe with its tags and ingredients resolved
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(rename = "tag_list")]
    pub tags: Vec<Tag>,
    #[serde(rename = "ingredient_list")]
    pub ingredients: Vec<Ingredient>,
}

/// Catalog service for a user's tags, ingredients and recipes
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn Repository>,
    uploads: UploadPathGenerator<Arc<dyn IdGenerator>>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self::with_upload_paths(repository, UploadPathGenerator::shared(RandomIdGenerator))
    }

    pub fn with_upload_paths(
        repository: Arc<dyn Repository>,
        uploads: UploadPathGenerator<Arc<dyn IdGenerator>>,
    ) -> Self {
        Self { repository, uploads }
    }

    // === Tags ===

    pub fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag> {
        self.require_user(user_id)?;
        let tag = Tag::new(user_id, name);
        tag.validate().map_err(Error::validation)?;
        self.repository.insert_tag(&tag)?;
        Ok(tag)
    }

    pub fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>> {
        self.repository.list_tags(user_id)
    }

    // === Ingredients ===

    pub fn create_ingredient(&self, user_id: Uuid, name: &str) -> Result<Ingredient> {
        self.require_user(user_id)?;
        let ingredient = Ingredient::new(user_id, name);
        ingredient.validate().map_err(Error::validation)?;
        self.repository.insert_ingredient(&ingredient)?;
        Ok(ingredient)
    }

    pub fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>> {
        self.repository.list_ingredients(user_id)
    }

    // === Recipes ===

    /// Create a recipe
    ///
    /// Every referenced tag and ingredient must exist and belong to the owner.
    /// Duplicate references are collapsed.
    pub fn create_recipe(&self, new: NewRecipe) -> Result<Recipe> {
        self.require_user(new.user_id)?;

        let mut recipe = Recipe::new(new.user_id, new.title, new.time_minutes, new.price);
        recipe.link = new.link;
        recipe.validate().map_err(Error::validation)?;

        self.check_tags(new.user_id, &new.tags)?;
        self.check_ingredients(new.user_id, &new.ingredients)?;
        Recipe::merge_ids(&mut recipe.tags, &new.tags);
        Recipe::merge_ids(&mut recipe.ingredients, &new.ingredients);

        self.repository.insert_recipe(&recipe)?;
        Ok(recipe)
    }

    pub fn get_recipe(&self, id: Uuid) -> Result<Recipe> {
        self.repository
            .get_recipe(id)?
            .ok_or_else(|| Error::not_found(format!("recipe {}", id)))
    }

    pub fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>> {
        self.repository.list_recipes(user_id)
    }

    /// Load a recipe together with its tags and ingredients
    pub fn recipe_detail(&self, id: Uuid) -> Result<RecipeDetail> {
        let recipe = self.get_recipe(id)?;
        let mut tags = Vec::with_capacity(recipe.tags.len());
        for tag_id in &recipe.tags {
            if let Some(tag) = self.repository.get_tag(*tag_id)? {
                tags.push(tag);
            }
        }
        let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
        for ingredient_id in &recipe.ingredients {
            if let Some(ingredient) = self.repository.get_ingredient(*ingredient_id)? {
                ingredients.push(ingredient);
            }
        }
        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
        })
    }

    /// Attach tags to a recipe. Additive: existing tags are kept.
    pub fn add_tags_to_recipe(&self, recipe_id: Uuid, tag_ids: &[Uuid]) -> Result<Recipe> {
        let owner = self.get_recipe(recipe_id)?.user_id;
        self.check_tags(owner, tag_ids)?;
        self.repository.modify_recipe(recipe_id, &mut |recipe: &mut Recipe| -> Result<()> {
            if Recipe::merge_ids(&mut recipe.tags, tag_ids) {
                recipe.updated_at = Utc::now();
            }
            Ok(())
        })
    }

    /// Attach ingredients to a recipe. Additive: existing ingredients are kept.
    pub fn add_ingredients_to_recipe(
        &self,
        recipe_id: Uuid,
        ingredient_ids: &[Uuid],
    ) -> Result<Recipe> {
        let owner = self.get_recipe(recipe_id)?.user_id;
        self.check_ingredients(owner, ingredient_ids)?;
        self.repository.modify_recipe(recipe_id, &mut |recipe: &mut Recipe| -> Result<()> {
            if Recipe::merge_ids(&mut recipe.ingredients, ingredient_ids) {
                recipe.updated_at = Utc::now();
            }
            Ok(())
        })
    }

    /// Assign an uploaded image to a recipe
    ///
    /// The stored value is a freshly generated path; writing the file bytes to
    /// that path is the storage layer's job.
    pub fn set_recipe_image(&self, recipe_id: Uuid, filename: &str) -> Result<Recipe> {
        self.repository.modify_recipe(recipe_id, &mut |recipe: &mut Recipe| -> Result<()> {
            let path = self.uploads.path_for(&*recipe, filename)?;
            recipe.image = Some(path);
            recipe.updated_at = Utc::now();
            Ok(())
        })
    }

    fn require_user(&self, user_id: Uuid) -> Result<()> {
        match self.repository.get_user(user_id)? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("user {}", user_id))),
        }
    }

    fn check_tags(&self, owner: Uuid, tag_ids: &[Uuid]) -> Result<()> {
        for id in tag_ids {
            let tag = self
                .repository
                .get_tag(*id)?
                .ok_or_else(|| Error::not_found(format!("tag {}", id)))?;
            if tag.user_id != owner {
                return Err(Error::validation(format!(
                    "tag '{}' belongs to another user",
                    tag.name
                )));
            }
        }
        Ok(())
    }

    fn check_ingredients(&self, owner: Uuid, ingredient_ids: &[Uuid]) -> Result<()> {
        for id in ingredient_ids {
            let ingredient = self
                .repository
                .get_ingredient(*id)?
                .ok_or_else(|| Error::not_found(format!("ingredient {}", id)))?;
            if ingredient.user_id != owner {
                return Err(Error::validation(format!(
                    "ingredient '{}' belongs to another user",
                    ingredient.name
                )));
            }
        }
        Ok(())
    }
}
