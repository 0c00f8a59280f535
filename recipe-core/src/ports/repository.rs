//! Repository port - storage abstraction

use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Ingredient, Recipe, Tag, User};

/// Storage abstraction for users and their catalog
///
/// Implementations (adapters) own uniqueness of user emails and report
/// violations as `Error::Conflict`. Lookups return `Ok(None)` for missing rows;
/// updates of missing rows fail with `Error::NotFound`.
pub trait Repository: Send + Sync {
    // === Users ===

    /// Insert a new user
    fn insert_user(&self, user: &User) -> Result<()>;

    /// Replace an existing user
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Look up a user by already-normalized email
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    fn list_users(&self) -> Result<Vec<User>>;

    // === Tags ===

    fn insert_tag(&self, tag: &Tag) -> Result<()>;

    fn get_tag(&self, id: Uuid) -> Result<Option<Tag>>;

    fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>>;

    // === Ingredients ===

    fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<()>;

    fn get_ingredient(&self, id: Uuid) -> Result<Option<Ingredient>>;

    fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>>;

    // === Recipes ===

    fn insert_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Read, change and store a recipe as one atomic step
    ///
    /// `apply` works on a copy; the stored row is replaced only when it returns
    /// `Ok`. Returns the recipe as stored.
    fn modify_recipe(
        &self,
        id: Uuid,
        apply: &mut dyn FnMut(&mut Recipe) -> Result<()>,
    ) -> Result<Recipe>;

    fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>>;

    fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>>;
}
