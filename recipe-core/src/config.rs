//! Configuration management
//!
//! Settings live in `<recipes_dir>/settings.json`:
//! ```json
//! {
//!   "uploads": { "recipeImageDir": "uploads/recipe/" },
//!   "auth": { "minPasswordLength": 8 }
//! }
//! ```
//! Keys this crate doesn't know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::RECIPE_IMAGE_DIR;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    uploads: UploadSettings,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadSettings {
    #[serde(default)]
    recipe_image_dir: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSettings {
    #[serde(default)]
    min_password_length: Option<usize>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Recipes configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory prefix for generated recipe image paths
    pub recipe_image_dir: String,
    /// Minimum password length; 0 disables the check
    pub min_password_length: usize,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipe_image_dir: RECIPE_IMAGE_DIR.to_string(),
            min_password_length: 0,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the recipes directory
    ///
    /// Environment overrides (for CI/testing):
    /// - `RECIPES_UPLOAD_DIR`
    /// - `RECIPES_MIN_PASSWORD_LENGTH`
    pub fn load(recipes_dir: &Path) -> Result<Self> {
        Self::load_with(recipes_dir, |key| std::env::var(key).ok())
    }

    /// Load config, resolving overrides through `lookup` instead of the process environment
    pub fn load_with<F>(recipes_dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings_path = recipes_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {:?}", settings_path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings file {:?}", settings_path))?
        } else {
            SettingsFile::default()
        };

        let recipe_image_dir = lookup("RECIPES_UPLOAD_DIR")
            .or_else(|| raw.uploads.recipe_image_dir.clone())
            .unwrap_or_else(|| RECIPE_IMAGE_DIR.to_string());

        let min_password_length = match lookup("RECIPES_MIN_PASSWORD_LENGTH") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("RECIPES_MIN_PASSWORD_LENGTH is not a number: {}", v))?,
            None => raw.auth.min_password_length.unwrap_or(0),
        };

        Ok(Self {
            recipe_image_dir,
            min_password_length,
            _raw_settings: raw,
        })
    }

    /// Save config to the recipes directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, recipes_dir: &Path) -> Result<()> {
        let settings_path = recipes_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        settings.uploads.recipe_image_dir = Some(self.recipe_image_dir.clone());
        settings.auth.min_password_length = Some(self.min_password_length);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}
