//! Upload service - storage paths for uploaded recipe images
//!
//! The original file name is discarded; only its extension survives. Each call
//! draws a fresh identifier, so two uploads of `photo.jpg` never collide:
//!
//! ```text
//! myimage.jpg  ->  uploads/recipe/0b6f1d2e-7c1a-4c53-9a55-2f4a3c9d8e10.jpg
//! ```

use std::sync::Arc;

use crate::adapters::ids::RandomIdGenerator;
use crate::domain::result::{Error, Result};
use crate::ports::IdGenerator;

/// Directory prefix for recipe images
pub const RECIPE_IMAGE_DIR: &str = "uploads/recipe/";

/// Callback signature a storage layer invokes when a file field is assigned.
///
/// The first argument is the record being saved. Path generators receive it
/// for signature compatibility and are free to ignore it.
pub type UploadPathFn<T> = fn(&T, &str) -> Result<String>;

/// Generate a storage path for a recipe image using a random UUIDv4
pub fn recipe_image_file_path<T: ?Sized>(instance: &T, filename: &str) -> Result<String> {
    UploadPathGenerator::new().path_for(instance, filename)
}

/// Extract the extension: everything after the final `.` of the last path component
///
/// Directory components are dropped first, so a dot in a directory name never
/// counts: `dir.v2/photo` has no extension and is rejected, even though the
/// whole string contains a `.`.
pub fn file_extension(filename: &str) -> Result<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Ok(ext),
        _ => Err(Error::validation(format!(
            "file name '{}' has no extension",
            filename
        ))),
    }
}

/// Builds `<prefix><id>.<ext>` paths from a pluggable identifier source
#[derive(Debug, Clone)]
pub struct UploadPathGenerator<G = RandomIdGenerator> {
    ids: G,
    prefix: String,
}

impl UploadPathGenerator<RandomIdGenerator> {
    pub fn new() -> Self {
        Self::with_id_generator(RandomIdGenerator)
    }
}

impl Default for UploadPathGenerator<RandomIdGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> UploadPathGenerator<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            ids,
            prefix: RECIPE_IMAGE_DIR.to_string(),
        }
    }

    /// Replace the directory prefix. A trailing `/` is added when missing.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        self.prefix = prefix;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the storage path for `filename`. `_instance` is not inspected.
    pub fn path_for<T: ?Sized>(&self, _instance: &T, filename: &str) -> Result<String> {
        let ext = file_extension(filename)?;
        Ok(format!("{}{}.{}", self.prefix, self.ids.next_id(), ext))
    }
}

impl UploadPathGenerator<Arc<dyn IdGenerator>> {
    /// Type-erase the identifier source so services can share one generator
    pub fn shared<G: IdGenerator + 'static>(ids: G) -> Self {
        Self::with_id_generator(Arc::new(ids) as Arc<dyn IdGenerator>)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;
    use crate::adapters::ids::FixedIdGenerator;
    use crate::domain::Recipe;

    #[test]
    fn test_recipe_file_name_uuid() {
        let generator = UploadPathGenerator::with_id_generator(FixedIdGenerator::new("test-uuid"));
        let path = generator.path_for(&(), "myimage.jpg").unwrap();
        assert_eq!(path, "uploads/recipe/test-uuid.jpg");
    }

    #[test]
    fn test_only_final_extension_kept() {
        let generator = UploadPathGenerator::with_id_generator(FixedIdGenerator::new("id"));
        assert_eq!(
            generator.path_for(&(), "archive.tar.gz").unwrap(),
            "uploads/recipe/id.gz"
        );
        assert_eq!(
            generator.path_for(&(), "My Holiday.PNG").unwrap(),
            "uploads/recipe/id.PNG"
        );
    }

    #[test]
    fn test_random_paths_are_unique() {
        let paths: HashSet<String> = (0..100)
            .map(|_| recipe_image_file_path(&(), "photo.jpg").unwrap())
            .collect();
        assert_eq!(paths.len(), 100);
        for path in &paths {
            assert!(path.starts_with(RECIPE_IMAGE_DIR));
            assert!(path.ends_with(".jpg"));
            assert!(!path.contains("photo"));
        }
    }

    #[test]
    fn test_missing_extension_rejected() {
        for name in ["README", "photo.", "", "dir.v2/photo"] {
            let err = recipe_image_file_path(&(), name).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{name}");
        }
    }

    #[test]
    fn test_directory_components_ignored() {
        assert_eq!(file_extension("some/dir.d/pic.webp").unwrap(), "webp");
        assert_eq!(file_extension(r"C:\Users\me\pic.jpeg").unwrap(), "jpeg");
        assert_eq!(file_extension(".hidden").unwrap(), "hidden");
    }

    #[test]
    fn test_custom_prefix() {
        let generator = UploadPathGenerator::with_id_generator(FixedIdGenerator::new("x"))
            .with_prefix("media/images");
        assert_eq!(generator.prefix(), "media/images/");
        assert_eq!(generator.path_for(&(), "a.png").unwrap(), "media/images/x.png");

        let bare = UploadPathGenerator::with_id_generator(FixedIdGenerator::new("x")).with_prefix("");
        assert_eq!(bare.path_for(&(), "a.png").unwrap(), "x.png");
    }

    #[test]
    fn test_usable_as_callback() {
        let callback: UploadPathFn<Recipe> = recipe_image_file_path::<Recipe>;
        let recipe = Recipe::new(uuid::Uuid::new_v4(), "Soup", 10, rust_decimal::Decimal::ONE);
        let path = callback(&recipe, "soup.jpg").unwrap();
        assert!(path.starts_with("uploads/recipe/"));
    }

    #[test]
    fn test_shared_generator_across_threads() {
        let generator = Arc::new(UploadPathGenerator::shared(RandomIdGenerator));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| generator.path_for(&(), "a.jpg").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let all: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(all.len(), 100);
    }
}
