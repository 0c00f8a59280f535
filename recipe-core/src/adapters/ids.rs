//! Identifier sources for upload paths

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Random UUIDv4 identifiers, rendered hyphenated (`xxxxxxxx-xxxx-4xxx-...`)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always returns the same identifier. Used to pin paths in tests and previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdGenerator(String);

impl FixedIdGenerator {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_canonical_uuids() {
        let id = RandomIdGenerator.next_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(RandomIdGenerator.next_id(), RandomIdGenerator.next_id());
    }

    #[test]
    fn test_fixed_id() {
        let ids = FixedIdGenerator::new("test-uuid");
        assert_eq!(ids.next_id(), "test-uuid");
        assert_eq!(ids.next_id(), "test-uuid");
    }
}
