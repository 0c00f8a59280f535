//! Identifier source port

/// Produces the unique token used to name uploaded files
///
/// Must be callable from many threads without coordination.
pub trait IdGenerator: Send + Sync {
    /// Return a fresh identifier
    fn next_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}
