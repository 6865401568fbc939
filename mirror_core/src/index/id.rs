//! Identity of a loaded index instance.

use uuid::Uuid;

/// Identifier of one loaded index, used to tell engine instances apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexId(pub Uuid);

impl IndexId {
    /// Create a new random index ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IndexId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IndexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
