//! Catalog records exchanged over the public HTTP API.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Created by the backing store and never mutated afterwards. Two services are
/// equal when their ids are equal; the remaining fields are payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique, positive identifier.
    pub id: i64,
    /// Display name. Never empty.
    pub name: String,
    /// Free-form description, may be empty.
    pub description: String,
    /// Number of published versions.
    pub versions: u32,
}

impl Service {
    /// Construct a [`Service`] from its parts.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        versions: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            versions,
        }
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Service {}

impl Hash for Service {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
