//! Fixture-backed repository.

use async_trait::async_trait;
use common::Service;
use tracing::instrument;

use super::{ServiceRepository, StoreError};

/// Repository over a fixed, in-memory list of services.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    services: Vec<Service>,
}

impl InMemoryRepository {
    /// Build a repository from `services`, keeping insertion order.
    ///
    /// Later entries whose id is already present are dropped so that listings
    /// never contain duplicate ids.
    pub fn new(services: impl IntoIterator<Item = Service>) -> Self {
        let mut kept: Vec<Service> = Vec::new();
        for s in services {
            if !kept.contains(&s) {
                kept.push(s);
            }
        }
        Self { services: kept }
    }

    /// The canonical two-entry catalog.
    pub fn seeded() -> Self {
        Self::new([
            Service::new(1, "Locate Us", "Awesomeness is HERE!", 3),
            Service::new(2, "Contact Us", "How can I find you?!", 2),
        ])
    }
}

#[async_trait]
impl ServiceRepository for InMemoryRepository {
    #[instrument(name = "list_services", skip(self))]
    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        Ok(self.services.clone())
    }

    #[instrument(name = "get_service", skip(self))]
    async fn get_service(&self, id: i64) -> Result<Option<Service>, StoreError> {
        Ok(self.services.iter().find(|s| s.id == id).cloned())
    }
}
