//! In-memory identity repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::identity::{Identity, IdentityId, IdentityRepository, Role};
use crate::domain::DomainError;

/// Both maps, guarded together
#[derive(Debug, Default)]
struct Store {
    by_id: HashMap<IdentityId, Identity>,
    /// Index for email -> identity ID lookup
    by_email: HashMap<String, IdentityId>,
}

/// In-memory implementation of IdentityRepository
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryIdentityRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial identities
    pub fn with_identities(identities: Vec<Identity>) -> Self {
        let mut store = Store::default();

        for identity in identities {
            store.by_email.insert(identity.email().to_string(), identity.id());
            store.by_id.insert(identity.id(), identity);
        }

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Insert or replace an identity
    pub async fn upsert(&self, identity: Identity) {
        let mut store = self.store.write().await;

        if let Some(previous) = store.by_id.get(&identity.id()) {
            let previous_email = previous.email().to_string();
            store.by_email.remove(&previous_email);
        }

        store.by_email.insert(identity.email().to_string(), identity.id());
        store.by_id.insert(identity.id(), identity);
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn lookup_credential(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.by_id.get(id))
            .cloned())
    }

    async fn lookup_role(&self, id: IdentityId) -> Result<Option<Role>, DomainError> {
        let store = self.store.read().await;
        Ok(store.by_id.get(&id).map(|identity| identity.role()))
    }
}
