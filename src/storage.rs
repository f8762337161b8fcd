use crate::config::SeedData;
use crate::error::Result;
use crate::registry::{UserDraft, UserRecord, UserRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>>;
    async fn append(&self, draft: UserDraft) -> Result<UserRecord>;
    async fn remove_by_id(&self, id: u32) -> Result<Option<UserRecord>>;
}

#[derive(Default)]
pub struct MemoryUserStore {
    registry: RwLock<UserRegistry>,
}

impl MemoryUserStore {
    pub fn new(registry: UserRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<UserRecord>> {
        Ok(self.registry.read().await.list().to_vec())
    }

    async fn append(&self, draft: UserDraft) -> Result<UserRecord> {
        Ok(self.registry.write().await.append(draft).clone())
    }

    async fn remove_by_id(&self, id: u32) -> Result<Option<UserRecord>> {
        Ok(self.registry.write().await.remove_by_id(id))
    }
}

pub fn create_store(seed: SeedData) -> Arc<dyn UserStore> {
    match seed {
        SeedData::Empty => Arc::new(MemoryUserStore::default()),
        SeedData::Sample => Arc::new(MemoryUserStore::new(UserRegistry::seeded())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::draft;

    #[tokio::test]
    async fn memory_store_appends_and_reindexes() {
        let store = MemoryUserStore::new(UserRegistry::seeded());

        let record = store.append(draft("Carla Souza")).await.unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(store.list().await.unwrap().len(), 3);

        let removed = store.remove_by_id(1).await.unwrap();
        assert_eq!(removed.map(|u| u.name), Some("Usuário 1".to_string()));

        let users = store.list().await.unwrap();
        let summary: Vec<(u32, &str)> = users.iter().map(|u| (u.id, u.name.as_str())).collect();
        assert_eq!(summary, [(1, "Usuário 2"), (2, "Carla Souza")]);
    }

    #[tokio::test]
    async fn create_store_honours_seed() {
        assert!(create_store(SeedData::Empty).list().await.unwrap().is_empty());
        assert_eq!(create_store(SeedData::Sample).list().await.unwrap().len(), 2);
    }
}
