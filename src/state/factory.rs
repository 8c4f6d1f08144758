use crate::config::{StateBackend, StateConfig};
use crate::error::Result;
use crate::state::{CatalogStore, InMemoryStore};
use std::sync::Arc;

/// Create a catalog store based on configuration
pub async fn create_store(config: &StateConfig) -> Result<Arc<dyn CatalogStore>> {
    match config.backend {
        StateBackend::Memory => Ok(create_in_memory_store()),
    }
}

/// Create an in-memory store (for testing and development)
pub fn create_in_memory_store() -> Arc<dyn CatalogStore> {
    tracing::info!("Initializing in-memory storage backend");
    Arc::new(InMemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_store_from_config() {
        let config = StateConfig::default();
        let store = create_store(&config).await.unwrap();
        // Should be able to use the store
        assert!(store.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_in_memory_store() {
        let store = create_in_memory_store();
        assert!(store.list_orders().await.is_ok());
    }
}
