use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::ItemGateway;
use crate::errors::GatewayError;
use crate::item::{ItemId, ItemRecord};

/// Process-local gateway. Useful for tests and for running without a backend.
#[derive(Default)]
pub struct MemoryGateway {
    items: RwLock<BTreeMap<ItemId, ItemRecord>>,
    failure: Mutex<Option<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = ItemRecord>) -> Self {
        let items = items
            .into_iter()
            .map(|record| {
                let id = record.id.clone().unwrap_or_else(ItemId::generate);
                (id, record.without_id())
            })
            .collect();
        Self {
            items: RwLock::new(items),
            failure: Mutex::new(None),
        }
    }

    /// Make every following call fail with `message` until cleared with `None`.
    pub async fn fail_with(&self, message: Option<&str>) {
        *self.failure.lock().await = message.map(str::to_string);
    }

    async fn check_failure(&self) -> Result<(), GatewayError> {
        match self.failure.lock().await.as_ref() {
            Some(message) => Err(GatewayError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ItemGateway for MemoryGateway {
    async fn create(&self, record: ItemRecord) -> Result<ItemId, GatewayError> {
        self.check_failure().await?;
        let id = ItemId::generate();
        debug!(%id, name = %record.name, "memory gateway: create");
        self.items.write().await.insert(id.clone(), record.without_id());
        Ok(id)
    }

    async fn update(&self, id: &ItemId, record: ItemRecord) -> Result<(), GatewayError> {
        self.check_failure().await?;
        debug!(%id, "memory gateway: update");
        self.items.write().await.insert(id.clone(), record.without_id());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ItemRecord>, GatewayError> {
        self.check_failure().await?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .map(|(id, record)| record.clone().with_id(id.clone()))
            .collect())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<ItemRecord>, GatewayError> {
        self.check_failure().await?;
        let items = self.items.read().await;
        Ok(items.get(id).map(|record| record.clone().with_id(id.clone())))
    }
}
