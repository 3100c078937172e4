//! Persistence gateways.
//!
//! A gateway stores `ItemRecord`s under gateway-assigned ids. Records are
//! handed over without an id on create; everything read back carries the id
//! it is stored under.

mod file;
mod memory;
mod realtime;

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::item::{ItemId, ItemRecord};

pub use file::JsonFileGateway;
pub use memory::MemoryGateway;
pub use realtime::RealtimeDbGateway;

#[async_trait]
pub trait ItemGateway: Send + Sync {
    /// Store a new record and return the id assigned to it.
    async fn create(&self, record: ItemRecord) -> Result<ItemId, GatewayError>;

    /// Overwrite the record stored under `id`.
    async fn update(&self, id: &ItemId, record: ItemRecord) -> Result<(), GatewayError>;

    async fn list(&self) -> Result<Vec<ItemRecord>, GatewayError>;

    async fn get(&self, id: &ItemId) -> Result<Option<ItemRecord>, GatewayError>;
}

/// Create or update depending on whether `record` carries an id.
pub async fn persist(
    gateway: &dyn ItemGateway,
    record: ItemRecord,
) -> Result<ItemId, GatewayError> {
    match record.id.clone() {
        Some(id) => {
            gateway.update(&id, record).await?;
            Ok(id)
        }
        None => gateway.create(record).await,
    }
}
