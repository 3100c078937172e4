use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::ItemGateway;
use crate::errors::GatewayError;
use crate::item::{ItemId, ItemRecord};

/// On-disk layout, mirroring the hosted database tree: `{"items": {id: record}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    items: BTreeMap<ItemId, ItemRecord>,
}

/// Gateway backed by a single JSON file.
///
/// Every write rewrites the whole document through a temp file in the same
/// directory and renames it over the target, so a crash never leaves a torn
/// file behind. Calls are serialized through an async mutex.
pub struct JsonFileGateway {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, GatewayError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Document::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, doc: &Document) -> Result<(), GatewayError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), items = doc.items.len(), "item file written");
        Ok(())
    }
}

#[async_trait]
impl ItemGateway for JsonFileGateway {
    async fn create(&self, record: ItemRecord) -> Result<ItemId, GatewayError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load()?;
        let id = ItemId::generate();
        doc.items.insert(id.clone(), record.without_id());
        self.store(&doc)?;
        info!(%id, "item created");
        Ok(id)
    }

    async fn update(&self, id: &ItemId, record: ItemRecord) -> Result<(), GatewayError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load()?;
        doc.items.insert(id.clone(), record.without_id());
        self.store(&doc)?;
        info!(%id, "item updated");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ItemRecord>, GatewayError> {
        let _guard = self.lock.lock().await;
        let doc = self.load()?;
        Ok(doc
            .items
            .into_iter()
            .map(|(id, record)| record.with_id(id))
            .collect())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<ItemRecord>, GatewayError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load()?;
        Ok(doc.items.remove(id).map(|record| record.with_id(id.clone())))
    }
}
