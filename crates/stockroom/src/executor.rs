//! Gateway executor.
//!
//! The UI loop never awaits a gateway itself. It hands a `GatewayTask` to the
//! executor, a single background worker runs it against the configured
//! gateway, and the result comes back as an `Action` on the app's channel.
//! Tasks run one after another in submission order.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use inventory::{persist, GatewayError, ItemGateway, ItemId, ItemRecord, SubmitOutcome};
use strum::Display;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::Action;

pub type TaskId = u64;

#[derive(Debug, Clone, Display)]
pub enum GatewayTask {
    /// Load every item for the table.
    List,
    /// Load one item into the edit form.
    Load(ItemId),
    /// Create or update, depending on whether the record carries an id.
    Save(ItemRecord),
}

/// Cheap to clone: only wraps the sender.
#[derive(Clone)]
pub struct GatewayExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
}

struct Dispatch {
    id: TaskId,
    task: GatewayTask,
}

impl GatewayExecutor {
    /// Spawn the worker. Must be called from within a tokio runtime.
    pub fn new(gateway: Arc<dyn ItemGateway>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        Worker {
            rx,
            gateway,
            action_tx,
        }
        .spawn();
        Self { tx }
    }

    pub fn spawn(&self, task: GatewayTask) -> TaskId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = self.tx.send(Dispatch { id, task }) {
            warn!("gateway executor closed; dropping task {}: {}", id, e.0.task);
        }
        id
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    gateway: Arc<dyn ItemGateway>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Worker {
    fn spawn(mut self) {
        tokio::spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                let action = self.handle(dispatch).await;
                if self.action_tx.send(action).is_err() {
                    break;
                }
            }
            info!("gateway executor stopped");
        });
    }

    async fn handle(&self, dispatch: Dispatch) -> Action {
        let Dispatch { id, task } = dispatch;
        debug!("[task:{id}] {task}");
        match task {
            GatewayTask::List => match self.gateway.list().await {
                Ok(items) => {
                    debug!("[task:{id}] loaded {} item(s)", items.len());
                    Action::ItemsLoaded(items)
                }
                Err(e) => {
                    warn!("[task:{id}] listing items failed: {e}");
                    Action::ItemsFailed(e.to_string())
                }
            },
            GatewayTask::Load(item) => match self.gateway.get(&item).await {
                Ok(Some(record)) => Action::ItemLoaded(item, record),
                Ok(None) => {
                    let message = GatewayError::NotFound(item.clone()).to_string();
                    Action::ItemLoadFailed(item, message)
                }
                Err(e) => {
                    warn!("[task:{id}] loading item {item} failed: {e}");
                    Action::ItemLoadFailed(item, e.to_string())
                }
            },
            GatewayTask::Save(record) => {
                let outcome = SubmitOutcome::from(persist(self.gateway.as_ref(), record).await);
                if let SubmitOutcome::Failed(message) = &outcome {
                    warn!("[task:{id}] saving item failed: {message}");
                }
                Action::SubmitFinished(outcome)
            }
        }
    }
}
