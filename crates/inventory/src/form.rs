//! Item form: a `FieldValueStore` plus the create/edit mode and the submit
//! lifecycle around it.
//!
//! Submitting is split in two so a UI loop can hand the gateway call to a
//! background task:
//!
//! ```text
//! begin_submit()   -> ItemRecord        (is_submitting = true)
//!   ... gateway write elsewhere ...
//! complete_submit(SubmitOutcome)        (is_submitting = false)
//! ```
//!
//! `submit` chains both halves for callers that can simply await.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::draft::ItemDraft;
use crate::errors::{GatewayError, SubmitError};
use crate::gateway::{persist, ItemGateway};
use crate::item::{ItemId, ItemRecord};
use crate::serializer::serialize;
use crate::store::FieldValueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

/// Result of the gateway write, fed back into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    Saved(ItemId),
    Failed(String),
}

impl From<Result<ItemId, GatewayError>> for SubmitOutcome {
    fn from(result: Result<ItemId, GatewayError>) -> Self {
        match result {
            Ok(id) => SubmitOutcome::Saved(id),
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemForm {
    mode: FormMode,
    store: FieldValueStore,
}

impl ItemForm {
    /// Blank form for a new item.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            store: FieldValueStore::default(),
        }
    }

    /// Form seeded from an existing record.
    pub fn edit(id: ItemId, record: &ItemRecord) -> Self {
        Self {
            mode: FormMode::Edit(id),
            store: FieldValueStore::new(ItemDraft::from_record(record)),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn id(&self) -> Option<&ItemId> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn store(&self) -> &FieldValueStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FieldValueStore {
        &mut self.store
    }

    /// Start over with a blank draft, keeping the mode.
    pub fn reset(&mut self) {
        self.store.reset(ItemDraft::default());
    }

    /// Validate and serialize the draft, then flag the form as submitting.
    ///
    /// Nothing is flagged when this returns an error.
    pub fn begin_submit(&mut self) -> Result<ItemRecord, SubmitError> {
        if self.store.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        self.store.touch_all();
        if !self.store.is_valid() {
            let errors = self.store.errors().clone();
            debug!(invalid = errors.len(), "submit blocked by validation");
            return Err(SubmitError::Invalid(errors));
        }

        let record = serialize(self.store.values(), self.id())?;
        self.store.apply_serialized(&record);
        self.store.set_submit_error(None);
        self.store.set_submitting(true);
        Ok(record)
    }

    /// Record the gateway outcome. A failure keeps the draft untouched so the
    /// user can retry.
    pub fn complete_submit(&mut self, outcome: SubmitOutcome) {
        self.store.set_submitting(false);
        match outcome {
            SubmitOutcome::Saved(id) => {
                info!(%id, editing = self.is_editing(), "item saved");
                self.store.set_submit_error(None);
            }
            SubmitOutcome::Failed(message) => {
                warn!(%message, "item save failed");
                self.store.set_submit_error(Some(message));
            }
        }
    }

    /// Full submit against `gateway`: create in create mode, update in edit
    /// mode.
    pub async fn submit(&mut self, gateway: &dyn ItemGateway) -> Result<ItemId, SubmitError> {
        let record = self.begin_submit()?;
        let result = persist(gateway, record).await;
        let outcome = match &result {
            Ok(id) => SubmitOutcome::Saved(id.clone()),
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        };
        self.complete_submit(outcome);
        Ok(result?)
    }
}

impl Default for ItemForm {
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ItemField;

    fn filled() -> ItemForm {
        let mut form = ItemForm::create();
        let store = form.store_mut();
        store.set_field(ItemField::Name, "Brownie").unwrap();
        store.set_field(ItemField::Category, "Cake").unwrap();
        store.set_field(ItemField::Cost, "5").unwrap();
        store.set_field(ItemField::Price, "10").unwrap();
        store.set_field(ItemField::Stock, "3.7").unwrap();
        form
    }

    #[test]
    fn begin_submit_flags_and_writes_back() {
        let mut form = filled();
        let record = form.begin_submit().unwrap();
        assert_eq!(record.stock, 3);
        assert!(form.store().is_submitting());
        assert_eq!(form.store().values().stock, "3");
    }

    #[test]
    fn second_begin_is_rejected() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(matches!(
            form.begin_submit(),
            Err(SubmitError::AlreadySubmitting)
        ));
    }

    #[test]
    fn invalid_draft_touches_everything() {
        let mut form = ItemForm::create();
        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(!form.store().is_submitting());
        assert_eq!(
            form.store().get_error(ItemField::Name),
            Some("Name is required")
        );
    }

    #[test]
    fn failure_keeps_draft_and_message() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.complete_submit(SubmitOutcome::Failed("PERMISSION_DENIED".into()));
        assert!(!form.store().is_submitting());
        assert_eq!(form.store().submit_error(), Some("PERMISSION_DENIED"));
        assert_eq!(form.store().values().name, "Brownie");
    }

    #[test]
    fn outcome_from_gateway_result() {
        let ok: SubmitOutcome = Ok(ItemId::from("a")).into();
        assert_eq!(ok, SubmitOutcome::Saved(ItemId::from("a")));
        let failed: SubmitOutcome = Err(GatewayError::Unavailable("offline".into())).into();
        assert_eq!(failed, SubmitOutcome::Failed("offline".into()));
    }
}
