//! Field value store: runtime editing state of one item form.
//!
//! Holds:
//!   * the draft values (`ItemDraft`)
//!   * which fields the user has touched
//!   * validation errors, recomputed for the whole draft on every change
//!   * the scratch option input (not part of the draft until committed)
//!   * submit bookkeeping (`is_submitting`, last persistence error)
//!
//! Errors are advisory. `get_error` only reports a message once the field is
//! touched, so a fresh form does not greet the user with red text.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;
use tracing::trace;

use crate::draft::ItemDraft;
use crate::errors::FieldError;
use crate::field::{FieldValue, ItemField};
use crate::item::ItemRecord;
use crate::options::OptionList;
use crate::schema::{ItemSchema, ValidationErrors};

#[derive(Debug, Clone)]
pub struct FieldValueStore {
    schema: ItemSchema,
    draft: ItemDraft,
    touched: BTreeSet<ItemField>,
    errors: ValidationErrors,
    option_input: String,
    submitting: bool,
    submit_error: Option<String>,
}

impl FieldValueStore {
    /// Store validated against the standard item schema.
    pub fn new(draft: ItemDraft) -> Self {
        Self::with_schema(ItemSchema::item(), draft)
    }

    pub fn with_schema(schema: ItemSchema, draft: ItemDraft) -> Self {
        let errors = schema.validate(&draft);
        Self {
            schema,
            draft,
            touched: BTreeSet::new(),
            errors,
            option_input: String::new(),
            submitting: false,
            submit_error: None,
        }
    }

    pub fn values(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn schema(&self) -> &ItemSchema {
        &self.schema
    }

    /// Apply a raw change event to one field.
    pub fn set_field(
        &mut self,
        field: ItemField,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldError> {
        let value = value.into();
        match (field, value) {
            (ItemField::WithOptions, FieldValue::Flag(flag)) => self.draft.with_options = flag,
            (ItemField::Options, FieldValue::List(items)) => {
                self.draft.options = OptionList::from(items)
            }
            (field, FieldValue::Text(text)) if field.is_textual() => {
                if let Some(slot) = self.draft.text_mut(field) {
                    *slot = text;
                }
            }
            (field, other) => {
                return Err(FieldError::Mismatch {
                    field,
                    expected: expected_kind(field),
                    got: other.kind(),
                });
            }
        }
        self.touch(field);
        Ok(())
    }

    /// Visible error for `field`: only reported once the field is touched.
    pub fn get_error(&self, field: ItemField) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(field)
    }

    /// All current errors, touched or not.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: ItemField) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_required(&self, field: ItemField) -> bool {
        self.schema.is_required(field)
    }

    /// Mark every field touched so all errors become visible (submit).
    pub fn touch_all(&mut self) {
        self.touched.extend(ItemField::iter());
    }

    /// Reseed the whole store as if the form was mounted again.
    pub fn reset(&mut self, draft: ItemDraft) {
        self.errors = self.schema.validate(&draft);
        self.draft = draft;
        self.touched.clear();
        self.option_input.clear();
        self.submitting = false;
        self.submit_error = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Last persistence failure, verbatim.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub(crate) fn set_submit_error(&mut self, error: Option<String>) {
        self.submit_error = error;
    }

    pub fn option_input(&self) -> &str {
        &self.option_input
    }

    pub fn set_option_input(&mut self, value: impl Into<String>) {
        self.option_input = value.into();
    }

    /// Commit `candidate` into the options list. On success the scratch
    /// input is cleared; a rejected candidate leaves it alone.
    pub fn add_option(&mut self, candidate: &str) -> bool {
        if !self.draft.options.add(candidate) {
            trace!(candidate, "blank option rejected");
            return false;
        }
        self.option_input.clear();
        self.touch(ItemField::Options);
        true
    }

    /// Commit whatever is in the scratch input.
    pub fn commit_option_input(&mut self) -> bool {
        let candidate = self.option_input.clone();
        self.add_option(&candidate)
    }

    pub fn remove_option(&mut self, value: &str) -> bool {
        let removed = self.draft.options.remove(value);
        if removed {
            self.touch(ItemField::Options);
        }
        removed
    }

    pub fn edit_option_at(&mut self, index: usize, value: &str) -> bool {
        let edited = self.draft.options.edit_at(index, value);
        if edited {
            self.touch(ItemField::Options);
        }
        edited
    }

    /// Write the normalised values of a just-serialized record back into the
    /// draft: truncated stock, the forced `with_options` flag, and an empty
    /// scratch input.
    pub(crate) fn apply_serialized(&mut self, record: &ItemRecord) {
        self.draft.stock = record.stock.to_string();
        if !record.with_options {
            self.draft.with_options = false;
        }
        self.option_input.clear();
        self.revalidate();
    }

    fn touch(&mut self, field: ItemField) {
        self.touched.insert(field);
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.draft);
    }
}

impl Default for FieldValueStore {
    fn default() -> Self {
        Self::new(ItemDraft::default())
    }
}

fn expected_kind(field: ItemField) -> &'static str {
    match field {
        ItemField::WithOptions => "flag",
        ItemField::Options => "list",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn untouched_invalid_field_reports_no_error() {
        let store = FieldValueStore::default();
        assert!(!store.is_valid());
        assert_eq!(store.errors().get(ItemField::Name), Some("Name is required"));
        assert_eq!(store.get_error(ItemField::Name), None);
    }

    #[test]
    fn set_field_touches_and_revalidates() {
        let mut store = FieldValueStore::default();
        store.set_field(ItemField::Cost, "0").unwrap();
        assert_eq!(store.get_error(ItemField::Cost), Some("Must be more than zero"));
        store.set_field(ItemField::Cost, "2").unwrap();
        assert_eq!(store.get_error(ItemField::Cost), None);
        assert!(store.is_touched(ItemField::Cost));
        assert!(!store.is_touched(ItemField::Price));
    }

    #[test]
    fn mismatched_value_is_rejected_without_touching() {
        let mut store = FieldValueStore::default();
        let err = store.set_field(ItemField::Name, true).unwrap_err();
        assert_eq!(
            err,
            FieldError::Mismatch {
                field: ItemField::Name,
                expected: "text",
                got: "flag",
            }
        );
        assert!(!store.is_touched(ItemField::Name));
    }

    #[test]
    fn add_option_clears_scratch_only_on_success() {
        let mut store = FieldValueStore::default();
        store.set_option_input("   ");
        assert!(!store.commit_option_input());
        assert_eq!(store.option_input(), "   ");

        store.set_option_input("Nuts");
        assert!(store.commit_option_input());
        assert_eq!(store.option_input(), "");
        assert_eq!(store.values().options.as_slice(), ["Nuts"]);
        assert!(store.is_touched(ItemField::Options));
    }

    #[test]
    fn touch_all_reveals_every_error() {
        let mut store = FieldValueStore::default();
        store.touch_all();
        assert_eq!(store.get_error(ItemField::Price), Some("Price is required"));
    }

    #[test]
    fn reset_reseeds_everything() {
        let mut store = FieldValueStore::default();
        store.set_field(ItemField::Name, "Pie").unwrap();
        store.set_option_input("half");
        store.set_submit_error(Some("boom".into()));

        let draft = ItemDraft {
            name: "Churro".into(),
            ..ItemDraft::default()
        };
        store.reset(draft);
        assert_eq!(store.values().name, "Churro");
        assert!(!store.is_touched(ItemField::Name));
        assert_eq!(store.option_input(), "");
        assert_eq!(store.submit_error(), None);
    }
}
