//! Inventory item form core.
//!
//! The crate owns everything about an item form that is not drawing:
//! the editable draft and its touched/error bookkeeping ([`FieldValueStore`]),
//! the dynamic options list ([`OptionList`]), declarative validation
//! ([`ItemSchema`]), the draft-to-record step ([`serialize`]) and the
//! persistence seam ([`ItemGateway`]).

pub mod draft;
pub mod errors;
pub mod field;
pub mod form;
pub mod gateway;
pub mod item;
pub mod options;
pub mod schema;
pub mod serializer;
pub mod store;

pub use draft::ItemDraft;
pub use errors::{FieldError, GatewayError, SerializeError, SubmitError};
pub use field::{FieldValue, ItemField};
pub use form::{FormMode, ItemForm, SubmitOutcome};
pub use gateway::{persist, ItemGateway, JsonFileGateway, MemoryGateway, RealtimeDbGateway};
pub use item::{Category, ItemId, ItemRecord};
pub use options::OptionList;
pub use schema::{ItemSchema, ValidationErrors};
pub use serializer::serialize;
pub use store::FieldValueStore;
