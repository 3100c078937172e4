//! Persisted item record and its wire helpers.
//!
//! `ItemRecord` is the exact shape handed to a gateway. Everything in here is
//! already coerced: numbers are numbers, the category is a closed enum and
//! `options` is an ordered list. The only wire quirk is `options`, which the
//! hosted database stores as a single comma-joined string; `options_wire`
//! takes care of that in both directions so callers never see the joined form.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

/// Separator used when options travel as one string.
pub const OPTION_SEPARATOR: &str = ",";

/// Fixed set of item categories offered by the category select.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Category {
    Cake,
    Pie,
    Fried,
}

impl Category {
    /// Display names in select order.
    pub fn names() -> Vec<String> {
        Category::iter().map(|c| c.to_string()).collect()
    }
}

/// Identifier assigned by a gateway on create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for gateways that mint their own keys.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A fully serialized item as stored by a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Present when editing or when read back; omitted on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub category: Category,
    pub cost: f64,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub with_options: bool,
    #[serde(default, with = "options_wire")]
    pub options: Vec<String>,
}

impl ItemRecord {
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

/// Join options into their single-string wire form.
pub fn join_options(options: &[String]) -> String {
    options.join(OPTION_SEPARATOR)
}

/// Split the wire form back into entries. An empty string yields no entries.
pub fn split_options(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(OPTION_SEPARATOR)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

mod options_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(options: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::join_options(options))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        // Older rows may carry `null` instead of an empty string.
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| super::split_options(&r)).unwrap_or_default())
    }
}
