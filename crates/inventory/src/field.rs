//! Named fields of an item draft and the raw values the presentation layer
//! hands to the store.

use strum::{AsRefStr, Display, EnumIter};

/// The fixed set of fields an item form edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ItemField {
    Name,
    Category,
    Cost,
    Price,
    Stock,
    WithOptions,
    Options,
}

impl ItemField {
    /// Human label shown next to the control.
    pub fn label(&self) -> &'static str {
        match self {
            ItemField::Name => "Name",
            ItemField::Category => "Category",
            ItemField::Cost => "Cost",
            ItemField::Price => "Price",
            ItemField::Stock => "Stock",
            ItemField::WithOptions => "With Options?",
            ItemField::Options => "Options",
        }
    }

    /// Fields edited as raw text (numbers included).
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ItemField::Name
                | ItemField::Category
                | ItemField::Cost
                | ItemField::Price
                | ItemField::Stock
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ItemField::Cost | ItemField::Price | ItemField::Stock)
    }
}

/// A raw change event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}
