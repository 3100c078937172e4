//! Validation schema for item drafts.
//!
//! A schema is an ordered list of `FieldRules`, one per validated field. Each
//! entry states explicitly whether the field is required (the form renders a
//! `*` marker from that flag) and carries the rules evaluated in order; the
//! first failing rule produces the field's message.
//!
//! Rules skip empty input unless they are `Required`, so an optional numeric
//! field may be left blank but not filled with garbage.
//!
//! ```ignore
//! let schema = ItemSchema::new(vec![
//!     FieldRules::new(ItemField::Name).required("Name is required"),
//!     FieldRules::new(ItemField::Cost)
//!         .required("Cost is required")
//!         .number("Cost must be a number")
//!         .more_than(0.0, "Must be more than zero"),
//! ]);
//! let errors = schema.validate(&draft);
//! ```

use std::collections::BTreeMap;

use crate::draft::ItemDraft;
use crate::field::ItemField;
use crate::item::Category;

/// A single validation rule applied to a field's raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required { message: String },
    Number { message: String },
    /// Exclusive lower bound.
    MoreThan { bound: f64, message: String },
    /// Inclusive lower bound.
    AtLeast { bound: f64, message: String },
    OneOf { allowed: Vec<String>, message: String },
}

impl Rule {
    fn check(&self, raw: &str) -> Result<(), &str> {
        let blank = raw.trim().is_empty();
        match self {
            Rule::Required { message } => {
                if blank {
                    return Err(message.as_str());
                }
            }
            Rule::Number { message } => {
                if !blank && parse_number(raw).is_none() {
                    return Err(message.as_str());
                }
            }
            Rule::MoreThan { bound, message } => {
                if parse_number(raw).is_some_and(|n| n <= *bound) {
                    return Err(message.as_str());
                }
            }
            Rule::AtLeast { bound, message } => {
                if parse_number(raw).is_some_and(|n| n < *bound) {
                    return Err(message.as_str());
                }
            }
            Rule::OneOf { allowed, message } => {
                if !blank && !allowed.iter().any(|a| a == raw) {
                    return Err(message.as_str());
                }
            }
        }
        Ok(())
    }
}

/// Declared rules for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field: ItemField,
    pub required: bool,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: ItemField) -> Self {
        Self {
            field,
            required: false,
            rules: Vec::new(),
        }
    }

    /// Mark the field required and fail empty input with `message`.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.rules.push(Rule::Required {
            message: message.into(),
        });
        self
    }

    pub fn number(mut self, message: impl Into<String>) -> Self {
        self.rules.push(Rule::Number {
            message: message.into(),
        });
        self
    }

    pub fn more_than(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.rules.push(Rule::MoreThan {
            bound,
            message: message.into(),
        });
        self
    }

    pub fn at_least(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.rules.push(Rule::AtLeast {
            bound,
            message: message.into(),
        });
        self
    }

    pub fn one_of(mut self, allowed: Vec<String>, message: impl Into<String>) -> Self {
        self.rules.push(Rule::OneOf {
            allowed,
            message: message.into(),
        });
        self
    }

    fn first_error(&self, raw: &str) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule.check(raw).err().map(str::to_string))
    }
}

/// Field name to message for every currently invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ItemField, String>);

impl ValidationErrors {
    pub fn get(&self, field: ItemField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: ItemField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn contains(&self, field: ItemField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Declarative validation schema for an item form.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSchema {
    fields: Vec<FieldRules>,
}

impl ItemSchema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// The rules used by the item create/edit form.
    pub fn item() -> Self {
        Self::new(vec![
            FieldRules::new(ItemField::Name).required("Name is required"),
            FieldRules::new(ItemField::Category)
                .required("Category is required")
                .one_of(Category::names(), "Unknown category"),
            FieldRules::new(ItemField::Cost)
                .required("Cost is required")
                .number("Cost must be a number")
                .more_than(0.0, "Must be more than zero"),
            FieldRules::new(ItemField::Price)
                .required("Price is required")
                .number("Price must be a number")
                .more_than(0.0, "Must be more than zero"),
            FieldRules::new(ItemField::Stock)
                .number("Stock must be a number")
                .at_least(0.0, "Must not be negative"),
        ])
    }

    pub fn rules_for(&self, field: ItemField) -> Option<&FieldRules> {
        self.fields.iter().find(|r| r.field == field)
    }

    /// Whether the field is declared required. Undeclared fields are optional.
    pub fn is_required(&self, field: ItemField) -> bool {
        self.rules_for(field).map(|r| r.required).unwrap_or(false)
    }

    /// Validate every declared field of `draft`.
    pub fn validate(&self, draft: &ItemDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for rules in &self.fields {
            let Some(raw) = draft.text(rules.field) else {
                continue;
            };
            if let Some(message) = rules.first_error(raw) {
                errors.insert(rules.field, message);
            }
        }
        errors
    }
}

impl Default for ItemSchema {
    fn default() -> Self {
        Self::item()
    }
}

/// Parse raw numeric input. Surrounding whitespace is ignored; non-finite
/// values (`inf`, `NaN`) are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
