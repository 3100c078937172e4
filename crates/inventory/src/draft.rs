use crate::field::ItemField;
use crate::item::ItemRecord;
use crate::options::OptionList;

/// Editable values of one item form.
///
/// Numeric fields stay raw text until serialization so the user can type
/// partial input such as `"3."` without it being rewritten under them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub cost: String,
    pub price: String,
    pub stock: String,
    pub with_options: bool,
    pub options: OptionList,
}

impl ItemDraft {
    /// Seed a draft for editing an existing record.
    pub fn from_record(record: &ItemRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.to_string(),
            cost: record.cost.to_string(),
            price: record.price.to_string(),
            stock: record.stock.to_string(),
            with_options: record.with_options,
            options: OptionList::from(record.options.clone()),
        }
    }

    /// Raw text of a textual field, `None` for flag/list fields.
    pub fn text(&self, field: ItemField) -> Option<&str> {
        match field {
            ItemField::Name => Some(&self.name),
            ItemField::Category => Some(&self.category),
            ItemField::Cost => Some(&self.cost),
            ItemField::Price => Some(&self.price),
            ItemField::Stock => Some(&self.stock),
            ItemField::WithOptions | ItemField::Options => None,
        }
    }

    pub(crate) fn text_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Name => Some(&mut self.name),
            ItemField::Category => Some(&mut self.category),
            ItemField::Cost => Some(&mut self.cost),
            ItemField::Price => Some(&mut self.price),
            ItemField::Stock => Some(&mut self.stock),
            ItemField::WithOptions | ItemField::Options => None,
        }
    }
}
