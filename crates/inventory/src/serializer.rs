//! Submit serializer: draft in, persisted record out.
//!
//! Steps, in order:
//! 1. `with_options` is forced off when there are no options.
//! 2. Options are normalised (empty entries dropped, ordered dedup); when
//!    `with_options` ends up off the record carries no options at all.
//! 3. `stock` is truncated toward zero. Blank stock counts as `0`.
//! 4. `cost` and `price` are parsed as plain numbers.
//! 5. The id is attached only in edit mode.
//!
//! The function assumes the draft already passed validation; anything it
//! still cannot coerce is reported as a `SerializeError`.

use crate::draft::ItemDraft;
use crate::errors::SerializeError;
use crate::field::ItemField;
use crate::item::{Category, ItemId, ItemRecord};
use crate::options::dedup_ordered;
use crate::schema::parse_number;

pub fn serialize(draft: &ItemDraft, id: Option<&ItemId>) -> Result<ItemRecord, SerializeError> {
    let category = draft
        .category
        .parse::<Category>()
        .map_err(|_| SerializeError::UnknownCategory(draft.category.clone()))?;

    let options = dedup_ordered(
        draft
            .options
            .iter()
            .filter(|option| !option.is_empty())
            .map(str::to_string),
    );
    let with_options = draft.with_options && !options.is_empty();

    Ok(ItemRecord {
        id: id.cloned(),
        name: draft.name.clone(),
        category,
        cost: coerce(ItemField::Cost, &draft.cost)?,
        price: coerce(ItemField::Price, &draft.price)?,
        stock: coerce_stock(&draft.stock)?,
        with_options,
        options: if with_options { options } else { Vec::new() },
    })
}

/// Drop the fractional part. `f64 as i64` saturates and maps `-0.0` to `0`,
/// so `-0.5` serializes as `0`.
pub fn truncate_stock(value: f64) -> i64 {
    value.trunc() as i64
}

fn coerce(field: ItemField, raw: &str) -> Result<f64, SerializeError> {
    parse_number(raw).ok_or_else(|| SerializeError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })
}

fn coerce_stock(raw: &str) -> Result<i64, SerializeError> {
    if raw.trim().is_empty() {
        return Ok(0);
    }
    coerce(ItemField::Stock, raw).map(truncate_stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{join_options, split_options};
    use crate::options::OptionList;
    use pretty_assertions::assert_eq;

    fn draft() -> ItemDraft {
        ItemDraft {
            name: "Brownie".into(),
            category: "Cake".into(),
            cost: "5".into(),
            price: "10".into(),
            stock: "3.7".into(),
            with_options: true,
            options: OptionList::from(vec!["Nuts".into(), "Nuts".into(), "Choc".into()]),
        }
    }

    #[test]
    fn serializes_brownie_for_create() {
        let record = serialize(&draft(), None).unwrap();
        assert_eq!(
            record,
            ItemRecord {
                id: None,
                name: "Brownie".into(),
                category: Category::Cake,
                cost: 5.0,
                price: 10.0,
                stock: 3,
                with_options: true,
                options: vec!["Nuts".into(), "Choc".into()],
            }
        );
    }

    #[test]
    fn empty_options_force_flag_off() {
        let mut d = draft();
        d.options = OptionList::new();
        let record = serialize(&d, None).unwrap();
        assert!(!record.with_options);
        assert_eq!(join_options(&record.options), "");
    }

    #[test]
    fn flag_off_drops_options_from_record() {
        let mut d = draft();
        d.with_options = false;
        let record = serialize(&d, None).unwrap();
        assert!(!record.with_options);
        assert!(record.options.is_empty());
    }

    #[test]
    fn stock_truncates_toward_zero() {
        assert_eq!(truncate_stock(7.9), 7);
        assert_eq!(truncate_stock(-0.5), 0);
        assert_eq!(truncate_stock(-2.9), -2);

        let mut d = draft();
        d.stock = String::new();
        assert_eq!(serialize(&d, None).unwrap().stock, 0);
    }

    #[test]
    fn edit_mode_attaches_id() {
        let id = ItemId::from("item-1");
        let record = serialize(&draft(), Some(&id)).unwrap();
        assert_eq!(record.id, Some(id));
    }

    #[test]
    fn wire_form_round_trips() {
        let record = serialize(&draft(), None).unwrap();
        assert_eq!(split_options(&join_options(&record.options)), record.options);
    }

    #[test]
    fn unvalidated_garbage_is_reported() {
        let mut d = draft();
        d.category = "Bread".into();
        assert_eq!(
            serialize(&d, None).unwrap_err(),
            SerializeError::UnknownCategory("Bread".into())
        );

        let mut d = draft();
        d.price = "ten".into();
        assert!(matches!(
            serialize(&d, None),
            Err(SerializeError::InvalidNumber {
                field: ItemField::Price,
                ..
            })
        ));
    }
}
