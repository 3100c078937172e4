//! End-to-end submit flows through `ItemForm`:
//! - create with options (dedup, truncation, flag write-back)
//! - gateway failure keeps the draft and surfaces the message
//! - edit mode writes through `update` under the existing id

use inventory::{
    Category, ItemField, ItemForm, ItemGateway, ItemId, ItemRecord, MemoryGateway, SubmitError,
};
use pretty_assertions::assert_eq;

fn brownie_form() -> ItemForm {
    let mut form = ItemForm::create();
    let store = form.store_mut();
    store.set_field(ItemField::Name, "Brownie").unwrap();
    store.set_field(ItemField::Category, "Cake").unwrap();
    store.set_field(ItemField::Cost, "5").unwrap();
    store.set_field(ItemField::Price, "10").unwrap();
    store.set_field(ItemField::Stock, "3.7").unwrap();
    store.set_field(ItemField::WithOptions, true).unwrap();
    store.set_option_input("Nuts");
    assert!(store.commit_option_input());
    assert!(store.add_option("Nuts"));
    assert!(store.add_option("Choc"));
    form
}

#[tokio::test]
async fn create_persists_normalised_record() {
    let gateway = MemoryGateway::new();
    let mut form = brownie_form();

    let id = form.submit(&gateway).await.unwrap();

    let stored = gateway.get(&id).await.unwrap().unwrap();
    assert_eq!(
        stored,
        ItemRecord {
            id: Some(id),
            name: "Brownie".into(),
            category: Category::Cake,
            cost: 5.0,
            price: 10.0,
            stock: 3,
            with_options: true,
            options: vec!["Nuts".into(), "Choc".into()],
        }
    );
    assert!(!form.store().is_submitting());
    assert_eq!(form.store().submit_error(), None);
    assert_eq!(form.store().values().stock, "3");
}

#[tokio::test]
async fn checkbox_without_options_is_cleared_on_submit() {
    let gateway = MemoryGateway::new();
    let mut form = brownie_form();
    for option in ["Nuts", "Choc"] {
        assert!(form.store_mut().remove_option(option));
    }

    let id = form.submit(&gateway).await.unwrap();

    let stored = gateway.get(&id).await.unwrap().unwrap();
    assert!(!stored.with_options);
    assert!(stored.options.is_empty());
    assert!(!form.store().values().with_options);
}

#[tokio::test]
async fn gateway_failure_keeps_draft_for_retry() {
    let gateway = MemoryGateway::new();
    gateway.fail_with(Some("PERMISSION_DENIED")).await;
    let mut form = brownie_form();

    let err = form.submit(&gateway).await.unwrap_err();
    assert!(matches!(err, SubmitError::Gateway(_)));
    assert_eq!(form.store().submit_error(), Some("PERMISSION_DENIED"));
    assert!(!form.store().is_submitting());
    assert_eq!(form.store().values().name, "Brownie");
    assert_eq!(form.store().values().options.len(), 2);

    gateway.fail_with(None).await;
    form.submit(&gateway).await.unwrap();
    assert_eq!(form.store().submit_error(), None);
    assert_eq!(gateway.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn edit_updates_under_existing_id() {
    let gateway = MemoryGateway::new();
    let id = brownie_form().submit(&gateway).await.unwrap();
    let record = gateway.get(&id).await.unwrap().unwrap();

    let mut form = ItemForm::edit(id.clone(), &record);
    assert!(form.is_editing());
    assert_eq!(form.store().values().cost, "5");
    form.store_mut().set_field(ItemField::Price, "12.5").unwrap();

    let saved = form.submit(&gateway).await.unwrap();
    assert_eq!(saved, id);

    let all = gateway.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].price, 12.5);
    assert_eq!(all[0].id, Some(ItemId::from(id.as_str())));
}

#[tokio::test]
async fn invalid_draft_never_reaches_gateway() {
    let gateway = MemoryGateway::new();
    let mut form = ItemForm::create();
    form.store_mut().set_field(ItemField::Cost, "-1").unwrap();

    let err = form.submit(&gateway).await.unwrap_err();
    let SubmitError::Invalid(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(errors.get(ItemField::Cost), Some("Must be more than zero"));
    assert_eq!(errors.get(ItemField::Price), Some("Price is required"));
    assert!(gateway.list().await.unwrap().is_empty());
}
