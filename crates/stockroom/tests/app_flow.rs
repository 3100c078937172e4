//! Drives `App` without a terminal: key events in, actions drained, gateway
//! checked afterwards.

use std::{sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use inventory::{Category, ItemGateway, ItemId, ItemRecord, JsonFileGateway, MemoryGateway};
use pretty_assertions::assert_eq;
use stockroom::{
    action::Action,
    app::{App, Screen},
    cli::Cmd,
    tui::Event,
};

fn key(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
    app.drain().unwrap();
}

fn ctrl(app: &mut App, c: char) {
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char(c),
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    app.drain().unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

fn stored(id: &str, name: &str) -> ItemRecord {
    ItemRecord {
        id: Some(ItemId::from(id)),
        name: name.into(),
        category: Category::Pie,
        cost: 1.0,
        price: 2.0,
        stock: 1,
        with_options: false,
        options: vec![],
    }
}

/// Fill name, category, cost and price on a fresh create form.
fn fill_new(app: &mut App, name: &str) {
    key(app, KeyCode::Enter);
    type_text(app, name);
    key(app, KeyCode::Enter);
    key(app, KeyCode::Down);
    key(app, KeyCode::Right);
    for value in ["1", "2"] {
        key(app, KeyCode::Down);
        key(app, KeyCode::Enter);
        type_text(app, value);
        key(app, KeyCode::Enter);
    }
}

/// Let the gateway executor answer and apply whatever it sent.
async fn settle(app: &mut App) {
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        app.drain().unwrap();
    }
}

#[tokio::test]
async fn create_from_the_table_and_return() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut app = App::new(gateway.clone(), &Cmd::Browse, 4.0, 30.0).unwrap();
    settle(&mut app).await;
    assert_eq!(app.screen, Screen::List);

    key(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::Create);

    // name
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "Brownie");
    key(&mut app, KeyCode::Enter);
    // category
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Right);
    // cost
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "5");
    key(&mut app, KeyCode::Enter);
    // price
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "10");
    key(&mut app, KeyCode::Enter);
    // stock
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "3.7");
    key(&mut app, KeyCode::Enter);

    ctrl(&mut app, 's');
    settle(&mut app).await;

    assert_eq!(app.screen, Screen::List);
    let items = gateway.list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Brownie");
    assert_eq!(items[0].category, Category::Cake);
    assert_eq!(items[0].stock, 3);
}

#[tokio::test]
async fn edit_loads_and_updates_in_place() {
    let gateway = Arc::new(MemoryGateway::with_items([ItemRecord {
        id: Some(ItemId::from("k1")),
        name: "Cruller".into(),
        category: Category::Fried,
        cost: 1.0,
        price: 2.5,
        stock: 8,
        with_options: false,
        options: vec![],
    }]));
    let cmd = Cmd::Edit { id: "k1".into() };
    let mut app = App::new(gateway.clone(), &cmd, 4.0, 30.0).unwrap();
    settle(&mut app).await;

    // price is the fourth row
    for _ in 0..3 {
        key(&mut app, KeyCode::Down);
    }
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "5");
    key(&mut app, KeyCode::Enter);

    ctrl(&mut app, 's');
    settle(&mut app).await;

    assert_eq!(app.screen, Screen::Edit(ItemId::from("k1")));
    let stored = gateway.get(&ItemId::from("k1")).await.unwrap().unwrap();
    assert_eq!(stored.price, 2.55);
    assert_eq!(gateway.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_save_stays_on_the_form() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut app = App::new(gateway.clone(), &Cmd::New, 4.0, 30.0).unwrap();
    gateway.fail_with(Some("PERMISSION_DENIED")).await;

    fill_new(&mut app, "Pie");

    ctrl(&mut app, 's');
    settle(&mut app).await;
    assert_eq!(app.screen, Screen::Create);
    gateway.fail_with(None).await;
    assert!(gateway.list().await.unwrap().is_empty());

    // the draft is still there, a second save goes through
    ctrl(&mut app, 's');
    settle(&mut app).await;
    assert_eq!(app.screen, Screen::List);
    assert_eq!(gateway.list().await.unwrap()[0].name, "Pie");
}

#[tokio::test]
async fn ctrl_c_quits() {
    let mut app = App::new(Arc::new(MemoryGateway::new()), &Cmd::Browse, 4.0, 30.0).unwrap();
    ctrl(&mut app, 'c');
    assert!(app.should_quit);
}

#[tokio::test]
async fn late_load_for_a_left_form_does_not_fill_the_next_one() {
    let gateway = Arc::new(MemoryGateway::with_items([
        stored("a", "Apple"),
        stored("b", "Berry"),
    ]));
    let mut app = App::new(gateway.clone(), &Cmd::Edit { id: "a".into() }, 4.0, 30.0).unwrap();

    // leave before the first load answers, then open another item
    key(&mut app, KeyCode::Esc);
    app.send(Action::OpenEdit(ItemId::from("b"))).unwrap();
    app.drain().unwrap();
    settle(&mut app).await;
    assert_eq!(app.screen, Screen::Edit(ItemId::from("b")));

    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "X");
    key(&mut app, KeyCode::Enter);
    ctrl(&mut app, 's');
    settle(&mut app).await;

    let a = gateway.get(&ItemId::from("a")).await.unwrap().unwrap();
    let b = gateway.get(&ItemId::from("b")).await.unwrap().unwrap();
    assert_eq!(a.name, "Apple");
    assert_eq!(b.name, "BerryX");
}

#[tokio::test]
async fn esc_during_a_failing_save_keeps_the_form() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut app = App::new(gateway.clone(), &Cmd::New, 4.0, 30.0).unwrap();
    gateway.fail_with(Some("PERMISSION_DENIED")).await;
    fill_new(&mut app, "Tart");

    ctrl(&mut app, 's');
    key(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::Create);

    settle(&mut app).await;
    assert_eq!(app.screen, Screen::Create);

    // once the failure is in, Esc leaves again
    key(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::List);
}

#[tokio::test]
async fn file_backed_app_persists_across_gateways() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    let mut app = App::new(Arc::new(JsonFileGateway::new(&path)), &Cmd::New, 4.0, 30.0).unwrap();

    fill_new(&mut app, "Scone");
    ctrl(&mut app, 's');
    settle(&mut app).await;
    assert_eq!(app.screen, Screen::List);

    let items = JsonFileGateway::new(&path).list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Scone");
    assert_eq!(items[0].price, 2.0);
}
