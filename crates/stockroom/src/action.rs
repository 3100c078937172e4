use inventory::{ItemId, ItemRecord, SubmitOutcome};
use strum::Display;

/// Everything that flows through the app's action channel.
///
/// Input handlers, the gateway executor and the loop itself all speak this
/// type; the app applies them one by one in `App::handle_actions`.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    /// Redraw-only change inside a component.
    Update,

    // navigation
    OpenList,
    OpenCreate,
    OpenEdit(ItemId),

    // item table
    RefreshItems,
    ItemsLoaded(Vec<ItemRecord>),
    ItemsFailed(String),

    // item form
    ItemLoaded(ItemId, ItemRecord),
    ItemLoadFailed(ItemId, String),
    Submit,
    Persist(ItemRecord),
    SubmitFinished(SubmitOutcome),
}
