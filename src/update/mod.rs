//! State transitions
//!
//! `update` is the only place the model changes in response to a message.
//! Each message family has its own handler module; after any of them runs
//! the split layout is recomputed so views never see stale pane rectangles.

mod app;
mod document;
pub mod editor;
pub mod layout;
mod ui;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use app::{close_document, update_app};
pub use document::update_document;
pub use editor::update_editor;
pub use layout::update_layout;
pub use ui::{hide_file_browser, show_file_browser, update_ui};

/// Apply one message and return the side effect it asks for, if any
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    let label = describe(&msg);
    #[cfg(debug_assertions)]
    let _span = tracing::debug_span!("update", msg = %label).entered();
    #[cfg(debug_assertions)]
    let before = crate::tracing::ViewSnapshot::from_model(model);

    let cmd = dispatch(model, msg);
    model.sync_layout();

    #[cfg(debug_assertions)]
    {
        let after = crate::tracing::ViewSnapshot::from_model(model);
        if let Some(diff) = before.diff(&after) {
            tracing::debug!(target: "cursor", %diff, "view changed");
        }
        if let Some(slot) = model.documents.current() {
            slot.editor.assert_invariants(&slot.document);
        }
    }

    cmd
}

fn dispatch(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => update_editor(model, m),
        Msg::Document(m) => update_document(model, m),
        Msg::Ui(m) => update_ui(model, m),
        Msg::Layout(m) => update_layout(model, m),
        Msg::App(m) => update_app(model, m),
    }
}

/// `Layout::SplitVertical`, `Document::InsertChar('x')`
#[cfg(debug_assertions)]
fn describe(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{m:?}"),
        Msg::Document(m) => format!("Document::{m:?}"),
        Msg::Ui(m) => format!("Ui::{m:?}"),
        Msg::Layout(m) => format!("Layout::{m:?}"),
        Msg::App(m) => format!("App::{m:?}"),
    }
}
