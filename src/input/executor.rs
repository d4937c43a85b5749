//! Action executor: runs a resolved Action through the update loop

use crate::commands::Cmd;
use crate::keymap::Action;
use crate::model::AppModel;
use crate::update::update;

/// Whether an action has anything to run
pub fn can_execute(action: Action) -> bool {
    action != Action::Unknown
}

/// Human-readable description, for the palette and status bar
pub fn describe(action: Action) -> String {
    action.description().to_string()
}

/// Run `action`. Handlers that leave the status untouched get the action's
/// description as feedback.
pub fn dispatch(model: &mut AppModel, action: Action) -> Option<Cmd> {
    let msg = action.to_msg()?;
    if action != Action::Quit {
        model.ui.quit_armed = false;
    }

    tracing::debug!(action = action.name(), "executing action");
    let before = model.ui.status_message.clone();
    let cmd = update(model, msg);
    if model.ui.status_message == before {
        model.ui.set_status(describe(action));
    }
    cmd
}

/// Run `action`, reporting whether anything was executed
pub fn execute(model: &mut AppModel, action: Action) -> bool {
    can_execute(action) && dispatch(model, action).is_some()
}
