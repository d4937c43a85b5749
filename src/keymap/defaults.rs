//! Default keybindings for the editor
//!
//! Defaults are seeded in five fixed groups (file, edit, search/navigation,
//! view, tabs). The token lists come from the action registry so help text
//! and the binding table cannot drift apart.

use std::path::Path;

use super::action::{ActionGroup, ACTIONS};
use super::config::{apply_overrides, load_keymap_file};
use super::table::KeyBindingTable;

/// Seed order. Split navigation rides with the view group.
const SEED_GROUPS: [&[ActionGroup]; 5] = [
    &[ActionGroup::FileOps],
    &[ActionGroup::EditOps],
    &[ActionGroup::SearchNav],
    &[ActionGroup::ViewOps, ActionGroup::SplitNav],
    &[ActionGroup::TabOps],
];

/// Bind every default token into `table`
pub fn seed_defaults(table: &mut KeyBindingTable) {
    for groups in SEED_GROUPS {
        for info in ACTIONS.iter().filter(|info| groups.contains(&info.group)) {
            table.bind_aliases(info.default_keys.iter().copied(), info.action);
        }
    }
}

/// Build the runtime binding table: defaults, then user overrides from
/// `user_keymap` when the file exists.
///
/// A broken keymap file never prevents startup; errors are logged and the
/// defaults stay in effect.
pub fn load_keymap(user_keymap: Option<&Path>) -> KeyBindingTable {
    let mut table = KeyBindingTable::with_defaults();
    tracing::info!("Loaded default keymap ({} bindings)", table.len());

    let Some(path) = user_keymap else {
        return table;
    };
    if !path.exists() {
        return table;
    }

    match load_keymap_file(path) {
        Ok(config) => {
            let applied = apply_overrides(&mut table, &config);
            tracing::info!(
                "Applied {} keymap overrides from {}",
                applied,
                path.display()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
        }
    }
    table
}
