//! Key binding table: canonical token → Action, plus the reverse index

use std::collections::HashMap;

use super::action::Action;
use super::defaults::seed_defaults;

/// Bidirectional mapping between key tokens and actions.
///
/// Each token is owned by at most one action. The reverse index keeps
/// tokens in binding order so the first entry is the primary key shown in
/// help and the command palette.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingTable {
    by_token: HashMap<String, Action>,
    by_action: HashMap<Action, Vec<String>>,
}

impl KeyBindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with the default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        seed_defaults(&mut table);
        table
    }

    /// Bind a token to an action, taking it away from any previous owner
    pub fn bind(&mut self, token: impl Into<String>, action: Action) {
        let token = token.into();
        if action == Action::Unknown {
            self.unbind(&token);
            return;
        }

        if let Some(previous) = self.by_token.insert(token.clone(), action) {
            if previous == action {
                return;
            }
            self.remove_from_reverse(previous, &token);
        }
        self.by_action.entry(action).or_default().push(token);
    }

    /// Bind several tokens to the same action
    pub fn bind_aliases<I, S>(&mut self, tokens: I, action: Action)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.bind(token, action);
        }
    }

    /// Remove a token's binding. Returns the action it was bound to.
    pub fn unbind(&mut self, token: &str) -> Option<Action> {
        let previous = self.by_token.remove(token)?;
        self.remove_from_reverse(previous, token);
        Some(previous)
    }

    /// Look up the action for a token, `Action::Unknown` when unbound
    pub fn get_action(&self, token: &str) -> Action {
        self.by_token
            .get(token)
            .copied()
            .unwrap_or(Action::Unknown)
    }

    /// All tokens bound to an action, primary first
    pub fn keys_for(&self, action: Action) -> &[String] {
        self.by_action
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop every binding and re-seed the defaults
    pub fn reset_to_defaults(&mut self) {
        self.by_token.clear();
        self.by_action.clear();
        seed_defaults(self);
    }

    /// Number of bound tokens
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    fn remove_from_reverse(&mut self, action: Action, token: &str) {
        if let Some(tokens) = self.by_action.get_mut(&action) {
            tokens.retain(|t| t != token);
            if tokens.is_empty() {
                self.by_action.remove(&action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let mut table = KeyBindingTable::new();
        table.bind("ctrl_s", Action::Save);
        assert_eq!(table.get_action("ctrl_s"), Action::Save);
        assert_eq!(table.keys_for(Action::Save), ["ctrl_s".to_string()]);
    }

    #[test]
    fn test_unbound_token_is_unknown() {
        let table = KeyBindingTable::new();
        assert_eq!(table.get_action("ctrl_s"), Action::Unknown);
        assert!(table.keys_for(Action::Save).is_empty());
    }

    #[test]
    fn test_rebind_moves_token_between_actions() {
        let mut table = KeyBindingTable::new();
        table.bind("ctrl_s", Action::Save);
        table.bind("ctrl_s", Action::Search);

        assert_eq!(table.get_action("ctrl_s"), Action::Search);
        assert!(table.keys_for(Action::Save).is_empty());
        assert_eq!(table.keys_for(Action::Search), ["ctrl_s".to_string()]);
    }

    #[test]
    fn test_rebind_same_action_does_not_duplicate() {
        let mut table = KeyBindingTable::new();
        table.bind("ctrl_s", Action::Save);
        table.bind("ctrl_s", Action::Save);
        assert_eq!(table.keys_for(Action::Save).len(), 1);
    }

    #[test]
    fn test_aliases_keep_order() {
        let mut table = KeyBindingTable::new();
        table.bind_aliases(["ctrl_y", "ctrl_shift_z"], Action::Redo);
        assert_eq!(
            table.keys_for(Action::Redo),
            ["ctrl_y".to_string(), "ctrl_shift_z".to_string()]
        );
    }

    #[test]
    fn test_unbind() {
        let mut table = KeyBindingTable::new();
        table.bind_aliases(["ctrl_y", "ctrl_shift_z"], Action::Redo);
        assert_eq!(table.unbind("ctrl_y"), Some(Action::Redo));
        assert_eq!(table.get_action("ctrl_y"), Action::Unknown);
        assert_eq!(table.keys_for(Action::Redo), ["ctrl_shift_z".to_string()]);
        assert_eq!(table.unbind("ctrl_y"), None);
    }

    #[test]
    fn test_bind_unknown_unbinds() {
        let mut table = KeyBindingTable::new();
        table.bind("ctrl_s", Action::Save);
        table.bind("ctrl_s", Action::Unknown);
        assert!(table.is_empty());
    }

    #[test]
    fn test_reset_to_defaults_restores_rebinds() {
        let mut table = KeyBindingTable::with_defaults();
        table.bind("ctrl_s", Action::Quit);
        table.reset_to_defaults();
        assert_eq!(table.get_action("ctrl_s"), Action::Save);
        assert_eq!(table.keys_for(Action::Quit), ["ctrl_q".to_string()]);
    }
}
