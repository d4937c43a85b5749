//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::keymap::{parse_token, Action, ActionGroup, ActionInfo, KeyBindingTable, ACTIONS};

// ============================================================================
// Command Palette Registry
// ============================================================================

/// Subsequence match of `query` in `target`, case-insensitive
///
/// Runs of consecutive hits, hits at word starts and a hit on the first
/// character earn bonus points. `None` when some query char is missing.
fn fuzzy_score(query: &str, target: &str) -> Option<i32> {
    let mut wanted = query.chars().flat_map(char::to_lowercase).peekable();
    let mut score = 0;
    let mut run = false;
    let mut word_start = true;

    for (i, c) in target.chars().flat_map(char::to_lowercase).enumerate() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if c == next {
            wanted.next();
            score += 1 + if run { 2 } else { 0 } + if word_start { 3 } else { 0 };
            if i == 0 {
                score += 5;
            }
            run = true;
        } else {
            run = false;
        }
        word_start = matches!(c, ' ' | '_' | '-');
    }

    wanted.peek().is_none().then_some(score)
}

/// Actions offered by the command palette
fn palette_actions() -> impl Iterator<Item = &'static ActionInfo> {
    // Focus actions only make sense from a key chord inside a split
    ACTIONS
        .iter()
        .filter(|info| info.action != Action::CommandPalette && info.action.focus_direction().is_none())
}

/// Filter palette actions by a search query (fuzzy match on description)
pub fn filter_actions(query: &str) -> Vec<&'static ActionInfo> {
    if query.is_empty() {
        return palette_actions().collect();
    }

    let mut matches: Vec<(&'static ActionInfo, i32)> = palette_actions()
        .filter_map(|info| {
            let by_description = fuzzy_score(query, info.description);
            let by_name = fuzzy_score(query, info.name);
            by_description.max(by_name).map(|score| (info, score))
        })
        .collect();

    // Sort by score descending (best matches first), stable for ties
    matches.sort_by(|a, b| b.1.cmp(&a.1));

    matches.into_iter().map(|(info, _)| info).collect()
}

/// Human-readable keys bound to an action, e.g. `Ctrl+Y / Ctrl+Shift+Z`
pub fn key_display(keymap: &KeyBindingTable, action: Action) -> String {
    keymap
        .keys_for(action)
        .iter()
        .map(|token| match parse_token(token) {
            Ok(stroke) => stroke.display_string(),
            Err(_) => token.clone(),
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn group_title(group: ActionGroup) -> &'static str {
    match group {
        ActionGroup::FileOps => "File",
        ActionGroup::EditOps => "Edit",
        ActionGroup::SearchNav => "Search and navigation",
        ActionGroup::ViewOps => "View",
        ActionGroup::TabOps => "Tabs",
        ActionGroup::SplitNav => "Split view",
    }
}

/// Help window text: every action with its current keys, grouped
pub fn help_lines(keymap: &KeyBindingTable) -> Vec<String> {
    let mut lines = Vec::new();
    let mut group = None;
    for info in ACTIONS {
        if group != Some(info.group) {
            if group.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("{}:", group_title(info.group)));
            group = Some(info.group);
        }
        let keys = key_display(keymap, info.action);
        let keys = if keys.is_empty() { "-".to_string() } else { keys };
        lines.push(format!("  {:<28} {}", keys, info.description));
    }
    lines
}

// ============================================================================
// Side-effect commands
// ============================================================================

/// Side effects returned from `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the UI
    Redraw,
    /// Request application exit
    Quit,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if this command (or any batched command) asks to exit
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.is_quit()),
            _ => false,
        }
    }
}
