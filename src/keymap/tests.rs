//! Integration tests for the keymap system

use super::*;

fn ctrl(c: char) -> InputEvent {
    InputEvent::Key(Keystroke::char_with_mods(c, Modifiers::CTRL))
}

#[test]
fn test_keymap_lookup_save() {
    let table = KeyBindingTable::with_defaults();
    let token = normalize(&ctrl('s')).unwrap();
    assert_eq!(table.get_action(&token), Action::Save);
}

#[test]
fn test_keymap_lookup_redo_aliases() {
    let table = KeyBindingTable::with_defaults();
    assert_eq!(table.get_action("ctrl_y"), Action::Redo);

    let stroke = Keystroke::char_with_mods('Z', Modifiers::CTRL | Modifiers::SHIFT);
    let token = stroke.token().unwrap();
    assert_eq!(token, "ctrl_shift_z");
    assert_eq!(table.get_action(&token), Action::Redo);
}

#[test]
fn test_documented_defaults() {
    let table = KeyBindingTable::with_defaults();
    assert_eq!(table.get_action("ctrl_z"), Action::Undo);
    assert_eq!(table.get_action("tab"), Action::IndentLine);
    assert_eq!(table.get_action("shift_tab"), Action::UnindentLine);
    assert_eq!(table.get_action("f1"), Action::ToggleHelp);
    assert_eq!(table.get_action("f3"), Action::CommandPalette);
    assert_eq!(table.get_action("f4"), Action::SshConnect);
    assert_eq!(table.get_action("alt_a"), Action::SaveAs);
    assert_eq!(table.get_action("alt_f"), Action::CreateFolder);
    assert_eq!(table.get_action("alt_m"), Action::FilePicker);
    assert_eq!(table.get_action("ctrl_o"), Action::Open);
    assert_eq!(table.get_action("alt_tab"), Action::NextTab);
    assert_eq!(table.get_action("ctrl_pageup"), Action::PrevTab);
    assert_eq!(table.get_action("ctrl_arrow_right"), Action::FocusRightRegion);
}

#[test]
fn test_every_default_token_parses() {
    for info in ACTIONS {
        for token in info.default_keys {
            assert!(parse_token(token).is_ok(), "{} does not parse", token);
        }
    }
}

#[test]
fn test_bound_tokens_roundtrip_through_keys_for() {
    let table = KeyBindingTable::with_defaults();
    for info in ACTIONS {
        for token in table.keys_for(info.action) {
            assert_eq!(table.get_action(token), info.action);
        }
    }
}

#[test]
fn test_rebinding_default_removes_old_owner() {
    let mut table = KeyBindingTable::with_defaults();
    table.bind("ctrl_d", Action::DeleteLine);

    assert_eq!(table.get_action("ctrl_d"), Action::DeleteLine);
    assert!(table.keys_for(Action::DuplicateLine).is_empty());
    assert!(table
        .keys_for(Action::DeleteLine)
        .iter()
        .any(|t| t == "ctrl_d"));
}

#[test]
fn test_printable_input_is_never_looked_up() {
    assert_eq!(normalize(&InputEvent::Key(Keystroke::char('s'))), None);
}

#[test]
fn test_user_keymap_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: ctrl_e\n    action: toggle_file_browser\nunbind:\n  - ctrl_q\n",
    )
    .unwrap();

    let table = load_keymap(Some(&path));
    assert_eq!(table.get_action("ctrl_e"), Action::ToggleFileBrowser);
    assert_eq!(table.get_action("ctrl_q"), Action::Unknown);
    assert_eq!(table.get_action("ctrl_s"), Action::Save);
}

#[test]
fn test_broken_user_keymap_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(&path, "bindings: [unclosed").unwrap();

    let table = load_keymap(Some(&path));
    assert_eq!(table.get_action("ctrl_s"), Action::Save);
}
