use super::*;
use crate::kernel::services::ports::SessionConfig;

fn state() -> AppState {
    AppState::new(SessionConfig::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn single(outcome: KeyOutcome) -> Action {
    match outcome {
        KeyOutcome::Dispatch(mut actions) if actions.len() == 1 => actions.remove(0),
        other => panic!("expected one action, got {other:?}"),
    }
}

#[test]
fn ctrl_q_quits_even_with_dialog_open() {
    let mut state = state();
    assert!(matches!(map_key(&state, ctrl('q')), KeyOutcome::Quit));

    state
        .ui
        .input_dialog
        .open("t", "", crate::kernel::InputDialogKind::PlaceholderTitle);
    assert!(matches!(map_key(&state, ctrl('q')), KeyOutcome::Quit));
}

#[test]
fn ctrl_s_saves_and_tab_cycles() {
    let state = state();
    assert!(matches!(single(map_key(&state, ctrl('s'))), Action::Save));
    assert!(matches!(single(map_key(&state, key(KeyCode::Tab))), Action::CycleFocus));
}

#[test]
fn dialog_captures_typing() {
    let mut state = state();
    state
        .ui
        .input_dialog
        .open("t", "", crate::kernel::InputDialogKind::PlaceholderTitle);

    assert!(matches!(
        single(map_key(&state, key(KeyCode::Char('f')))),
        Action::InputDialogAppend('f')
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Enter))),
        Action::InputDialogAccept
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Esc))),
        Action::InputDialogCancel
    ));
}

#[test]
fn explorer_keys_open_creation_dialogs() {
    let state = state();
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Char('r')))),
        Action::OpenNewNodeDialog {
            kind: NodeKind::Folder,
            at_root: false,
            is_repeating: true
        }
    ));
    assert!(matches!(
        single(map_key(&state, KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT))),
        Action::OpenNewNodeDialog {
            kind: NodeKind::File,
            at_root: true,
            is_repeating: false
        }
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Down))),
        Action::ExplorerMoveSelection { delta: 1 }
    ));
}

#[test]
fn editor_keys_become_edits() {
    let mut state = state();
    state.ui.focus = FocusTarget::Editor;

    assert!(matches!(
        single(map_key(&state, key(KeyCode::Char('x')))),
        Action::Editor(EditorAction::InsertText(text)) if text == "x"
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Enter))),
        Action::Editor(EditorAction::InsertText(text)) if text == "\n"
    ));
    assert!(matches!(
        single(map_key(&state, ctrl('p'))),
        Action::SetFocus(FocusTarget::Placeholders)
    ));
}

#[test]
fn editor_tab_inserts_and_back_tab_cycles() {
    let mut state = state();
    state.ui.focus = FocusTarget::Editor;

    assert!(matches!(
        single(map_key(&state, key(KeyCode::Tab))),
        Action::Editor(EditorAction::InsertText(text)) if text == "\t"
    ));
    assert!(matches!(
        single(map_key(&state, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))),
        Action::CycleFocus
    ));
}

#[test]
fn shift_arrows_extend_selection() {
    let mut state = state();
    state.ui.focus = FocusTarget::Editor;

    assert!(matches!(
        single(map_key(&state, KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT))),
        Action::Editor(EditorAction::ExtendSelection(CursorMove::Right))
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Right))),
        Action::Editor(EditorAction::MoveCursor(CursorMove::Right))
    ));
    assert!(matches!(
        single(map_key(&state, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT))),
        Action::Editor(EditorAction::InsertText(text)) if text == "A"
    ));
}

#[test]
fn placeholder_pane_keys() {
    let mut state = state();
    state.ui.focus = FocusTarget::Placeholders;

    assert!(matches!(
        single(map_key(&state, key(KeyCode::Char('a')))),
        Action::OpenPlaceholderDialog
    ));
    assert!(matches!(
        single(map_key(&state, key(KeyCode::Enter))),
        Action::PlaceholderInsertSelected
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('z'))),
        KeyOutcome::Ignored
    ));
}

#[test]
fn key_release_is_ignored() {
    let state = state();
    let mut event = key(KeyCode::Down);
    event.kind = KeyEventKind::Release;
    assert!(matches!(map_key(&state, event), KeyOutcome::Ignored));
}
