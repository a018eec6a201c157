//! 按键到内核动作的映射
//!
//! 对话框打开时独占键盘；其余情况按焦点区域分派。

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::kernel::editor::{CursorMove, EditorAction};
use crate::kernel::{Action, AppState, FocusTarget};
use crate::models::NodeKind;

#[derive(Debug, Clone)]
pub enum KeyOutcome {
    Dispatch(Vec<Action>),
    Quit,
    Ignored,
}

impl KeyOutcome {
    fn one(action: Action) -> Self {
        KeyOutcome::Dispatch(vec![action])
    }
}

pub fn map_key(state: &AppState, key: KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Ignored;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q')) {
        return KeyOutcome::Quit;
    }

    if state.ui.input_dialog.visible {
        return map_dialog_key(key, ctrl);
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('s') => KeyOutcome::one(Action::Save),
            KeyCode::Char('p') => KeyOutcome::one(Action::SetFocus(FocusTarget::Placeholders)),
            KeyCode::Char('e') => KeyOutcome::one(Action::SetFocus(FocusTarget::Explorer)),
            _ => KeyOutcome::Ignored,
        };
    }

    match key.code {
        // 编辑区内 Tab 输入制表符，Shift+Tab 在任何区域切换焦点
        KeyCode::Tab if state.ui.focus != FocusTarget::Editor => {
            return KeyOutcome::one(Action::CycleFocus)
        }
        KeyCode::BackTab => return KeyOutcome::one(Action::CycleFocus),
        KeyCode::Esc => return KeyOutcome::one(Action::ClearStatus),
        _ => {}
    }

    match state.ui.focus {
        FocusTarget::Explorer => map_explorer_key(state, key),
        FocusTarget::Editor => map_editor_key(key),
        FocusTarget::Placeholders => map_placeholder_key(key),
    }
}

fn map_dialog_key(key: KeyEvent, ctrl: bool) -> KeyOutcome {
    let action = match key.code {
        KeyCode::Esc => Action::InputDialogCancel,
        KeyCode::Enter => Action::InputDialogAccept,
        KeyCode::Backspace => Action::InputDialogBackspace,
        KeyCode::Left => Action::InputDialogCursorLeft,
        KeyCode::Right => Action::InputDialogCursorRight,
        KeyCode::Char(ch) if !ctrl => Action::InputDialogAppend(ch),
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::one(action)
}

fn map_explorer_key(state: &AppState, key: KeyEvent) -> KeyOutcome {
    let new_node = |kind, at_root, is_repeating| {
        KeyOutcome::one(Action::OpenNewNodeDialog {
            kind,
            at_root,
            is_repeating,
        })
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            KeyOutcome::one(Action::ExplorerMoveSelection { delta: -1 })
        }
        KeyCode::Down | KeyCode::Char('j') => {
            KeyOutcome::one(Action::ExplorerMoveSelection { delta: 1 })
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            KeyOutcome::one(Action::ExplorerActivate)
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let expanded = state
                .tree
                .selected()
                .filter(|id| state.tree.is_expanded(id));
            match expanded {
                Some(id) => KeyOutcome::one(Action::ToggleExpansion(id)),
                None => KeyOutcome::Ignored,
            }
        }
        KeyCode::Char('f') => new_node(NodeKind::File, false, false),
        KeyCode::Char('d') => new_node(NodeKind::Folder, false, false),
        KeyCode::Char('r') => new_node(NodeKind::Folder, false, true),
        KeyCode::Char('F') => new_node(NodeKind::File, true, false),
        KeyCode::Char('D') => new_node(NodeKind::Folder, true, false),
        KeyCode::Char('R') => new_node(NodeKind::Folder, true, true),
        KeyCode::Delete | KeyCode::Char('x') => KeyOutcome::one(Action::ExplorerDeleteSelected),
        _ => KeyOutcome::Ignored,
    }
}

fn map_editor_key(key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        if let Some(direction) = cursor_move(key.code) {
            return KeyOutcome::one(Action::Editor(EditorAction::ExtendSelection(direction)));
        }
    }

    let action = match key.code {
        KeyCode::Char(ch) => EditorAction::InsertText(ch.to_string()),
        KeyCode::Enter => EditorAction::InsertText("\n".to_string()),
        KeyCode::Tab => EditorAction::InsertText("\t".to_string()),
        KeyCode::Backspace => EditorAction::Backspace,
        KeyCode::Delete => EditorAction::DeleteForward,
        code => match cursor_move(code) {
            Some(direction) => EditorAction::MoveCursor(direction),
            None => return KeyOutcome::Ignored,
        },
    };
    KeyOutcome::one(Action::Editor(action))
}

fn cursor_move(code: KeyCode) -> Option<CursorMove> {
    match code {
        KeyCode::Left => Some(CursorMove::Left),
        KeyCode::Right => Some(CursorMove::Right),
        KeyCode::Up => Some(CursorMove::Up),
        KeyCode::Down => Some(CursorMove::Down),
        KeyCode::Home => Some(CursorMove::Home),
        KeyCode::End => Some(CursorMove::End),
        _ => None,
    }
}

fn map_placeholder_key(key: KeyEvent) -> KeyOutcome {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::PlaceholderMoveCursor { delta: -1 },
        KeyCode::Down | KeyCode::Char('j') => Action::PlaceholderMoveCursor { delta: 1 },
        KeyCode::Enter => Action::PlaceholderInsertSelected,
        KeyCode::Char('a') => Action::OpenPlaceholderDialog,
        KeyCode::Char('e') => Action::PlaceholderEditSelected,
        KeyCode::Delete | KeyCode::Char('x') => Action::PlaceholderDeleteSelected,
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::one(action)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/input.rs"]
mod tests;
