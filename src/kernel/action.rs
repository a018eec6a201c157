use crate::kernel::editor::EditorAction;
use crate::kernel::state::FocusTarget;
use crate::models::{FileId, NodeKind};

#[derive(Debug, Clone)]
pub enum Action {
    CreateNode {
        kind: NodeKind,
        name: String,
        parent: Option<FileId>,
        is_repeating: bool,
    },
    DeleteNode(FileId),
    SelectNode(FileId),
    ToggleExpansion(FileId),
    Editor(EditorAction),
    Save,
    SaveFinished {
        ok: bool,
    },
    SetFocus(FocusTarget),
    CycleFocus,
    ExplorerSetViewHeight {
        height: usize,
    },
    ExplorerMoveSelection {
        delta: isize,
    },
    ExplorerActivate,
    ExplorerDeleteSelected,
    PlaceholderMoveCursor {
        delta: isize,
    },
    PlaceholderInsertSelected,
    PlaceholderDeleteSelected,
    PlaceholderEditSelected,
    OpenNewNodeDialog {
        kind: NodeKind,
        at_root: bool,
        is_repeating: bool,
    },
    OpenPlaceholderDialog,
    InputDialogAppend(char),
    InputDialogBackspace,
    InputDialogCursorLeft,
    InputDialogCursorRight,
    InputDialogAccept,
    InputDialogCancel,
    ClearStatus,
}
