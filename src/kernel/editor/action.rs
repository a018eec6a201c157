use crate::models::PlaceholderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone)]
pub enum EditorAction {
    SetViewportSize {
        width: usize,
        height: usize,
    },
    UpdateContent(String),
    InsertText(String),
    Backspace,
    DeleteForward,
    MoveCursor(CursorMove),
    /// Shift + 方向键
    ExtendSelection(CursorMove),
    SetCursor(usize),
    SetSelection {
        anchor: usize,
        cursor: usize,
    },
    CreatePlaceholder {
        title: String,
        description: String,
    },
    UpdatePlaceholder {
        id: PlaceholderId,
        title: String,
        description: String,
    },
    DeletePlaceholder(PlaceholderId),
    BeginEditPlaceholder(PlaceholderId),
    CancelEditPlaceholder,
    SubmitPlaceholder {
        title: String,
        description: String,
    },
    InsertPlaceholder(PlaceholderId),
}
