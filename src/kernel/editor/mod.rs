//! Template content editor: per-file contents, changed flags, placeholder catalog.

mod action;
mod reducer;
mod state;
mod viewport;

pub use action::{CursorMove, EditorAction};
pub use state::{ActiveView, EditorState, EditorViewportState};
pub use viewport::{clamp_and_follow, cursor_display_x_abs, expand_tabs};
