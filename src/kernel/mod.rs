//! Headless application core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod save;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use editor::{EditorAction, EditorState};
pub use effect::Effect;
pub use save::{SavePayload, TemplateMetadata};
pub use state::{AppState, FocusTarget, InputDialogKind, InputDialogState, UiState};
pub use store::{DispatchResult, Store};
