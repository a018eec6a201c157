use crate::kernel::editor::EditorAction;
use crate::kernel::{Action, FocusTarget, InputDialogKind};

impl super::Store {
    pub(super) fn reduce_placeholder_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::PlaceholderMoveCursor { delta } => {
                let len = self.state.editor.placeholders().len();
                if len == 0 {
                    return super::DispatchResult::unchanged();
                }
                let prev = self.state.ui.placeholder_cursor.min(len - 1);
                let next = (prev as isize + delta).clamp(0, len as isize - 1) as usize;
                self.state.ui.placeholder_cursor = next;
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: next != prev,
                }
            }
            Action::PlaceholderInsertSelected => {
                let Some(id) = self.selected_placeholder_id() else {
                    return super::DispatchResult::unchanged();
                };
                let (state_changed, effects) = self
                    .state
                    .editor
                    .dispatch_action(EditorAction::InsertPlaceholder(id));
                let mut result = super::DispatchResult {
                    effects,
                    state_changed,
                };
                if state_changed {
                    result.merge(self.set_focus(FocusTarget::Editor));
                }
                result
            }
            Action::PlaceholderDeleteSelected => {
                let Some(id) = self.selected_placeholder_id() else {
                    return super::DispatchResult::unchanged();
                };
                let (state_changed, effects) = self
                    .state
                    .editor
                    .dispatch_action(EditorAction::DeletePlaceholder(id));
                let len = self.state.editor.placeholders().len();
                self.state.ui.placeholder_cursor =
                    self.state.ui.placeholder_cursor.min(len.saturating_sub(1));
                super::DispatchResult {
                    effects,
                    state_changed,
                }
            }
            Action::PlaceholderEditSelected => {
                let Some(id) = self.selected_placeholder_id() else {
                    return super::DispatchResult::unchanged();
                };
                let (_, effects) = self
                    .state
                    .editor
                    .dispatch_action(EditorAction::BeginEditPlaceholder(id));
                let Some(title) = self
                    .state
                    .editor
                    .editing_placeholder()
                    .map(|p| p.title.clone())
                else {
                    return super::DispatchResult {
                        effects,
                        state_changed: false,
                    };
                };
                self.state.ui.input_dialog.open(
                    "Edit placeholder title",
                    title,
                    InputDialogKind::PlaceholderTitle,
                );
                super::DispatchResult::changed(effects)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn selected_placeholder_id(&self) -> Option<crate::models::PlaceholderId> {
        self.state
            .editor
            .placeholders()
            .get(self.state.ui.placeholder_cursor)
            .map(|p| p.id.clone())
    }
}
