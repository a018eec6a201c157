use crate::models::{FileId, NodeKind, TemplateError};

use super::save::SavePayload;
use super::{Action, AppState, Effect, FocusTarget};

mod explorer;
mod input_dialog;
mod placeholders;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }

    fn rejected(err: TemplateError) -> Self {
        tracing::warn!(error = %err, "action rejected");
        Self {
            effects: vec![Effect::Rejected(err)],
            state_changed: false,
        }
    }

    fn merge(&mut self, other: DispatchResult) {
        self.state_changed |= other.state_changed;
        self.effects.extend(other.effects);
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = match action {
            Action::CreateNode {
                kind,
                name,
                parent,
                is_repeating,
            } => self.create_node(kind, &name, parent, is_repeating),
            Action::DeleteNode(id) => self.delete_node(&id),
            Action::SelectNode(id) => self.select_node(&id),
            Action::ToggleExpansion(id) => {
                let before = self.state.tree.is_expanded(&id);
                self.state.tree.toggle_expansion(&id);
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: before != self.state.tree.is_expanded(&id),
                }
            }
            Action::Editor(editor_action) => {
                let (state_changed, effects) = self.state.editor.dispatch_action(editor_action);
                DispatchResult {
                    effects,
                    state_changed,
                }
            }
            Action::Save => self.save(),
            Action::SaveFinished { ok } => self.save_finished(ok),
            Action::SetFocus(focus) => self.set_focus(focus),
            Action::CycleFocus => self.set_focus(self.state.ui.focus.next()),
            Action::ClearStatus => DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.ui.status.take().is_some(),
            },
            action @ (Action::ExplorerSetViewHeight { .. }
            | Action::ExplorerMoveSelection { .. }
            | Action::ExplorerActivate
            | Action::ExplorerDeleteSelected) => self.reduce_explorer_action(action),
            action @ (Action::PlaceholderMoveCursor { .. }
            | Action::PlaceholderInsertSelected
            | Action::PlaceholderDeleteSelected
            | Action::PlaceholderEditSelected) => self.reduce_placeholder_action(action),
            action @ (Action::OpenNewNodeDialog { .. }
            | Action::OpenPlaceholderDialog
            | Action::InputDialogAppend(_)
            | Action::InputDialogBackspace
            | Action::InputDialogCursorLeft
            | Action::InputDialogCursorRight
            | Action::InputDialogAccept
            | Action::InputDialogCancel) => self.reduce_input_dialog_action(action),
        };

        self.surface_rejections(result)
    }

    fn surface_rejections(&mut self, mut result: DispatchResult) -> DispatchResult {
        let message = result.effects.iter().rev().find_map(|effect| match effect {
            Effect::Rejected(err) => Some(err.to_string()),
            _ => None,
        });
        if let Some(message) = message {
            self.state.ui.status = Some(message);
            result.state_changed = true;
        }
        result
    }

    fn set_focus(&mut self, focus: FocusTarget) -> DispatchResult {
        let prev = self.state.ui.focus;
        self.state.ui.focus = focus;
        DispatchResult {
            effects: Vec::new(),
            state_changed: prev != focus,
        }
    }

    fn files_changed(&self) -> Effect {
        Effect::FilesChanged(self.state.tree.snapshot())
    }

    fn create_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        parent: Option<FileId>,
        is_repeating: bool,
    ) -> DispatchResult {
        match self
            .state
            .tree
            .create_node(kind, name, parent.as_ref(), is_repeating)
        {
            Ok(_) => {
                if let Some(parent) = &parent {
                    self.state.tree.expand(parent);
                }
                DispatchResult::changed(vec![self.files_changed()])
            }
            Err(err) => DispatchResult::rejected(err),
        }
    }

    fn delete_node(&mut self, id: &FileId) -> DispatchResult {
        let selected_before = self.state.tree.selected();
        let removed = self.state.tree.delete_node(id);
        if removed.is_empty() {
            return DispatchResult::unchanged();
        }

        let mut effects = vec![self.files_changed()];
        if self.state.editor.remove_files(&removed) {
            effects.push(self.state.editor.contents_effect());
        }
        if selected_before.is_some_and(|s| removed.contains(&s)) {
            effects.push(Effect::FileSelected(None));
        }
        DispatchResult::changed(effects)
    }

    fn select_node(&mut self, id: &FileId) -> DispatchResult {
        let Some(node) = self.state.tree.select_node(id) else {
            return DispatchResult::rejected(TemplateError::UnknownNode);
        };
        self.state.editor.set_active_file(Some(&node));
        tracing::debug!(id = %id, kind = ?node.kind, "node selected");
        DispatchResult::changed(vec![Effect::FileSelected(Some(node))])
    }

    fn save(&mut self) -> DispatchResult {
        if self.state.saving {
            return DispatchResult::unchanged();
        }
        if !self.state.editor.has_changes() {
            self.state.ui.status = Some("Nothing to save".to_string());
            return DispatchResult {
                effects: Vec::new(),
                state_changed: true,
            };
        }

        self.state.saving = true;
        let payload = SavePayload::from_state(&self.state);
        tracing::info!(
            files = self.state.tree.len(),
            placeholders = payload.placeholders.len(),
            "save requested"
        );
        self.state.ui.status = Some("Saving...".to_string());
        DispatchResult::changed(vec![Effect::Save(payload)])
    }

    fn save_finished(&mut self, ok: bool) -> DispatchResult {
        if !self.state.saving {
            return DispatchResult::unchanged();
        }
        self.state.saving = false;

        if !ok {
            tracing::warn!("save failed, keeping unsaved state");
            self.state.ui.status = Some("Save failed".to_string());
            return DispatchResult::changed(Vec::new());
        }

        self.state.editor.mark_saved();
        tracing::info!("save completed");
        self.state.ui.status = Some("Saved".to_string());
        DispatchResult::changed(vec![self.state.editor.contents_effect()])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
