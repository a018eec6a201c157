use crate::kernel::editor::EditorAction;
use crate::kernel::{Action, InputDialogKind};
use crate::models::{NodeKind, TemplateError};

impl super::Store {
    pub(super) fn reduce_input_dialog_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::OpenNewNodeDialog {
                kind,
                at_root,
                is_repeating,
            } => {
                let parent = if at_root {
                    None
                } else {
                    self.state.creation_parent()
                };
                let what = match (kind, is_repeating) {
                    (NodeKind::File, _) => "file",
                    (NodeKind::Folder, false) => "folder",
                    (NodeKind::Folder, true) => "repeating folder",
                };
                let location = parent
                    .as_ref()
                    .and_then(|p| self.state.tree.name(p))
                    .map(|name| format!(" in {name}"))
                    .unwrap_or_default();
                self.state.ui.input_dialog.open(
                    format!("New {what}{location}"),
                    "",
                    InputDialogKind::NewNode {
                        kind,
                        parent,
                        is_repeating,
                    },
                );
                super::DispatchResult::changed(Vec::new())
            }
            Action::OpenPlaceholderDialog => {
                self.state.editor.cancel_edit_placeholder();
                self.state.ui.input_dialog.open(
                    "New placeholder title",
                    "",
                    InputDialogKind::PlaceholderTitle,
                );
                super::DispatchResult::changed(Vec::new())
            }
            Action::InputDialogAppend(ch) => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible {
                    return super::DispatchResult::unchanged();
                }

                dialog.error = None;
                if dialog.cursor > dialog.value.len() {
                    dialog.cursor = dialog.value.len();
                }
                dialog.value.insert(dialog.cursor, ch);
                dialog.cursor += ch.len_utf8();
                super::DispatchResult::changed(Vec::new())
            }
            Action::InputDialogBackspace => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::unchanged();
                }

                dialog.error = None;
                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                dialog.value.drain(prev..dialog.cursor);
                dialog.cursor = prev;
                super::DispatchResult::changed(Vec::new())
            }
            Action::InputDialogCursorLeft => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::unchanged();
                }

                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let changed = prev != dialog.cursor;
                dialog.cursor = prev;
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::InputDialogCursorRight => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor >= dialog.value.len() {
                    return super::DispatchResult::unchanged();
                }

                let next = dialog.value[dialog.cursor..]
                    .chars()
                    .next()
                    .map(|ch| dialog.cursor + ch.len_utf8())
                    .unwrap_or(dialog.value.len());
                let changed = next != dialog.cursor;
                dialog.cursor = next;
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::InputDialogAccept => self.accept_input_dialog(),
            Action::InputDialogCancel => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible {
                    return super::DispatchResult::unchanged();
                }
                let was_placeholder = matches!(
                    dialog.kind,
                    Some(InputDialogKind::PlaceholderTitle)
                        | Some(InputDialogKind::PlaceholderDescription { .. })
                );
                dialog.reset();
                if was_placeholder {
                    self.state.editor.cancel_edit_placeholder();
                }
                super::DispatchResult::changed(Vec::new())
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn accept_input_dialog(&mut self) -> super::DispatchResult {
        let dialog = &mut self.state.ui.input_dialog;
        if !dialog.visible {
            return super::DispatchResult::unchanged();
        }
        let Some(kind) = dialog.kind.clone() else {
            dialog.reset();
            return super::DispatchResult::changed(Vec::new());
        };
        let value = dialog.value.clone();

        match kind {
            InputDialogKind::NewNode {
                kind,
                parent,
                is_repeating,
            } => {
                let result = self.create_node(kind, &value, parent, is_repeating);
                let error = result.effects.iter().find_map(|effect| match effect {
                    crate::kernel::Effect::Rejected(err) => Some(err.to_string()),
                    _ => None,
                });
                match error {
                    Some(message) => self.state.ui.input_dialog.error = Some(message),
                    None => self.state.ui.input_dialog.reset(),
                }
                super::DispatchResult {
                    effects: result.effects,
                    state_changed: true,
                }
            }
            InputDialogKind::PlaceholderTitle => {
                let title = value.trim().to_string();
                if title.is_empty() {
                    self.state.ui.input_dialog.error =
                        Some(TemplateError::EmptyPlaceholderTitle.to_string());
                    return super::DispatchResult::changed(Vec::new());
                }
                let description = self
                    .state
                    .editor
                    .editing_placeholder()
                    .map(|p| p.description.clone())
                    .unwrap_or_default();
                self.state.ui.input_dialog.open(
                    format!("Description for {title}"),
                    description,
                    InputDialogKind::PlaceholderDescription { title },
                );
                super::DispatchResult::changed(Vec::new())
            }
            InputDialogKind::PlaceholderDescription { title } => {
                self.state.ui.input_dialog.reset();
                let (_, effects) = self
                    .state
                    .editor
                    .dispatch_action(EditorAction::SubmitPlaceholder {
                        title,
                        description: value,
                    });
                super::DispatchResult::changed(effects)
            }
        }
    }
}
