use crate::kernel::Effect;
use crate::models::{PlaceholderId, TemplateError, TextBuffer};

use super::action::{CursorMove, EditorAction};
use super::state::EditorState;
use super::viewport;

impl EditorState {
    pub fn dispatch_action(&mut self, action: EditorAction) -> (bool, Vec<Effect>) {
        match action {
            EditorAction::SetViewportSize { width, height } => {
                let prev = (self.viewport.width, self.viewport.height);
                self.viewport.width = width.max(1);
                self.viewport.height = height.max(1);
                viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
                (prev != (self.viewport.width, self.viewport.height), Vec::new())
            }
            EditorAction::UpdateContent(text) => {
                let applied = self.update_content(&text);
                self.after_edit(applied)
            }
            EditorAction::InsertText(text) => {
                if self.active_file().is_none() || text.is_empty() {
                    return (false, Vec::new());
                }
                self.buffer.insert_str(&text);
                let applied = self.commit_buffer();
                self.after_edit(applied)
            }
            EditorAction::Backspace => {
                if self.active_file().is_none() || !self.buffer.backspace() {
                    return (false, Vec::new());
                }
                let applied = self.commit_buffer();
                self.after_edit(applied)
            }
            EditorAction::DeleteForward => {
                if self.active_file().is_none() || !self.buffer.delete_forward() {
                    return (false, Vec::new());
                }
                let applied = self.commit_buffer();
                self.after_edit(applied)
            }
            EditorAction::MoveCursor(direction) => self.move_cursor(direction),
            EditorAction::ExtendSelection(direction) => self.extend_selection(direction),
            EditorAction::SetCursor(pos) => {
                if self.active_file().is_none() {
                    return (false, Vec::new());
                }
                let prev = self.buffer.cursor();
                self.buffer.set_cursor(pos);
                viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
                (prev != self.buffer.cursor(), Vec::new())
            }
            EditorAction::SetSelection { anchor, cursor } => {
                if self.active_file().is_none() {
                    return (false, Vec::new());
                }
                self.buffer.set_selection(anchor, cursor);
                viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
                (true, Vec::new())
            }
            EditorAction::CreatePlaceholder { title, description } => {
                let result = self.create_placeholder(&title, &description).map(|_| ());
                self.after_placeholder_change(result)
            }
            EditorAction::UpdatePlaceholder {
                id,
                title,
                description,
            } => {
                let result = self.update_placeholder(&id, &title, &description);
                self.after_placeholder_change(result)
            }
            EditorAction::DeletePlaceholder(id) => {
                if !self.delete_placeholder(&id) {
                    return (false, Vec::new());
                }
                tracing::debug!(id = %id, "placeholder deleted");
                (true, vec![self.placeholders_effect()])
            }
            EditorAction::BeginEditPlaceholder(id) => match self.begin_edit_placeholder(&id) {
                Ok(()) => (true, Vec::new()),
                Err(err) => rejected(err),
            },
            EditorAction::CancelEditPlaceholder => (self.cancel_edit_placeholder(), Vec::new()),
            EditorAction::SubmitPlaceholder { title, description } => {
                let result = self.submit_placeholder(&title, &description);
                self.after_placeholder_change(result)
            }
            EditorAction::InsertPlaceholder(id) => self.insert_placeholder_by_id(&id),
        }
    }

    fn insert_placeholder_by_id(&mut self, id: &PlaceholderId) -> (bool, Vec<Effect>) {
        let Some(placeholder) = self.catalog().get(id).cloned() else {
            return rejected(TemplateError::UnknownPlaceholder);
        };
        let applied = self.insert_placeholder(&placeholder);
        if applied {
            tracing::debug!(id = %id, cursor = self.buffer.cursor(), "placeholder inserted");
        }
        self.after_edit(applied)
    }

    fn move_cursor(&mut self, direction: CursorMove) -> (bool, Vec<Effect>) {
        if self.active_file().is_none() {
            return (false, Vec::new());
        }
        let prev = self.buffer.cursor();
        apply_move(&mut self.buffer, direction);
        viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
        (prev != self.buffer.cursor(), Vec::new())
    }

    fn extend_selection(&mut self, direction: CursorMove) -> (bool, Vec<Effect>) {
        if self.active_file().is_none() {
            return (false, Vec::new());
        }
        let prev = (self.buffer.cursor(), self.buffer.selection().copied());
        self.buffer.select_with(|buffer| apply_move(buffer, direction));
        viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
        let next = (self.buffer.cursor(), self.buffer.selection().copied());
        (prev != next, Vec::new())
    }

    fn after_edit(&mut self, applied: bool) -> (bool, Vec<Effect>) {
        if !applied {
            return (false, Vec::new());
        }
        viewport::clamp_and_follow(&mut self.viewport, &self.buffer, self.tab_size);
        (true, vec![self.contents_effect()])
    }

    fn after_placeholder_change(
        &mut self,
        result: Result<(), TemplateError>,
    ) -> (bool, Vec<Effect>) {
        match result {
            Ok(()) => (true, vec![self.placeholders_effect()]),
            Err(err) => rejected(err),
        }
    }

    pub fn contents_effect(&self) -> Effect {
        Effect::ContentsChanged {
            contents: self.contents_snapshot(),
            changes: self.changes_snapshot(),
        }
    }

    pub fn placeholders_effect(&self) -> Effect {
        Effect::PlaceholdersChanged(self.placeholders().to_vec())
    }
}

fn rejected(err: TemplateError) -> (bool, Vec<Effect>) {
    tracing::warn!(error = %err, "editor action rejected");
    (false, vec![Effect::Rejected(err)])
}

fn apply_move(buffer: &mut TextBuffer, direction: CursorMove) {
    match direction {
        CursorMove::Left => buffer.move_left(),
        CursorMove::Right => buffer.move_right(),
        CursorMove::Up => buffer.move_up(),
        CursorMove::Down => buffer.move_down(),
        CursorMove::Home => buffer.move_home(),
        CursorMove::End => buffer.move_end(),
    }
}
