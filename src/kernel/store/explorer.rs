use crate::kernel::{Action, FocusTarget};
use crate::models::NodeKind;

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::ExplorerSetViewHeight { height } => {
                let prev = self.state.ui.explorer_height;
                self.state.ui.explorer_height = height;
                let scroll_changed = self.follow_explorer_selection();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: prev != height || scroll_changed,
                }
            }
            Action::ExplorerMoveSelection { delta } => {
                let rows = self.state.tree.flatten_for_view();
                if rows.is_empty() {
                    return super::DispatchResult::unchanged();
                }
                let selected = self.state.tree.selected();
                let current = selected
                    .and_then(|id| rows.iter().position(|row| row.id == id))
                    .map(|i| i as isize);
                let next = match current {
                    Some(i) => (i + delta).clamp(0, rows.len() as isize - 1) as usize,
                    None if delta < 0 => rows.len() - 1,
                    None => 0,
                };
                if current == Some(next as isize) {
                    return super::DispatchResult::unchanged();
                }

                let id = rows[next].id.clone();
                let mut result = self.select_node(&id);
                self.follow_explorer_selection();
                result.state_changed = true;
                result
            }
            Action::ExplorerActivate => {
                let Some(id) = self.state.tree.selected() else {
                    return super::DispatchResult::unchanged();
                };
                match self.state.tree.kind(&id) {
                    Some(NodeKind::Folder) => {
                        self.state.tree.toggle_expansion(&id);
                        super::DispatchResult::changed(Vec::new())
                    }
                    Some(NodeKind::File) => self.set_focus(FocusTarget::Editor),
                    None => super::DispatchResult::unchanged(),
                }
            }
            Action::ExplorerDeleteSelected => {
                let Some(id) = self.state.tree.selected() else {
                    return super::DispatchResult::unchanged();
                };
                let result = self.delete_node(&id);
                self.follow_explorer_selection();
                result
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    /// 调整滚动偏移使选中行可见
    fn follow_explorer_selection(&mut self) -> bool {
        let rows = self.state.tree.flatten_for_view();
        let height = self.state.ui.explorer_height.max(1);
        let prev = self.state.ui.explorer_scroll;

        let max_scroll = rows.len().saturating_sub(height);
        let mut scroll = prev.min(max_scroll);
        if let Some(index) = self
            .state
            .tree
            .selected()
            .and_then(|id| rows.iter().position(|row| row.id == id))
        {
            if index < scroll {
                scroll = index;
            } else if index >= scroll + height {
                scroll = index + 1 - height;
            }
        }

        self.state.ui.explorer_scroll = scroll;
        scroll != prev
    }
}
