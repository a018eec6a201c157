use crate::kernel::services::ports::SessionConfig;
use crate::models::{FileId, NodeKind, TemplateTree};

use super::editor::EditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Explorer,
    Editor,
    Placeholders,
}

impl FocusTarget {
    pub fn next(self) -> Self {
        match self {
            FocusTarget::Explorer => FocusTarget::Editor,
            FocusTarget::Editor => FocusTarget::Placeholders,
            FocusTarget::Placeholders => FocusTarget::Explorer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDialogKind {
    NewNode {
        kind: NodeKind,
        parent: Option<FileId>,
        is_repeating: bool,
    },
    /// 第一步：标题（新建或编辑，取决于编辑器的 editing 状态）
    PlaceholderTitle,
    /// 第二步：描述
    PlaceholderDescription { title: String },
}

#[derive(Debug, Clone, Default)]
pub struct InputDialogState {
    pub visible: bool,
    pub title: String,
    pub value: String,
    /// 字节偏移
    pub cursor: usize,
    pub error: Option<String>,
    pub kind: Option<InputDialogKind>,
}

impl InputDialogState {
    pub fn open(
        &mut self,
        title: impl Into<String>,
        value: impl Into<String>,
        kind: InputDialogKind,
    ) {
        let value = value.into();
        self.visible = true;
        self.title = title.into();
        self.cursor = value.len();
        self.value = value;
        self.error = None;
        self.kind = Some(kind);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: FocusTarget,
    pub input_dialog: InputDialogState,
    /// 占位符列表中的高亮行
    pub placeholder_cursor: usize,
    pub explorer_scroll: usize,
    pub explorer_height: usize,
    pub status: Option<String>,
}

#[derive(Debug)]
pub struct AppState {
    pub tree: TemplateTree,
    pub editor: EditorState,
    pub config: SessionConfig,
    pub ui: UiState,
    /// 保存请求已发出、尚未收到结果
    pub saving: bool,
}

impl AppState {
    pub fn new(config: SessionConfig) -> Self {
        let tree = TemplateTree::new();
        let mut editor = EditorState::new(&config);
        editor.set_active_file(tree.selected_node().as_ref());

        Self {
            tree,
            editor,
            config,
            ui: UiState::default(),
            saving: false,
        }
    }

    /// 新建节点的默认父级：选中的文件夹，或选中文件所在的文件夹
    pub fn creation_parent(&self) -> Option<FileId> {
        let selected = self.tree.selected()?;
        match self.tree.kind(&selected)? {
            NodeKind::Folder => Some(selected),
            NodeKind::File => self.tree.parent_id(&selected),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
