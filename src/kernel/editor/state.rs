use crate::kernel::services::ports::SessionConfig;
use crate::models::{
    FileId, FileNode, NodeKind, Placeholder, PlaceholderCatalog, PlaceholderId, TemplateError,
    TextBuffer,
};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// 编辑区当前展示的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveView {
    /// 未选中任何节点
    Empty,
    /// 文件夹不可编辑，只展示提示
    Folder { id: FileId, name: String },
    File { id: FileId, name: String },
}

#[derive(Debug, Clone, Copy)]
pub struct EditorViewportState {
    pub line_offset: usize,
    pub height: usize,
    pub horiz_offset: u32,
    pub width: usize,
}

impl Default for EditorViewportState {
    fn default() -> Self {
        Self {
            line_offset: 0,
            height: 20,
            horiz_offset: 0,
            width: 80,
        }
    }
}

#[derive(Debug)]
pub struct EditorState {
    contents: FxHashMap<FileId, String>,
    changes: FxHashMap<FileId, bool>,
    active: ActiveView,
    pub buffer: TextBuffer,
    catalog: PlaceholderCatalog,
    editing_placeholder: Option<PlaceholderId>,
    root_body: String,
    pub viewport: EditorViewportState,
    pub tab_size: u8,
}

impl EditorState {
    pub fn new(config: &SessionConfig) -> Self {
        let mut contents = FxHashMap::default();
        contents.insert(FileId::root(), config.root_body.clone());

        Self {
            contents,
            changes: FxHashMap::default(),
            active: ActiveView::Empty,
            buffer: TextBuffer::new(),
            catalog: PlaceholderCatalog::new(),
            editing_placeholder: None,
            root_body: config.root_body.clone(),
            viewport: EditorViewportState::default(),
            tab_size: config.tab_size,
        }
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn active_file(&self) -> Option<&FileId> {
        match &self.active {
            ActiveView::File { id, .. } => Some(id),
            _ => None,
        }
    }

    /// 初始内容：根文件为默认正文，其余为空串
    pub fn initial_content(&self, id: &FileId) -> &str {
        if id.is_root() {
            &self.root_body
        } else {
            ""
        }
    }

    pub fn content(&self, id: &FileId) -> &str {
        self.contents.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn contents(&self) -> &FxHashMap<FileId, String> {
        &self.contents
    }

    pub fn contents_snapshot(&self) -> BTreeMap<FileId, String> {
        self.contents
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn changes_snapshot(&self) -> BTreeMap<FileId, bool> {
        self.changes.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn is_changed(&self, id: &FileId) -> bool {
        self.changes.get(id).copied().unwrap_or(false)
    }

    pub fn has_changes(&self) -> bool {
        self.changes.values().any(|&changed| changed)
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        self.catalog.items()
    }

    pub fn catalog(&self) -> &PlaceholderCatalog {
        &self.catalog
    }

    pub fn editing_placeholder(&self) -> Option<&Placeholder> {
        self.editing_placeholder
            .as_ref()
            .and_then(|id| self.catalog.get(id))
    }

    /// 切换编辑区：文件加载已记录内容，文件夹不加载缓冲区
    pub fn set_active_file(&mut self, node: Option<&FileNode>) -> bool {
        let next = match node {
            None => ActiveView::Empty,
            Some(node) if node.kind == NodeKind::Folder => ActiveView::Folder {
                id: node.id.clone(),
                name: node.name.clone(),
            },
            Some(node) => ActiveView::File {
                id: node.id.clone(),
                name: node.name.clone(),
            },
        };
        if next == self.active {
            return false;
        }

        self.buffer = match &next {
            ActiveView::File { id, .. } => TextBuffer::from_text(self.content(id)),
            _ => TextBuffer::new(),
        };
        self.viewport.line_offset = 0;
        self.viewport.horiz_offset = 0;
        self.active = next;
        true
    }

    /// 覆盖当前文件内容并按初始值规则重算 changed 标记
    pub fn update_content(&mut self, text: &str) -> bool {
        if self.active_file().is_none() {
            return false;
        }
        self.buffer.replace_all(text);
        self.commit_buffer()
    }

    /// 把缓冲区写回内容表；没有活动文件时返回 false
    pub(super) fn commit_buffer(&mut self) -> bool {
        let Some(id) = self.active_file().cloned() else {
            return false;
        };
        let text = self.buffer.text();
        let changed = text != self.initial_content(&id);
        self.contents.insert(id.clone(), text);
        self.changes.insert(id, changed);
        true
    }

    /// 保存成功后清空 changed 标记
    pub fn mark_saved(&mut self) -> bool {
        let had = !self.changes.is_empty();
        self.changes.clear();
        had
    }

    /// 删除文件后丢弃其内容与标记
    pub fn remove_files(&mut self, ids: &[FileId]) -> bool {
        let mut changed = false;
        for id in ids {
            changed |= self.contents.remove(id).is_some();
            changed |= self.changes.remove(id).is_some();
            if self.active_file() == Some(id)
                || matches!(&self.active, ActiveView::Folder { id: folder, .. } if folder == id)
            {
                self.active = ActiveView::Empty;
                self.buffer = TextBuffer::new();
                changed = true;
            }
        }
        changed
    }

    pub fn create_placeholder(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<PlaceholderId, TemplateError> {
        self.catalog.create(title, description)
    }

    pub fn update_placeholder(
        &mut self,
        id: &PlaceholderId,
        title: &str,
        description: &str,
    ) -> Result<(), TemplateError> {
        self.catalog.update(id, title, description)
    }

    pub fn delete_placeholder(&mut self, id: &PlaceholderId) -> bool {
        if self.editing_placeholder.as_ref() == Some(id) {
            self.editing_placeholder = None;
        }
        self.catalog.delete(id)
    }

    pub fn begin_edit_placeholder(&mut self, id: &PlaceholderId) -> Result<(), TemplateError> {
        if self.catalog.get(id).is_none() {
            return Err(TemplateError::UnknownPlaceholder);
        }
        self.editing_placeholder = Some(id.clone());
        Ok(())
    }

    pub fn cancel_edit_placeholder(&mut self) -> bool {
        self.editing_placeholder.take().is_some()
    }

    /// 管理对话框的提交：编辑中则更新，否则新建
    pub fn submit_placeholder(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<(), TemplateError> {
        match self.editing_placeholder.clone() {
            Some(id) => {
                self.catalog.update(&id, title, description)?;
                self.editing_placeholder = None;
            }
            None => {
                self.catalog.create(title, description)?;
            }
        }
        Ok(())
    }

    /// 在光标处插入 `@@title@@`（替换选区），仅当前为文件时生效
    pub fn insert_placeholder(&mut self, placeholder: &Placeholder) -> bool {
        if self.active_file().is_none() {
            return false;
        }
        self.buffer.insert_str(&placeholder.token());
        self.commit_buffer();
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
