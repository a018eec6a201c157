//! 模板文件树数据模型
//!
//! 职责：
//! - 以 slotmap arena 存储节点，对外只暴露字符串 id
//! - 命名校验、同级重名校验、重复文件夹约束
//! - 选中项与展开状态（纯视图状态）

use super::error::TemplateError;
use super::id::{FileId, IdGen};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! { struct NodeKey; }

pub const ROOT_FILE_NAME: &str = "main.md";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// 节点快照（含子节点），用于通知容器以及保存时序列化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: FileId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FileId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_repeating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeating_template_file_id: Option<FileId>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FileNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: FileId,
    kind: NodeKind,
    name: String,
    parent: Option<NodeKey>,
    children: Option<Vec<NodeKey>>,
    is_repeating: bool,
    repeating_template_file_id: Option<FileId>,
}

impl Node {
    fn new_file(id: FileId, name: String, parent: Option<NodeKey>) -> Self {
        Self {
            id,
            kind: NodeKind::File,
            name,
            parent,
            children: None,
            is_repeating: false,
            repeating_template_file_id: None,
        }
    }

    fn new_folder(id: FileId, name: String, parent: Option<NodeKey>, is_repeating: bool) -> Self {
        Self {
            id,
            kind: NodeKind::Folder,
            name,
            parent,
            children: Some(Vec::new()),
            is_repeating,
            repeating_template_file_id: None,
        }
    }
}

/// `[a-zA-Z0-9._-]+`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[derive(Debug, Clone)]
pub struct TemplateTree {
    arena: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    key_by_id: FxHashMap<FileId, NodeKey>,
    expanded: FxHashSet<NodeKey>,
    selected: Option<NodeKey>,
    ids: IdGen,
}

impl TemplateTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new_file(
            FileId::root(),
            ROOT_FILE_NAME.to_string(),
            None,
        ));

        let mut key_by_id = FxHashMap::default();
        key_by_id.insert(FileId::root(), root);

        Self {
            arena,
            roots: vec![root],
            key_by_id,
            expanded: FxHashSet::default(),
            selected: Some(root),
            ids: IdGen::new("node"),
        }
    }

    fn key(&self, id: &FileId) -> Option<NodeKey> {
        self.key_by_id.get(id).copied()
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.key_by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn kind(&self, id: &FileId) -> Option<NodeKind> {
        self.key(id).and_then(|k| self.arena.get(k)).map(|n| n.kind)
    }

    pub fn name(&self, id: &FileId) -> Option<&str> {
        self.key(id)
            .and_then(|k| self.arena.get(k))
            .map(|n| n.name.as_str())
    }

    pub fn parent_id(&self, id: &FileId) -> Option<FileId> {
        let node = self.arena.get(self.key(id)?)?;
        let parent = self.arena.get(node.parent?)?;
        Some(parent.id.clone())
    }

    pub fn selected(&self) -> Option<FileId> {
        self.selected
            .and_then(|k| self.arena.get(k))
            .map(|n| n.id.clone())
    }

    pub fn selected_node(&self) -> Option<FileNode> {
        self.selected.map(|k| self.build_node(k))
    }

    fn siblings(&self, parent: Option<NodeKey>) -> &[NodeKey] {
        match parent {
            Some(key) => self
                .arena
                .get(key)
                .and_then(|n| n.children.as_deref())
                .unwrap_or(&[]),
            None => &self.roots,
        }
    }

    /// 在 `parent`（或根层级）下创建节点，校验失败时树保持不变
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        parent: Option<&FileId>,
        is_repeating: bool,
    ) -> Result<FileId, TemplateError> {
        if !is_valid_name(name) {
            return Err(TemplateError::InvalidName);
        }

        let parent_key = match parent {
            Some(id) => {
                let key = self.key(id).ok_or(TemplateError::UnknownNode)?;
                let node = self.arena.get(key).ok_or(TemplateError::UnknownNode)?;
                if node.kind != NodeKind::Folder {
                    return Err(TemplateError::ParentNotFolder);
                }
                Some(key)
            }
            None => None,
        };

        let name_taken = self
            .siblings(parent_key)
            .iter()
            .filter_map(|&k| self.arena.get(k))
            .any(|n| n.name == name);
        if name_taken {
            return Err(TemplateError::DuplicateName);
        }

        if let Some(parent_node) = parent_key.and_then(|k| self.arena.get(k)) {
            if parent_node.is_repeating {
                if kind == NodeKind::Folder {
                    return Err(TemplateError::RepeatingFolderNoSubfolders);
                }
                let has_file = parent_node
                    .children
                    .iter()
                    .flatten()
                    .filter_map(|&k| self.arena.get(k))
                    .any(|n| n.kind == NodeKind::File);
                if has_file {
                    return Err(TemplateError::RepeatingFolderSingleFileOnly);
                }
            }
        }

        let id = self.ids.next_file_id();
        let node = match kind {
            NodeKind::File => Node::new_file(id.clone(), name.to_string(), parent_key),
            NodeKind::Folder => {
                Node::new_folder(id.clone(), name.to_string(), parent_key, is_repeating)
            }
        };
        let key = self.arena.insert(node);
        self.key_by_id.insert(id.clone(), key);

        match parent_key.and_then(|k| self.arena.get_mut(k)) {
            Some(parent_node) => {
                if let Some(children) = parent_node.children.as_mut() {
                    children.push(key);
                }
                if parent_node.is_repeating
                    && kind == NodeKind::File
                    && parent_node.repeating_template_file_id.is_none()
                {
                    parent_node.repeating_template_file_id = Some(id.clone());
                }
            }
            None => self.roots.push(key),
        }

        tracing::debug!(id = %id, name, ?kind, is_repeating, "template node created");
        Ok(id)
    }

    /// 删除节点及其全部后代，返回被删除的 id（根文件受保护，返回空）
    pub fn delete_node(&mut self, id: &FileId) -> Vec<FileId> {
        if id.is_root() {
            return Vec::new();
        }
        let Some(key) = self.key(id) else {
            return Vec::new();
        };

        let parent = self.arena.get(key).and_then(|n| n.parent);
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_node) => {
                if let Some(children) = parent_node.children.as_mut() {
                    children.retain(|&k| k != key);
                }
            }
            None => self.roots.retain(|&k| k != key),
        }

        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.remove(current) else {
                continue;
            };
            if let Some(children) = node.children {
                stack.extend(children);
            }
            self.expanded.remove(&current);
            self.key_by_id.remove(&node.id);
            if self.selected == Some(current) {
                self.selected = None;
            }
            removed.push(node.id);
        }

        for node in self.arena.values_mut() {
            if node
                .repeating_template_file_id
                .as_ref()
                .is_some_and(|t| removed.contains(t))
            {
                node.repeating_template_file_id = None;
            }
        }

        tracing::debug!(id = %id, removed = removed.len(), "template node deleted");
        removed
    }

    pub fn select_node(&mut self, id: &FileId) -> Option<FileNode> {
        let key = self.key(id)?;
        self.selected = Some(key);
        Some(self.build_node(key))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_expansion(&mut self, id: &FileId) {
        let Some(key) = self.key(id) else {
            return;
        };
        if self.arena.get(key).is_some_and(|n| n.kind == NodeKind::Folder)
            && !self.expanded.remove(&key)
        {
            self.expanded.insert(key);
        }
    }

    pub fn expand(&mut self, id: &FileId) {
        if let Some(key) = self.key(id) {
            if self.arena.get(key).is_some_and(|n| n.kind == NodeKind::Folder) {
                self.expanded.insert(key);
            }
        }
    }

    pub fn collapse(&mut self, id: &FileId) {
        if let Some(key) = self.key(id) {
            self.expanded.remove(&key);
        }
    }

    pub fn is_expanded(&self, id: &FileId) -> bool {
        self.key(id).is_some_and(|k| self.expanded.contains(&k))
    }

    pub fn node(&self, id: &FileId) -> Option<FileNode> {
        self.key(id).map(|k| self.build_node(k))
    }

    /// 当前森林的完整快照
    pub fn snapshot(&self) -> Vec<FileNode> {
        self.roots.iter().map(|&k| self.build_node(k)).collect()
    }

    fn build_node(&self, key: NodeKey) -> FileNode {
        let node = &self.arena[key];
        FileNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            children: node
                .children
                .as_ref()
                .map(|c| c.iter().map(|&k| self.build_node(k)).collect()),
            parent_id: node
                .parent
                .and_then(|p| self.arena.get(p))
                .map(|p| p.id.clone()),
            is_repeating: node.is_repeating,
            repeating_template_file_id: node.repeating_template_file_id.clone(),
        }
    }
}

impl Default for TemplateTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct FileTreeRow {
    pub id: FileId,
    pub depth: u16,
    pub name: String,
    pub kind: NodeKind,
    pub is_expanded: bool,
    pub is_repeating: bool,
}

impl TemplateTree {
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeKey, u16)> = self.roots.iter().rev().map(|&k| (k, 0)).collect();

        while let Some((key, depth)) = stack.pop() {
            let Some(node) = self.arena.get(key) else {
                continue;
            };
            let is_expanded = self.expanded.contains(&key);
            result.push(FileTreeRow {
                id: node.id.clone(),
                depth,
                name: node.name.clone(),
                kind: node.kind,
                is_expanded,
                is_repeating: node.is_repeating,
            });

            if is_expanded {
                if let Some(children) = &node.children {
                    for &child in children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
