use std::collections::BTreeMap;

use crate::models::{FileId, FileNode, Placeholder, TemplateError};

use super::save::SavePayload;

/// 内核对容器的通知
#[derive(Debug, Clone)]
pub enum Effect {
    FilesChanged(Vec<FileNode>),
    FileSelected(Option<FileNode>),
    ContentsChanged {
        contents: BTreeMap<FileId, String>,
        changes: BTreeMap<FileId, bool>,
    },
    PlaceholdersChanged(Vec<Placeholder>),
    Rejected(TemplateError),
    Save(SavePayload),
}
