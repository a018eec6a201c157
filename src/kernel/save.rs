//! 保存请求体：文件树、文件内容表、占位符列表与元数据，一次性提交

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{FileId, FileNode, Placeholder};

use super::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub files: Vec<FileNode>,
    /// 按 id 排序，输出稳定
    pub file_contents: BTreeMap<FileId, String>,
    pub placeholders: Vec<Placeholder>,
    pub metadata: TemplateMetadata,
}

impl SavePayload {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            files: state.tree.snapshot(),
            file_contents: state.editor.contents_snapshot(),
            placeholders: state.editor.placeholders().to_vec(),
            metadata: TemplateMetadata {
                name: state.config.template_name.clone(),
            },
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/save.rs"]
mod tests;
