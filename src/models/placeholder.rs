//! 占位符目录
//!
//! 占位符以 `@@title@@` 的形式插入文件内容。删除占位符不会回写已插入的文本。

use super::error::TemplateError;
use super::id::{IdGen, PlaceholderId};
use serde::{Deserialize, Serialize};

pub const TOKEN_DELIMITER: &str = "@@";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: PlaceholderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Placeholder {
    /// 插入到文本中的字面 token
    pub fn token(&self) -> String {
        format!("{TOKEN_DELIMITER}{}{TOKEN_DELIMITER}", self.title)
    }
}

#[derive(Debug, Clone)]
pub struct PlaceholderCatalog {
    items: Vec<Placeholder>,
    ids: IdGen,
}

impl PlaceholderCatalog {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: IdGen::new("ph"),
        }
    }

    pub fn items(&self) -> &[Placeholder] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &PlaceholderId) -> Option<&Placeholder> {
        self.items.iter().find(|p| &p.id == id)
    }

    pub fn create(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<PlaceholderId, TemplateError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TemplateError::EmptyPlaceholderTitle);
        }

        let id = self.ids.next_placeholder_id();
        self.items.push(Placeholder {
            id: id.clone(),
            title: title.to_string(),
            description: description.trim().to_string(),
        });
        tracing::debug!(id = %id, title, "placeholder created");
        Ok(id)
    }

    /// 原位替换标题与描述，保持顺序
    pub fn update(
        &mut self,
        id: &PlaceholderId,
        title: &str,
        description: &str,
    ) -> Result<(), TemplateError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TemplateError::EmptyPlaceholderTitle);
        }
        let item = self
            .items
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(TemplateError::UnknownPlaceholder)?;

        item.title = title.to_string();
        item.description = description.trim().to_string();
        tracing::debug!(id = %id, title, "placeholder updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &PlaceholderId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.id != id);
        before != self.items.len()
    }

    /// 文本中出现、但目录里找不到对应标题的 token（不含 `@@`）
    pub fn unresolved_tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out: Vec<&'a str> = Vec::new();
        for title in super::highlight::token_titles(text) {
            if self.items.iter().any(|p| p.title == title) || out.contains(&title) {
                continue;
            }
            out.push(title);
        }
        out
    }
}

impl Default for PlaceholderCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/placeholder.rs"]
mod tests;
