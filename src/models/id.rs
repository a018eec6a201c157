//! 会话内标识符：文件节点与占位符共用的不透明字符串 id

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 根文件的固定 id，永远不可删除
pub const ROOT_FILE_ID: &str = "main-md";

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(CompactString);

impl FileId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn root() -> Self {
        Self(CompactString::const_new(ROOT_FILE_ID))
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_FILE_ID
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderId(CompactString);

impl PlaceholderId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaceholderId({})", self.0)
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceholderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// 单调递增的 id 分配器。删除后 id 也不会被复用。
#[derive(Debug, Clone)]
pub struct IdGen {
    prefix: &'static str,
    next: u64,
}

impl IdGen {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    fn next_raw(&mut self) -> CompactString {
        let n = self.next;
        self.next += 1;
        format_compact!("{}-{}", self.prefix, n)
    }

    pub fn next_file_id(&mut self) -> FileId {
        FileId(self.next_raw())
    }

    pub fn next_placeholder_id(&mut self) -> PlaceholderId {
        PlaceholderId(self.next_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/id.rs"]
mod tests;
