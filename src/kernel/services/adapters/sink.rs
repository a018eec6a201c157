//! 保存目标实现：JSON 文件与内存收集器

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::kernel::save::SavePayload;
use crate::kernel::services::ports::{SinkError, TemplateSink};

/// 把整个模板写成一个格式化的 JSON 文件
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json-file"
    }

    fn submit(&mut self, payload: &SavePayload) -> Result<(), SinkError> {
        let json = payload.to_json_pretty()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // 写临时文件后改名
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "template written");
        Ok(())
    }
}

/// 收集提交记录，供测试与无界面场景使用
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    submitted: Arc<Mutex<Vec<SavePayload>>>,
    fail_with: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次提交都返回 `SinkError::Unavailable`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            submitted: Arc::default(),
            fail_with: Some(message.into()),
        }
    }

    pub fn submitted(&self) -> Vec<SavePayload> {
        self.submitted
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }
}

impl TemplateSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn submit(&mut self, payload: &SavePayload) -> Result<(), SinkError> {
        if let Some(message) = &self.fail_with {
            return Err(SinkError::Unavailable(message.clone()));
        }
        self.submitted
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink poisoned".to_string()))?
            .push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/sink.rs"]
mod tests;
