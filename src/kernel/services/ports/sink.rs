use std::fmt;
use std::io;

use crate::kernel::save::SavePayload;

#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    Serialize(serde_json::Error),
    Unavailable(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Serialize(e) => write!(f, "serialize error: {}", e),
            SinkError::Unavailable(msg) => write!(f, "sink unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Serialize(e) => Some(e),
            SinkError::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Serialize(e)
    }
}

/// 保存目标：接收整个模板的一次性提交
pub trait TemplateSink: Send + 'static {
    fn name(&self) -> &'static str;

    fn submit(&mut self, payload: &SavePayload) -> Result<(), SinkError>;
}
