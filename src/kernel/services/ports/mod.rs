//! Service ports: traits + data contracts.

pub mod config;
pub mod settings;
pub mod sink;

pub use config::SessionConfig;
pub use settings::Settings;
pub use sink::{SinkError, TemplateSink};
