use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::config::{SessionConfig, DEFAULT_ROOT_BODY, DEFAULT_TEMPLATE_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_template_name")]
    pub template_name: String,
    #[serde(default = "default_root_body")]
    pub root_body: String,
    #[serde(default = "default_tab_size")]
    pub tab_size: u8,
    /// JSON 保存目标；缺省时写到当前目录下的 `project-template.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_template_name() -> String {
    DEFAULT_TEMPLATE_NAME.to_string()
}

fn default_root_body() -> String {
    DEFAULT_ROOT_BODY.to_string()
}

fn default_tab_size() -> u8 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_name: default_template_name(),
            root_body: default_root_body(),
            tab_size: default_tab_size(),
            output_path: None,
            log_filter: None,
        }
    }
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            root_body: self.root_body.clone(),
            template_name: self.template_name.clone(),
            tab_size: self.tab_size.max(1),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("project-template.json"))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
