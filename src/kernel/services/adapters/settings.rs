//! 设置文件与日志目录
//!
//! - 设置：`$XDG_CONFIG_HOME/tpledit/settings.json`（或 `~/.config/tpledit/settings.json`）
//! - 日志：`$XDG_DATA_HOME/tpledit/logs`（或 `~/.local/share/tpledit/logs`）

use crate::kernel::services::ports::settings::Settings;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "tpledit";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(APP_NAME).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

/// 文件不存在时写入默认设置
pub fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

/// 读取结果；`fallback` 记录回落到默认值的原因，供日志初始化后补记
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

impl LoadedSettings {
    fn defaults(fallback: Option<String>) -> Self {
        Self {
            settings: Settings::default(),
            fallback,
        }
    }
}

pub fn load_settings() -> LoadedSettings {
    match get_settings_path() {
        Some(path) => read_settings_from(&path),
        None => LoadedSettings::defaults(Some("no config directory".to_string())),
    }
}

/// 不产生日志；文件不存在时直接使用默认值
pub fn read_settings_from(path: &Path) -> LoadedSettings {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return LoadedSettings::defaults(None);
        }
        Err(e) => {
            return LoadedSettings::defaults(Some(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };
    match serde_json::from_str(&data) {
        Ok(settings) => LoadedSettings {
            settings,
            fallback: None,
        },
        Err(e) => LoadedSettings::defaults(Some(format!("invalid {}: {e}", path.display()))),
    }
}

/// 读取失败或格式错误时记录警告并回落到默认值
pub fn load_settings_from(path: &Path) -> Settings {
    let loaded = read_settings_from(path);
    if let Some(reason) = &loaded.fallback {
        tracing::warn!(reason = %reason, "invalid settings, using defaults");
    }
    loaded.settings
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

fn get_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("LOCALAPPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
