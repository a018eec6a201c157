//! tpledit - 项目模板编辑器库
//!
//! 模块结构：
//! - models: 数据模型（TemplateTree, PlaceholderCatalog, TextBuffer, 高亮）
//! - kernel: 无界面核心（state/action/effect、保存请求、服务端口与适配器）
//! - tui: 终端前端（crossterm + ratatui），由 `tui` feature 启用

pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
