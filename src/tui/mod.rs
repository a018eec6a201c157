//! TUI integration layer (crossterm + ratatui).
//!
//! 与 `kernel`/`models` 分离，内核不依赖终端相关 crate。

pub mod app;
pub mod input;
pub mod render;
pub mod terminal_guard;

pub use app::App;
