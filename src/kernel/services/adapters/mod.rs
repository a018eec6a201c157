//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod runtime;
pub mod settings;
pub mod sink;

pub use runtime::{AppMessage, SaveRuntime};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from, read_settings_from, write_default_settings, LoadedSettings,
};
pub use sink::{JsonFileSink, MemorySink};
