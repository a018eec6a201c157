use std::io;
use std::path::PathBuf;

use tpledit::kernel::services::adapters::{ensure_settings_file, load_settings};
use tpledit::tui::App;

mod logging;

const USAGE: &str = "usage: tpledit [OUTPUT.json]";

fn main() -> io::Result<()> {
    let mut args = std::env::args().skip(1);
    let output = match args.next().as_deref() {
        Some("-h" | "--help") => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(path) => Some(PathBuf::from(path)),
        None => None,
    };

    let settings_path = ensure_settings_file();
    let loaded = load_settings();
    let mut settings = loaded.settings;
    if output.is_some() {
        settings.output_path = output;
    }

    let logging = logging::init(settings.log_filter.as_deref());
    match &settings_path {
        Ok(path) => tracing::info!(settings = %path.display(), "settings loaded"),
        Err(e) => tracing::warn!(error = %e, "settings file unavailable, using defaults"),
    }
    if let Some(reason) = &loaded.fallback {
        tracing::warn!(reason = %reason, "settings not applied, using defaults");
    }

    let mut app = App::new(&settings)?;
    let result = app.run();
    if let Err(e) = &result {
        tracing::error!(error = %e, "tui exited with error");
        if let Some(logging) = &logging {
            eprintln!("tpledit: {e} (logs in {})", logging.log_dir().display());
        }
    }
    result
}
