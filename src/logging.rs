use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file when `--log-file` is not given.
pub const LOG_ENV_VAR: &str = "REMOTE_UI_LOG";

/// Initialize tracing with file output.
///
/// Logging is disabled unless a path is passed or `REMOTE_UI_LOG` is set,
/// since anything written to stdout/stderr would corrupt the TUI.
///
/// The file is created as `{path}.{timestamp}.{pid}` so concurrent
/// instances never share one. Returns the path actually used.
pub fn init_tracing(explicit: Option<&Path>) -> Option<PathBuf> {
    let base = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(std::env::var(LOG_ENV_VAR).ok()?),
    };
    let unique_path = unique_log_path(&base);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path.display());
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(unique_path)
}

fn unique_log_path(base: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", base.display(), timestamp, pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_path_appends_timestamp_and_pid() {
        let path = unique_log_path(Path::new("/tmp/remote-ui.log"));
        let name = path.to_string_lossy().to_string();
        assert!(name.starts_with("/tmp/remote-ui.log."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
    }
}
