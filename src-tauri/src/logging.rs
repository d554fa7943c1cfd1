use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::{DateTime, Local};

use crate::{DESKTOP_LOG_DIR, DESKTOP_LOG_MAX_BYTES};

static DESKTOP_LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();
static DESKTOP_LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn resolve_desktop_log_path(app_root: Option<PathBuf>, log_file: &str) -> Option<PathBuf> {
    app_root.map(|root| root.join(DESKTOP_LOG_DIR).join(log_file))
}

/// Sets the log destination for the rest of the process. Lines written before
/// this call, or when no destination is available, only reach stderr.
pub fn init_desktop_log(log_path: Option<PathBuf>) {
    let _ = DESKTOP_LOG_PATH.set(log_path);
}

pub fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

fn append_log(category: &str, message: &str) {
    let line = format_log_line(category, message, Local::now());
    let log_path = DESKTOP_LOG_PATH.get().and_then(Option::as_deref);

    if cfg!(debug_assertions) || log_path.is_none() {
        eprintln!("{line}");
    }

    let Some(log_path) = log_path else {
        return;
    };
    let _guard = DESKTOP_LOG_WRITE_LOCK.lock();
    if let Err(error) = append_log_line(log_path, &line, DESKTOP_LOG_MAX_BYTES) {
        eprintln!("{error}");
    }
}

fn format_log_line(category: &str, message: &str, now: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        category,
        message
    )
}

fn rotated_log_path(log_path: &Path) -> PathBuf {
    let mut rotated = log_path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

fn append_log_line(log_path: &Path, line: &str, max_bytes: u64) -> Result<(), String> {
    if let Some(parent_dir) = log_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create desktop log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    if let Ok(metadata) = fs::metadata(log_path) {
        if metadata.len() >= max_bytes {
            let rotated = rotated_log_path(log_path);
            fs::rename(log_path, &rotated).map_err(|error| {
                format!(
                    "Failed to rotate desktop log {} to {}: {}",
                    log_path.display(),
                    rotated.display(),
                    error
                )
            })?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("Failed to open desktop log {}: {}", log_path.display(), error))?;
    writeln!(file, "{line}")
        .map_err(|error| format!("Failed to write desktop log {}: {}", log_path.display(), error))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn resolve_desktop_log_path_places_log_under_logs_dir() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/data/tron")), "desktop.log");
        assert_eq!(path, Some(PathBuf::from("/data/tron/logs/desktop.log")));
        assert_eq!(resolve_desktop_log_path(None, "desktop.log"), None);
    }

    #[test]
    fn format_log_line_includes_timestamp_and_category() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid local time");
        assert_eq!(
            format_log_line("startup", "shell ready", now),
            "[2024-03-09 07:05:01.000] [startup] shell ready"
        );
    }

    #[test]
    fn append_log_line_creates_parent_and_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("logs").join("desktop.log");

        append_log_line(&log_path, "first", 1024).expect("first write");
        append_log_line(&log_path, "second", 1024).expect("second write");

        let content = fs::read_to_string(&log_path).expect("read log");
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn append_log_line_rotates_when_size_limit_reached() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "0123456789\n").expect("seed log");

        append_log_line(&log_path, "fresh", 8).expect("write after rotation");

        let rotated = fs::read_to_string(rotated_log_path(&log_path)).expect("read rotated");
        assert_eq!(rotated, "0123456789\n");
        assert_eq!(fs::read_to_string(&log_path).expect("read log"), "fresh\n");
    }
}
