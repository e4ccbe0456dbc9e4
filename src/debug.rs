//! Debug logging for marker.
//!
//! Everything logged through the `log` facade goes to
//! `/tmp/marker_debug.log` (`%TEMP%\marker_debug.log` on Windows), keeping
//! output off the terminal that launched the editor. When `RUST_LOG` is set,
//! records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level`, then `RUST_LOG`, then the config file's
//! `log_level` (applied once the config is loaded).

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Targets that are chatty below warn level.
const NOISY_TARGETS: &[&str] = &["wgpu", "naga", "winit", "egui", "calloop", "sctk"];

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/marker_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("marker_debug.log")
    }
}

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            *file = open_log_file();
        }
        if let Some(f) = file.as_mut() {
            let _ = f.write_all(line.as_bytes());
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > log::max_level() {
            return false;
        }
        let noisy = NOISY_TARGETS
            .iter()
            .any(|t| metadata.target().starts_with(t));
        !noisy || metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_line(&line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(f) = self.file.lock().as_mut() {
            let _ = f.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the level came from the CLI or `RUST_LOG`; config must not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn open_log_file() -> Option<File> {
    let path = log_path();
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&path)
        .ok()?;
    let rule = "=".repeat(80);
    let _ = writeln!(
        file,
        "{rule}\nmarker debug session started at {}\n{rule}",
        timestamp()
    );
    Some(file)
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level requested by `RUST_LOG`, if it names a plain level.
fn env_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    match value.trim().parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            // Per-module filters are not supported; treat as info
            Some(LevelFilter::Info)
        }
    }
}

/// Install the log bridge. Call once, before anything logs.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = env_level();
    let level = cli_level.or(rust_log);
    LEVEL_PINNED.store(level.is_some(), Ordering::Relaxed);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(None),
        mirror_stderr: rust_log.is_some(),
    });
    if log::set_logger(bridge).is_err() {
        // Already installed (tests, repeated init)
        return;
    }
    log::set_max_level(level.unwrap_or(LevelFilter::Off));
}

/// Apply the config file's level unless the CLI or `RUST_LOG` chose one.
pub fn apply_config_level(level: LevelFilter) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level);
    log::info!("Log level from config: {}", level);
}
