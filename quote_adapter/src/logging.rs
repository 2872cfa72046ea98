//! Log file handle for one adapter run.
//!
//! Every run starts a fresh `adapter.log`: the previous files are shifted to
//! `adapter.log.1`, `adapter.log.2`, ... and the run beyond the keep count is
//! dropped, so the last `keep` runs survive next to the current one. Records go through the `log` facade to `env_logger`, piped into that
//! file. When the file cannot be opened the records go to stderr instead.
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use log::{LevelFilter, info, warn};

/// Name of the current log file.
pub const LOG_FILE: &str = "adapter.log";

/// Logging set up for the duration of one invocation.
pub struct LogHandle {
    path: Option<PathBuf>,
    started: Instant,
}

impl LogHandle {
    /// Rotates the log files in `dir`, opens a new one, and installs the logger.
    ///
    /// The adapter's own records are kept from `debug` up, dependencies from `info`.
    /// `RUST_LOG` overrides both.
    pub fn init(dir: &Path, keep: usize) -> LogHandle {
        let opened = open_rotated(dir, keep);

        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} {:<5} [{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            });

        let path = match opened {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                Some(dir.join(LOG_FILE))
            }
            Err(e) => {
                builder.target(env_logger::Target::Stderr);
                eprintln!("Cannot open log file in {}: {}", dir.display(), e);
                None
            }
        };

        if builder.try_init().is_err() {
            warn!("Logger already installed, keeping the existing one");
        }

        LogHandle {
            path,
            started: Instant::now(),
        }
    }

    /// Path of the current log file, `None` when logging to stderr.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Logs the total run time and flushes pending records.
    pub fn finish(self, exit_code: i32) {
        info!(
            "Adapter exiting with code {} after {} ms",
            exit_code,
            self.started.elapsed().as_millis()
        );
        log::logger().flush();
    }
}

/// Shifts `adapter.log` and its numbered predecessors in `dir` up by one, keeping
/// at most `keep` previous runs (`adapter.log.1` ..= `adapter.log.{keep}`).
pub fn rotate(dir: &Path, keep: usize) -> io::Result<()> {
    let numbered = |n: usize| dir.join(format!("{}.{}", LOG_FILE, n));
    let current = dir.join(LOG_FILE);

    if keep == 0 {
        if current.exists() {
            fs::remove_file(&current)?;
        }
        return Ok(());
    }

    let oldest = numbered(keep);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..keep).rev() {
        let from = numbered(n);
        if from.exists() {
            fs::rename(&from, numbered(n + 1))?;
        }
    }
    if current.exists() {
        fs::rename(&current, numbered(1))?;
    }
    Ok(())
}

fn open_rotated(dir: &Path, keep: usize) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    rotate(dir, keep)?;
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dir.join(LOG_FILE))
}
