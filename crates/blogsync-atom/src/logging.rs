//! The logger handed to transports and the sync broker.
//!
//! Messages carry a short prefix (`GET`, `store`, `fresh`, `error`, ...) and
//! are routed to a `tracing` level by that prefix. When a debug dump file is
//! configured, every message and every HTTP body is also appended to it.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Environment variable naming the debug dump file.
pub const DEBUG_LOG_ENV: &str = "BLOGSYNC_DEBUG_LOG";

#[derive(Debug, Default)]
pub struct Logger {
    dump: Mutex<Option<BufWriter<File>>>,
    dump_path: Option<PathBuf>,
}

impl Logger {
    /// Logger without a dump file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger appending a debug dump to `path`; the file is opened now.
    pub fn with_dump_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            dump: Mutex::new(Some(BufWriter::new(file))),
            dump_path: Some(path.to_path_buf()),
        })
    }

    /// Logger with a dump file when [`DEBUG_LOG_ENV`] is set and non-empty.
    pub fn from_env() -> std::io::Result<Self> {
        match std::env::var_os(DEBUG_LOG_ENV) {
            Some(path) if !path.is_empty() => Self::with_dump_file(PathBuf::from(path)),
            _ => Ok(Self::new()),
        }
    }

    pub fn dump_path(&self) -> Option<&Path> {
        self.dump_path.as_deref()
    }

    /// Log `message` under `prefix`.
    pub fn log(&self, prefix: &str, message: impl Display) {
        match prefix {
            "error" => tracing::error!(prefix, "{message}"),
            "warn" => tracing::warn!(prefix, "{message}"),
            "store" | "remove" | "post" | "upload" => tracing::info!(prefix, "{message}"),
            _ => tracing::debug!(prefix, "{message}"),
        }
        self.write_dump(|w| writeln!(w, "{prefix:>8} {message}"));
    }

    /// Append a request or response body to the dump file only.
    pub fn dump_body(&self, label: &str, body: &[u8]) {
        if body.is_empty() {
            return;
        }
        self.write_dump(|w| {
            writeln!(w, "{label:>8} {} bytes", body.len())?;
            w.write_all(body)?;
            writeln!(w)
        });
    }

    /// Flush and close the dump file. Later messages only go to `tracing`.
    pub fn close(&self) -> std::io::Result<()> {
        let Ok(mut guard) = self.dump.lock() else {
            return Ok(());
        };
        match guard.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn write_dump(&self, f: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>) {
        let Ok(mut guard) = self.dump.lock() else {
            return;
        };
        if let Some(writer) = guard.as_mut()
            && let Err(e) = f(writer)
        {
            tracing::warn!(error = %e, "failed to write debug dump; disabling it");
            *guard = None;
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
