use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("subscriber already installed: {0}")]
    Install(String),
}

/// Installs the stderr subscriber, plus a JSON file layer when `json_log` is set.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str, json_log: Option<&Path>) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|err| LoggingError::Filter(err.to_string()))?,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let json_layer = match json_log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(Mutex::new(file));
            let make_writer = BoxMakeWriter::new(move || SharedWriter {
                file: Arc::clone(&file),
            });
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(UtcTime::rfc_3339())
                    .with_writer(make_writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

struct SharedWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("failed to lock log file"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("failed to lock log file"))?;
        file.flush()
    }
}
