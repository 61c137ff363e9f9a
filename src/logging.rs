use std::io::{self, Write};
use std::sync::mpsc::Sender;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SHOPPING_LIST_LOG";
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the process-wide subscriber writing to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Subscriber that sends each formatted log line down `tx`.
pub fn status_subscriber(tx: Sender<String>) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(StatusWriter { tx })
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish()
}

/// Makes a [`StatusLine`] per log event.
#[derive(Debug, Clone)]
pub struct StatusWriter {
    tx: Sender<String>,
}

impl StatusWriter {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl<'a> MakeWriter<'a> for StatusWriter {
    type Writer = StatusLine;

    fn make_writer(&'a self) -> Self::Writer {
        StatusLine {
            tx: self.tx.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one event and sends it when dropped.
pub struct StatusLine {
    tx: Sender<String>,
    buf: Vec<u8>,
}

impl Write for StatusLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if !line.is_empty() {
            let _ = self.tx.send(line.to_string());
        }
    }
}

/// Run `f` with its log lines collected instead of printed.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let (tx, rx) = std::sync::mpsc::channel();
    let result = tracing::subscriber::with_default(status_subscriber(tx), f);
    (result, rx.try_iter().collect())
}
