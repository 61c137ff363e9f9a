use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::{Result, ShopError};
use crate::logging::status_subscriber;
use crate::sheets::TableSource;
use crate::shopping::{run_to_file, BuildOutput, BuildRequest};

/// A build running on its own thread.
pub struct BuildHandle {
    status: Receiver<String>,
    handle: JoinHandle<Result<BuildOutput>>,
}

impl BuildHandle {
    /// Log lines from the run; the iterator ends when the run finishes.
    pub fn status_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.status.iter()
    }

    pub fn join(self) -> Result<BuildOutput> {
        self.handle
            .join()
            .map_err(|_| ShopError::InvalidInput("build worker panicked".to_string()))?
    }
}

/// Run a build to `output` on a background thread, streaming its log lines.
pub fn spawn_build<S>(request: BuildRequest, source: S, output: PathBuf) -> BuildHandle
where
    S: TableSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        tracing::subscriber::with_default(status_subscriber(tx), || {
            run_to_file(&request, &source, &output)
        })
    });
    BuildHandle { status: rx, handle }
}
