use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

/// Settle delay before a burst of source-change notifications triggers the
/// callback.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(120);

/// Coalescing change observer with an injected callback: `notify()` restarts
/// the settle timer, so a burst of notifications runs the callback once. A
/// newer notification always supersedes a pending one.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
}

impl Debouncer {
    pub fn spawn<F, Fut>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                loop {
                    tokio::select! {
                        _ = sleep(delay) => break,
                        more = rx.recv() => {
                            if more.is_none() {
                                return;
                            }
                        }
                    }
                }
                callback().await;
            }
        });
        Self { tx }
    }

    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

/// Poll the source files' modification times and feed the debouncer whenever
/// one changes. Runs until the process exits.
pub async fn poll_sources(paths: Vec<PathBuf>, interval: Duration, debouncer: Debouncer) {
    let mut seen: Vec<Option<SystemTime>> = vec![None; paths.len()];
    loop {
        sleep(interval).await;
        for (path, last) in paths.iter().zip(seen.iter_mut()) {
            let modified = tokio::fs::metadata(path)
                .await
                .ok()
                .and_then(|meta| meta.modified().ok());
            if modified != *last {
                debug!(path = %path.display(), "source file changed");
                *last = modified;
                debouncer.notify();
            }
        }
    }
}
