//! Hot-reloading store for a single list file.
//!
//! [`ListStore`] loads the file on a background tokio task, then watches the
//! file's parent directory with the `notify` crate. Change events for the
//! file wake the task, which waits for a quiet debounce window (each new
//! event restarts it) and reloads once. Bursts of writes therefore collapse
//! into a single reload of the final content.
//!
//! ## Snapshot publication
//!
//! The current [`ListSnapshot`] lives behind a `tokio::sync::watch` channel
//! as an `Arc`. Reloads build a complete new snapshot and swap the `Arc` in
//! one step, so readers never see a partial list. Only the store's own task
//! writes to the channel.
//!
//! ## Failure handling
//!
//! Nothing fails through [`ListStore::snapshot`]. A missing file, whether
//! absent from the start or deleted later, publishes the default snapshot.
//! Read errors and parse errors are logged and the last-good snapshot is
//! kept. If the watch cannot be set up (for example the parent directory
//! does not exist) the store still serves its initial load and simply never
//! reloads.
//!
//! Disposal cancels under the snapshot channel's write lock, and every
//! publish re-checks cancellation under the same lock, so nothing is
//! published once [`ListStore::dispose`] has returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::list::loader::{parse_lines, ListLoader};
use crate::models::list::ListSnapshot;
use crate::{GateError, Result};

/// Debounce window used when the caller has no preference.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A live, eventually-consistent view of one list file.
///
/// Dropping the store cancels its background task and releases the file
/// watch.
pub struct ListStore {
    path: PathBuf,
    snapshot: Arc<watch::Sender<Arc<ListSnapshot>>>,
    loads: Arc<watch::Sender<u64>>,
    /// Keeps the OS watch alive; `None` once disposed or if setup failed.
    watcher: Option<RecommendedWatcher>,
    cancel: CancellationToken,
    join_handle: Option<JoinHandle<()>>,
}

impl ListStore {
    /// Start a store for `path` that parses content with `parse`.
    ///
    /// Returns immediately; `default` is served until the initial load
    /// finishes. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<P>(
        path: impl Into<PathBuf>,
        default: ListSnapshot,
        parse: P,
        debounce: Duration,
    ) -> Self
    where
        P: Fn(&str) -> Result<ListSnapshot> + Send + Sync + 'static,
    {
        let path = path.into();
        let span = info_span!("list_store", path = %path.display());
        let _guard = span.enter();

        let default = Arc::new(default);
        let (snapshot, _) = watch::channel(Arc::clone(&default));
        let snapshot = Arc::new(snapshot);
        let (loads, _) = watch::channel(0_u64);
        let loads = Arc::new(loads);
        let changes = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let watcher = match start_watch(&path, Arc::clone(&changes)) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                warn!(%err, "list file watch unavailable, changes will not be picked up");
                None
            }
        };

        let task = StoreTask {
            path: path.clone(),
            parse,
            default,
            snapshot: Arc::clone(&snapshot),
            loads: Arc::clone(&loads),
            changes,
            debounce,
            cancel: cancel.clone(),
        };
        let join_handle = tokio::spawn(task.run().instrument(span.clone()));

        Self {
            path,
            snapshot,
            loads,
            watcher,
            cancel,
            join_handle: Some(join_handle),
        }
    }

    /// Start a store with an empty default, [`parse_lines`], and the given
    /// debounce window.
    #[must_use]
    pub fn spawn_lines(path: impl Into<PathBuf>, debounce: Duration) -> Self {
        Self::spawn(path, ListSnapshot::default(), parse_lines, debounce)
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ListSnapshot> {
        Arc::clone(&self.snapshot.borrow())
    }

    /// Subscribe to snapshot replacements.
    ///
    /// Receivers are only marked changed when a reload produced content that
    /// differs from the current snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ListSnapshot>> {
        self.snapshot.subscribe()
    }

    /// Number of load attempts completed so far (initial load included,
    /// failed attempts included).
    #[must_use]
    pub fn load_count(&self) -> u64 {
        *self.loads.borrow()
    }

    /// Wait until the initial load attempt has completed.
    ///
    /// Returns immediately if the store has been disposed before that.
    pub async fn wait_loaded(&self) {
        let mut rx = self.loads.subscribe();
        let loaded = async move {
            let _ = rx.wait_for(|count| *count > 0).await;
        };
        tokio::select! {
            () = loaded => {}
            () = self.cancel.cancelled() => {}
        }
    }

    /// Path of the watched file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the OS file watch is active.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Stop watching and cancel any pending reload. Idempotent.
    ///
    /// The last snapshot stays readable; it is never replaced afterwards.
    pub fn dispose(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        cancel_locked(&self.snapshot, &self.cancel);
        self.watcher = None;
        debug!(path = %self.path.display(), "list store disposed");
    }

    /// Dispose the store and wait for its background task to exit.
    pub async fn shutdown(mut self) {
        self.dispose();
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ListStore {
    fn drop(&mut self) {
        cancel_locked(&self.snapshot, &self.cancel);
    }
}

/// Cancel `cancel` while holding the write lock of `snapshot`.
fn cancel_locked(snapshot: &watch::Sender<Arc<ListSnapshot>>, cancel: &CancellationToken) {
    snapshot.send_if_modified(|_| {
        cancel.cancel();
        false
    });
}

/// State moved into the background task.
struct StoreTask<P> {
    path: PathBuf,
    parse: P,
    /// Published whenever the file is missing.
    default: Arc<ListSnapshot>,
    snapshot: Arc<watch::Sender<Arc<ListSnapshot>>>,
    loads: Arc<watch::Sender<u64>>,
    changes: Arc<Notify>,
    debounce: Duration,
    cancel: CancellationToken,
}

impl<P> StoreTask<P>
where
    P: Fn(&str) -> Result<ListSnapshot> + Send + Sync + 'static,
{
    async fn run(self) {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => return,
            () = self.load(true) => {}
        }

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!("list store task cancelled");
                    return;
                }
                () = self.changes.notified() => {}
            }

            // Quiet period: restart on every event that lands inside it.
            loop {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => {
                        debug!("list store task cancelled during debounce");
                        return;
                    }
                    () = self.changes.notified() => {
                        debug!("list file changed again, restarting debounce window");
                    }
                    () = tokio::time::sleep(self.debounce) => break,
                }
            }

            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return,
                () = self.load(false) => {}
            }
        }
    }

    async fn load(&self, initial: bool) {
        let next = match ListLoader::load(&self.path, &self.parse).await {
            Ok(Some(next)) => Some(Arc::new(next)),
            Ok(None) => {
                if initial {
                    info!("list file not found, using default entries");
                } else {
                    warn!("list file removed, reverting to default entries");
                }
                Some(Arc::clone(&self.default))
            }
            Err(err) => {
                warn!(%err, initial, "failed to load list file, keeping previous entries");
                None
            }
        };

        let entries = next.as_ref().map(|snapshot| snapshot.len());
        match self.publish(next) {
            None => debug!("list store disposed, discarding load result"),
            Some(true) => info!(entries, initial, "loaded list file"),
            Some(false) => debug!(entries, initial, "list content unchanged"),
        }
    }

    /// Record one completed load attempt and swap in `next` if it differs.
    ///
    /// Runs under the snapshot channel's write lock so it cannot interleave
    /// with disposal. Returns `None` if the store was already disposed,
    /// otherwise whether the snapshot was replaced.
    fn publish(&self, next: Option<Arc<ListSnapshot>>) -> Option<bool> {
        let mut outcome = None;
        self.snapshot.send_if_modified(|current| {
            if self.cancel.is_cancelled() {
                return false;
            }
            let changed = match next {
                Some(next) if **current != *next => {
                    *current = next;
                    true
                }
                _ => false,
            };
            self.loads.send_modify(|count| *count += 1);
            outcome = Some(changed);
            changed
        });
        outcome
    }
}

/// Watch the parent directory of `path` and wake `changes` on events that
/// touch the file.
///
/// The directory rather than the file is watched so that atomic
/// write-then-rename replacements and delete/recreate cycles are seen.
fn start_watch(path: &Path, changes: Arc<Notify>) -> Result<RecommendedWatcher> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            GateError::Watch(format!("'{}' does not name a file", path.display()))
        })?
        .to_owned();

    let watch_dir = path
        .parent()
        .filter(|p| p != &Path::new(""))
        .unwrap_or_else(|| Path::new("."));

    let mut watcher = notify::recommended_watcher(
        move |result: std::result::Result<Event, notify::Error>| match result {
            Ok(event) if is_list_event(&event, &file_name) => changes.notify_one(),
            Err(err) => warn!(%err, "list file watcher error"),
            _ => {}
        },
    )?;

    watcher
        .watch(watch_dir, RecursiveMode::NonRecursive)
        .map_err(|err| {
            GateError::Watch(format!(
                "failed to watch directory '{}': {err}",
                watch_dir.display()
            ))
        })?;

    debug!(dir = %watch_dir.display(), "watching list directory");
    Ok(watcher)
}

/// Whether a notify event is a create, modify, or remove of `file_name`.
fn is_list_event(event: &Event, file_name: &std::ffi::OsStr) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.file_name().is_some_and(|name| name == file_name))
}
