//! Live extension policy backed by three hot-reloading list files.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, info_span};

use crate::config::GateConfig;
use crate::list::store::{ListStore, DEFAULT_DEBOUNCE};
use crate::models::extension::ExtensionId;
use crate::models::list::{ListKind, ListSnapshot};
use crate::policy::evaluator::{PermissionDecision, PolicyEvaluator, PolicyLists};

/// Answers "may this extension run?" from the allowed-publishers,
/// allowed-packages, and prohibited-packages files.
///
/// Construct once per process. Queries never block on disk: each list is
/// reloaded in the background and every query reads the latest snapshot.
/// Until a list has loaded it is empty, so the policy fails closed.
///
/// # Examples
///
/// ```no_run
/// use extension_gate::models::extension::ExtensionId;
/// use extension_gate::ExtensionPolicy;
///
/// # async fn demo() {
/// let policy = ExtensionPolicy::new("/home/user");
/// policy.wait_loaded().await;
/// let ok = policy.is_permitted(&ExtensionId::new("acme", "widgets", "1.0.0"));
/// # let _ = ok;
/// # }
/// ```
pub struct ExtensionPolicy {
    allowed_publishers: ListStore,
    allowed_packages: ListStore,
    prohibited_packages: ListStore,
}

impl ExtensionPolicy {
    /// Watch the default list files under `base_dir` with a 300 ms debounce.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_debounce(base_dir, DEFAULT_DEBOUNCE)
    }

    /// Like [`new`](Self::new) with a custom debounce window.
    #[must_use]
    pub fn with_debounce(base_dir: impl Into<PathBuf>, debounce: Duration) -> Self {
        let mut config = GateConfig::new(base_dir);
        config.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        Self::from_config(&config)
    }

    /// Start the three list stores described by `config`.
    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        let _span = info_span!("extension_policy", base_dir = %config.base_dir.display()).entered();

        let start = |kind: ListKind| {
            let _span = info_span!("list", list = %kind).entered();
            ListStore::spawn_lines(config.list_path(kind), config.debounce())
        };

        let policy = Self {
            allowed_publishers: start(ListKind::AllowedPublishers),
            allowed_packages: start(ListKind::AllowedPackages),
            prohibited_packages: start(ListKind::ProhibitedPackages),
        };
        info!(debounce_ms = config.debounce_ms, "extension policy started");
        policy
    }

    /// Whether `extension` may run under the current lists.
    #[must_use]
    pub fn is_permitted(&self, extension: &ExtensionId) -> bool {
        self.check(extension).permitted
    }

    /// Full decision for `extension` under the current lists.
    #[must_use]
    pub fn check(&self, extension: &ExtensionId) -> PermissionDecision {
        let allowed_publishers = self.allowed_publishers.snapshot();
        let allowed_packages = self.allowed_packages.snapshot();
        let prohibited_packages = self.prohibited_packages.snapshot();

        PolicyEvaluator::check(
            extension,
            PolicyLists {
                allowed_publishers: &allowed_publishers,
                allowed_packages: &allowed_packages,
                prohibited_packages: &prohibited_packages,
            },
        )
    }

    /// The store backing `kind`.
    #[must_use]
    pub fn store(&self, kind: ListKind) -> &ListStore {
        match kind {
            ListKind::AllowedPublishers => &self.allowed_publishers,
            ListKind::AllowedPackages => &self.allowed_packages,
            ListKind::ProhibitedPackages => &self.prohibited_packages,
        }
    }

    /// Current snapshot of one list.
    #[must_use]
    pub fn snapshot(&self, kind: ListKind) -> Arc<ListSnapshot> {
        self.store(kind).snapshot()
    }

    /// Subscribe to content changes of one list.
    #[must_use]
    pub fn subscribe(&self, kind: ListKind) -> watch::Receiver<Arc<ListSnapshot>> {
        self.store(kind).subscribe()
    }

    /// Wait until every list has finished its initial load attempt.
    pub async fn wait_loaded(&self) {
        tokio::join!(
            self.allowed_publishers.wait_loaded(),
            self.allowed_packages.wait_loaded(),
            self.prohibited_packages.wait_loaded(),
        );
    }

    /// Stop watching all three files and cancel pending reloads. Idempotent.
    pub fn dispose(&mut self) {
        self.allowed_publishers.dispose();
        self.allowed_packages.dispose();
        self.prohibited_packages.dispose();
    }

    /// Dispose and wait for all background tasks to exit.
    pub async fn shutdown(self) {
        let Self {
            allowed_publishers,
            allowed_packages,
            prohibited_packages,
        } = self;
        tokio::join!(
            allowed_publishers.shutdown(),
            allowed_packages.shutdown(),
            prohibited_packages.shutdown(),
        );
        info!("extension policy shut down");
    }
}
