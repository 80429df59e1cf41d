//! Permission predicate over the three list snapshots.
//!
//! An extension is permitted when its publisher is on the allowed-publishers
//! list or its `publisher.name` is on the allowed-packages list, and its
//! exact `publisher.name-version` is not on the prohibited list. The
//! prohibition always wins, so one bad release can be blocked while the rest
//! of a trusted publisher stays allowed.

use tracing::{debug, debug_span};

use crate::models::extension::ExtensionId;
use crate::models::list::ListSnapshot;

/// Borrowed view of the three lists a decision is made against.
#[derive(Debug, Clone, Copy)]
pub struct PolicyLists<'a> {
    /// Allowed `publisher` entries.
    pub allowed_publishers: &'a ListSnapshot,
    /// Allowed `publisher.name` entries.
    pub allowed_packages: &'a ListSnapshot,
    /// Prohibited `publisher.name-version` entries.
    pub prohibited_packages: &'a ListSnapshot,
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Publisher is on the allowed-publishers list.
    AllowedPublisher,
    /// Package is on the allowed-packages list.
    AllowedPackage,
    /// Allowed, but this exact version is on the prohibited list.
    ProhibitedVersion,
    /// Neither allow list covers the extension.
    NotAllowed,
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDecision {
    /// Whether the extension may run.
    pub permitted: bool,
    /// Which rule decided.
    pub reason: DecisionReason,
}

/// Evaluates extension identifiers against list snapshots.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Decide whether `extension` is permitted under `lists`.
    ///
    /// All three lookups are always made. When an extension is both
    /// publisher- and package-allowed the reason reports the publisher.
    #[must_use]
    pub fn check(extension: &ExtensionId, lists: PolicyLists<'_>) -> PermissionDecision {
        let _span = debug_span!("extension_permission", extension = %extension).entered();

        let publisher_allowed = lists
            .allowed_publishers
            .contains(extension.publisher_key());
        let package_allowed = lists.allowed_packages.contains(&extension.package_key());
        let prohibited = lists
            .prohibited_packages
            .contains(&extension.versioned_key());

        let reason = match (publisher_allowed, package_allowed, prohibited) {
            (false, false, _) => DecisionReason::NotAllowed,
            (_, _, true) => DecisionReason::ProhibitedVersion,
            (true, _, false) => DecisionReason::AllowedPublisher,
            (false, true, false) => DecisionReason::AllowedPackage,
        };
        let permitted = (publisher_allowed || package_allowed) && !prohibited;

        debug!(permitted, ?reason, "evaluated extension permission");
        PermissionDecision { permitted, reason }
    }
}
