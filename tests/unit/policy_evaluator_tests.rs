//! Unit tests for the permission predicate.
//!
//! Validates allow-by-publisher, allow-by-package, the deny-wins rule for
//! prohibited versions, and the fail-closed default with empty lists.

use extension_gate::models::list::ListSnapshot;
use extension_gate::policy::evaluator::{
    DecisionReason, PermissionDecision, PolicyEvaluator, PolicyLists,
};
use extension_gate::ExtensionId;

/// Helper to build a snapshot from literal entries.
fn list(entries: &[&str]) -> ListSnapshot {
    entries.iter().map(|s| (*s).to_owned()).collect()
}

/// Evaluate `(publisher, name, version)` against three literal lists.
fn decide(
    publishers: &[&str],
    packages: &[&str],
    prohibited: &[&str],
    id: (&str, &str, &str),
) -> PermissionDecision {
    let (publishers, packages, prohibited) = (list(publishers), list(packages), list(prohibited));
    PolicyEvaluator::check(
        &ExtensionId::new(id.0, id.1, id.2),
        PolicyLists {
            allowed_publishers: &publishers,
            allowed_packages: &packages,
            prohibited_packages: &prohibited,
        },
    )
}

// ─── Fail closed ─────────────────────────────────────────────────────

#[test]
fn empty_lists_deny_everything() {
    for id in [("acme", "widgets", "1.0.0"), ("", "", ""), ("beta", "x", "1")] {
        let decision = decide(&[], &[], &[], id);
        assert!(!decision.permitted, "{id:?} must be denied with empty lists");
        assert_eq!(decision.reason, DecisionReason::NotAllowed);
    }
}

#[test]
fn prohibited_only_is_still_not_allowed() {
    let decision = decide(&[], &[], &["acme.widgets-1.0.0"], ("acme", "widgets", "1.0.0"));
    assert!(!decision.permitted);
    assert_eq!(decision.reason, DecisionReason::NotAllowed);
}

#[test]
fn blank_line_entries_never_match_real_identifiers() {
    let decision = decide(&["", "\r"], &[""], &[], ("acme", "widgets", "1.0.0"));
    assert!(!decision.permitted);
}

// ─── Allow by publisher ──────────────────────────────────────────────

#[test]
fn allowed_publisher_is_permitted() {
    let decision = decide(&["acme"], &[], &[], ("acme", "widgets", "1.0.0"));
    assert!(decision.permitted);
    assert_eq!(decision.reason, DecisionReason::AllowedPublisher);
}

#[test]
fn allowed_publisher_covers_every_package_and_version() {
    for (name, version) in [("widgets", "1.0.0"), ("gadgets", "0.0.1"), ("x", "99")] {
        assert!(decide(&["acme"], &[], &[], ("acme", name, version)).permitted);
    }
}

#[test]
fn publisher_match_is_exact() {
    assert!(!decide(&["acme"], &[], &[], ("Acme", "widgets", "1.0.0")).permitted);
    assert!(!decide(&["acme "], &[], &[], ("acme", "widgets", "1.0.0")).permitted);
    assert!(!decide(&["acm"], &[], &[], ("acme", "widgets", "1.0.0")).permitted);
}

#[test]
fn package_entry_does_not_allow_whole_publisher() {
    let decision = decide(&[], &["acme.widgets"], &[], ("acme", "gadgets", "1.0.0"));
    assert!(!decision.permitted);
}

// ─── Allow by package ────────────────────────────────────────────────

#[test]
fn allowed_package_is_permitted() {
    let decision = decide(&[], &["acme.widgets"], &[], ("acme", "widgets", "3.2.1"));
    assert!(decision.permitted);
    assert_eq!(decision.reason, DecisionReason::AllowedPackage);
}

#[test]
fn publisher_reason_wins_when_both_allow_lists_match() {
    let decision = decide(&["acme"], &["acme.widgets"], &[], ("acme", "widgets", "1.0.0"));
    assert!(decision.permitted);
    assert_eq!(decision.reason, DecisionReason::AllowedPublisher);
}

// ─── Deny wins ───────────────────────────────────────────────────────

#[test]
fn prohibited_version_overrides_package_allowance() {
    let packages = ["acme.widgets"];
    let prohibited = ["acme.widgets-1.0.0"];

    let blocked = decide(&[], &packages, &prohibited, ("acme", "widgets", "1.0.0"));
    assert!(!blocked.permitted);
    assert_eq!(blocked.reason, DecisionReason::ProhibitedVersion);

    let other = decide(&[], &packages, &prohibited, ("acme", "widgets", "2.0.0"));
    assert!(other.permitted);
}

#[test]
fn prohibited_version_overrides_publisher_allowance() {
    let decision = decide(
        &["acme"],
        &["acme.widgets"],
        &["acme.widgets-1.0.0"],
        ("acme", "widgets", "1.0.0"),
    );
    assert!(!decision.permitted);
    assert_eq!(decision.reason, DecisionReason::ProhibitedVersion);
}

#[test]
fn prohibition_without_version_suffix_does_not_match() {
    let decision = decide(&["acme"], &[], &["acme.widgets"], ("acme", "widgets", "1.0.0"));
    assert!(decision.permitted, "prohibited entries need the exact version");
}
