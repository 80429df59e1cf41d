//! List kinds and the immutable snapshot a list store publishes.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// The three user-maintained lists consulted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Publishers whose every package is allowed.
    AllowedPublishers,
    /// Individual `publisher.name` packages that are allowed.
    AllowedPackages,
    /// Exact `publisher.name-version` releases that are blocked.
    ProhibitedPackages,
}

impl ListKind {
    /// All list kinds, in evaluation order.
    pub const ALL: [Self; 3] = [
        Self::AllowedPublishers,
        Self::AllowedPackages,
        Self::ProhibitedPackages,
    ];

    /// File name used when the configuration does not override it.
    #[must_use]
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::AllowedPublishers => ".vscode_allowed_extension_publishers",
            Self::AllowedPackages => ".vscode_allowed_extension_packages",
            Self::ProhibitedPackages => ".vscode_prohibited_extension_packages",
        }
    }

    /// Stable label used in log fields.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AllowedPublishers => "allowed_publishers",
            Self::AllowedPackages => "allowed_packages",
            Self::ProhibitedPackages => "prohibited_packages",
        }
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed content of one list file.
///
/// Entries keep file order (blank lines included); membership is answered
/// from a hash index built once at construction. A snapshot is never mutated
/// after it is published, only replaced.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl ListSnapshot {
    /// Build a snapshot from entries in file order.
    #[must_use]
    pub fn new(entries: Vec<String>) -> Self {
        let index = entries.iter().cloned().collect();
        Self { entries, index }
    }

    /// Byte-for-byte membership test.
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.index.contains(entry)
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries, counting blank lines and duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ListSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ListSnapshot {}

impl FromIterator<String> for ListSnapshot {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
