//! Extension identifier supplied by the host for every permission query.

use std::fmt::{Display, Formatter};

/// One extension instance, as seen by the host.
///
/// Not owned or validated here; the gate only derives lookup keys from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionId {
    /// Publisher identifier (e.g. `acme`).
    pub publisher: String,
    /// Package name within the publisher (e.g. `widgets`).
    pub name: String,
    /// Exact version string (e.g. `1.0.0`).
    pub version: String,
}

impl ExtensionId {
    /// Build an identifier from its three parts.
    #[must_use]
    pub fn new(
        publisher: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Key looked up in the allowed-publishers list: `publisher`.
    #[must_use]
    pub fn publisher_key(&self) -> &str {
        &self.publisher
    }

    /// Key looked up in the allowed-packages list: `publisher.name`.
    #[must_use]
    pub fn package_key(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }

    /// Key looked up in the prohibited-packages list: `publisher.name-version`.
    #[must_use]
    pub fn versioned_key(&self) -> String {
        format!("{}.{}-{}", self.publisher, self.name, self.version)
    }
}

impl Display for ExtensionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}@{}", self.publisher, self.name, self.version)
    }
}
