//! Gate configuration parsing and validation.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::models::list::ListKind;
use crate::{GateError, Result};

/// Upper bound accepted for the reload debounce window.
const MAX_DEBOUNCE_MS: u64 = 60_000;

fn default_debounce_ms() -> u64 {
    300
}

fn default_allowed_publishers() -> String {
    ListKind::AllowedPublishers.default_file_name().into()
}

fn default_allowed_packages() -> String {
    ListKind::AllowedPackages.default_file_name().into()
}

fn default_prohibited_packages() -> String {
    ListKind::ProhibitedPackages.default_file_name().into()
}

/// File names of the three lists, relative to [`GateConfig::base_dir`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ListFiles {
    /// Newline-delimited `publisher` entries.
    #[serde(default = "default_allowed_publishers")]
    pub allowed_publishers: String,
    /// Newline-delimited `publisher.name` entries.
    #[serde(default = "default_allowed_packages")]
    pub allowed_packages: String,
    /// Newline-delimited `publisher.name-version` entries.
    #[serde(default = "default_prohibited_packages")]
    pub prohibited_packages: String,
}

impl Default for ListFiles {
    fn default() -> Self {
        Self {
            allowed_publishers: default_allowed_publishers(),
            allowed_packages: default_allowed_packages(),
            prohibited_packages: default_prohibited_packages(),
        }
    }
}

impl ListFiles {
    /// File name configured for `kind`.
    #[must_use]
    pub fn name(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::AllowedPublishers => &self.allowed_publishers,
            ListKind::AllowedPackages => &self.allowed_packages,
            ListKind::ProhibitedPackages => &self.prohibited_packages,
        }
    }
}

/// Gate configuration, usually parsed from a TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GateConfig {
    /// Directory holding the three list files (conventionally the user's home).
    pub base_dir: PathBuf,
    /// Quiet period after the last change event before a list is reloaded.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// List file names.
    #[serde(default)]
    pub files: ListFiles,
}

impl GateConfig {
    /// Configuration with default file names and a 300 ms debounce window.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            debounce_ms: default_debounce_ms(),
            files: ListFiles::default(),
        }
    }

    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| GateError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Absolute path of the file backing `kind`.
    #[must_use]
    pub fn list_path(&self, kind: ListKind) -> PathBuf {
        self.base_dir.join(self.files.name(kind))
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Config` naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(GateError::Config(format!(
                "debounce_ms must not exceed {MAX_DEBOUNCE_MS}"
            )));
        }

        for kind in ListKind::ALL {
            let name = self.files.name(kind);
            if !is_bare_file_name(name) {
                return Err(GateError::Config(format!(
                    "files.{kind} must be a plain file name, got '{name}'"
                )));
            }
        }

        let [a, b, c] = ListKind::ALL.map(|kind| self.files.name(kind));
        if a == b || a == c || b == c {
            return Err(GateError::Config(
                "list file names must be distinct".into(),
            ));
        }

        Ok(())
    }
}

/// A single normal path component: no separators, no `.`/`..`, not empty.
fn is_bare_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
