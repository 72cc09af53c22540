//! Application registry loading
//!
//! Spoken application names map to launch commands in a YAML file:
//!
//! ```yaml
//! default:
//!   navegador: firefox
//!   editor: code
//! mi-notebook:
//!   navegador: chromium
//! ```
//!
//! The section named after this machine's host name overrides `default`.
//! Section and application names are matched case-insensitively.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::skills::AppRegistry;

type Sections = HashMap<String, Option<HashMap<String, serde_yaml::Value>>>;

/// Section applied on every host
const DEFAULT_SECTION: &str = "default";

/// Parse a registry document and merge the sections that apply to `host`
///
/// # Errors
///
/// Returns error if the document is not a mapping of sections to
/// name/command pairs. Entries whose command is not a string are skipped
pub fn parse_registry(
    yaml: &str,
    host: &str,
) -> Result<HashMap<String, String>, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if value.is_null() {
        return Ok(HashMap::new());
    }
    let sections: Sections = serde_yaml::from_value(value)?;

    let section = |wanted: &str| {
        sections
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .and_then(|(_, entries)| entries.as_ref())
    };

    let mut apps = HashMap::new();
    for wanted in [DEFAULT_SECTION, host] {
        if wanted.is_empty() {
            continue;
        }
        let Some(entries) = section(wanted) else {
            continue;
        };
        for (name, command) in entries {
            match command.as_str() {
                Some(command) => {
                    apps.insert(name.to_lowercase(), command.to_string());
                }
                None => {
                    tracing::warn!(name = %name, section = wanted, "skipping non-string command");
                }
            }
        }
    }

    Ok(apps)
}

/// Load the registry at `path` for `host`
///
/// A missing, unreadable or invalid file yields an empty registry.
#[must_use]
pub fn load_registry(path: &Path, host: &str) -> HashMap<String, String> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no application registry");
        return HashMap::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read application registry");
            return HashMap::new();
        }
    };

    match parse_registry(&content, host) {
        Ok(apps) => {
            tracing::debug!(path = %path.display(), count = apps.len(), "loaded application registry");
            apps
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid application registry");
            HashMap::new()
        }
    }
}

/// This machine's host name, lower-cased
#[must_use]
pub fn current_host() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Registry backed by a YAML file
///
/// The file is re-read on every lookup so edits apply without a restart.
#[derive(Debug, Clone)]
pub struct YamlAppRegistry {
    path: PathBuf,
    host: String,
}

impl YamlAppRegistry {
    /// Registry for this machine
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_host(path, current_host())
    }

    /// Registry for an explicit host name
    #[must_use]
    pub fn with_host(path: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: host.into().to_lowercase(),
        }
    }

    /// Current merged entries
    #[must_use]
    pub fn entries(&self) -> HashMap<String, String> {
        load_registry(&self.path, &self.host)
    }
}

impl AppRegistry for YamlAppRegistry {
    fn lookup(&self, name: &str) -> Option<String> {
        self.entries().remove(&name.to_lowercase())
    }
}
