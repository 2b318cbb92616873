//! Slack owner lookup for gateway routes.
//!
//! Ops maintain a JSON file mapping route display names to Slack user IDs
//! so an alert can @-mention whoever carries the device. The file is
//! optional: missing or malformed input degrades to an empty table and
//! alerts simply lose their mentions.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

/// Env var naming the owner mapping file.
pub const OWNERS_FILE_ENV: &str = "OWNERS_FILE";

/// Fallback path when `OWNERS_FILE` is unset.
pub const DEFAULT_OWNERS_FILE: &str = "owners.json";

/// Route display name → Slack user ID, loaded once at startup.
///
/// The file is a flat JSON object:
///
/// ```json
/// { "Router-A": "U01AAAAAA" }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwnerTable {
    owners: HashMap<String, String>,
}

impl OwnerTable {
    /// Table with no mappings; alerts carry no mentions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from `path`.
    ///
    /// Never fails: an unreadable or unparseable file is logged at warn
    /// level and yields an empty table.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "owners file not readable, mentions disabled"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&raw) {
            Ok(owners) => {
                debug!(path = %path.display(), count = owners.len(), "loaded owner mappings");
                Self { owners }
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "owners file is not valid JSON, mentions disabled"
                );
                Self::default()
            }
        }
    }

    /// Load from the path in `OWNERS_FILE`, defaulting to `owners.json` in
    /// the working directory.
    pub fn from_env() -> Self {
        let path =
            std::env::var(OWNERS_FILE_ENV).unwrap_or_else(|_| DEFAULT_OWNERS_FILE.to_string());
        Self::load(Path::new(&path))
    }

    /// Slack user ID for a route display name, if one is mapped.
    ///
    /// Absence is the normal case, not an error: most routes have no
    /// dedicated owner.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.owners.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
