//! Catalog — the three lookup tables behind the picker.
//!
//! - LOB table: LOB name → ordered app names (required)
//! - Package table: app name → package identifier (optional)
//! - Description table: app name → description (optional)
//!
//! Fetched as one fail-fast batch, validated once, immutable afterwards.
//! A reload builds a fresh `Catalog` and replaces the old one wholesale.

pub mod error;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::source::DataSource;
use error::{LoadError, LoadResult};

/// Resource paths for the three tables, relative to the data source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default = "default_lob_path")]
    pub lob: String,
    #[serde(default = "default_package_path")]
    pub package: String,
    #[serde(default = "default_description_path")]
    pub description: String,
}

fn default_lob_path() -> String {
    "data/lobToApps.json".into()
}

fn default_package_path() -> String {
    "data/appToPackage.json".into()
}

fn default_description_path() -> String {
    "data/appToDescription.json".into()
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            lob: default_lob_path(),
            package: default_package_path(),
            description: default_description_path(),
        }
    }
}

/// LOB name → app names. Keys iterate sorted; app order is as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl LobTable {
    /// Validate a JSON document as a mapping of string → array of strings.
    pub fn from_json(path: &str, value: Value) -> LoadResult<Self> {
        let malformed = |reason: String| LoadError::Malformed {
            path: path.to_string(),
            reason,
        };

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(malformed(format!("expected an object, got {}", kind_of(&other))))
            }
        };

        let mut entries = BTreeMap::new();
        for (lob, apps) in map {
            let items = match apps {
                Value::Array(items) => items,
                other => {
                    return Err(malformed(format!(
                        "apps for \"{lob}\" must be an array, got {}",
                        kind_of(&other)
                    )))
                }
            };
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(name) => names.push(name),
                    other => {
                        return Err(malformed(format!(
                            "app under \"{lob}\" must be a string, got {}",
                            kind_of(&other)
                        )))
                    }
                }
            }
            entries.insert(lob, names);
        }

        Ok(Self { entries })
    }

    /// Sorted, de-duplicated LOB names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Apps under `lob`, in source order.
    pub fn apps(&self, lob: &str) -> Option<&[String]> {
        self.entries.get(lob).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// App name → string value (package id or description).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: BTreeMap<String, String>,
}

pub type PackageTable = LookupTable;
pub type DescriptionTable = LookupTable;

impl LookupTable {
    /// Validate a JSON document as a string → string mapping.
    ///
    /// Returns `None` when the document is not an object; callers treat the
    /// table as unavailable. Non-string values are skipped.
    pub fn from_json(path: &str, value: Value) -> Option<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                warn!(path, kind = kind_of(&other), "lookup table is not an object, treating as unavailable");
                return None;
            }
        };

        let mut entries = BTreeMap::new();
        for (app, v) in map {
            match v {
                Value::String(s) => {
                    entries.insert(app, s);
                }
                other => warn!(path, app = %app, kind = kind_of(&other), "skipping non-string entry"),
            }
        }
        Some(Self { entries })
    }

    /// Value for `app`. Empty strings count as absent.
    pub fn get(&self, app: &str) -> Option<&str> {
        self.entries
            .get(app)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// The three tables from one successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub lobs: LobTable,
    pub packages: Option<PackageTable>,
    pub descriptions: Option<DescriptionTable>,
}

impl Catalog {
    /// Fetch all three resources concurrently. First failure wins.
    pub async fn fetch(source: &dyn DataSource, resources: &Resources) -> LoadResult<Self> {
        let (lob, package, description) = tokio::try_join!(
            source.fetch(&resources.lob),
            source.fetch(&resources.package),
            source.fetch(&resources.description),
        )?;
        Self::from_values(resources, lob, package, description)
    }

    /// Validate already-fetched documents.
    pub fn from_values(
        resources: &Resources,
        lob: Value,
        package: Value,
        description: Value,
    ) -> LoadResult<Self> {
        let lobs = LobTable::from_json(&resources.lob, lob)?;
        let packages = LookupTable::from_json(&resources.package, package);
        let descriptions = LookupTable::from_json(&resources.description, description);

        debug!(
            lob_to_apps = true,
            app_to_package = packages.is_some(),
            app_to_description = descriptions.is_some(),
            "loaded sections"
        );

        Ok(Self {
            lobs,
            packages,
            descriptions,
        })
    }

    /// Package id for `app`, if the table loaded and has a non-empty entry.
    pub fn package(&self, app: &str) -> Option<&str> {
        self.packages.as_ref().and_then(|t| t.get(app))
    }

    /// Description for `app`, same rules as [`Catalog::package`].
    pub fn description(&self, app: &str) -> Option<&str> {
        self.descriptions.as_ref().and_then(|t| t.get(app))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
