//! Snapshot Module
//!
//! One immutable cache generation: every category's names and descriptions,
//! stamped with the time it was built.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};
use crate::strings::Category;

// == Category Table ==
/// Strings extracted from one archive.
///
/// Descriptions are sparse: an id may have a name and no description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// id -> display name
    pub names: HashMap<String, String>,
    /// id -> description
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn description(&self, id: &str) -> Option<&str> {
        self.descriptions.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// == Snapshot ==
/// A fully populated cache generation.
///
/// Construction fails unless every [`Category`] has a table, so a snapshot
/// that exists is always complete. The same check runs when a persisted
/// snapshot is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    /// Creation timestamp (Unix milliseconds)
    timestamp: u64,
    tables: BTreeMap<Category, CategoryTable>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    timestamp: u64,
    tables: BTreeMap<Category, CategoryTable>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = CacheError;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        Snapshot::new(raw.timestamp, raw.tables)
    }
}

impl Snapshot {
    /// Builds a snapshot, rejecting any table set that misses a category.
    pub fn new(timestamp: u64, tables: BTreeMap<Category, CategoryTable>) -> Result<Self> {
        let missing: Vec<&str> = Category::ALL
            .iter()
            .filter(|category| !tables.contains_key(*category))
            .map(|category| category.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(CacheError::Internal(format!(
                "Snapshot is missing categories: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { timestamp, tables })
    }

    pub fn from_tables<I>(timestamp: u64, tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, CategoryTable)>,
    {
        Self::new(timestamp, tables.into_iter().collect())
    }

    /// Creation timestamp (Unix milliseconds).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn table(&self, category: Category) -> Option<&CategoryTable> {
        self.tables.get(&category)
    }

    pub fn tables(&self) -> impl Iterator<Item = (Category, &CategoryTable)> + '_ {
        self.tables.iter().map(|(category, table)| (*category, table))
    }

    pub fn name(&self, category: Category, id: &str) -> Option<&str> {
        self.table(category).and_then(|table| table.name(id))
    }

    pub fn description(&self, category: Category, id: &str) -> Option<&str> {
        self.table(category).and_then(|table| table.description(id))
    }

    /// Milliseconds elapsed between creation and `now_ms`, zero if `now_ms` is earlier.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Persistence Encoding ==
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CacheError::Internal(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
