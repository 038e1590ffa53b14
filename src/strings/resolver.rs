//! Lookup Resolver Module
//!
//! Answers "what is the name / description for id X" from the current
//! snapshot. Lookups never fail and never trigger a load.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::strings::{CacheStore, Category, Snapshot};

// == Search Hit ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub category: Category,
    pub name: String,
}

// == Resolver ==
/// Read-only view over the [`CacheStore`].
///
/// Uses whatever snapshot is current, stale or not; call
/// [`BulkLoader::ensure_loaded`](crate::strings::BulkLoader::ensure_loaded)
/// first when freshness matters.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<CacheStore>,
}

impl Resolver {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// Whether a snapshot exists and is within its TTL.
    pub fn is_ready(&self) -> bool {
        self.store.valid_snapshot().is_some()
    }

    // == Resolve Name ==
    /// Display name for `id`, or `id` itself when nothing matches.
    ///
    /// Without a category, categories are scanned in declared order and the
    /// first match wins.
    pub fn resolve_name(&self, id: &str, category: Option<Category>) -> String {
        let found = self
            .store
            .read()
            .and_then(|snapshot| find(&snapshot, category, |s, c| s.name(c, id)));

        self.store.stats().record_name(found.is_some());
        found.unwrap_or_else(|| id.to_string())
    }

    // == Resolve Description ==
    /// Description for `id`; `None` is a legitimate "no description" answer.
    pub fn resolve_description(&self, id: &str, category: Option<Category>) -> Option<String> {
        let found = self
            .store
            .read()
            .and_then(|snapshot| find(&snapshot, category, |s, c| s.description(c, id)));

        self.store.stats().record_description(found.is_some());
        found
    }

    // == Search ==
    /// Names containing `query` (case-insensitive) or ids equal to it.
    ///
    /// Results are ordered by category, then by numeric id, and truncated to `limit`.
    pub fn search(&self, query: &str, category: Option<Category>, limit: usize) -> Vec<SearchHit> {
        let query = query.trim();
        let Some(snapshot) = self.store.read() else {
            return Vec::new();
        };
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let categories = category.map_or(Category::ALL.to_vec(), |c| vec![c]);

        let mut hits = Vec::new();
        for category in categories {
            let Some(table) = snapshot.table(category) else {
                continue;
            };
            let mut matched: Vec<SearchHit> = table
                .names
                .iter()
                .filter(|(id, name)| id.as_str() == query || name.to_lowercase().contains(&needle))
                .map(|(id, name)| SearchHit {
                    id: id.clone(),
                    category,
                    name: name.clone(),
                })
                .collect();
            matched.sort_by(|a, b| compare_ids(&a.id, &b.id));
            hits.extend(matched);
            if hits.len() >= limit {
                break;
            }
        }

        hits.truncate(limit);
        hits
    }
}

/// Looks in one category, or in every category in declared order.
fn find<'a, F>(snapshot: &'a Snapshot, category: Option<Category>, lookup: F) -> Option<String>
where
    F: Fn(&'a Snapshot, Category) -> Option<&'a str>,
{
    match category {
        Some(category) => lookup(snapshot, category),
        None => Category::ALL
            .into_iter()
            .find_map(|category| lookup(snapshot, category)),
    }
    .map(str::to_string)
}

/// Numeric order for numeric ids, text order otherwise.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
