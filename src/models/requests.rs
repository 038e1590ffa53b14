//! Request DTOs for the string cache API
//!
//! Query-string parameters accepted by the lookup and search endpoints.

use serde::Deserialize;

use crate::error::Result;
use crate::strings::Category;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Upper bound on search results per request.
pub const MAX_SEARCH_LIMIT: usize = 500;

/// Query for `GET /name/:id` and `GET /description/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    /// Category name or archive stem; scans every category when absent
    #[serde(default)]
    pub category: Option<String>,
}

impl LookupQuery {
    /// Parses the category, rejecting unknown names.
    pub fn category(&self) -> Result<Option<Category>> {
        parse_category(self.category.as_deref())
    }
}

/// Query for `GET /search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Text to look for in names, or an exact id
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.q.trim().is_empty() {
            return Some("Search query cannot be empty".to_string());
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_SEARCH_LIMIT {
                return Some(format!("Limit must be between 1 and {}", MAX_SEARCH_LIMIT));
            }
        }
        None
    }

    pub fn category(&self) -> Result<Option<Category>> {
        parse_category(self.category.as_deref())
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.parse().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_lookup_query_category() {
        let query = LookupQuery {
            category: Some("mob".to_string()),
        };
        assert_eq!(query.category().unwrap(), Some(Category::Mob));

        let query = LookupQuery { category: None };
        assert_eq!(query.category().unwrap(), None);

        let query = LookupQuery {
            category: Some("".to_string()),
        };
        assert_eq!(query.category().unwrap(), None);
    }

    #[test]
    fn test_lookup_query_unknown_category() {
        let query = LookupQuery {
            category: Some("Quest".to_string()),
        };
        assert!(matches!(query.category(), Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_search_query_deserialize() {
        let json = r#"{"q": "snail", "limit": 5}"#;
        let query: SearchQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.q, "snail");
        assert_eq!(query.limit(), 5);
        assert!(query.category.is_none());
    }

    #[test]
    fn test_validate_empty_query() {
        let query = SearchQuery {
            q: "  ".to_string(),
            ..SearchQuery::default()
        };
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_validate_limit_bounds() {
        let mut query = SearchQuery {
            q: "snail".to_string(),
            ..SearchQuery::default()
        };
        assert!(query.validate().is_none());
        assert_eq!(query.limit(), DEFAULT_SEARCH_LIMIT);

        query.limit = Some(0);
        assert!(query.validate().is_some());

        query.limit = Some(MAX_SEARCH_LIMIT + 1);
        assert!(query.validate().is_some());
    }
}
