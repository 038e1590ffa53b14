//! Category Extractors
//!
//! Per-archive rules turning a decoded document into a [`CategoryTable`].
//! Archive shapes differ by category:
//! - `Equip`: `subcategory -> id -> fields`
//! - `Map`: `region -> id -> fields`, name derived from street and map names
//! - everything else: `id -> fields`

use serde_json::{Map, Value};

use crate::error::{CacheError, Result};
use crate::sources::Document;
use crate::strings::{Category, CategoryTable};

const NAME: &str = "name";
const DESC: &str = "desc";
const STREET_NAME: &str = "streetName";
const MAP_NAME: &str = "mapName";

/// Extracts the names and descriptions for `category` from its decoded archive.
///
/// Ids without a resolvable name are left out of the table entirely.
pub fn extract(category: Category, document: &Document) -> Result<CategoryTable> {
    let root = document.as_object().ok_or_else(|| {
        CacheError::decode(category.archive_name(), "expected an object at the document root")
    })?;

    let table = match category {
        Category::Equip => extract_grouped(root, named_entry),
        Category::Map => extract_grouped(root, map_entry),
        Category::Miscellaneous
        | Category::Consumable
        | Category::Cash
        | Category::Installation
        | Category::Pet
        | Category::Npc
        | Category::Mob => extract_flat(root, named_entry),
    };

    Ok(table)
}

/// Resolved strings for one id: name and optional description.
type Entry = (String, Option<String>);

/// Turns one entry's fields into its strings, or `None` to skip the id.
type EntryRule = fn(&Map<String, Value>) -> Option<Entry>;

fn extract_flat(root: &Map<String, Value>, rule: EntryRule) -> CategoryTable {
    let mut table = CategoryTable::new();
    insert_entries(&mut table, root, rule);
    table
}

/// Flattens one level of grouping (equip subcategories, map regions).
fn extract_grouped(root: &Map<String, Value>, rule: EntryRule) -> CategoryTable {
    let mut table = CategoryTable::new();
    for group in root.values().filter_map(Value::as_object) {
        insert_entries(&mut table, group, rule);
    }
    table
}

fn insert_entries(table: &mut CategoryTable, entries: &Map<String, Value>, rule: EntryRule) {
    for (id, fields) in entries {
        let Some((name, desc)) = fields.as_object().and_then(rule) else {
            continue;
        };
        table.names.insert(id.clone(), name);
        if let Some(desc) = desc {
            table.descriptions.insert(id.clone(), desc);
        }
    }
}

fn named_entry(fields: &Map<String, Value>) -> Option<Entry> {
    let name = text_field(fields, NAME)?;
    Some((name, text_field(fields, DESC)))
}

fn map_entry(fields: &Map<String, Value>) -> Option<Entry> {
    let map_name = text_field(fields, MAP_NAME)?;
    let name = match text_field(fields, STREET_NAME) {
        Some(street) => format!("{} - {}", street, map_name),
        None => map_name,
    };
    Some((name, None))
}

/// Reads a field as display text. Empty strings count as absent.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_names_and_sparse_descriptions() {
        let doc = json!({
            "2000000": {"name": "Red Potion", "desc": "Recovers 50 HP."},
            "2000001": {"name": "Orange Potion"},
        });

        let table = extract(Category::Consumable, &doc).unwrap();
        assert_eq!(table.name("2000000"), Some("Red Potion"));
        assert_eq!(table.description("2000000"), Some("Recovers 50 HP."));
        assert_eq!(table.name("2000001"), Some("Orange Potion"));
        assert_eq!(table.description("2000001"), None);
    }

    #[test]
    fn test_flat_skips_unnamed_entries() {
        let doc = json!({
            "4000000": {"name": ""},
            "4000001": {"desc": "No name here."},
            "4000002": "not an object",
            "4000003": {"name": "Snail Shell"},
        });

        let table = extract(Category::Miscellaneous, &doc).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.name("4000003"), Some("Snail Shell"));
        assert!(table.descriptions.is_empty());
    }

    #[test]
    fn test_numeric_name_rendered_as_text() {
        let doc = json!({"9000000": {"name": 1004}});
        let table = extract(Category::Npc, &doc).unwrap();
        assert_eq!(table.name("9000000"), Some("1004"));
    }

    #[test]
    fn test_equip_flattens_subcategories() {
        let doc = json!({
            "Weapon": {
                "1302000": {"name": "Sword", "desc": "A basic sword."}
            },
            "Cap": {
                "1002000": {"name": "Blue Bandana"}
            },
            "Broken": "ignored",
        });

        let table = extract(Category::Equip, &doc).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.name("1302000"), Some("Sword"));
        assert_eq!(table.description("1302000"), Some("A basic sword."));
        assert_eq!(table.name("1002000"), Some("Blue Bandana"));
    }

    #[test]
    fn test_map_name_derivation() {
        let doc = json!({
            "victoria": {
                "104000000": {"streetName": "Victoria Road", "mapName": "Lith Harbor"},
                "104000001": {"mapName": "Lith Harbor"},
                "104000002": {},
                "104000003": {"streetName": "Victoria Road"},
            }
        });

        let table = extract(Category::Map, &doc).unwrap();
        assert_eq!(table.name("104000000"), Some("Victoria Road - Lith Harbor"));
        assert_eq!(table.name("104000001"), Some("Lith Harbor"));
        assert_eq!(table.name("104000002"), None);
        assert_eq!(table.name("104000003"), None);
        assert!(table.descriptions.is_empty());
    }

    #[test]
    fn test_map_ignores_empty_street_name() {
        let doc = json!({
            "ossyria": {"200000000": {"streetName": "", "mapName": "Orbis"}}
        });

        let table = extract(Category::Map, &doc).unwrap();
        assert_eq!(table.name("200000000"), Some("Orbis"));
    }

    #[test]
    fn test_non_object_root_is_decode_error() {
        let result = extract(Category::Mob, &json!([1, 2, 3]));
        assert!(matches!(result, Err(CacheError::Decode { ref archive, .. }) if archive == "Mob.img"));
    }
}
