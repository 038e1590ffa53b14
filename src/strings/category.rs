//! Category Module
//!
//! The closed set of game-object kinds whose strings are cached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Category ==
/// A class of game object with its own string archive.
///
/// Declaration order is the fallback scan order used by the resolver when no
/// category is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Equip,
    Miscellaneous,
    Consumable,
    Cash,
    Installation,
    Pet,
    Npc,
    Mob,
    Map,
}

impl Category {
    /// Every category, in declared order.
    pub const ALL: [Category; 9] = [
        Category::Equip,
        Category::Miscellaneous,
        Category::Consumable,
        Category::Cash,
        Category::Installation,
        Category::Pet,
        Category::Npc,
        Category::Mob,
        Category::Map,
    ];

    /// Resource name of the archive holding this category's strings.
    pub fn archive_name(self) -> &'static str {
        match self {
            Category::Equip => "Eqp.img",
            Category::Miscellaneous => "Etc.img",
            Category::Consumable => "Consume.img",
            Category::Cash => "Cash.img",
            Category::Installation => "Ins.img",
            Category::Pet => "Pet.img",
            Category::Npc => "Npc.img",
            Category::Mob => "Mob.img",
            Category::Map => "Map.img",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Equip => "Equip",
            Category::Miscellaneous => "Miscellaneous",
            Category::Consumable => "Consumable",
            Category::Cash => "Cash",
            Category::Installation => "Installation",
            Category::Pet => "Pet",
            Category::Npc => "Npc",
            Category::Mob => "Mob",
            Category::Map => "Map",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CacheError;

    /// Accepts the variant name or the archive stem, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                let stem = category.archive_name().trim_end_matches(".img");
                category.as_str().eq_ignore_ascii_case(wanted) || stem.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CacheError::InvalidRequest(format!("Unknown category: {}", s)))
    }
}
