use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Tactical grouping of statistics. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Passing,
    Shooting,
    Creation,
    Defense,
    Possession,
}

pub const ALL_CATEGORIES: [Category; 5] = [
    Category::Passing,
    Category::Shooting,
    Category::Creation,
    Category::Defense,
    Category::Possession,
];

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Passing => "Passing",
            Category::Shooting => "Shooting",
            Category::Creation => "Creation",
            Category::Defense => "Defense",
            Category::Possession => "Possession",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let s = raw.trim();
        ALL_CATEGORIES
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .or_else(|| match s.to_lowercase().as_str() {
                "defence" => Some(Category::Defense),
                _ => None,
            })
            .ok_or_else(|| anyhow!("unknown category '{raw}'"))
    }
}
