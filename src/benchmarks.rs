use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::category::Category;
use crate::position::{ALL_POSITIONS, Position};

/// One statistic's reference point inside a category: the league-wide
/// 90th-percentile per-90 value for a position, plus its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub stat: String,
    pub benchmark: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl BenchmarkEntry {
    pub fn new(stat: impl Into<String>, benchmark: f64, weight: f64) -> Self {
        Self {
            stat: stat.into(),
            benchmark,
            weight,
        }
    }
}

/// Position → category → ordered benchmark entries. Built once and shared
/// read-only; alternate tables can be loaded from JSON or assembled with
/// [`BenchmarkTable::with_entries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    positions: BTreeMap<Position, BTreeMap<Category, Vec<BenchmarkEntry>>>,
}

static DEFAULT_TABLE: Lazy<BenchmarkTable> = Lazy::new(build_default_table);

impl BenchmarkTable {
    pub fn default_table() -> &'static BenchmarkTable {
        &DEFAULT_TABLE
    }

    /// Entries for a position/category pair; empty when the table has none.
    pub fn entries(&self, position: Position, category: Category) -> &[BenchmarkEntry] {
        self.positions
            .get(&position)
            .and_then(|cats| cats.get(&category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn benchmark_for(&self, position: Position, category: Category, stat: &str) -> Option<f64> {
        self.entries(position, category)
            .iter()
            .find(|e| e.stat.eq_ignore_ascii_case(stat))
            .map(|e| e.benchmark)
    }

    pub fn with_entries(
        mut self,
        position: Position,
        category: Category,
        entries: Vec<BenchmarkEntry>,
    ) -> Self {
        self.positions
            .entry(position)
            .or_default()
            .insert(category, entries);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let table: BenchmarkTable =
            serde_json::from_str(raw).context("parse benchmark table json")?;
        Ok(table.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read benchmark table {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("load {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize benchmark table")
    }

    fn sanitized(mut self) -> Self {
        for (position, cats) in self.positions.iter_mut() {
            for (category, entries) in cats.iter_mut() {
                entries.retain(|e| {
                    let ok = e.benchmark.is_finite()
                        && e.benchmark >= 0.0
                        && e.weight.is_finite()
                        && e.weight >= 0.0;
                    if !ok {
                        warn!(
                            %position,
                            %category,
                            stat = %e.stat,
                            benchmark = e.benchmark,
                            weight = e.weight,
                            "dropping invalid benchmark entry"
                        );
                    }
                    ok
                });
            }
        }
        self
    }
}

// (statistic, [GK, DF, MF, FW] per-90 benchmark, weight)
type BenchmarkRow = (&'static str, [f64; 4], f64);

const PASSING: &[BenchmarkRow] = &[
    ("Passes Completed", [27.0, 58.0, 62.0, 27.0], 1.0),
    ("Progressive Passes", [0.9, 5.9, 7.28, 3.2], 1.0),
    ("Passes into Final Third", [0.6, 5.0, 6.2, 2.3], 1.0),
    ("Key Passes", [0.1, 1.1, 2.1, 1.9], 1.0),
    ("Passes into Penalty Area", [0.05, 1.2, 1.9, 1.6], 1.0),
];

const SHOOTING: &[BenchmarkRow] = &[
    ("Goals", [0.01, 0.12, 0.28, 0.62], 1.2),
    ("Shots Total", [0.05, 1.0, 2.1, 3.6], 1.0),
    ("Shots on Target", [0.02, 0.35, 0.75, 1.4], 1.0),
    ("xG: Expected Goals", [0.01, 0.11, 0.25, 0.55], 1.5),
    ("npxG: Non-Penalty xG", [0.01, 0.10, 0.22, 0.48], 1.2),
];

const CREATION: &[BenchmarkRow] = &[
    ("Shot-Creating Actions", [0.4, 2.3, 3.9, 4.3], 1.3),
    ("Goal-Creating Actions", [0.05, 0.25, 0.45, 0.6], 1.3),
    ("Assists", [0.01, 0.12, 0.24, 0.3], 1.0),
    ("xAG: Exp. Assisted Goals", [0.01, 0.12, 0.22, 0.27], 1.2),
    ("Successful Take-Ons", [0.1, 0.9, 1.6, 2.1], 0.8),
];

const DEFENSE: &[BenchmarkRow] = &[
    ("Tackles Won", [0.05, 1.9, 1.9, 0.9], 1.2),
    ("Interceptions", [0.2, 1.6, 1.3, 0.5], 1.0),
    ("Blocks", [0.1, 1.7, 1.5, 0.9], 1.0),
    ("Clearances", [1.2, 5.6, 1.8, 0.9], 0.8),
    ("Ball Recoveries", [1.3, 5.8, 6.3, 4.1], 1.0),
];

const POSSESSION: &[BenchmarkRow] = &[
    ("Touches", [40.0, 78.0, 80.0, 52.0], 0.8),
    ("Carries", [20.0, 40.0, 44.0, 28.0], 0.8),
    ("Progressive Carries", [0.05, 1.8, 2.6, 3.4], 1.2),
    ("Carries into Final Third", [0.02, 1.3, 2.0, 1.9], 1.0),
    ("Progressive Passes Rec", [0.01, 2.4, 6.0, 10.5], 1.0),
];

fn rows_for(category: Category) -> &'static [BenchmarkRow] {
    match category {
        Category::Passing => PASSING,
        Category::Shooting => SHOOTING,
        Category::Creation => CREATION,
        Category::Defense => DEFENSE,
        Category::Possession => POSSESSION,
    }
}

fn build_default_table() -> BenchmarkTable {
    let mut table = BenchmarkTable::default();
    for (slot, position) in ALL_POSITIONS.into_iter().enumerate() {
        for category in crate::category::ALL_CATEGORIES {
            let entries = rows_for(category)
                .iter()
                .map(|(stat, per_position, weight)| {
                    BenchmarkEntry::new(*stat, per_position[slot], *weight)
                })
                .collect();
            table = table.with_entries(position, category, entries);
        }
    }
    table
}
