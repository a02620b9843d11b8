use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::BenchmarkTable;
use crate::category::{ALL_CATEGORIES, Category};
use crate::category_score::{CategoryBreakdown, StatInput};
use crate::normalize::ScoringConfig;
use crate::position::Position;
use crate::stat_record::StatRecord;

/// One scored statistic, kept for display next to the category scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub category: Category,
    pub stat: String,
    pub raw: f64,
    pub benchmark: f64,
    pub weight: f64,
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileKey {
    pub player_name: String,
    pub season: Option<String>,
    pub competition: Option<String>,
}

/// Category scores for one (player, season, competition). Read-only once
/// built; rebuild from the record to pick up changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    record: StatRecord,
    category_scores: BTreeMap<Category, f64>,
    breakdowns: BTreeMap<Category, CategoryBreakdown>,
    stat_lines: Vec<StatLine>,
}

impl PlayerProfile {
    pub fn build(record: StatRecord, table: &BenchmarkTable, cfg: &ScoringConfig) -> Self {
        let mut category_scores = BTreeMap::new();
        let mut breakdowns = BTreeMap::new();
        let mut stat_lines = Vec::new();

        for category in ALL_CATEGORIES {
            let entries = table.entries(record.position, category);
            let mut inputs = Vec::with_capacity(entries.len());
            for entry in entries {
                let raw = record.stat_value(&entry.stat);
                inputs.push(StatInput::new(raw, entry.benchmark, entry.weight));
                stat_lines.push(StatLine {
                    category,
                    stat: entry.stat.clone(),
                    raw,
                    benchmark: entry.benchmark,
                    weight: entry.weight,
                    normalized: cfg.normalize(raw, entry.benchmark),
                });
            }
            let breakdown = cfg.category_breakdown(&inputs);
            category_scores.insert(category, breakdown.score);
            breakdowns.insert(category, breakdown);
        }

        debug!(
            player = %record.player_name,
            position = %record.position,
            scores = ?category_scores,
            "built player profile"
        );

        Self {
            record,
            category_scores,
            breakdowns,
            stat_lines,
        }
    }

    /// Build against the default benchmark table and constants.
    pub fn from_record(record: StatRecord) -> Self {
        Self::build(
            record,
            BenchmarkTable::default_table(),
            &ScoringConfig::default(),
        )
    }

    pub fn key(&self) -> ProfileKey {
        ProfileKey {
            player_name: self.record.player_name.clone(),
            season: self.record.season.clone(),
            competition: self.record.competition.clone(),
        }
    }

    pub fn record(&self) -> &StatRecord {
        &self.record
    }

    pub fn player_name(&self) -> &str {
        &self.record.player_name
    }

    pub fn position(&self) -> Position {
        self.record.position
    }

    pub fn minutes_played(&self) -> Option<f64> {
        self.record.minutes_played
    }

    pub fn category_scores(&self) -> &BTreeMap<Category, f64> {
        &self.category_scores
    }

    pub fn category_score(&self, category: Category) -> f64 {
        self.category_scores.get(&category).copied().unwrap_or(0.0)
    }

    pub fn breakdown(&self, category: Category) -> CategoryBreakdown {
        self.breakdowns.get(&category).copied().unwrap_or_default()
    }

    pub fn stat_lines(&self) -> &[StatLine] {
        &self.stat_lines
    }

    pub fn stat_lines_for(&self, category: Category) -> impl Iterator<Item = &StatLine> + '_ {
        self.stat_lines.iter().filter(move |l| l.category == category)
    }

    /// Unnormalized value of any statistic in the underlying record.
    pub fn raw_value(&self, stat: &str) -> f64 {
        self.record.stat_value(stat)
    }

    pub fn strengths(&self, n: usize) -> Vec<&StatLine> {
        let mut lines: Vec<&StatLine> = self.unique_lines();
        lines.sort_by(|a, b| cmp_score(b.normalized, a.normalized).then_with(|| a.stat.cmp(&b.stat)));
        lines.truncate(n);
        lines
    }

    pub fn weaknesses(&self, n: usize) -> Vec<&StatLine> {
        let mut lines: Vec<&StatLine> = self.unique_lines();
        lines.sort_by(|a, b| cmp_score(a.normalized, b.normalized).then_with(|| a.stat.cmp(&b.stat)));
        lines.truncate(n);
        lines
    }

    // A statistic listed under two categories would otherwise show up twice.
    fn unique_lines(&self) -> Vec<&StatLine> {
        let mut seen = std::collections::HashSet::new();
        self.stat_lines
            .iter()
            .filter(|l| seen.insert(l.stat.to_lowercase()))
            .collect()
    }
}

fn cmp_score(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
