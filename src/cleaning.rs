use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stat_record::{StatRecord, parse_number};

const HEADER_LABEL: &str = "Statistic";
const COMPOSITE_MARKERS: &[&str] = &["+", " - ", "/", " vs "];
const PERCENT_MARKERS: &[&str] = &["%", "percentage", "completion"];

/// One row of a scouting-report table as scraped: every cell is text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawScoutRow {
    #[serde(alias = "Statistic")]
    pub statistic: String,
    #[serde(default, alias = "Per 90", alias = "Per_90", alias = "per90")]
    pub per_90: String,
    #[serde(default, alias = "Percentile")]
    pub percentile: String,
}

impl RawScoutRow {
    pub fn new(statistic: &str, per_90: &str, percentile: &str) -> Self {
        Self {
            statistic: statistic.to_string(),
            per_90: per_90.to_string(),
            percentile: percentile.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanStat {
    pub statistic: String,
    pub per_90: Option<f64>,
    pub percentile: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningOptions {
    pub remove_empty: bool,
    pub remove_duplicates: bool,
    pub remove_composites: bool,
    pub remove_percentages: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_empty: true,
            remove_duplicates: true,
            remove_composites: true,
            remove_percentages: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub initial_rows: usize,
    pub final_rows: usize,
    pub removed_headers: usize,
    pub removed_empty: usize,
    pub removed_duplicates: usize,
    pub removed_composite: Vec<String>,
    pub removed_percentages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub rows: Vec<CleanStat>,
    pub report: CleaningReport,
}

/// Metadata that the scouting table itself does not carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordMeta {
    pub player_name: String,
    pub position: String,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub minutes_played: Option<f64>,
}

pub fn clean_rows(rows: &[RawScoutRow], opts: CleaningOptions) -> CleanedTable {
    let mut report = CleaningReport {
        initial_rows: rows.len(),
        ..CleaningReport::default()
    };

    let mut work: Vec<RawScoutRow> = rows
        .iter()
        .map(|r| RawScoutRow {
            statistic: r.statistic.trim().to_string(),
            per_90: r.per_90.trim().to_string(),
            percentile: r.percentile.trim().to_string(),
        })
        .collect();

    // Scouting tables repeat their header row between sections.
    let before = work.len();
    work.retain(|r| r.statistic != HEADER_LABEL);
    report.removed_headers = before - work.len();

    if opts.remove_empty {
        let before = work.len();
        work.retain(|r| !r.statistic.is_empty());
        report.removed_empty = before - work.len();
    }

    if opts.remove_duplicates {
        let before = work.len();
        let mut seen = HashSet::new();
        work.retain(|r| seen.insert(r.clone()));
        report.removed_duplicates = before - work.len();
    }

    if opts.remove_composites {
        let (kept, removed): (Vec<_>, Vec<_>) =
            work.into_iter().partition(|r| !is_composite_stat(&r.statistic));
        report.removed_composite = removed.into_iter().map(|r| r.statistic).collect();
        work = kept;
    }

    if opts.remove_percentages {
        let (kept, removed): (Vec<_>, Vec<_>) =
            work.into_iter().partition(|r| !is_percentage_stat(&r.statistic));
        report.removed_percentages = removed.into_iter().map(|r| r.statistic).collect();
        work = kept;
    }

    let rows: Vec<CleanStat> = work
        .into_iter()
        .map(|r| CleanStat {
            per_90: parse_number(&r.per_90),
            percentile: parse_number(&r.percentile),
            statistic: r.statistic,
        })
        .collect();
    report.final_rows = rows.len();

    debug!(
        initial = report.initial_rows,
        kept = report.final_rows,
        headers = report.removed_headers,
        empty = report.removed_empty,
        duplicates = report.removed_duplicates,
        composite = report.removed_composite.len(),
        percentages = report.removed_percentages.len(),
        "cleaned scouting table"
    );

    CleanedTable { rows, report }
}

/// Sums, differences, ratios and "x vs y" rows ("Goals + Assists", "Goals - xG").
pub fn is_composite_stat(name: &str) -> bool {
    COMPOSITE_MARKERS.iter().any(|m| name.contains(m))
}

pub fn is_percentage_stat(name: &str) -> bool {
    let lower = name.to_lowercase();
    PERCENT_MARKERS.iter().any(|m| lower.contains(m))
}

/// Turn the vertical (one row per statistic) table into a horizontal record.
/// The first occurrence of a statistic wins; a missing per-90 value is 0.0.
pub fn pivot_to_record(table: &CleanedTable, meta: &RecordMeta) -> StatRecord {
    let mut record = StatRecord::new(meta.player_name.clone(), &meta.position);
    record.season = meta.season.clone();
    record.competition = meta.competition.clone();
    record.minutes_played = meta.minutes_played;
    for row in &table.rows {
        if record.stats.contains_key(&row.statistic) {
            continue;
        }
        record.insert_stat(row.statistic.clone(), row.per_90.unwrap_or(0.0));
    }
    record
}

pub fn load_raw_rows(path: &Path) -> Result<Vec<RawScoutRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read scouting rows {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse scouting rows {}", path.display()))
}
