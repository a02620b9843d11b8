use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::position::{Position, position_from_text};

/// One player-season's per-90 statistics plus metadata, in the horizontal
/// layout produced by the cleaning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStatRecord")]
pub struct StatRecord {
    pub player_name: String,
    pub position: Position,
    pub position_text: String,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub minutes_played: Option<f64>,
    pub stats: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RawStatRecord {
    #[serde(alias = "player_name", alias = "Player", alias = "player")]
    name: String,
    #[serde(default, alias = "Pos")]
    position: Option<String>,
    #[serde(default)]
    position_text: Option<String>,
    #[serde(default, alias = "Season")]
    season: Option<Value>,
    #[serde(default, alias = "Comp", alias = "Competition")]
    competition: Option<Value>,
    #[serde(default, alias = "minutes", alias = "Min")]
    minutes_played: Option<Value>,
    #[serde(default)]
    stats: BTreeMap<String, Value>,
    #[serde(flatten)]
    columns: BTreeMap<String, Value>,
}

impl From<RawStatRecord> for StatRecord {
    fn from(raw: RawStatRecord) -> Self {
        let position_text = raw
            .position_text
            .filter(|t| !t.trim().is_empty())
            .or(raw.position)
            .unwrap_or_default();
        // Nested "stats" (our own serialized form) and flat columns both feed
        // the statistic map; flat columns win on conflicts.
        let mut stats: BTreeMap<String, f64> = raw
            .stats
            .iter()
            .map(|(k, v)| (k.clone(), coerce_stat(v)))
            .collect();
        for (key, value) in &raw.columns {
            stats.insert(key.clone(), coerce_stat(value));
        }
        Self {
            player_name: raw.name,
            position: position_from_text(&position_text),
            position_text,
            season: raw.season.as_ref().and_then(value_to_text),
            competition: raw.competition.as_ref().and_then(value_to_text),
            minutes_played: raw.minutes_played.as_ref().and_then(coerce_number),
            stats,
        }
    }
}

impl StatRecord {
    pub fn new(player_name: impl Into<String>, position_text: &str) -> Self {
        Self {
            player_name: player_name.into(),
            position: position_from_text(position_text),
            position_text: position_text.to_string(),
            season: None,
            competition: None,
            minutes_played: None,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_competition(mut self, competition: impl Into<String>) -> Self {
        self.competition = Some(competition.into());
        self
    }

    pub fn with_minutes(mut self, minutes: f64) -> Self {
        self.minutes_played = Some(minutes);
        self
    }

    pub fn with_stat(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert_stat(name, value);
        self
    }

    pub fn insert_stat(&mut self, name: impl Into<String>, value: f64) {
        self.stats.insert(name.into(), sanitize_value(value));
    }

    /// Tolerant statistic lookup. Tries, in order: case-insensitive name,
    /// alphanumeric-only name, then for percentage names only, any other
    /// percentage spelling ("_pct" vs "Percentage"). A miss is 0.0.
    pub fn stat_value(&self, name: &str) -> f64 {
        self.find_stat(name).unwrap_or(0.0)
    }

    pub fn find_stat(&self, name: &str) -> Option<f64> {
        let wanted = name.trim();
        if let Some(v) = self.stats.get(wanted) {
            return Some(*v);
        }

        if let Some((_, v)) = self
            .stats
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(wanted))
        {
            return Some(*v);
        }

        let wanted_clean = clean_stat_name(wanted);
        if wanted_clean.is_empty() {
            return None;
        }
        if let Some((_, v)) = self
            .stats
            .iter()
            .find(|(k, _)| clean_stat_name(k) == wanted_clean)
        {
            return Some(*v);
        }

        // A count never resolves to a percentage column or the reverse.
        let wanted_base = pct_base(&wanted_clean)?;
        self.stats
            .iter()
            .find(|(k, _)| pct_base(&clean_stat_name(k)) == Some(wanted_base))
            .map(|(_, v)| *v)
    }

    pub fn minutes_or_zero(&self) -> f64 {
        self.minutes_played.map(sanitize_value).unwrap_or(0.0)
    }
}

/// Lowercase, alphanumeric-only form used for fuzzy name matching.
pub fn clean_stat_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn pct_base(clean: &str) -> Option<&str> {
    ["percentage", "pct"]
        .into_iter()
        .filter_map(|suffix| clean.strip_suffix(suffix))
        .find(|base| !base.is_empty())
}

fn sanitize_value(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn coerce_stat(value: &Value) -> f64 {
    coerce_number(value).unwrap_or(0.0)
}

fn coerce_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s)?,
        _ => return None,
    };
    Some(sanitize_value(v))
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a scraped numeric cell ("1,234", "85.5%", " 0.42 "). Decorations are
/// stripped; an empty or dash-only cell is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<StatRecord>),
    One(Box<StatRecord>),
}

pub fn parse_records_json(raw: &str) -> Result<Vec<StatRecord>> {
    let file: RecordFile = serde_json::from_str(raw).context("parse stat records json")?;
    Ok(match file {
        RecordFile::Many(records) => records,
        RecordFile::One(record) => vec![*record],
    })
}

pub fn load_records(path: &Path) -> Result<Vec<StatRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read stat records {}", path.display()))?;
    parse_records_json(&raw).with_context(|| format!("load {}", path.display()))
}
