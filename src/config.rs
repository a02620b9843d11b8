use std::env;
use std::path::PathBuf;
use std::thread;

use anyhow::Result;
use tracing::{debug, warn};

use crate::benchmarks::BenchmarkTable;
use crate::normalize::ScoringConfig;

pub const ENV_BENCHMARKS: &str = "SCOUT_BENCHMARKS";
pub const ENV_ELITE_FACTOR: &str = "SCOUT_ELITE_FACTOR";
pub const ENV_CONSISTENCY_PENALTY: &str = "SCOUT_CONSISTENCY_PENALTY";
pub const ENV_CONFIDENCE_MIDPOINT: &str = "SCOUT_CONFIDENCE_MIDPOINT";
pub const ENV_CONFIDENCE_SLOPE: &str = "SCOUT_CONFIDENCE_SLOPE";
pub const ENV_PARALLELISM: &str = "SCORING_PARALLELISM";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub benchmarks_path: Option<PathBuf>,
    pub scoring: ScoringConfig,
    pub parallelism: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            benchmarks_path: None,
            scoring: ScoringConfig::default(),
            parallelism: default_parallelism(),
        }
    }
}

impl AppConfig {
    /// Read overrides from the process environment. Call `dotenvy` first if
    /// `.env` files should take part.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        cfg.benchmarks_path = lookup(ENV_BENCHMARKS)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(v) = parse_f64(&lookup, ENV_ELITE_FACTOR) {
            cfg.scoring.elite_factor = v.max(1.0);
        }
        if let Some(v) = parse_f64(&lookup, ENV_CONSISTENCY_PENALTY) {
            cfg.scoring.consistency_penalty_factor = v.clamp(0.0, 1.0);
        }
        if let Some(v) = parse_f64(&lookup, ENV_CONFIDENCE_MIDPOINT) {
            cfg.scoring.confidence_midpoint_minutes = v.max(0.0);
        }
        if let Some(v) = parse_f64(&lookup, ENV_CONFIDENCE_SLOPE) {
            if v > 0.0 {
                cfg.scoring.confidence_slope_minutes = v;
            } else {
                warn!(key = ENV_CONFIDENCE_SLOPE, value = v, "slope must be positive, ignoring");
            }
        }
        if let Some(n) = lookup(ENV_PARALLELISM).and_then(|v| v.trim().parse::<usize>().ok()) {
            cfg.parallelism = n.max(1);
        }

        debug!(?cfg, "resolved configuration");
        cfg
    }

    /// The configured alternate benchmark table, or the built-in one.
    pub fn benchmark_table(&self) -> Result<BenchmarkTable> {
        match &self.benchmarks_path {
            Some(path) => BenchmarkTable::load(path),
            None => Ok(BenchmarkTable::default_table().clone()),
        }
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

fn default_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[]));
        assert!(cfg.benchmarks_path.is_none());
        assert_eq!(cfg.scoring, ScoringConfig::default());
        assert!(cfg.parallelism >= 1);
    }

    #[test]
    fn overrides_are_parsed_and_clamped() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            (ENV_BENCHMARKS, " tables/custom.json "),
            (ENV_ELITE_FACTOR, "0.8"),
            (ENV_CONSISTENCY_PENALTY, "0.35"),
            (ENV_CONFIDENCE_SLOPE, "-10"),
            (ENV_CONFIDENCE_MIDPOINT, "600"),
            (ENV_PARALLELISM, "0"),
        ]));
        assert_eq!(cfg.benchmarks_path, Some(PathBuf::from("tables/custom.json")));
        assert_eq!(cfg.scoring.elite_factor, 1.0);
        assert_eq!(cfg.scoring.consistency_penalty_factor, 0.35);
        assert_eq!(cfg.scoring.confidence_slope_minutes, 300.0);
        assert_eq!(cfg.scoring.confidence_midpoint_minutes, 600.0);
        assert_eq!(cfg.parallelism, 1);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(ENV_ELITE_FACTOR, "fast")]));
        assert_eq!(cfg.scoring.elite_factor, 1.30);
    }
}
