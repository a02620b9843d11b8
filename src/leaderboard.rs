use std::cmp::Ordering;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::benchmarks::BenchmarkTable;
use crate::category::Category;
use crate::normalize::ScoringConfig;
use crate::position::Position;
use crate::profile::PlayerProfile;
use crate::stat_record::StatRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_name: String,
    pub position: Position,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub minutes_played: Option<f64>,
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardFilter {
    pub position: Option<Position>,
    pub min_minutes: Option<f64>,
}

/// Score every record. Each player is independent, so the work fans out over
/// a dedicated rayon pool; results keep the input order.
pub fn score_all(
    records: &[StatRecord],
    table: &BenchmarkTable,
    cfg: &ScoringConfig,
    parallelism: usize,
) -> Vec<PlayerProfile> {
    let profiles = with_scoring_pool(parallelism, || {
        records
            .par_iter()
            .map(|r| PlayerProfile::build(r.clone(), table, cfg))
            .collect::<Vec<_>>()
    });
    debug!(count = profiles.len(), "scored records");
    profiles
}

/// Rank profiles on one category: best score first, ties broken by name.
pub fn rank_by_category(
    profiles: &[PlayerProfile],
    category: Category,
    filter: LeaderboardFilter,
    cfg: &ScoringConfig,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<&PlayerProfile> = profiles
        .iter()
        .filter(|p| filter.position.is_none_or(|pos| p.position() == pos))
        .filter(|p| {
            filter
                .min_minutes
                .is_none_or(|min| p.minutes_played().unwrap_or(0.0) >= min)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.category_score(category)
            .partial_cmp(&a.category_score(category))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player_name().cmp(b.player_name()))
    });

    rows.into_iter()
        .enumerate()
        .map(|(idx, p)| {
            let record = p.record();
            LeaderboardEntry {
                rank: idx + 1,
                player_name: record.player_name.clone(),
                position: record.position,
                season: record.season.clone(),
                competition: record.competition.clone(),
                minutes_played: record.minutes_played,
                score: p.category_score(category),
                confidence: cfg.confidence(record.minutes_or_zero()),
            }
        })
        .collect()
}

fn with_scoring_pool<T, F>(threads: usize, action: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
    {
        Ok(pool) => pool.install(action),
        Err(err) => {
            warn!(%err, "scoring pool unavailable, using global pool");
            action()
        }
    }
}
