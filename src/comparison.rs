use serde::{Deserialize, Serialize};

use crate::category::{ALL_CATEGORIES, Category};
use crate::normalize::ScoringConfig;
use crate::profile::PlayerProfile;

const MARKER_MIN_SIZE: f64 = 100.0;
const MARKER_CONFIDENCE_SIZE: f64 = 400.0;
const DEFAULT_KEY_STATS: usize = 6;

const HIGH_CONFIDENCE_MINUTES: f64 = 900.0;
const MEDIUM_CONFIDENCE_MINUTES: f64 = 450.0;
const LOW_CONFIDENCE_MINUTES: f64 = 180.0;

// Keep confidence inside the open interval (0, 1).
const CONFIDENCE_FLOOR: f64 = f64::MIN_POSITIVE;
const CONFIDENCE_CEILING: f64 = 1.0 - f64::EPSILON;

/// Card rows shown when the preferred list runs dry.
pub const BACKUP_STATS: &[&str] = &[
    "Touches",
    "Carries",
    "Ball Recoveries",
    "Passes into Final Third",
    "Successful Take-Ons",
    "Passes into Penalty Area",
];

pub const PREFERRED_KEY_STATS: &[&str] = &[
    "Goals",
    "Assists",
    "xG: Expected Goals",
    "Progressive Passes",
    "Successful Take-Ons",
    "Tackles Won",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceTier {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::VeryLow => "very low",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

impl ScoringConfig {
    /// Logistic trust in a sample of `minutes`: 0.5 at the midpoint, never
    /// exactly 0 or 1. Missing or invalid minutes count as zero.
    pub fn confidence(&self, minutes: f64) -> f64 {
        let m = if minutes.is_finite() && minutes > 0.0 {
            minutes
        } else {
            0.0
        };
        let c = 1.0 / (1.0 + (-(m - self.confidence_midpoint_minutes) / self.confidence_slope_minutes).exp());
        // The logistic rounds to exactly 1.0 past ~12k minutes at default slope.
        c.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
    }
}

/// [`ScoringConfig::confidence`] with the default midpoint (900) and slope (300).
pub fn confidence(minutes: f64) -> f64 {
    ScoringConfig::default().confidence(minutes)
}

pub fn confidence_tier(minutes: f64) -> ConfidenceTier {
    if minutes >= HIGH_CONFIDENCE_MINUTES {
        ConfidenceTier::High
    } else if minutes >= MEDIUM_CONFIDENCE_MINUTES {
        ConfidenceTier::Medium
    } else if minutes >= LOW_CONFIDENCE_MINUTES {
        ConfidenceTier::Low
    } else {
        ConfidenceTier::VeryLow
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: Category,
    pub first: f64,
    pub second: f64,
    /// `first - second`.
    pub difference: f64,
    pub leader: Option<PlayerSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStatRow {
    pub stat: String,
    pub first: f64,
    pub second: f64,
    pub leader: Option<PlayerSlot>,
}

/// Two profiles side by side plus a sample-size confidence per slot. The
/// confidence is for presentation only and never feeds back into scores.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    first: PlayerProfile,
    second: PlayerProfile,
    minutes: [f64; 2],
    confidence: [f64; 2],
    cfg: ScoringConfig,
}

impl ComparisonSession {
    pub fn new(first: PlayerProfile, second: PlayerProfile, cfg: ScoringConfig) -> Self {
        let minutes = [
            first.minutes_played().unwrap_or(0.0),
            second.minutes_played().unwrap_or(0.0),
        ];
        let confidence = [cfg.confidence(minutes[0]), cfg.confidence(minutes[1])];
        Self {
            first,
            second,
            minutes,
            confidence,
            cfg,
        }
    }

    pub fn profile(&self, slot: PlayerSlot) -> &PlayerProfile {
        match slot {
            PlayerSlot::First => &self.first,
            PlayerSlot::Second => &self.second,
        }
    }

    pub fn minutes(&self, slot: PlayerSlot) -> f64 {
        self.minutes[slot_index(slot)]
    }

    pub fn set_minutes(&mut self, slot: PlayerSlot, minutes: f64) {
        let idx = slot_index(slot);
        self.minutes[idx] = minutes;
        self.confidence[idx] = self.cfg.confidence(minutes);
    }

    pub fn confidence(&self, slot: PlayerSlot) -> f64 {
        self.confidence[slot_index(slot)]
    }

    pub fn confidence_tier(&self, slot: PlayerSlot) -> ConfidenceTier {
        confidence_tier(self.minutes(slot))
    }

    pub fn marker_size(&self, slot: PlayerSlot) -> f64 {
        MARKER_MIN_SIZE + MARKER_CONFIDENCE_SIZE * self.confidence(slot)
    }

    pub fn bar_alpha(&self, slot: PlayerSlot) -> f64 {
        0.5 + 0.5 * self.confidence(slot)
    }

    pub fn category_rows(&self) -> Vec<CategoryComparison> {
        ALL_CATEGORIES
            .into_iter()
            .map(|category| {
                let first = self.first.category_score(category);
                let second = self.second.category_score(category);
                CategoryComparison {
                    category,
                    first,
                    second,
                    difference: first - second,
                    leader: leader(first, second),
                }
            })
            .collect()
    }

    pub fn default_key_stats(&self) -> Vec<KeyStatRow> {
        self.key_stats(PREFERRED_KEY_STATS, BACKUP_STATS, DEFAULT_KEY_STATS)
    }

    /// Pick up to `limit` raw statistics worth showing head to head: preferred
    /// ones first, skipping any where neither player registers a value, then
    /// backups to fill the gap.
    pub fn key_stats(&self, preferred: &[&str], backup: &[&str], limit: usize) -> Vec<KeyStatRow> {
        let mut rows: Vec<KeyStatRow> = Vec::with_capacity(limit);
        for stat in preferred.iter().chain(backup.iter()) {
            if rows.len() >= limit {
                break;
            }
            if rows.iter().any(|r| r.stat.eq_ignore_ascii_case(stat)) {
                continue;
            }
            let first = self.first.raw_value(stat);
            let second = self.second.raw_value(stat);
            if first > 0.0 || second > 0.0 {
                rows.push(KeyStatRow {
                    stat: stat.to_string(),
                    first,
                    second,
                    leader: leader(first, second),
                });
            }
        }
        rows
    }
}

fn slot_index(slot: PlayerSlot) -> usize {
    match slot {
        PlayerSlot::First => 0,
        PlayerSlot::Second => 1,
    }
}

fn leader(first: f64, second: f64) -> Option<PlayerSlot> {
    if first > second {
        Some(PlayerSlot::First)
    } else if second > first {
        Some(PlayerSlot::Second)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_midpoint_and_tails() {
        assert_eq!(confidence(900.0), 0.5);
        assert!((confidence(0.0) - 0.0474).abs() < 1e-3);
        assert!((confidence(1800.0) - 0.9526).abs() < 1e-3);
    }

    #[test]
    fn confidence_is_strictly_increasing_and_open_bounded() {
        let mut prev = 0.0;
        for m in (0..=3000).step_by(30) {
            let c = confidence(m as f64);
            assert!(c > 0.0 && c < 1.0);
            assert!(c > prev);
            prev = c;
        }
    }

    #[test]
    fn confidence_stays_below_one_for_huge_samples() {
        for m in [11_900.0, 12_000.0, 20_000.0, 1e6, f64::MAX] {
            let c = confidence(m);
            assert!(c > 0.0 && c < 1.0, "confidence({m}) = {c}");
        }
        let steep = ScoringConfig {
            confidence_slope_minutes: 1.0,
            ..ScoringConfig::default()
        };
        assert!(steep.confidence(0.0) > 0.0);
        assert!(steep.confidence(5_000.0) < 1.0);
    }

    #[test]
    fn invalid_minutes_count_as_zero() {
        assert_eq!(confidence(f64::NAN), confidence(0.0));
        assert_eq!(confidence(-50.0), confidence(0.0));
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(confidence_tier(1200.0), ConfidenceTier::High);
        assert_eq!(confidence_tier(900.0), ConfidenceTier::High);
        assert_eq!(confidence_tier(600.0), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(200.0), ConfidenceTier::Low);
        assert_eq!(confidence_tier(90.0), ConfidenceTier::VeryLow);
    }
}
