use serde::{Deserialize, Serialize};

/// Multiple of the benchmark that earns a full 100.
pub const ELITE_FACTOR: f64 = 1.30;
/// Score awarded at exactly the benchmark.
pub const TARGET_SCORE: f64 = 85.0;
/// Exponent of the curve below the benchmark.
pub const POWER: f64 = 2.0;
pub const CONSISTENCY_PENALTY_FACTOR: f64 = 0.20;
pub const CONFIDENCE_MIDPOINT_MINUTES: f64 = 900.0;
pub const CONFIDENCE_SLOPE_MINUTES: f64 = 300.0;

const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub elite_factor: f64,
    pub target_score: f64,
    pub power: f64,
    pub consistency_penalty_factor: f64,
    pub confidence_midpoint_minutes: f64,
    pub confidence_slope_minutes: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            elite_factor: ELITE_FACTOR,
            target_score: TARGET_SCORE,
            power: POWER,
            consistency_penalty_factor: CONSISTENCY_PENALTY_FACTOR,
            confidence_midpoint_minutes: CONFIDENCE_MIDPOINT_MINUTES,
            confidence_slope_minutes: CONFIDENCE_SLOPE_MINUTES,
        }
    }
}

impl ScoringConfig {
    /// Hybrid benchmark normalization onto [0, 100].
    ///
    /// Below the benchmark the score follows `(value / benchmark)^power * target`,
    /// so marginal output is punished harder than a straight ratio would. From
    /// the benchmark up to `benchmark * elite_factor` the score rises linearly
    /// from `target` to 100 and is capped there.
    pub fn normalize(&self, value: f64, benchmark: f64) -> f64 {
        if !value.is_finite() || !benchmark.is_finite() || benchmark <= 0.0 || value <= 0.0 {
            return 0.0;
        }

        let score = if value <= benchmark {
            (value / benchmark).powf(self.power) * self.target_score
        } else {
            let elite = benchmark * self.elite_factor;
            let span = elite - benchmark;
            if span <= 0.0 {
                self.target_score
            } else {
                let proportion = ((value - benchmark) / span).min(1.0);
                self.target_score + (MAX_SCORE - self.target_score) * proportion
            }
        };

        clamp_score(score)
    }
}

/// [`ScoringConfig::normalize`] with the default constants.
pub fn normalize(value: f64, benchmark: f64) -> f64 {
    ScoringConfig::default().normalize(value, benchmark)
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_reads_as_target() {
        for b in [0.05, 1.0, 7.28, 62.0, 1234.5] {
            assert_eq!(normalize(b, b), 85.0);
        }
    }

    #[test]
    fn elite_value_reaches_ceiling() {
        for b in [0.3, 2.1, 7.28, 80.0] {
            assert_eq!(normalize(b * 1.30, b), 100.0);
            assert_eq!(normalize(b * 10.0, b), 100.0);
        }
    }

    #[test]
    fn zero_inputs_score_zero() {
        assert_eq!(normalize(0.0, 5.0), 0.0);
        assert_eq!(normalize(3.0, 0.0), 0.0);
        assert_eq!(normalize(3.0, -1.0), 0.0);
        assert_eq!(normalize(-2.0, 5.0), 0.0);
        assert_eq!(normalize(f64::NAN, 5.0), 0.0);
        assert_eq!(normalize(f64::INFINITY, 5.0), 0.0);
    }

    #[test]
    fn below_benchmark_is_quadratic() {
        let half = normalize(5.0, 10.0);
        assert!((half - 21.25).abs() < 1e-9);
    }

    #[test]
    fn above_benchmark_is_linear_to_elite() {
        // Halfway between benchmark (10) and elite (13).
        let mid = normalize(11.5, 10.0);
        assert!((mid - 92.5).abs() < 1e-9);
    }

    #[test]
    fn monotonic_and_bounded_over_a_sweep() {
        for b in [0.1, 1.0, 7.28, 50.0] {
            let mut prev = 0.0;
            for step in 0..=400 {
                let v = b * (step as f64) / 100.0;
                let s = normalize(v, b);
                assert!((0.0..=100.0).contains(&s));
                assert!(s >= prev, "score dropped at value {v} for benchmark {b}");
                prev = s;
            }
        }
    }

    #[test]
    fn degenerate_elite_factor_caps_at_target() {
        let cfg = ScoringConfig {
            elite_factor: 1.0,
            ..ScoringConfig::default()
        };
        assert_eq!(cfg.normalize(20.0, 10.0), 85.0);
    }
}
