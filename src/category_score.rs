use serde::{Deserialize, Serialize};

use crate::normalize::{ScoringConfig, clamp_score};

/// A raw statistic together with its benchmark and in-category weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatInput {
    pub raw: f64,
    pub benchmark: f64,
    pub weight: f64,
}

impl StatInput {
    pub fn new(raw: f64, benchmark: f64, weight: f64) -> Self {
        Self {
            raw,
            benchmark,
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub weighted_average: f64,
    pub std_dev: f64,
    /// Fraction removed from the weighted average (0.0..=factor).
    pub penalty: f64,
    pub score: f64,
}

impl ScoringConfig {
    pub fn score_category(&self, inputs: &[StatInput]) -> f64 {
        self.category_breakdown(inputs).score
    }

    /// Weighted mean of normalized scores, discounted by their spread.
    ///
    /// The discount is `factor * std_dev / 100` (population std-dev of the
    /// unweighted normalized values), so a maximally lopsided category loses
    /// at most `factor` of its average. With no usable weight the plain mean
    /// is returned without a discount.
    pub fn category_breakdown(&self, inputs: &[StatInput]) -> CategoryBreakdown {
        if inputs.is_empty() {
            return CategoryBreakdown::default();
        }

        let normalized: Vec<f64> = inputs
            .iter()
            .map(|i| self.normalize(i.raw, i.benchmark))
            .collect();
        let weights: Vec<f64> = inputs.iter().map(|i| usable_weight(i.weight)).collect();
        let total_weight: f64 = weights.iter().sum();

        let mean = normalized.iter().sum::<f64>() / normalized.len() as f64;
        if total_weight <= 0.0 {
            let score = clamp_score(mean);
            return CategoryBreakdown {
                weighted_average: score,
                std_dev: 0.0,
                penalty: 0.0,
                score,
            };
        }

        let weighted_average = normalized
            .iter()
            .zip(&weights)
            .map(|(n, w)| n * w)
            .sum::<f64>()
            / total_weight;

        let std_dev = population_std_dev(&normalized, mean);
        let penalty = self.consistency_penalty_factor * (std_dev / 100.0);

        CategoryBreakdown {
            weighted_average,
            std_dev,
            penalty,
            score: clamp_score(weighted_average * (1.0 - penalty)),
        }
    }
}

/// [`ScoringConfig::score_category`] with the default constants.
pub fn score_category(inputs: &[StatInput]) -> f64 {
    ScoringConfig::default().score_category(inputs)
}

fn usable_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}
