//! Evaluation weight normalization.
//!
//! Weights are rescaled so they sum to exactly 100 at a fixed decimal
//! precision. Rounding residue is folded into the largest item (first one
//! wins on ties) so the total is exact rather than approximately 100.

use crate::EvaluationItem;

/// Target sum for a complete evaluation set
pub const TARGET_TOTAL: f64 = 100.0;

/// Default number of decimal places kept after normalization
pub const DEFAULT_DECIMALS: u32 = 2;

/// Largest supported precision; keeps fixed-point units well inside i64
pub const MAX_DECIMALS: u32 = 6;

/// Default allowed distance from 100 before a total is flagged
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Rescales weights to sum to [`TARGET_TOTAL`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalizer {
    decimals: u32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

impl Normalizer {
    /// Create a normalizer rounding to `decimals` places (capped at [`MAX_DECIMALS`])
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Normalize a sequence of non-negative weights.
    ///
    /// Output has the same length and order as the input. Empty input, or
    /// input containing a non-finite weight or summing to zero, is returned
    /// unchanged.
    pub fn normalize(&self, weights: &[f64]) -> Vec<f64> {
        let largest = largest_index(weights);
        let max = largest.map_or(0.0, |idx| weights[idx]);
        if weights.iter().any(|w| !w.is_finite()) || max <= 0.0 {
            tracing::debug!("Skipping normalization of {} weights", weights.len());
            return weights.to_vec();
        }

        // Relative to the largest weight every value is in [0, 1], so the
        // sum and the scale factor stay finite for tiny or huge inputs.
        let relative: Vec<f64> = weights.iter().map(|w| w / max).collect();
        let sum: f64 = relative.iter().sum();
        if sum <= 0.0 {
            tracing::debug!("Skipping normalization of {} weights", weights.len());
            return weights.to_vec();
        }

        // Work in integer units of 10^-decimals so the final sum is exact.
        let unit = 10f64.powi(self.decimals as i32);
        let target = (TARGET_TOTAL * unit).round() as i64;
        let factor = TARGET_TOTAL / sum;

        let mut units: Vec<i64> = relative
            .iter()
            .map(|r| (r * factor * unit).round() as i64)
            .collect();

        let total: i128 = units.iter().map(|&u| i128::from(u)).sum();
        let residual = (i128::from(target) - total) as i64;
        if residual != 0 {
            if let Some(idx) = largest {
                units[idx] += residual;
                tracing::debug!(
                    "Applied residual of {} units to weight #{}",
                    residual,
                    idx
                );
            }
        }

        units.into_iter().map(|u| u as f64 / unit).collect()
    }

    /// Normalize evaluation weights, keeping names and order
    pub fn normalize_evaluations(&self, items: &[EvaluationItem]) -> Vec<EvaluationItem> {
        let weights: Vec<f64> = items.iter().map(|i| i.weight).collect();
        items
            .iter()
            .zip(self.normalize(&weights))
            .map(|(item, weight)| EvaluationItem {
                name: item.name.clone(),
                weight,
            })
            .collect()
    }
}

/// Index of the largest weight; the earliest one wins ties
fn largest_index(weights: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &w) in weights.iter().enumerate() {
        match best {
            Some((_, max)) if w <= max => {}
            _ => best = Some((idx, w)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Normalize weights with the default two-decimal precision
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    Normalizer::default().normalize(weights)
}

/// Normalize evaluations with the default two-decimal precision
pub fn normalize_evaluations(items: &[EvaluationItem]) -> Vec<EvaluationItem> {
    Normalizer::default().normalize_evaluations(items)
}

/// Sum of weights across an evaluation set
pub fn evaluation_total(items: &[EvaluationItem]) -> f64 {
    items.iter().map(|i| i.weight).sum()
}

/// Evaluation set prepared for display, with its total checked against 100
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationReport {
    pub items: Vec<EvaluationItem>,
    pub total: f64,
    pub within_tolerance: bool,
}

impl EvaluationReport {
    /// Build a report; the total is flagged when `|total - 100| > tolerance`.
    ///
    /// An empty set is never flagged since there is nothing to sum.
    pub fn from_items(items: Vec<EvaluationItem>, tolerance: f64) -> Self {
        let total = evaluation_total(&items);
        let within_tolerance = items.is_empty() || (total - TARGET_TOTAL).abs() <= tolerance;
        Self {
            items,
            total,
            within_tolerance,
        }
    }
}
