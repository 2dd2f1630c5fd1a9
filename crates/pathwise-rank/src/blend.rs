//! Score blending and top-k selection.
//!
//! `final = alpha * ml + (1 - alpha) * semantic` when a learned ranker is
//! present, and `final = semantic` otherwise. Candidates are ordered by
//! final score, highest first; ties keep catalog order.

use pathwise_core::error::{PathwiseError, Result};
use pathwise_core::types::Resource;
use serde::Serialize;
use std::cmp::Ordering;

/// Blend parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendConfig {
    alpha: f64,
    top_k: usize,
}

impl BlendConfig {
    pub fn new(alpha: f64, top_k: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PathwiseError::out_of_range("alpha", 0.0, 1.0, alpha));
        }
        if top_k == 0 {
            return Err(PathwiseError::invalid_config(
                "top_k",
                "0",
                "must be at least 1",
            ));
        }
        Ok(Self { alpha, top_k })
    }

    /// Weight of the learned score.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn combine(&self, semantic: f64, ml: Option<f64>) -> f64 {
        match ml {
            Some(ml) => self.alpha * ml + (1.0 - self.alpha) * semantic,
            None => semantic,
        }
    }
}

/// A candidate with its component and final scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResource<'a> {
    pub resource: &'a Resource,
    pub semantic_score: f64,
    pub ml_score: Option<f64>,
    pub final_score: f64,
}

/// NaN sinks to the bottom instead of poisoning the sort.
fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Order by final score descending, stably, and keep the first `top_k`.
pub fn rank(mut scored: Vec<ScoredResource<'_>>, top_k: usize) -> Vec<ScoredResource<'_>> {
    scored.sort_by(|a, b| {
        sort_key(b.final_score)
            .partial_cmp(&sort_key(a.final_score))
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(top_k);
    scored
}

/// Combine component scores for each candidate and select the best `top_k`.
///
/// `semantic` and `ml` (when present) are aligned with `candidates`.
pub fn blend_and_select<'a>(
    candidates: &[&'a Resource],
    semantic: &[f64],
    ml: Option<&[f64]>,
    config: &BlendConfig,
) -> Vec<ScoredResource<'a>> {
    let scored = candidates
        .iter()
        .zip(semantic.iter())
        .enumerate()
        .map(|(i, (&resource, &semantic_score))| {
            let ml_score = ml.and_then(|scores| scores.get(i).copied());
            ScoredResource {
                resource,
                semantic_score,
                ml_score,
                final_score: config.combine(semantic_score, ml_score),
            }
        })
        .collect();

    rank(scored, config.top_k)
}
