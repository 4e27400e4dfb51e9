//! Category-diversity selection rule.
//!
//! A greedy near-tie heuristic: once at least one category has been
//! scheduled on a day, the selector prefers a task from an unrepresented
//! category, but only if its score is within a relative threshold of the
//! best candidate, and only looking at a bounded prefix of the ranked
//! list. It never sacrifices more than the threshold fraction of urgency
//! for variety.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the diversity rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Maximum relative score gap to the best candidate (0.1 = 10%).
    pub threshold: f64,
    /// How many top-ranked candidates to inspect before falling back.
    pub look_ahead: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            look_ahead: 5,
        }
    }
}

/// A ranked allocation candidate for one day.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub task_id: String,
    /// Category of the owning project; `None` when the project reference
    /// does not resolve (the allocator discards such picks).
    pub category: Option<String>,
    pub score: f64,
}

/// Pick the next candidate index from a score-descending list.
///
/// Returns `None` only for an empty list. With no categories scheduled
/// yet the top candidate wins unconditionally; otherwise the first
/// near-tie candidate from a new category within the look-ahead window
/// wins, falling back to the top candidate.
pub(crate) fn select(
    candidates: &[Candidate],
    categories_scheduled_today: &HashSet<String>,
    config: &DiversityConfig,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    if categories_scheduled_today.is_empty() {
        return Some(0);
    }

    let best_score = candidates[0].score;
    if best_score > 0.0 {
        for (index, candidate) in candidates.iter().take(config.look_ahead).enumerate() {
            let Some(category) = &candidate.category else {
                continue;
            };
            if categories_scheduled_today.contains(category) {
                continue;
            }
            if (best_score - candidate.score) / best_score <= config.threshold {
                return Some(index);
            }
        }
    }

    Some(0)
}
