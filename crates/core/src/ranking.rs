use serde::{Deserialize, Serialize};

use crate::avenue::{Avenue, ScoreMap};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedAvenue {
    pub avenue: Avenue,
    pub score: f64,
}

/// Sorts by score descending and keeps the first `top_n`.
///
/// Ties keep avenue declaration order (the sort is stable over
/// [`Avenue::ALL`]). `top_n <= 0` yields nothing; values above the avenue
/// count return every avenue.
pub fn rank(scores: &ScoreMap, top_n: i64) -> Vec<RankedAvenue> {
    if top_n <= 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedAvenue> =
        scores.iter().map(|(avenue, score)| RankedAvenue { avenue, score }).collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let keep = usize::try_from(top_n).unwrap_or(usize::MAX);
    ranked.truncate(keep);
    ranked
}
