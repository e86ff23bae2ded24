//! Segment mean per avenue.

use crate::avenue::{ScoreMap, AVENUE_COUNT};
use crate::errors::DomainError;
use crate::segment::Segment;

/// Arithmetic mean of each avenue's score over the segment rows.
pub fn aggregate_scores(segment: &Segment<'_>) -> Result<ScoreMap, DomainError> {
    let mut sums = [0.0; AVENUE_COUNT];
    let mut count = 0usize;

    for record in segment.records() {
        for (avenue, score) in record.scores.iter() {
            sums[avenue.index()] += score;
        }
        count += 1;
    }

    if count == 0 {
        return Err(DomainError::EmptySegment);
    }

    let count = count as f64;
    Ok(ScoreMap::new(sums.map(|sum| sum / count)))
}
