use serde::{Deserialize, Serialize};

use crate::category::{DurationCategory, ReturnCategory};
use crate::dataset::{Dataset, InvestorRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Exact,
    Fallback,
}

/// Rows used to score a profile. Borrowed from the dataset, never copied out.
#[derive(Clone, Debug)]
pub enum Segment<'a> {
    /// Rows whose duration and expected-return categories both match.
    Exact(Vec<&'a InvestorRecord>),
    /// No row matched, so the whole dataset stands in.
    Fallback(&'a [InvestorRecord]),
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Exact(_) => SegmentKind::Exact,
            Segment::Fallback(_) => SegmentKind::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Segment::Fallback(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Segment::Exact(rows) => rows.len(),
            Segment::Fallback(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows in dataset order.
    pub fn records(&self) -> Box<dyn Iterator<Item = &'a InvestorRecord> + '_> {
        match self {
            Segment::Exact(rows) => Box::new(rows.iter().copied()),
            Segment::Fallback(rows) => {
                let rows: &'a [InvestorRecord] = *rows;
                Box::new(rows.iter())
            }
        }
    }
}

/// Selects similar investors, falling back to the full dataset when none
/// match. The fallback is only empty when the dataset itself is.
pub fn select_segment(
    dataset: &Dataset,
    duration: DurationCategory,
    expected_return: ReturnCategory,
) -> Segment<'_> {
    let rows: Vec<&InvestorRecord> = dataset
        .records()
        .iter()
        .filter(|record| record.duration == duration && record.expected_return == expected_return)
        .collect();

    if rows.is_empty() {
        Segment::Fallback(dataset.records())
    } else {
        Segment::Exact(rows)
    }
}
