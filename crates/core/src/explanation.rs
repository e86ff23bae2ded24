//! Human-readable "why" for a recommended avenue, drawn from the free-text
//! reasons similar investors gave.

use std::fmt;

use serde::Serialize;

use crate::avenue::{Avenue, AVENUE_COUNT};
use crate::dataset::{DatasetSchema, ReasonColumn};
use crate::segment::Segment;

/// Avenue to reason-column mapping. Avenues mapped to `None` have no
/// recorded reasons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReasonColumnMap {
    columns: [Option<ReasonColumn>; AVENUE_COUNT],
}

impl ReasonColumnMap {
    pub fn standard() -> Self {
        Self::empty()
            .with(Avenue::MutualFunds, Some(ReasonColumn::Mutual))
            .with(Avenue::EquityMarket, Some(ReasonColumn::Equity))
            .with(Avenue::Debentures, Some(ReasonColumn::Bonds))
            .with(Avenue::FixedDeposits, Some(ReasonColumn::FixedDeposits))
    }

    pub fn empty() -> Self {
        Self { columns: [None; AVENUE_COUNT] }
    }

    pub fn with(mut self, avenue: Avenue, column: Option<ReasonColumn>) -> Self {
        self.columns[avenue.index()] = column;
        self
    }

    pub fn column_for(&self, avenue: Avenue) -> Option<ReasonColumn> {
        self.columns[avenue.index()]
    }
}

impl Default for ReasonColumnMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    /// The avenue has no reason column, or the dataset lacks it.
    NoReasonField { avenue: Avenue },
    /// The reason column exists but every value in the segment is missing.
    NoReasonsRecorded { avenue: Avenue },
    /// Most frequent reason; `count` of `total` recorded answers cite it.
    MostCommon { avenue: Avenue, reason: String, count: usize, total: usize },
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoReasonField { avenue } => {
                write!(f, "{avenue} scored highly among investors with a similar profile.")
            }
            Self::NoReasonsRecorded { avenue } => {
                write!(f, "No specific reasons were recorded for {avenue} among similar investors.")
            }
            Self::MostCommon { avenue, reason, count, total } => write!(
                f,
                "Similar investors most often chose {avenue} for \"{reason}\" ({count} of {total} responses)."
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvenueExplanation {
    pub avenue: Avenue,
    pub summary: String,
    pub detail: Explanation,
}

impl From<Explanation> for AvenueExplanation {
    fn from(detail: Explanation) -> Self {
        let avenue = match &detail {
            Explanation::NoReasonField { avenue }
            | Explanation::NoReasonsRecorded { avenue }
            | Explanation::MostCommon { avenue, .. } => *avenue,
        };
        Self { avenue, summary: detail.to_string(), detail }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExplanationGenerator {
    reason_columns: ReasonColumnMap,
}

impl ExplanationGenerator {
    pub fn new(reason_columns: ReasonColumnMap) -> Self {
        Self { reason_columns }
    }

    pub fn reason_columns(&self) -> &ReasonColumnMap {
        &self.reason_columns
    }

    pub fn explain(
        &self,
        avenue: Avenue,
        segment: &Segment<'_>,
        schema: &DatasetSchema,
    ) -> Explanation {
        let Some(column) = self
            .reason_columns
            .column_for(avenue)
            .filter(|column| schema.has_reason_column(*column))
        else {
            return Explanation::NoReasonField { avenue };
        };

        // (value, count) in first-seen order
        let mut tallies: Vec<(&str, usize)> = Vec::new();
        let mut total = 0usize;
        for value in segment.records().filter_map(|record| record.reasons.get(column)) {
            let value = value.trim();
            if is_missing(value) {
                continue;
            }
            total += 1;
            match tallies.iter_mut().find(|(seen, _)| *seen == value) {
                Some((_, count)) => *count += 1,
                None => tallies.push((value, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in tallies {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }

        match best {
            Some((reason, count)) => {
                Explanation::MostCommon { avenue, reason: reason.to_string(), count, total }
            }
            None => Explanation::NoReasonsRecorded { avenue },
        }
    }
}

/// Loaders that stringify missing cells leave `nan` behind.
fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}
