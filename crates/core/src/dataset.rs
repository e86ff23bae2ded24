//! In-memory survey table consumed by the engine.
//!
//! A [`Dataset`] is built once by a loader and shared read-only afterwards;
//! nothing in this crate mutates it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::avenue::ScoreMap;
use crate::category::{DurationCategory, ReturnCategory};

/// Free-text reason columns recorded by the survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReasonColumn {
    #[serde(rename = "Reason_Mutual")]
    Mutual,
    #[serde(rename = "Reason_Equity")]
    Equity,
    #[serde(rename = "Reason_Bonds")]
    Bonds,
    #[serde(rename = "Reason_FD")]
    FixedDeposits,
}

impl ReasonColumn {
    pub const ALL: [ReasonColumn; 4] =
        [ReasonColumn::Mutual, ReasonColumn::Equity, ReasonColumn::Bonds, ReasonColumn::FixedDeposits];

    pub fn column_name(self) -> &'static str {
        match self {
            ReasonColumn::Mutual => "Reason_Mutual",
            ReasonColumn::Equity => "Reason_Equity",
            ReasonColumn::Bonds => "Reason_Bonds",
            ReasonColumn::FixedDeposits => "Reason_FD",
        }
    }
}

impl fmt::Display for ReasonColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Reason values for one respondent. `None` means missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReasonFields {
    pub mutual: Option<String>,
    pub equity: Option<String>,
    pub bonds: Option<String>,
    pub fixed_deposits: Option<String>,
}

impl ReasonFields {
    pub fn get(&self, column: ReasonColumn) -> Option<&str> {
        match column {
            ReasonColumn::Mutual => self.mutual.as_deref(),
            ReasonColumn::Equity => self.equity.as_deref(),
            ReasonColumn::Bonds => self.bonds.as_deref(),
            ReasonColumn::FixedDeposits => self.fixed_deposits.as_deref(),
        }
    }

    pub fn set(&mut self, column: ReasonColumn, value: Option<String>) {
        let slot = match column {
            ReasonColumn::Mutual => &mut self.mutual,
            ReasonColumn::Equity => &mut self.equity,
            ReasonColumn::Bonds => &mut self.bonds,
            ReasonColumn::FixedDeposits => &mut self.fixed_deposits,
        };
        *slot = value;
    }
}

/// One survey respondent.
#[derive(Clone, Debug, PartialEq)]
pub struct InvestorRecord {
    pub duration: DurationCategory,
    pub expected_return: ReturnCategory,
    /// Preference score per avenue.
    pub scores: ScoreMap,
    pub reasons: ReasonFields,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub source: Option<String>,
}

impl InvestorRecord {
    pub fn new(duration: DurationCategory, expected_return: ReturnCategory, scores: ScoreMap) -> Self {
        Self {
            duration,
            expected_return,
            scores,
            reasons: ReasonFields::default(),
            gender: None,
            age: None,
            source: None,
        }
    }

    pub fn with_reason(mut self, column: ReasonColumn, value: impl Into<String>) -> Self {
        self.reasons.set(column, Some(value.into()));
        self
    }
}

/// Which optional columns the loaded table carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSchema {
    reason_columns: Vec<ReasonColumn>,
}

impl DatasetSchema {
    pub fn new(mut reason_columns: Vec<ReasonColumn>) -> Self {
        reason_columns.sort_unstable();
        reason_columns.dedup();
        Self { reason_columns }
    }

    pub fn has_reason_column(&self, column: ReasonColumn) -> bool {
        self.reason_columns.contains(&column)
    }

    pub fn reason_columns(&self) -> &[ReasonColumn] {
        &self.reason_columns
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::new(ReasonColumn::ALL.to_vec())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<InvestorRecord>,
    schema: DatasetSchema,
}

impl Dataset {
    pub fn new(records: Vec<InvestorRecord>, schema: DatasetSchema) -> Self {
        Self { records, schema }
    }

    /// Dataset whose schema carries every reason column.
    pub fn from_records(records: Vec<InvestorRecord>) -> Self {
        Self::new(records, DatasetSchema::default())
    }

    pub fn records(&self) -> &[InvestorRecord] {
        &self.records
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
