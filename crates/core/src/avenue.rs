use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::DomainError;

pub const AVENUE_COUNT: usize = 7;

/// Investment avenue scored by the engine. Declaration order doubles as the
/// ranking tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Avenue {
    #[serde(rename = "Mutual_Funds")]
    MutualFunds,
    #[serde(rename = "Equity_Market")]
    EquityMarket,
    #[serde(rename = "Debentures")]
    Debentures,
    #[serde(rename = "Government_Bonds")]
    GovernmentBonds,
    #[serde(rename = "Fixed_Deposits")]
    FixedDeposits,
    #[serde(rename = "PPF")]
    Ppf,
    #[serde(rename = "Gold")]
    Gold,
}

impl Avenue {
    pub const ALL: [Avenue; AVENUE_COUNT] = [
        Avenue::MutualFunds,
        Avenue::EquityMarket,
        Avenue::Debentures,
        Avenue::GovernmentBonds,
        Avenue::FixedDeposits,
        Avenue::Ppf,
        Avenue::Gold,
    ];

    /// Column name used by the survey dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            Avenue::MutualFunds => "Mutual_Funds",
            Avenue::EquityMarket => "Equity_Market",
            Avenue::Debentures => "Debentures",
            Avenue::GovernmentBonds => "Government_Bonds",
            Avenue::FixedDeposits => "Fixed_Deposits",
            Avenue::Ppf => "PPF",
            Avenue::Gold => "Gold",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Avenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Avenue {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Avenue::ALL
            .into_iter()
            .find(|avenue| avenue.column_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::UnknownAvenue(needle.to_string()))
    }
}

/// One real-valued score per avenue.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreMap {
    values: [f64; AVENUE_COUNT],
}

impl ScoreMap {
    pub fn new(values: [f64; AVENUE_COUNT]) -> Self {
        Self { values }
    }

    pub fn from_fn(mut score: impl FnMut(Avenue) -> f64) -> Self {
        let mut values = [0.0; AVENUE_COUNT];
        for avenue in Avenue::ALL {
            values[avenue.index()] = score(avenue);
        }
        Self { values }
    }

    pub fn get(&self, avenue: Avenue) -> f64 {
        self.values[avenue.index()]
    }

    pub fn set(&mut self, avenue: Avenue, value: f64) {
        self.values[avenue.index()] = value;
    }

    pub fn add(&mut self, avenue: Avenue, delta: f64) {
        self.values[avenue.index()] += delta;
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Avenue, f64)> + '_ {
        Avenue::ALL.into_iter().map(|avenue| (avenue, self.get(avenue)))
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AVENUE_COUNT))?;
        for (avenue, score) in self.iter() {
            map.serialize_entry(avenue.column_name(), &score)?;
        }
        map.end()
    }
}
