//! Rule-based nudges toward avenues matching the stated risk appetite.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::avenue::{Avenue, ScoreMap};
use crate::errors::DomainError;
use crate::profile::normalize_risk_level;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Case-insensitive match after trimming; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_risk_level(raw).as_str() {
            "low" => Some(RiskTier::Low),
            "medium" => Some(RiskTier::Medium),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RiskTier::parse(value).ok_or_else(|| {
            DomainError::InvalidProfile(format!(
                "unsupported risk level `{}` (expected low|medium|high)",
                value.trim()
            ))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskBonus {
    pub avenue: Avenue,
    pub bonus: f64,
}

const fn bonus(avenue: Avenue, bonus: f64) -> RiskBonus {
    RiskBonus { avenue, bonus }
}

const LOW_BONUSES: &[RiskBonus] = &[
    bonus(Avenue::FixedDeposits, 1.0),
    bonus(Avenue::Ppf, 1.0),
    bonus(Avenue::GovernmentBonds, 0.7),
];

const MEDIUM_BONUSES: &[RiskBonus] = &[
    bonus(Avenue::MutualFunds, 0.5),
    bonus(Avenue::GovernmentBonds, 0.5),
    bonus(Avenue::Ppf, 0.5),
];

const HIGH_BONUSES: &[RiskBonus] = &[
    bonus(Avenue::EquityMarket, 1.0),
    bonus(Avenue::MutualFunds, 0.7),
    bonus(Avenue::Gold, 0.5),
];

/// Per-tier bonuses. Built once and passed by reference; never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskBonusTable {
    low: Vec<RiskBonus>,
    medium: Vec<RiskBonus>,
    high: Vec<RiskBonus>,
}

impl RiskBonusTable {
    pub fn new(
        low: Vec<RiskBonus>,
        medium: Vec<RiskBonus>,
        high: Vec<RiskBonus>,
    ) -> Result<Self, DomainError> {
        for entry in low.iter().chain(&medium).chain(&high) {
            if !entry.bonus.is_finite() || entry.bonus < 0.0 {
                return Err(DomainError::InvalidRiskBonus {
                    avenue: entry.avenue,
                    bonus: entry.bonus,
                });
            }
        }
        Ok(Self { low, medium, high })
    }

    /// Fixed table shipped with the engine.
    pub fn standard() -> Self {
        Self {
            low: LOW_BONUSES.to_vec(),
            medium: MEDIUM_BONUSES.to_vec(),
            high: HIGH_BONUSES.to_vec(),
        }
    }

    pub fn bonuses(&self, tier: RiskTier) -> &[RiskBonus] {
        match tier {
            RiskTier::Low => &self.low,
            RiskTier::Medium => &self.medium,
            RiskTier::High => &self.high,
        }
    }

    pub fn bonus_for(&self, tier: RiskTier, avenue: Avenue) -> f64 {
        self.bonuses(tier)
            .iter()
            .filter(|entry| entry.avenue == avenue)
            .map(|entry| entry.bonus)
            .sum()
    }

    /// Adds the tier's bonuses to `base`. An unrecognized level returns
    /// `base` unchanged and no tier.
    pub fn adjust(&self, base: &ScoreMap, risk_level: &str) -> RiskAdjustment {
        let mut scores = *base;
        let tier = RiskTier::parse(risk_level);
        if let Some(tier) = tier {
            for entry in self.bonuses(tier) {
                scores.add(entry.avenue, entry.bonus);
            }
        }
        RiskAdjustment { tier, scores }
    }
}

impl Default for RiskBonusTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskAdjustment {
    pub tier: Option<RiskTier>,
    pub scores: ScoreMap,
}
