use serde::Serialize;

use crate::errors::DomainError;

pub const DEFAULT_RISK_LEVEL: &str = "medium";
pub const DEFAULT_TOP_N: i64 = 3;

/// Self-reported investor profile for a single request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvestorProfile {
    /// Informational only.
    pub age: u32,
    /// Normalized to title case; never filtered on.
    pub gender: String,
    pub duration_years: f64,
    pub expected_return_pct: f64,
    /// Raw risk appetite. Unrecognized values mean "no adjustment".
    pub risk_level: String,
    /// Requested result count. Values <= 0 yield no results.
    pub top_n: i64,
}

impl InvestorProfile {
    pub fn new(duration_years: f64, expected_return_pct: f64) -> Self {
        Self {
            age: 0,
            gender: String::new(),
            duration_years,
            expected_return_pct,
            risk_level: DEFAULT_RISK_LEVEL.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = normalize_gender(gender);
        self
    }

    pub fn with_risk_level(mut self, risk_level: impl Into<String>) -> Self {
        self.risk_level = risk_level.into();
        self
    }

    pub fn with_top_n(mut self, top_n: i64) -> Self {
        self.top_n = top_n;
        self
    }

    /// Stricter input checks, off by default: the mapper buckets any value.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_non_negative("duration_years", self.duration_years)?;
        check_non_negative("expected_return_pct", self.expected_return_pct)
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidProfile(format!("{field} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(DomainError::InvalidProfile(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Title-cases a gender label: `" male "` becomes `"Male"`.
pub fn normalize_gender(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }
    output
}

/// Trim plus lower-case, the form risk tiers are matched in.
pub fn normalize_risk_level(raw: &str) -> String {
    raw.trim().to_lowercase()
}
