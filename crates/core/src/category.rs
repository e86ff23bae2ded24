//! Maps continuous profile inputs onto the survey's categorical buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationCategory {
    #[serde(rename = "Less than 1 year")]
    LessThanOneYear,
    #[serde(rename = "1-3 years")]
    OneToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "More than 5 years")]
    MoreThanFiveYears,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnCategory {
    #[serde(rename = "10%-20%")]
    TenToTwenty,
    #[serde(rename = "20%-30%")]
    TwentyToThirty,
    #[serde(rename = "30%-40%")]
    ThirtyToForty,
}

impl DurationCategory {
    pub const ALL: [DurationCategory; 4] = [
        DurationCategory::LessThanOneYear,
        DurationCategory::OneToThreeYears,
        DurationCategory::ThreeToFiveYears,
        DurationCategory::MoreThanFiveYears,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DurationCategory::LessThanOneYear => "Less than 1 year",
            DurationCategory::OneToThreeYears => "1-3 years",
            DurationCategory::ThreeToFiveYears => "3-5 years",
            DurationCategory::MoreThanFiveYears => "More than 5 years",
        }
    }
}

impl ReturnCategory {
    pub const ALL: [ReturnCategory; 3] =
        [ReturnCategory::TenToTwenty, ReturnCategory::TwentyToThirty, ReturnCategory::ThirtyToForty];

    pub fn label(self) -> &'static str {
        match self {
            ReturnCategory::TenToTwenty => "10%-20%",
            ReturnCategory::TwentyToThirty => "20%-30%",
            ReturnCategory::ThirtyToForty => "30%-40%",
        }
    }
}

/// Buckets an investment horizon. Total: negative inputs land in the first
/// bucket, NaN fails every comparison and lands in the last one.
pub fn map_duration(years: f64) -> DurationCategory {
    if years < 1.0 {
        DurationCategory::LessThanOneYear
    } else if years < 3.0 {
        DurationCategory::OneToThreeYears
    } else if years < 5.0 {
        DurationCategory::ThreeToFiveYears
    } else {
        DurationCategory::MoreThanFiveYears
    }
}

/// Buckets a desired annual return percentage. Same boundary convention as
/// [`map_duration`].
pub fn map_expected_return(pct: f64) -> ReturnCategory {
    if pct < 20.0 {
        ReturnCategory::TenToTwenty
    } else if pct < 30.0 {
        ReturnCategory::TwentyToThirty
    } else {
        ReturnCategory::ThirtyToForty
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ReturnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        DurationCategory::ALL
            .into_iter()
            .find(|category| category.label() == value)
            .ok_or_else(|| DomainError::UnknownCategory(value.to_string()))
    }
}

impl FromStr for ReturnCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        ReturnCategory::ALL
            .into_iter()
            .find(|category| category.label() == value)
            .ok_or_else(|| DomainError::UnknownCategory(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_boundaries_are_closed_on_the_lower_end() {
        assert_eq!(map_duration(0.999), DurationCategory::LessThanOneYear);
        assert_eq!(map_duration(1.0), DurationCategory::OneToThreeYears);
        assert_eq!(map_duration(2.999), DurationCategory::OneToThreeYears);
        assert_eq!(map_duration(3.0), DurationCategory::ThreeToFiveYears);
        assert_eq!(map_duration(5.0), DurationCategory::MoreThanFiveYears);
        assert_eq!(map_duration(40.0), DurationCategory::MoreThanFiveYears);
    }

    #[test]
    fn return_boundaries_are_closed_on_the_lower_end() {
        assert_eq!(map_expected_return(19.999), ReturnCategory::TenToTwenty);
        assert_eq!(map_expected_return(20.0), ReturnCategory::TwentyToThirty);
        assert_eq!(map_expected_return(29.5), ReturnCategory::TwentyToThirty);
        assert_eq!(map_expected_return(30.0), ReturnCategory::ThirtyToForty);
        assert_eq!(map_expected_return(95.0), ReturnCategory::ThirtyToForty);
    }

    #[test]
    fn degenerate_inputs_are_bucketed_not_rejected() {
        assert_eq!(map_duration(-3.0), DurationCategory::LessThanOneYear);
        assert_eq!(map_duration(f64::NAN), DurationCategory::MoreThanFiveYears);
        assert_eq!(map_duration(f64::INFINITY), DurationCategory::MoreThanFiveYears);
        assert_eq!(map_expected_return(f64::NEG_INFINITY), ReturnCategory::TenToTwenty);
        assert_eq!(map_expected_return(f64::NAN), ReturnCategory::ThirtyToForty);
    }

    #[test]
    fn labels_round_trip_through_parsing() {
        for category in DurationCategory::ALL {
            assert_eq!(category.label().parse::<DurationCategory>(), Ok(category));
        }
        assert_eq!(" 20%-30% ".parse::<ReturnCategory>(), Ok(ReturnCategory::TwentyToThirty));
        assert!("40%-50%".parse::<ReturnCategory>().is_err());
    }
}
