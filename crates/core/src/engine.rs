//! Recommendation facade: mapper → segment → aggregate → adjust → rank.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::avenue::{Avenue, ScoreMap};
use crate::category::{map_duration, map_expected_return, DurationCategory, ReturnCategory};
use crate::dataset::Dataset;
use crate::errors::DomainError;
use crate::explanation::{AvenueExplanation, Explanation, ExplanationGenerator, ReasonColumnMap};
use crate::profile::InvestorProfile;
use crate::ranking::{rank, RankedAvenue};
use crate::risk::{RiskBonusTable, RiskTier};
use crate::scoring::aggregate_scores;
use crate::segment::{select_segment, Segment, SegmentKind};

/// Emits at INFO when the caller asked for verbose output, DEBUG otherwise.
macro_rules! diagnostic {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Outcome of one `recommend` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub duration_category: DurationCategory,
    pub return_category: ReturnCategory,
    pub segment_kind: SegmentKind,
    pub segment_size: usize,
    /// `None` when the risk level was not recognized and no bonus applied.
    pub risk_tier: Option<RiskTier>,
    pub ranked: Vec<RankedAvenue>,
    pub base_scores: ScoreMap,
    pub adjusted_scores: ScoreMap,
}

/// Segment inspection without ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub duration_category: DurationCategory,
    pub return_category: ReturnCategory,
    pub segment_kind: SegmentKind,
    pub segment_size: usize,
    pub base_scores: ScoreMap,
}

/// Stateless apart from the shared, read-only dataset handle; safe to call
/// from any number of threads at once.
#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    dataset: Arc<Dataset>,
    bonuses: RiskBonusTable,
    explanations: ExplanationGenerator,
    strict_inputs: bool,
}

impl RecommendationEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            bonuses: RiskBonusTable::standard(),
            explanations: ExplanationGenerator::default(),
            strict_inputs: false,
        }
    }

    pub fn with_risk_bonuses(mut self, bonuses: RiskBonusTable) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_reason_columns(mut self, reason_columns: ReasonColumnMap) -> Self {
        self.explanations = ExplanationGenerator::new(reason_columns);
        self
    }

    /// Reject non-finite or negative duration / return before bucketing.
    pub fn with_strict_inputs(mut self, strict_inputs: bool) -> Self {
        self.strict_inputs = strict_inputs;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn risk_bonuses(&self) -> &RiskBonusTable {
        &self.bonuses
    }

    pub fn categorize(&self, profile: &InvestorProfile) -> (DurationCategory, ReturnCategory) {
        (map_duration(profile.duration_years), map_expected_return(profile.expected_return_pct))
    }

    /// Segment actually used for `profile`.
    pub fn segment_for(&self, profile: &InvestorProfile) -> Segment<'_> {
        let (duration, expected_return) = self.categorize(profile);
        select_segment(&self.dataset, duration, expected_return)
    }

    pub fn recommend(
        &self,
        profile: &InvestorProfile,
        verbose: bool,
    ) -> Result<Recommendation, DomainError> {
        self.check_profile(profile)?;
        let (duration, expected_return) = self.categorize(profile);

        diagnostic!(
            verbose,
            event_name = "engine.profile.interpreted",
            age = profile.age,
            gender = %profile.gender,
            duration_years = profile.duration_years,
            duration_category = %duration,
            expected_return_pct = profile.expected_return_pct,
            return_category = %expected_return,
            risk_level = %profile.risk_level,
            top_n = profile.top_n,
            "interpreted investor profile"
        );

        let segment = select_segment(&self.dataset, duration, expected_return);
        log_segment(verbose, &segment);

        let base_scores = aggregate_scores(&segment)?;
        for (avenue, score) in base_scores.iter() {
            diagnostic!(
                verbose,
                event_name = "engine.scores.base",
                avenue = %avenue,
                score = score,
                "segment mean score"
            );
        }

        let adjustment = self.bonuses.adjust(&base_scores, &profile.risk_level);
        if adjustment.tier.is_none() {
            diagnostic!(
                verbose,
                event_name = "engine.risk.unrecognized",
                risk_level = %profile.risk_level,
                "risk level not recognized; scores left unadjusted"
            );
        }

        let ranked = rank(&adjustment.scores, profile.top_n);
        for entry in &ranked {
            diagnostic!(
                verbose,
                event_name = "engine.recommendation.ranked",
                avenue = %entry.avenue,
                adjusted = entry.score,
                base = base_scores.get(entry.avenue),
                "recommended avenue"
            );
        }

        Ok(Recommendation {
            duration_category: duration,
            return_category: expected_return,
            segment_kind: segment.kind(),
            segment_size: segment.len(),
            risk_tier: adjustment.tier,
            ranked,
            base_scores,
            adjusted_scores: adjustment.scores,
        })
    }

    /// Base scores for the profile's segment.
    pub fn base_scores(&self, profile: &InvestorProfile) -> Result<ScoreMap, DomainError> {
        self.check_profile(profile)?;
        aggregate_scores(&self.segment_for(profile))
    }

    pub fn summarize_segment(
        &self,
        profile: &InvestorProfile,
    ) -> Result<SegmentSummary, DomainError> {
        self.check_profile(profile)?;
        let (duration, expected_return) = self.categorize(profile);
        let segment = select_segment(&self.dataset, duration, expected_return);
        let base_scores = aggregate_scores(&segment)?;

        Ok(SegmentSummary {
            duration_category: duration,
            return_category: expected_return,
            segment_kind: segment.kind(),
            segment_size: segment.len(),
            base_scores,
        })
    }

    pub fn explain(
        &self,
        profile: &InvestorProfile,
        avenue: Avenue,
    ) -> Result<Explanation, DomainError> {
        self.check_profile(profile)?;
        let segment = self.segment_for(profile);
        Ok(self.explanations.explain(avenue, &segment, self.dataset.schema()))
    }

    /// Explanations for every ranked entry, computed on demand against the
    /// same segment the recommendation was scored on.
    pub fn explain_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Vec<AvenueExplanation> {
        let segment = select_segment(
            &self.dataset,
            recommendation.duration_category,
            recommendation.return_category,
        );
        recommendation
            .ranked
            .iter()
            .map(|entry| {
                self.explanations.explain(entry.avenue, &segment, self.dataset.schema()).into()
            })
            .collect()
    }

    fn check_profile(&self, profile: &InvestorProfile) -> Result<(), DomainError> {
        if self.strict_inputs {
            profile.validate()?;
        }
        Ok(())
    }
}

fn log_segment(verbose: bool, segment: &Segment<'_>) {
    match segment.kind() {
        SegmentKind::Exact => diagnostic!(
            verbose,
            event_name = "engine.segment.matched",
            segment_size = segment.len(),
            "matched similar investors for this profile"
        ),
        SegmentKind::Fallback => diagnostic!(
            verbose,
            event_name = "engine.segment.fallback",
            segment_size = segment.len(),
            "no exact segment match; using entire dataset"
        ),
    }
}
