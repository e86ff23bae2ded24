pub mod avenue;
pub mod category;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod explanation;
pub mod profile;
pub mod ranking;
pub mod risk;
pub mod scoring;
pub mod segment;

pub use avenue::{Avenue, ScoreMap, AVENUE_COUNT};
pub use category::{map_duration, map_expected_return, DurationCategory, ReturnCategory};
pub use dataset::{Dataset, DatasetSchema, InvestorRecord, ReasonColumn, ReasonFields};
pub use engine::{Recommendation, RecommendationEngine, SegmentSummary};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use explanation::{AvenueExplanation, Explanation, ExplanationGenerator, ReasonColumnMap};
pub use profile::{InvestorProfile, DEFAULT_RISK_LEVEL, DEFAULT_TOP_N};
pub use ranking::{rank, RankedAvenue};
pub use risk::{RiskAdjustment, RiskBonus, RiskBonusTable, RiskTier};
pub use scoring::aggregate_scores;
pub use segment::{select_segment, Segment, SegmentKind};
