use std::path::PathBuf;

use avenue_core::{
    ApplicationError, AvenueExplanation, InvestorProfile, Recommendation, SegmentKind,
};
use serde::Serialize;

use super::{open_session, to_json, CommandResult, DatasetArgs, ProfileArgs, EXIT_RECOMMENDATION};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub explain: bool,
    pub verbose: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RecommendPayload<'a> {
    command: &'static str,
    status: &'static str,
    profile: &'a InvestorProfile,
    recommendation: &'a Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanations: Option<&'a [AvenueExplanation]>,
}

pub fn run(
    config_path: Option<PathBuf>,
    profile_args: &ProfileArgs,
    dataset: &DatasetArgs,
    options: &RecommendOptions,
) -> CommandResult {
    let session = match open_session(COMMAND, config_path, dataset) {
        Ok(session) => session,
        Err(failure) => return failure,
    };
    let profile = profile_args.to_profile(&session.config);

    let recommendation = match session.engine.recommend(&profile, options.verbose) {
        Ok(recommendation) => recommendation,
        Err(error) => {
            let error = ApplicationError::from(error);
            return CommandResult::failure(
                COMMAND,
                "recommendation",
                error.to_string(),
                EXIT_RECOMMENDATION,
            );
        }
    };

    let explanations = options
        .explain
        .then(|| session.engine.explain_recommendation(&recommendation));

    if options.json {
        return to_json(
            COMMAND,
            &RecommendPayload {
                command: COMMAND,
                status: "ok",
                profile: &profile,
                recommendation: &recommendation,
                explanations: explanations.as_deref(),
            },
        );
    }

    CommandResult::ok(render_human(&profile, &recommendation, explanations.as_deref()))
}

fn render_human(
    profile: &InvestorProfile,
    recommendation: &Recommendation,
    explanations: Option<&[AvenueExplanation]>,
) -> String {
    let mut lines = vec!["=== Recommendation Results ===".to_string(), String::new()];

    lines.push(format!(
        "profile: {} years ({}), {}% expected return ({}), risk {}",
        profile.duration_years,
        recommendation.duration_category,
        profile.expected_return_pct,
        recommendation.return_category,
        recommendation.risk_tier.map_or("unrecognized (no adjustment)", |tier| tier.as_str()),
    ));
    lines.push(match recommendation.segment_kind {
        SegmentKind::Exact => {
            format!("segment: {} similar investors", recommendation.segment_size)
        }
        SegmentKind::Fallback => format!(
            "segment: no exact match, using all {} investors",
            recommendation.segment_size
        ),
    });
    lines.push(String::new());

    if recommendation.ranked.is_empty() {
        lines.push("no avenues requested (top-n <= 0)".to_string());
    }

    for (position, entry) in recommendation.ranked.iter().enumerate() {
        lines.push(format!(
            "• {}: {:.2} (base: {:.2})",
            entry.avenue,
            entry.score,
            recommendation.base_scores.get(entry.avenue)
        ));
        if let Some(explanation) = explanations.and_then(|all| all.get(position)) {
            lines.push(format!("  {}", explanation.summary));
        }
    }

    lines.join("\n")
}
