use std::path::PathBuf;

use avenue_core::{ApplicationError, SegmentKind, SegmentSummary};
use serde::Serialize;

use super::{open_session, to_json, CommandResult, DatasetArgs, ProfileArgs, EXIT_RECOMMENDATION};

const COMMAND: &str = "segment";

#[derive(Debug, Serialize)]
struct SegmentPayload<'a> {
    command: &'static str,
    status: &'static str,
    segment: &'a SegmentSummary,
}

pub fn run(
    config_path: Option<PathBuf>,
    profile_args: &ProfileArgs,
    dataset: &DatasetArgs,
    json_output: bool,
) -> CommandResult {
    let session = match open_session(COMMAND, config_path, dataset) {
        Ok(session) => session,
        Err(failure) => return failure,
    };
    let profile = profile_args.to_profile(&session.config);

    let summary = match session.engine.summarize_segment(&profile) {
        Ok(summary) => summary,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "recommendation",
                ApplicationError::from(error).to_string(),
                EXIT_RECOMMENDATION,
            );
        }
    };

    if json_output {
        return to_json(COMMAND, &SegmentPayload { command: COMMAND, status: "ok", segment: &summary });
    }

    let kind = match summary.segment_kind {
        SegmentKind::Exact => "exact",
        SegmentKind::Fallback => "fallback (entire dataset)",
    };
    let mut lines = vec![
        format!("duration category: {}", summary.duration_category),
        format!("return category: {}", summary.return_category),
        format!("segment: {kind}, {} investors", summary.segment_size),
        "base scores:".to_string(),
    ];
    for (avenue, score) in summary.base_scores.iter() {
        lines.push(format!("- {avenue} = {score:.2}"));
    }

    CommandResult::ok(lines.join("\n"))
}
