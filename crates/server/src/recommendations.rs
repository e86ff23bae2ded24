//! JSON API over the recommendation engine.
//!
//! - `POST /recommendations` ranks avenues for a profile, optionally with
//!   explanations.
//! - `POST /segments` reports the segment and base scores a profile maps to.

use std::sync::Arc;

use avenue_core::config::EngineConfig;
use avenue_core::{
    ApplicationError, AvenueExplanation, InterfaceError, InvestorProfile, Recommendation,
    RecommendationEngine, SegmentSummary,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct RecommendationState {
    engine: Arc<RecommendationEngine>,
    defaults: EngineConfig,
}

impl RecommendationState {
    pub fn new(engine: Arc<RecommendationEngine>, defaults: EngineConfig) -> Self {
        Self { engine, defaults }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    pub duration_years: f64,
    pub expected_return_pct: f64,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub top_n: Option<i64>,
    #[serde(default)]
    pub explain: bool,
}

impl ProfileRequest {
    fn to_profile(&self, defaults: &EngineConfig) -> InvestorProfile {
        let risk_level =
            self.risk_level.clone().unwrap_or_else(|| defaults.default_risk_level.clone());
        let mut profile = InvestorProfile::new(self.duration_years, self.expected_return_pct)
            .with_risk_level(risk_level)
            .with_top_n(self.top_n.unwrap_or(defaults.default_top_n));
        if let Some(age) = self.age {
            profile = profile.with_age(age);
        }
        if let Some(gender) = &self.gender {
            profile = profile.with_gender(gender);
        }
        profile
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RecommendationResponse {
    pub correlation_id: String,
    pub profile: InvestorProfile,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<AvenueExplanation>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SegmentResponse {
    pub correlation_id: String,
    pub segment: SegmentSummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: &'static str,
    pub detail: String,
    pub correlation_id: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn router(state: RecommendationState) -> Router {
    Router::new()
        .route("/recommendations", post(recommend))
        .route("/segments", post(segment))
        .with_state(state)
}

pub async fn recommend(
    State(state): State<RecommendationState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();
    let profile = request.to_profile(&state.defaults);

    let recommendation = state
        .engine
        .recommend(&profile, false)
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;
    let explanations =
        request.explain.then(|| state.engine.explain_recommendation(&recommendation));

    info!(
        event_name = "server.recommendation.served",
        correlation_id = %correlation_id,
        segment_kind = ?recommendation.segment_kind,
        segment_size = recommendation.segment_size,
        ranked = recommendation.ranked.len(),
        "recommendation served"
    );

    Ok(Json(RecommendationResponse { correlation_id, profile, recommendation, explanations }))
}

pub async fn segment(
    State(state): State<RecommendationState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<SegmentResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();
    let profile = request.to_profile(&state.defaults);

    let segment = state
        .engine
        .summarize_segment(&profile)
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    Ok(Json(SegmentResponse { correlation_id, segment }))
}

fn api_error(error: ApplicationError, correlation_id: &str) -> ApiError {
    let interface = error.into_interface(correlation_id);
    let (status, kind) = match &interface {
        InterfaceError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
        InterfaceError::ServiceUnavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
        }
        InterfaceError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    warn!(
        event_name = "server.request.failed",
        correlation_id = %interface.correlation_id(),
        status = status.as_u16(),
        error = %interface,
        "request failed"
    );

    (
        status,
        Json(ErrorResponse {
            error: kind,
            message: interface.user_message(),
            detail: interface.to_string(),
            correlation_id: interface.correlation_id().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use avenue_core::config::AppConfig;
    use avenue_core::{Avenue, Dataset, RecommendationEngine, SegmentKind};
    use avenue_data::demo_dataset;
    use axum::{
        body::{to_bytes, Body},
        extract::State,
        http::{Request, StatusCode},
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn state_with(dataset: Dataset, strict_inputs: bool) -> RecommendationState {
        let engine =
            RecommendationEngine::new(Arc::new(dataset)).with_strict_inputs(strict_inputs);
        RecommendationState::new(Arc::new(engine), AppConfig::default().engine)
    }

    fn demo_state() -> RecommendationState {
        state_with(demo_dataset(), false)
    }

    fn request(duration_years: f64, expected_return_pct: f64) -> ProfileRequest {
        ProfileRequest {
            age: None,
            gender: None,
            duration_years,
            expected_return_pct,
            risk_level: None,
            top_n: None,
            explain: false,
        }
    }

    async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn recommend_applies_configured_defaults() {
        let Json(response) =
            recommend(State(demo_state()), Json(request(6.0, 25.0))).await.expect("ok");

        assert_eq!(response.profile.risk_level, "medium");
        assert_eq!(response.profile.top_n, 3);
        assert_eq!(response.recommendation.ranked.len(), 3);
        assert!(response.explanations.is_none());
        assert!(!response.correlation_id.is_empty());
    }

    #[tokio::test]
    async fn recommend_route_returns_ranked_avenues_with_explanations() {
        let (status, body) = post_json(
            router(demo_state()),
            "/recommendations",
            json!({
                "age": 30,
                "gender": "female",
                "duration_years": 6,
                "expected_return_pct": 25,
                "risk_level": "HIGH",
                "top_n": 3,
                "explain": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["gender"], "Female");
        assert_eq!(body["recommendation"]["risk_tier"], "high");
        assert_eq!(body["recommendation"]["ranked"][0]["avenue"], "Equity_Market");
        assert_eq!(body["explanations"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn segment_route_reports_fallback() {
        let (status, body) = post_json(
            router(demo_state()),
            "/segments",
            json!({ "duration_years": 4, "expected_return_pct": 35 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["segment"]["segment_kind"], "fallback");
        assert_eq!(body["segment"]["segment_size"], 6);
    }

    #[tokio::test]
    async fn empty_dataset_maps_to_service_unavailable() {
        let error = recommend(State(state_with(Dataset::default(), false)), Json(request(2.0, 15.0)))
            .await
            .expect_err("empty dataset");

        let (status, Json(body)) = error;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "service_unavailable");
        assert!(body.detail.contains("empty segment"));
    }

    #[tokio::test]
    async fn strict_inputs_map_invalid_profile_to_bad_request() {
        let (status, body) = post_json(
            router(state_with(demo_dataset(), true)),
            "/recommendations",
            json!({ "duration_years": -3, "expected_return_pct": 15 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["detail"].as_str().unwrap_or_default().contains("duration_years"));
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_engine() {
        let state = demo_state();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                let mut body = request(0.5, 12.0);
                body.risk_level = Some("low".to_string());
                recommend(State(state), Json(body)).await.map(|Json(response)| response)
            }));
        }

        let mut rankings = Vec::new();
        for handle in handles {
            let response = handle.await.expect("task").expect("recommendation");
            assert_eq!(response.recommendation.segment_kind, SegmentKind::Exact);
            rankings.push(response.recommendation.ranked);
        }

        assert_eq!(rankings[0][0].avenue, Avenue::FixedDeposits);
        assert!(rankings.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
