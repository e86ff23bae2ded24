use std::sync::Arc;

use avenue_core::RecommendationEngine;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    engine: Arc<RecommendationEngine>,
}

impl HealthState {
    pub fn new(engine: Arc<RecommendationEngine>) -> Self {
        Self { engine }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub dataset: HealthCheck,
    pub records: usize,
    pub checked_at: String,
}

pub fn router(engine: Arc<RecommendationEngine>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState::new(engine))
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let records = state.engine.dataset().len();
    let dataset = dataset_check(records);
    let ready = dataset.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "avenue-server runtime initialized".to_string(),
        },
        dataset,
        records,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn dataset_check(records: usize) -> HealthCheck {
    if records == 0 {
        HealthCheck {
            status: "degraded",
            detail: "dataset has no rows; recommendations cannot be scored".to_string(),
        }
    } else {
        HealthCheck { status: "ready", detail: format!("{records} survey records loaded") }
    }
}
