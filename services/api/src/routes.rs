use crate::infra::AppState;
use appraisal::error::AppError;
use appraisal::handbooks::{HandbookInfo, WorksheetOptions};
use appraisal::worksheet::domain::{Analog, Subject, Worksheet, ANALOG_CAPACITY};
use appraisal::worksheet::report::ValuationSummary;
use appraisal::worksheet::WorksheetSession;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/handbooks", axum::routing::get(handbooks_endpoint))
        .route(
            "/api/v1/worksheet/options",
            axum::routing::post(worksheet_options_endpoint),
        )
        .route(
            "/api/v1/worksheet/evaluate",
            axum::routing::post(worksheet_evaluate_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Serialize)]
pub(crate) struct HandbooksResponse {
    pub(crate) default_id: String,
    pub(crate) handbooks: Vec<HandbookInfo>,
}

pub(crate) async fn handbooks_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<HandbooksResponse> {
    Json(HandbooksResponse {
        default_id: state.handbook_id(None).to_string(),
        handbooks: state.registry.available(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorksheetOptionsRequest {
    #[serde(default)]
    pub(crate) handbook: Option<String>,
    pub(crate) subject: Subject,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorksheetOptionsResponse {
    pub(crate) handbook_id: String,
    pub(crate) options: WorksheetOptions,
}

pub(crate) async fn worksheet_options_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WorksheetOptionsRequest>,
) -> Result<Json<WorksheetOptionsResponse>, AppError> {
    let handbook_id = state.handbook_id(payload.handbook.as_deref()).to_string();
    let handbook = state.registry.require(&handbook_id)?;

    Ok(Json(WorksheetOptionsResponse {
        options: handbook.worksheet_options(&payload.subject),
        handbook_id,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorksheetEvaluateRequest {
    #[serde(default)]
    pub(crate) handbook: Option<String>,
    pub(crate) subject: Subject,
    #[serde(default)]
    pub(crate) analogs: Vec<Analog>,
    #[serde(default)]
    pub(crate) valued_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorksheetEvaluateResponse {
    pub(crate) handbook_id: String,
    pub(crate) valued_on: NaiveDate,
    /// The submitted worksheet with every derived adjustment recomputed.
    pub(crate) worksheet: Worksheet,
    pub(crate) summary: ValuationSummary,
}

pub(crate) async fn worksheet_evaluate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WorksheetEvaluateRequest>,
) -> Result<Json<WorksheetEvaluateResponse>, AppError> {
    let WorksheetEvaluateRequest {
        handbook,
        subject,
        mut analogs,
        valued_on,
    } = payload;

    let handbook_id = state.handbook_id(handbook.as_deref()).to_string();
    let mut session = WorksheetSession::new(&state.registry, Some(&handbook_id))?;

    analogs.truncate(ANALOG_CAPACITY);
    analogs.resize_with(ANALOG_CAPACITY, Analog::default);

    let worksheet = session.submit(Worksheet { subject, analogs }).clone();
    let valuation = session.evaluate();
    let summary = valuation.summary(&session.handbook().info);

    Ok(Json(WorksheetEvaluateResponse {
        handbook_id,
        valued_on: valued_on.unwrap_or_else(|| Local::now().date_naive()),
        worksheet,
        summary,
    }))
}
