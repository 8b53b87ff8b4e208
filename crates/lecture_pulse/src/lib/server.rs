use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lecture_datastore::{DataStore, QuizSink, Utterance};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::{
    llm::{QuizGenerator, Summarizer},
    transcript::{self, TranscriptStore},
    CycleOutcome, Error, QuizPipeline, SummaryOutcome,
};

const DEFAULT_WINDOW_MINUTES: u64 = 30;

/// Shared state behind every request handler.
///
/// `pipeline` is `None` when no generation API key is configured; the
/// generation endpoints then answer with an explicit error body instead of
/// crashing the process.
pub struct AppState<D, S, Q, R>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    pub transcript: TranscriptStore,
    pub store: D,
    pub pipeline: Option<QuizPipeline<D, S, Q, R>>,
    pub interval_minutes: AtomicU64,
}

impl<D, S, Q, R> AppState<D, S, Q, R>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    pub fn new(store: D, pipeline: Option<QuizPipeline<D, S, Q, R>>, interval_minutes: u64) -> Self {
        Self {
            transcript: TranscriptStore::new(),
            store,
            pipeline,
            interval_minutes: AtomicU64::new(interval_minutes),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        // Generation and storage failures deliberately keep the lenient
        // 200-with-error-body shape the polling frontend expects.
        let status = match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router<D, S, Q, R>(state: Arc<AppState<D, S, Q, R>>) -> Router
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/add_message", post(add_message::<D, S, Q, R>))
        .route("/ingest", post(ingest::<D, S, Q, R>))
        .route("/transcript", get(get_transcript::<D, S, Q, R>))
        .route("/transcript/summary", get(get_summary::<D, S, Q, R>))
        .route("/generate-mcq", post(generate_mcq::<D, S, Q, R>))
        .route("/latest_mcq", get(latest_mcq::<D, S, Q, R>))
        .route(
            "/quiz-interval",
            get(get_interval::<D, S, Q, R>).post(set_interval::<D, S, Q, R>),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener, spawns the auto-generation loop and serves requests
/// until shutdown.
pub async fn serve<D, S, Q, R>(
    bind: &str,
    port: u16,
    state: Arc<AppState<D, S, Q, R>>,
) -> anyhow::Result<()>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    tokio::spawn(auto_generate_loop(state.clone()));

    let app = router(state);
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "lecture-pulse HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Background auto-generation: sleeps for the configured interval, then
/// runs a cycle over the window of the same length. The interval is
/// re-read every lap, so updates take effect on the next one.
async fn auto_generate_loop<D, S, Q, R>(state: Arc<AppState<D, S, Q, R>>)
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    if state.pipeline.is_none() {
        return;
    }

    loop {
        let minutes = state.interval_minutes.load(Ordering::Relaxed).max(1);
        tokio::time::sleep(interval_duration(minutes)).await;

        let text = transcript::render(&state.transcript.window(minutes));
        if let Some(pipeline) = &state.pipeline {
            match pipeline.run_cycle(&text).await {
                Ok(CycleOutcome::Stored(item)) => {
                    tracing::info!(quiz_id = item.id, "Auto-generated quiz item")
                }
                Ok(CycleOutcome::NotEnoughData) => {
                    tracing::info!("Auto-generation skipped: not enough transcript data")
                }
                Err(e) => tracing::error!(error = %e, "Auto-generation cycle failed"),
            }
        }
    }
}

/// Sleep length for one auto-generation lap. Saturates so an absurd
/// interval sleeps effectively forever instead of panicking the loop task
/// or wrapping into a rapid-fire schedule.
fn interval_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

// ── Ingest ──

#[derive(Deserialize)]
struct AddMessageRequest {
    user_name: String,
    data: String,
    timestamp: i64,
}

async fn add_message<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Json(req): Json<AddMessageRequest>,
) -> Result<Json<serde_json::Value>, Error>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    if req.user_name.trim().is_empty() {
        return Err(Error::Validation("user_name must not be empty".into()));
    }
    if req.data.trim().is_empty() {
        return Err(Error::Validation("data must not be empty".into()));
    }
    if req.timestamp <= 0 {
        return Err(Error::Validation(
            "timestamp must be positive microseconds since epoch".into(),
        ));
    }

    let utterance = Utterance {
        user_name: req.user_name,
        data: req.data,
        timestamp: req.timestamp,
    };

    state.transcript.append(utterance.clone());

    // Durable mirror is best-effort; a failed write must not fail ingest.
    if let Err(e) = state.store.append_transcript(&utterance).await {
        tracing::warn!(error = ?e, "Failed to mirror utterance to transcript log");
    }

    Ok(Json(serde_json::json!({ "status": "Message received" })))
}

/// RTMS transcript envelope. Only `msg_type` 17 carries transcript text;
/// everything else is acknowledged and dropped.
#[derive(Deserialize)]
struct IngestEnvelope {
    msg_type: i64,
    content: serde_json::Value,
}

const RTMS_TRANSCRIPT_MSG_TYPE: i64 = 17;

async fn ingest<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Json(envelope): Json<IngestEnvelope>,
) -> Json<serde_json::Value>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    if envelope.msg_type == RTMS_TRANSCRIPT_MSG_TYPE {
        match serde_json::from_value::<Utterance>(envelope.content) {
            Ok(utterance) => {
                state.transcript.append(utterance.clone());
                if let Err(e) = state.store.append_transcript(&utterance).await {
                    tracing::warn!(error = ?e, "Failed to mirror utterance to transcript log");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping transcript envelope with malformed content")
            }
        }
    }

    Json(serde_json::json!({ "status": "ok" }))
}

// ── Transcript reads ──

#[derive(Deserialize)]
struct WindowQuery {
    minutes: Option<u64>,
}

async fn get_transcript<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Query(params): Query<WindowQuery>,
) -> Json<serde_json::Value>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    let minutes = params.minutes.unwrap_or(DEFAULT_WINDOW_MINUTES);
    let text = transcript::render(&state.transcript.window(minutes));
    Json(serde_json::json!({ "transcript": text }))
}

async fn get_summary<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<serde_json::Value>, Error>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    let Some(pipeline) = &state.pipeline else {
        return Ok(Json(unconfigured_backend_body()));
    };

    let minutes = params.minutes.unwrap_or(DEFAULT_WINDOW_MINUTES);
    let text = transcript::render(&state.transcript.window(minutes));

    match pipeline.summarize(&text).await? {
        SummaryOutcome::Summary(summary) => Ok(Json(serde_json::json!({ "summary": summary }))),
        SummaryOutcome::NotEnoughData => Ok(Json(serde_json::json!({
            "error": "not enough transcript data to summarize"
        }))),
    }
}

// ── Quiz generation ──

async fn generate_mcq<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Query(params): Query<WindowQuery>,
) -> Json<serde_json::Value>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    if state.pipeline.is_none() {
        return Json(unconfigured_backend_body());
    }

    let minutes = params.minutes.unwrap_or(DEFAULT_WINDOW_MINUTES);
    let text = transcript::render(&state.transcript.window(minutes));

    // Fire and forget: the handler returns immediately and the caller
    // polls /latest_mcq. Concurrent triggers may run concurrent cycles.
    let state = state.clone();
    tokio::spawn(async move {
        if let Some(pipeline) = &state.pipeline {
            match pipeline.run_cycle(&text).await {
                Ok(CycleOutcome::Stored(item)) => {
                    tracing::info!(quiz_id = item.id, "Generation cycle stored quiz item")
                }
                Ok(CycleOutcome::NotEnoughData) => {
                    tracing::info!("Generation cycle skipped: not enough transcript data")
                }
                Err(e) => tracing::error!(error = %e, "Generation cycle failed"),
            }
        }
    });

    Json(serde_json::json!({ "status": "MCQ generation started" }))
}

async fn latest_mcq<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
) -> Result<Json<serde_json::Value>, Error>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    let latest = state.store.latest_quiz().await.map_err(Error::Storage)?;

    match latest {
        Some(item) => Ok(Json(serde_json::json!(item))),
        None => Ok(Json(serde_json::json!({ "message": "No MCQs available yet" }))),
    }
}

// ── Interval configuration ──

#[derive(Deserialize)]
struct IntervalRequest {
    minutes: u64,
}

async fn set_interval<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
    Json(req): Json<IntervalRequest>,
) -> Result<Json<serde_json::Value>, Error>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    if req.minutes == 0 {
        return Err(Error::Validation("minutes must be at least 1".into()));
    }

    state.interval_minutes.store(req.minutes, Ordering::Relaxed);
    tracing::info!(minutes = req.minutes, "Quiz interval updated");

    Ok(Json(serde_json::json!({ "status": "Quiz interval updated" })))
}

async fn get_interval<D, S, Q, R>(
    State(state): State<Arc<AppState<D, S, Q, R>>>,
) -> Json<serde_json::Value>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    let minutes = state.interval_minutes.load(Ordering::Relaxed);
    Json(serde_json::json!({ "minutes": minutes }))
}

// ── Misc ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

fn unconfigured_backend_body() -> serde_json::Value {
    serde_json::json!({ "error": "generation backend is not configured (missing API key)" })
}
