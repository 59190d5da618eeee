//! HTTP + WebSocket host for lesson sessions
//!
//! Endpoints:
//! - POST /lesson/new - Create lesson session
//! - GET /lesson/{id} - Get session status
//! - POST /lesson/{id}/phase - Navigate to a phase
//! - POST /lesson/{id}/next - Advance to the successor phase
//! - POST /lesson/{id}/param - Set a knob
//! - GET /lesson/{id}/metrics - Derived metrics + chart curve
//! - POST /lesson/{id}/prediction - Commit a prediction
//! - POST /lesson/{id}/answer - Select a quiz answer
//! - POST /lesson/{id}/submit - Lock in a quiz answer
//! - POST /lesson/{id}/application - View a transfer entry
//! - GET /lesson/{id}/record - Mastery record (404 until earned)
//! - GET /catalog - The four shipped lessons
//! - WS /ws/{id} - Live event stream
//! - GET /health - Health check

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::content::{self, GameKind};
use crate::core::audio::SilentCues;
use crate::core::phase_machine::Transition;
use crate::core::session::LessonSession;
use crate::types::{EventSink, LessonEvent, ParamValue, Phase};

/// One hosted session plus its live-event channel
pub struct HostedLesson {
    pub session: LessonSession,
    pub update_tx: broadcast::Sender<LessonEvent>,
}

/// App state
pub struct AppState {
    pub lessons: RwLock<HashMap<String, HostedLesson>>,
}

/// Sink that fans session events out to WebSocket subscribers
struct BroadcastSink {
    tx: broadcast::Sender<LessonEvent>,
}

impl EventSink for BroadcastSink {
    fn emit(&mut self, event: LessonEvent) {
        // Fire-and-forget; no subscribers is not an error
        let _ = self.tx.send(event);
    }
}

/// Create new lesson request
#[derive(Debug, Deserialize)]
pub struct NewLessonRequest {
    pub game: String,
    pub initial_phase: Option<String>,
}

/// Create new lesson response
#[derive(Debug, Serialize)]
pub struct NewLessonResponse {
    pub session_id: String,
    pub game_type: String,
    pub game_title: String,
    pub phase: Phase,
    pub websocket_url: String,
}

/// Navigation request
#[derive(Debug, Deserialize)]
pub struct PhaseRequest {
    pub phase: String,
}

/// Navigation response
#[derive(Debug, Serialize)]
pub struct PhaseResponse {
    pub phase: Phase,
    pub outcome: &'static str,
}

/// Set-knob request; `value` is a JSON number or bool
#[derive(Debug, Deserialize)]
pub struct ParamRequest {
    pub key: String,
    pub value: Value,
}

/// Set-knob response with the clamped stored value
#[derive(Debug, Serialize)]
pub struct ParamResponse {
    pub key: String,
    pub value: Value,
}

/// Prediction request
#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub prediction: String,
}

/// Answer selection request
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: usize,
    pub option: String,
}

/// Answer submission request
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub question: usize,
}

/// Answer submission response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub question: usize,
    pub correct: bool,
    pub correct_id: String,
    pub explanation: String,
    pub final_score: Option<(u32, u32)>,
}

/// Transfer entry request
#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub application: String,
}

/// Mastery record response
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub session_id: String,
    pub record_hex: String,
    pub record_bytes: usize,
    pub score: u32,
    pub total: u32,
}

/// One catalog row
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub game_type: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub params: &'static [crate::types::ParamSpec],
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub lessons_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState { lessons: RwLock::new(HashMap::new()) });

    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog))
        .route("/lesson/new", post(create_lesson))
        .route("/lesson/:id", get(get_lesson))
        .route("/lesson/:id/phase", post(set_phase))
        .route("/lesson/:id/next", post(next_phase))
        .route("/lesson/:id/param", post(set_param))
        .route("/lesson/:id/metrics", get(get_metrics))
        .route("/lesson/:id/prediction", post(make_prediction))
        .route("/lesson/:id/answer", post(select_answer))
        .route("/lesson/:id/submit", post(submit_answer))
        .route("/lesson/:id/application", post(view_application))
        .route("/lesson/:id/record", get(get_record))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let lessons = state.lessons.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        lessons_active: lessons.len(),
    })
}

/// The four shipped lessons
async fn catalog() -> Json<Vec<CatalogEntry>> {
    Json(
        content::catalog()
            .into_iter()
            .map(|c| CatalogEntry {
                game_type: c.kind.id(),
                title: c.title,
                tagline: c.tagline,
                params: c.param_specs,
            })
            .collect(),
    )
}

/// Create new lesson session
async fn create_lesson(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewLessonRequest>,
) -> Result<Json<NewLessonResponse>, StatusCode> {
    let kind = GameKind::parse(&req.game).ok_or(StatusCode::BAD_REQUEST)?;
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let session = LessonSession::new(
        kind,
        req.initial_phase.as_deref(),
        Box::new(BroadcastSink { tx: tx.clone() }),
        Box::new(SilentCues),
    );
    let content = session.content();
    let response = NewLessonResponse {
        session_id: session_id.clone(),
        game_type: content.kind.id().to_string(),
        game_title: content.title.to_string(),
        phase: session.phase(),
        websocket_url: format!("/ws/{}", session_id),
    };

    let mut lessons = state.lessons.write().await;
    lessons.insert(session_id, HostedLesson { session, update_tx: tx });

    Ok(Json(response))
}

/// Get session status
async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<crate::types::LessonStatus>, StatusCode> {
    let lessons = state.lessons.read().await;
    let hosted = lessons.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(hosted.session.status()))
}

/// Navigate to a phase
async fn set_phase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PhaseRequest>,
) -> Result<Json<PhaseResponse>, StatusCode> {
    // Unrecognized phase strings resolve to hook, per the widget contract
    let target = Phase::from_hint(Some(&req.phase));
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let outcome = hosted.session.go_to_phase(target);
    Ok(Json(PhaseResponse {
        phase: hosted.session.phase(),
        outcome: outcome_str(outcome),
    }))
}

/// Advance to the successor phase
async fn next_phase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PhaseResponse>, StatusCode> {
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let outcome = hosted.session.next_phase();
    Ok(Json(PhaseResponse {
        phase: hosted.session.phase(),
        outcome: outcome_str(outcome),
    }))
}

/// Set a knob
async fn set_param(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ParamRequest>,
) -> Result<Json<ParamResponse>, StatusCode> {
    let value = match &req.value {
        Value::Number(n) => ParamValue::Number(n.as_f64().ok_or(StatusCode::BAD_REQUEST)?),
        Value::Bool(b) => ParamValue::Toggle(*b),
        _ => return Err(StatusCode::BAD_REQUEST),
    };

    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let stored = hosted
        .session
        .set_param(&req.key, value)
        .ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(ParamResponse {
        key: req.key,
        value: match stored {
            ParamValue::Number(v) => serde_json::json!(v),
            ParamValue::Toggle(b) => serde_json::json!(b),
        },
    }))
}

/// Derived metrics and the primary chart curve
async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let lessons = state.lessons.read().await;
    let hosted = lessons.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(serde_json::json!({
        "metrics": hosted.session.metrics(),
        "curve": hosted.session.curve(),
    })))
}

/// Commit a prediction
async fn make_prediction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PredictionRequest>,
) -> Result<StatusCode, StatusCode> {
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    hosted.session.make_prediction(&req.prediction);
    Ok(StatusCode::NO_CONTENT)
}

/// Select a quiz answer
async fn select_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<StatusCode, StatusCode> {
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    if hosted.session.select_answer(req.question, &req.option) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// Lock in a quiz answer
async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, StatusCode> {
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let outcome = hosted
        .session
        .submit_answer(req.question)
        .ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(SubmitResponse {
        question: outcome.question,
        correct: outcome.correct,
        correct_id: outcome.correct_id.to_string(),
        explanation: outcome.explanation.to_string(),
        final_score: outcome.final_score,
    }))
}

/// View a transfer entry
async fn view_application(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ApplicationRequest>,
) -> Result<StatusCode, StatusCode> {
    let mut lessons = state.lessons.write().await;
    let hosted = lessons.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    if hosted.session.view_application(&req.application) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// Get the mastery record
async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, StatusCode> {
    let lessons = state.lessons.read().await;
    let hosted = lessons.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let result = hosted.session.mastery_record();
    let record = result.record.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RecordResponse {
        session_id: id,
        record_hex: record.to_hex(),
        record_bytes: record.to_bytes().len(),
        score: record.score,
        total: record.total,
    }))
}

/// WebSocket handler for live events
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let lessons = state.lessons.read().await;
    let hosted = lessons.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = hosted.update_tx.subscribe();
    drop(lessons);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward broadcast events to the socket until either side closes
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<LessonEvent>) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Ok(event) = event else { break };
                let json = serde_json::to_string(&event).unwrap_or_default();
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }
}

fn outcome_str(outcome: Transition) -> &'static str {
    match outcome {
        Transition::Moved(_) => "moved",
        Transition::AlreadyThere => "already_there",
        Transition::Debounced => "debounced",
        Transition::Terminal => "terminal",
        Transition::Blocked => "blocked",
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("lesson_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Tenphase API running on {}", addr);
    println!("  POST /lesson/new            - Create lesson");
    println!("  GET  /lesson/:id            - Get status");
    println!("  POST /lesson/:id/phase      - Navigate");
    println!("  POST /lesson/:id/param      - Set knob");
    println!("  GET  /lesson/:id/metrics    - Metrics + curve");
    println!("  POST /lesson/:id/answer     - Select answer");
    println!("  POST /lesson/:id/submit     - Submit answer");
    println!("  GET  /lesson/:id/record     - Mastery record");
    println!("  GET  /catalog               - Shipped lessons");
    println!("  WS   /ws/:id                - Live events");
    println!("  GET  /health                - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
