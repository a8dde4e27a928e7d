//! HTTP request handlers

use super::types::{
    AnswerRequest, ChatRequest, ErrorResponse, SelectStreamRequest, SessionCreatedResponse,
    SessionView, StreamsResponse, SuccessResponse,
};
use super::AppState;
use crate::runtime::SessionError;
use crate::state_machine::Event;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Stream catalogue
        .route("/api/streams", get(list_streams))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        // Quiz navigation
        .route("/api/sessions/:id/stream", post(select_stream))
        .route("/api/sessions/:id/answer", post(answer))
        .route("/api/sessions/:id/back", post(back))
        .route("/api/sessions/:id/next", post(next))
        .route("/api/sessions/:id/submit", post(submit))
        .route("/api/sessions/:id/reset", post(reset))
        // Counselor chat
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/chat/clear", post(clear_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Streams
// ============================================================

async fn list_streams(State(state): State<AppState>) -> Json<StreamsResponse> {
    Json(StreamsResponse::from_bank(state.sessions.bank()))
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let (id, handle) = state.sessions.create().await;
    let session = SessionView::new(&*handle.lock().await);
    Json(SessionCreatedResponse { id, session })
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;
    let runtime = handle.lock().await;
    Ok(Json(SessionView::new(&runtime)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.sessions.remove(&id).await {
        return Err(session_not_found(&id));
    }
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Quiz Navigation
// ============================================================

async fn select_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SelectStreamRequest>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::SelectStream { stream: req.stream }).await
}

async fn answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::Answer { choice: req.choice }).await
}

async fn back(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::Back).await
}

async fn next(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::Next).await
}

async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::Submit).await
}

async fn reset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::Reset).await
}

// ============================================================
// Counselor Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::SendChat { text: req.text }).await
}

async fn clear_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch(&state, &id, Event::ClearChat).await
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("career-counselor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Dispatch
// ============================================================

/// Run one event against a session and render the outcome
async fn dispatch(state: &AppState, id: &str, event: Event) -> Result<Json<SessionView>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    // Held across the completion call so a session sees one action at a time
    let mut runtime = handle.lock().await;
    let outcome = runtime.dispatch(event).await.map(|_| ());

    match outcome {
        Ok(()) => Ok(Json(SessionView::new(&runtime))),
        Err(SessionError::Transition(e)) if e.is_bad_input() => {
            Err(AppError::BadRequest(e.to_string()))
        }
        Err(SessionError::Transition(e)) => Err(AppError::Conflict(e.to_string())),
        Err(SessionError::Counselor(e)) => {
            tracing::warn!(session_id = %id, error = %e, "Counselor call failed");
            Err(AppError::BadGateway(
                e.to_string(),
                Box::new(SessionView::new(&runtime)),
            ))
        }
    }
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Session not found: {id}"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    /// Completion failed; carries the session so the client can redraw
    BadGateway(String, Box<SessionView>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            AppError::BadGateway(msg, session) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(msg).with_session(*session),
            ),
        };

        (status, Json(body)).into_response()
    }
}
