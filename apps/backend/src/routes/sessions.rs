//! Session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
/// Creates an idle session; the body is optional
pub async fn create(
    State(state): State<AppState>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionSnapshot>)> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let snapshot = state.sessions.create(request.seed, request.shuffle)?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    Ok(Json(state.sessions.snapshot(id)?))
}

/// DELETE /api/sessions/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/:id/start
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>> {
    Ok(Json(state.sessions.start(id)?))
}

/// POST /api/sessions/:id/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    Ok(Json(state.sessions.answer(id, request.option)?))
}

/// POST /api/sessions/:id/tap
pub async fn tap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TapRequest>,
) -> Result<Json<ActionResponse>> {
    Ok(Json(state.sessions.tap(id, request.side, request.index)?))
}

/// GET /api/sessions/:id/events
/// Drains the events timers produced since the last call
pub async fn events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventsResponse>> {
    let (events, dropped) = state.sessions.drain_events(id)?;
    Ok(Json(EventsResponse { events, dropped }))
}

/// GET /api/sessions/:id/share
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShareResponse>> {
    Ok(Json(state.sessions.share(id)?))
}
