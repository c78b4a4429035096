//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::{IndexerError, Result};
use crate::events::{EscrowSummary, EventKind, EventRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct KindEventsResponse {
    pub kind: EventKind,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ActorEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Build the router with every route mounted on `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/events/:kind", get(get_events_by_kind))
        .route("/contributors/:address/events", get(get_actor_events))
        .route("/summary", get(get_summary))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns all indexed escrow events in ledger order.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Result<Json<EventsResponse>> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /events/:kind`
///
/// `kind` is a stored event type such as `contributor_paid`.
pub async fn get_events_by_kind(
    State(state): State<Arc<ApiState>>,
    Path(kind): Path<String>,
) -> Result<Json<KindEventsResponse>> {
    let parsed = EventKind::from_db_str(&kind).ok_or(IndexerError::UnknownKind(kind))?;
    let events = db::get_events_by_type(&state.pool, parsed.as_str()).await?;
    Ok(Json(KindEventsResponse {
        kind: parsed,
        count: events.len(),
        events,
    }))
}

/// `GET /contributors/:address/events`
///
/// Registrations and payouts for one address (or deposits, when the address
/// is the client).
pub async fn get_actor_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Result<Json<ActorEventsResponse>> {
    let events = db::get_events_for_actor(&state.pool, &address).await?;
    Ok(Json(ActorEventsResponse {
        address,
        count: events.len(),
        events,
    }))
}

/// `GET /summary`
///
/// Totals reconstructed from the indexed event stream.
pub async fn get_summary(State(state): State<Arc<ApiState>>) -> Result<Json<EscrowSummary>> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(EscrowSummary::from_records(&events)))
}
