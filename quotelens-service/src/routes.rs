use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use quotelens_core::{Hover, LiteralMatch, Location, PatternKind, Position};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Shared request body for the position-based surfaces.
#[derive(Deserialize)]
pub struct PositionRequest {
    #[serde(default)]
    pub uri: Option<String>,
    pub text: String,
    pub position: Position,
}

#[derive(Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<Location>,
}

// POST /hover
pub async fn hover(
    State(state): State<SharedState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<Option<Hover>>, AppError> {
    let start = Instant::now();
    let hover = state.intel.hover(&req.text, req.position)?;
    tracing::info!(
        duration_ms = start.elapsed().as_millis() as u64,
        found = hover.is_some(),
        "POST /hover"
    );
    Ok(Json(hover))
}

// POST /literal
pub async fn literal(
    State(state): State<SharedState>,
    Json(req): Json<PositionRequest>,
) -> Json<Option<LiteralMatch>> {
    Json(state.intel.literal_at(&req.text, req.position))
}

// POST /definitions | /references | /implementations
async fn occurrences(
    state: &SharedState,
    req: PositionRequest,
    kind: PatternKind,
) -> Result<Json<LocationsResponse>, AppError> {
    let start = Instant::now();
    let locations = if kind == PatternKind::Reference {
        state
            .intel
            .references(req.uri.as_deref(), &req.text, req.position)
            .await?
    } else {
        state
            .intel
            .occurrences(kind, req.uri.as_deref(), &req.text, req.position)
            .await?
    };
    tracing::info!(
        duration_ms = start.elapsed().as_millis() as u64,
        kind = kind.as_str(),
        count = locations.len(),
        "POST occurrences"
    );
    Ok(Json(LocationsResponse { locations }))
}

pub async fn definitions(
    State(state): State<SharedState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<LocationsResponse>, AppError> {
    occurrences(&state, req, PatternKind::Definition).await
}

pub async fn references(
    State(state): State<SharedState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<LocationsResponse>, AppError> {
    occurrences(&state, req, PatternKind::Reference).await
}

pub async fn implementations(
    State(state): State<SharedState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<LocationsResponse>, AppError> {
    occurrences(&state, req, PatternKind::Implementation).await
}

// GET /entities
#[derive(Serialize)]
pub struct EntitySummary {
    pub name: String,
    pub definitions: usize,
    pub references: usize,
    pub implementations: usize,
}

pub async fn entities(State(state): State<SharedState>) -> Json<Vec<EntitySummary>> {
    let summaries = state
        .intel
        .entities()
        .iter()
        .map(|e| EntitySummary {
            name: e.name.clone(),
            definitions: e.definitions.len(),
            references: e.references.len(),
            implementations: e.implementations.len(),
        })
        .collect();
    Json(summaries)
}

// GET /status
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: String,
    pub version: String,
    pub backend: String,
    pub entities: usize,
}

pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "quotelens-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.intel.backend_url().to_string(),
        entities: state.intel.entities().len(),
    })
}
