//! Client handlers

use application::{ClientChanges, NewClient};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Client, ClientId};
use tracing::{debug, instrument};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// GET /api/clients
#[instrument(skip(state))]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = state.clients.list().await?;
    debug!(count = clients.len(), "Listed clients");
    Ok(Json(clients))
}

/// POST /api/clients
#[instrument(skip(state, body))]
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state.clients.create(body).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/clients/{id}
#[instrument(skip(state))]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.get(&id).await?))
}

/// PUT /api/clients/{id}
#[instrument(skip(state, body))]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    ValidatedJson(body): ValidatedJson<ClientChanges>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.update(&id, body).await?))
}

/// DELETE /api/clients/{id}
///
/// Refused with 409 while any case still belongs to the client.
#[instrument(skip(state))]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
