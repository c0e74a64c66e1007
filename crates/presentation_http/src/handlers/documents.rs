//! Document handlers

use application::{DocumentChanges, NewDocument};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Document, DocumentId};
use tracing::instrument;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[instrument(skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.documents.list().await?))
}

#[instrument(skip(state, body))]
pub async fn create_document(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewDocument>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state.documents.create(body).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documents.get(&id).await?))
}

#[instrument(skip(state, body))]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    ValidatedJson(body): ValidatedJson<DocumentChanges>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documents.update(&id, body).await?))
}

#[instrument(skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<StatusCode, ApiError> {
    state.documents.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
