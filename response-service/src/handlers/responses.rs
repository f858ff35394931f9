use crate::dtos::{
    ListParams, ListQuery, ListResponsesResponse, SaveResponseRequest, SaveResponseResponse,
};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;

const LIST_ERROR_MESSAGE: &str = "Error listing responses";

pub async fn save_response(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveResponseResponse>, AppError> {
    let message = SaveResponseRequest::message_from_body(&body)?;

    let id = state
        .db
        .insert_response(&message)
        .await
        .map_err(|e| e.with_context("Error saving response"))?;

    tracing::info!(id = %id, "Response saved");
    Ok(Json(SaveResponseResponse::saved(id)))
}

pub async fn list_responses(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponsesResponse>, AppError> {
    let query = ListQuery::try_from(ListParams::from_pairs(pairs))
        .map_err(|e| AppError::persistence(LIST_ERROR_MESSAGE, e))?;

    let records = state
        .db
        .list_responses(&query)
        .await
        .map_err(|e| e.with_context(LIST_ERROR_MESSAGE))?;

    Ok(Json(ListResponsesResponse::from(records)))
}
