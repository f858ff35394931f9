use crate::services::upstream::payload_from_body;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;

pub async fn chat_completions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let payload = payload_from_body(&body);
    let upstream = state.upstream.forward_chat_completion(&payload).await?;

    Ok((
        upstream.status,
        [(header::CONTENT_TYPE, upstream.content_type)],
        upstream.body,
    )
        .into_response())
}
