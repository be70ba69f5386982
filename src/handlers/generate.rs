use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use futures::stream::{self, StreamExt};
use log::info;
use serde_json::Value;

use crate::{
    error::GenerationError,
    prompt::build_prompt,
    services::{spawn_generation, SharedRuntime},
    types::GenerationRequest,
};

/// `POST /api/process-command`
///
/// The body is parsed as JSON whatever its `Content-Type`. Streams the
/// model's stdout back as plain text. Headers go out with the
/// first chunk; a process that fails before printing anything gets a 502 with
/// its stderr instead, while a later failure aborts the body mid-stream.
pub async fn process_command(
    State(runtime): State<SharedRuntime>,
    body: Bytes,
) -> Result<Response, GenerationError> {
    let payload: Value = serde_json::from_slice(&body)?;
    let request = GenerationRequest::from_payload(&payload)?;
    info!("Generating article for topic: {:?} via `{}`", request.topic, runtime.describe());

    let mut generation = spawn_generation(runtime.as_ref(), build_prompt(&request.topic));
    let head = generation.next().await.transpose()?;

    let body = Body::from_stream(stream::iter(head.map(Ok)).chain(generation));
    Ok((
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        body,
    )
        .into_response())
}
