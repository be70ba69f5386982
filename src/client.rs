//! Browser side of `POST /api/process-command`: issues the request with
//! `fetch` and hands the response body back chunk by chunk.

use http::StatusCode;
use js_sys::{Reflect, Uint8Array};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ReadableStreamDefaultReader, Request, RequestInit, Response};

use crate::types::GenerationRequest;

pub const GENERATE_ENDPOINT: &str = "/api/process-command";
pub const GENERIC_FAILURE: &str = "Failed to generate article";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Network(String),

    #[error("Failed to generate article: response has no body")]
    MissingBody,

    #[error("{0}")]
    Read(String),
}

impl ClientError {
    /// Error for a non-OK response. The server's plain-text body is what the
    /// user sees; an empty body falls back to the generic message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if body.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            body.trim_end().to_string()
        };
        ClientError::Status { status, message }
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// An open response body.
pub struct ArticleStream {
    reader: ReadableStreamDefaultReader,
}

impl ArticleStream {
    /// Waits for the next chunk. `Ok(None)` means the body ended normally.
    pub async fn next_chunk(&self) -> Result<Option<Vec<u8>>, ClientError> {
        let result = JsFuture::from(self.reader.read())
            .await
            .map_err(|e| ClientError::Read(js_message(&e)))?;

        let done = Reflect::get(&result, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            return Ok(None);
        }

        let value = Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| ClientError::Read(js_message(&e)))?;
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }
}

pub async fn open_article_stream(topic: &str) -> Result<ArticleStream, ClientError> {
    let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".to_string()))?;
    let payload = serde_json::to_string(&GenerationRequest::new(topic))
        .map_err(|e| ClientError::Network(e.to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(GENERATE_ENDPOINT, &init)
        .map_err(|e| ClientError::Network(js_message(&e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| ClientError::Network(js_message(&e)))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ClientError::Network(js_message(&e)))?
        .dyn_into()
        .map_err(|e| ClientError::Network(js_message(&e)))?;

    if !response.ok() {
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|text| text.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        return Err(ClientError::from_status(response.status(), &body));
    }

    let body = response.body().ok_or(ClientError::MissingBody)?;
    let reader = body.get_reader().unchecked_into::<ReadableStreamDefaultReader>();
    Ok(ArticleStream { reader })
}
