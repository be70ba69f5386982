use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::{
            http::{header, StatusCode},
            response::{IntoResponse, Response},
        };
        use std::io;
        use thiserror::Error;
        use tokio::task::JoinError;

        use crate::types::TopicRequired;

        pub const FALLBACK_FAILURE_MESSAGE: &str = "generation process failed";

        #[derive(Error, Debug)]
        pub enum GenerationError {
            #[error(transparent)]
            InvalidRequest(#[from] TopicRequired),

            #[error("invalid JSON body: {0}")]
            MalformedBody(#[from] serde_json::Error),

            #[error("failed to start generation process: {0}")]
            Spawn(#[source] io::Error),

            #[error("generation process has no {0} pipe")]
            MissingPipe(&'static str),

            #[error("generation process I/O error: {0}")]
            Io(#[from] io::Error),

            #[error("generation task failed: {0}")]
            Task(#[from] JoinError),

            /// Non-zero exit. Carries the captured stderr text.
            #[error("{0}")]
            ProcessFailed(String),
        }

        impl GenerationError {
            /// Builds the failure for a non-zero exit from whatever the
            /// process wrote to stderr.
            pub fn from_stderr(stderr: &[u8]) -> Self {
                let text = String::from_utf8_lossy(stderr);
                if text.trim().is_empty() {
                    GenerationError::ProcessFailed(FALLBACK_FAILURE_MESSAGE.to_string())
                } else {
                    GenerationError::ProcessFailed(text.into_owned())
                }
            }

            pub fn status_code(&self) -> StatusCode {
                match self {
                    GenerationError::InvalidRequest(_) | GenerationError::MalformedBody(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    _ => StatusCode::BAD_GATEWAY,
                }
            }
        }

        impl IntoResponse for GenerationError {
            fn into_response(self) -> Response {
                let status = self.status_code();
                if status.is_server_error() {
                    log::error!("Generation failed: {self}");
                }
                (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    self.to_string(),
                )
                    .into_response()
            }
        }

    }
}
