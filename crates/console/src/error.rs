//! Console error type and shared response handling.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the console clients.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request itself failed (connection refused, DNS, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body did not match the documented shape.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint path did not resolve against the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// A local file (product image) could not be read.
    #[error("failed to read {path}: {source}")]
    File {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Turn a response into `T`, mapping non-success statuses to
/// [`ConsoleError::Status`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ConsoleError> {
    let text = read_success_text(response).await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "failed to parse backend response"
        );
        ConsoleError::Decode(e)
    })
}

/// Like [`read_json`] but discards the body of successful responses.
pub(crate) async fn read_success(response: reqwest::Response) -> Result<(), ConsoleError> {
    read_success_text(response).await.map(|_| ())
}

async fn read_success_text(response: reqwest::Response) -> Result<String, ConsoleError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(text);
    }

    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| text.chars().take(200).collect());
    tracing::error!(status = %status, message = %message, "backend returned non-success status");
    Err(ConsoleError::Status { status, message })
}
