//! Writing handler responses to a file or stdout.

use std::path::Path;

use anyhow::Context;
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::Response;
use tokio::io::AsyncWriteExt;

use crate::TRACING_TARGET_OUTPUT;

/// Writes a successful response body to `output`, or to stdout.
///
/// Returns the status of the response. Error bodies are logged instead of
/// written, so a failed request never leaves a partial output file behind.
pub async fn write_response(response: Response, output: Option<&Path>) -> anyhow::Result<StatusCode> {
    let status = response.status();
    for (name, value) in response.headers() {
        tracing::debug!(
            target: TRACING_TARGET_OUTPUT,
            header = %name,
            value = ?value,
            "Response header"
        );
    }

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .context("failed to read response body")?;

    tracing::info!(
        target: TRACING_TARGET_OUTPUT,
        status = status.as_u16(),
        size = body.len(),
        "Request completed"
    );

    if !status.is_success() {
        tracing::error!(
            target: TRACING_TARGET_OUTPUT,
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "Request failed"
        );
        return Ok(status);
    }

    match output {
        Some(path) => tokio::fs::write(path, &body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&body)
                .await
                .context("failed to write to stdout")?;
            stdout.flush().await.context("failed to flush stdout")?;
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[tokio::test]
    async fn writes_successful_body_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let response = Response::new(Body::from("%PDF-1.7"));
        let status = write_response(response, Some(path.as_path())).await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn failed_response_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut response = Response::new(Body::from(r#"{"name":"not_found"}"#));
        *response.status_mut() = StatusCode::NOT_FOUND;
        let status = write_response(response, Some(path.as_path())).await.unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!path.exists());
    }
}
