// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Episode, Show};

pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Errors from the catalog API: a failed request or an unparseable
/// response.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}")]
    Status { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct TvMazeClient {
    client: Client,
    base_url: String,
    show_progress: bool,
}

impl TvMazeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("Mozilla/5.0")
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            show_progress: false,
        })
    }

    /// Show spinner progress on stderr while fetching. Only safe outside
    /// the TUI's alternate screen.
    pub fn enable_progress(&mut self) {
        self.show_progress = true;
    }

    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// The full show catalog, verbatim in API order.
    pub async fn fetch_shows(&self) -> std::result::Result<Vec<Show>, NetworkError> {
        self.make_request("shows").await
    }

    /// All episodes of one show, ordered by season then number.
    pub async fn fetch_episodes(
        &self,
        show_id: u64,
    ) -> std::result::Result<Vec<Episode>, NetworkError> {
        self.make_request(&format!("shows/{}/episodes", show_id)).await
    }

    async fn make_request<T>(&self, path: &str) -> std::result::Result<T, NetworkError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, path);

        debug!("Requesting: {}", url);

        let pb = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Sending request...");
            pb
        } else {
            ProgressBar::hidden()
        };

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            pb.finish_and_clear();
            return Err(NetworkError::Status {
                status: response.status().as_u16(),
            });
        }

        pb.set_message("Downloading...");

        // The catalog payload is large; stream it and track bytes so the
        // spinner stays informative.
        let mut response_bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = futures_util::StreamExt::next(&mut stream).await {
            let chunk = chunk_result?;
            response_bytes.extend_from_slice(&chunk);

            let bytes_str = if response_bytes.len() < 1024 {
                format!("{} B", response_bytes.len())
            } else if response_bytes.len() < 1024 * 1024 {
                format!("{:.1} KB", response_bytes.len() as f64 / 1024.0)
            } else {
                format!("{:.1} MB", response_bytes.len() as f64 / (1024.0 * 1024.0))
            };

            pb.set_message(format!("Downloading... {}", bytes_str));
        }

        pb.set_message("Parsing JSON...");

        debug!("Response size: {} bytes", response_bytes.len());

        if response_bytes.is_empty() {
            pb.finish_and_clear();
            return Err(NetworkError::Parse("empty response from server".to_string()));
        }

        let response_text = String::from_utf8(response_bytes)
            .map_err(|_| NetworkError::Parse("response is not valid UTF-8".to_string()))?;

        let json: T = serde_json::from_str(&response_text).map_err(|e| {
            let error_msg = describe_json_error(&response_text, &e);
            warn!("JSON parsing error: {}", error_msg);
            NetworkError::Parse(error_msg)
        })?;

        pb.finish_and_clear();
        Ok(json)
    }
}

/// Builds a parse error message with line/column position and the
/// surrounding response text, so a malformed payload is diagnosable from
/// the log alone.
fn describe_json_error(response_text: &str, e: &serde_json::Error) -> String {
    let line_num = e.line();
    let col_num = e.column();

    // Approximate byte position of the failure.
    let mut byte_pos = 0;
    for (i, line_content) in response_text.lines().enumerate() {
        if i + 1 == line_num {
            byte_pos += col_num.saturating_sub(1);
            break;
        }
        byte_pos += line_content.len() + 1;
    }

    let start = byte_pos.saturating_sub(100);
    let end = std::cmp::min(byte_pos + 100, response_text.len());
    let context = response_text
        .get(start..end)
        .unwrap_or("")
        .replace(['\n', '\r'], " ");

    format!(
        "JSON parsing failed at line {}, column {} (byte position ~{}): ...{}... ({})",
        line_num, col_num, byte_pos, context, e
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_base_url() {
        assert!(TvMazeClient::new("not a url").is_err());
        assert!(TvMazeClient::new(DEFAULT_BASE_URL).is_ok());
    }

    #[test]
    fn new_normalizes_trailing_slash() {
        let client = TvMazeClient::new("https://api.tvmaze.com/").unwrap();
        assert_eq!(client.base_url, "https://api.tvmaze.com");
    }

    #[test]
    fn json_error_description_names_the_position() {
        let err = serde_json::from_str::<Vec<u32>>("[1, 2, oops]").unwrap_err();
        let msg = describe_json_error("[1, 2, oops]", &err);

        assert!(msg.contains("line 1"));
        assert!(msg.contains("oops"));
    }
}
