use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result, UpstreamDoc};

/// Upstream captions endpoint. Both the track list and the transcript
/// documents are served from the same path, distinguished by query.
pub const TIMEDTEXT_BASE: &str = "https://www.youtube.com/api/timedtext";

/// Per-request upstream timeout. A hung upstream must not suspend a
/// handler indefinitely; a timeout surfaces as an upstream fetch error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the upstream timedtext API.
///
/// Cheap to clone (the inner `reqwest::Client` is pooled). The base URL
/// is configurable so tests can point it at a stub server.
#[derive(Debug, Clone)]
pub struct TimedTextClient {
    http: reqwest::Client,
    base_url: String,
}

impl TimedTextClient {
    /// Client against the real upstream endpoint.
    pub fn new() -> Self {
        Self::with_base_url(TIMEDTEXT_BASE)
    }

    /// Client against a custom endpoint serving the same schema.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the caption track-list document for a video.
    pub async fn fetch_track_list(&self, video_id: &str) -> Result<String> {
        self.get_document(UpstreamDoc::TrackList, &[("type", "list"), ("v", video_id)])
            .await
    }

    /// Fetch the transcript document for a video's caption track.
    pub async fn fetch_transcript(&self, video_id: &str, lang_code: &str) -> Result<String> {
        self.get_document(UpstreamDoc::Transcript, &[("v", video_id), ("lang", lang_code)])
            .await
    }

    /// One GET, one attempt, no retries. Query values are
    /// percent-encoded by reqwest's query serializer.
    async fn get_document(&self, doc: UpstreamDoc, query: &[(&str, &str)]) -> Result<String> {
        let response = self
            .http
            .get(&self.base_url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        debug!(%doc, status = status.as_u16(), "upstream response");
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                doc,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for TimedTextClient {
    fn default() -> Self {
        Self::new()
    }
}
