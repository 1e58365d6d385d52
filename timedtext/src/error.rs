use std::fmt;

/// Which upstream document a fetch or parse failure relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamDoc {
    TrackList,
    Transcript,
}

impl fmt::Display for UpstreamDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamDoc::TrackList => write!(f, "track list"),
            UpstreamDoc::Transcript => write!(f, "transcript"),
        }
    }
}

/// All errors that can occur in timedtext.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing or invalid video id")]
    InvalidVideoId,

    #[error("{doc} fetch returned HTTP {status}")]
    UpstreamStatus { doc: UpstreamDoc, status: u16 },

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed {doc} document: {reason}")]
    Malformed { doc: UpstreamDoc, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
