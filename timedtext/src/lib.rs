//! YouTube timedtext captions — video id in, timed transcript lines out.
//!
//! The pipeline is a strict sequential chain: fetch the track list,
//! parse it, short-circuit when no tracks exist, select a track by
//! language preference, fetch its transcript, then decode and filter
//! the segments. Each step returns a typed value or a tagged error.

pub mod client;
pub mod decode;
pub mod error;
pub mod select;
pub mod types;
pub mod xml;

pub use client::{TimedTextClient, TIMEDTEXT_BASE};
pub use error::{Error, Result, UpstreamDoc};
pub use types::{CaptionTrack, TranscriptLine, TranscriptOutcome};

use tracing::info;

/// Fetch and normalize the transcript for one video.
///
/// `lang` is `"auto"` or a case-insensitive language-code prefix.
/// Returns [`TranscriptOutcome::NoCaptions`] when the video has no
/// caption tracks at all; a selected track whose transcript document
/// contains zero usable segments still yields
/// [`TranscriptOutcome::Captions`] with empty lines.
pub async fn fetch_transcript(
    client: &TimedTextClient,
    video_id: &str,
    lang: &str,
) -> Result<TranscriptOutcome> {
    if video_id.is_empty() {
        return Err(Error::InvalidVideoId);
    }

    let list_xml = client.fetch_track_list(video_id).await?;
    let tracks = xml::parse_track_list(&list_xml)?;
    info!(%video_id, track_count = tracks.len(), "parsed caption track list");

    // No tracks is a legitimate empty result, and the transcript fetch
    // is skipped entirely.
    let Some(track) = select::select_track(&tracks, lang) else {
        return Ok(TranscriptOutcome::NoCaptions);
    };
    info!(
        %video_id,
        lang_code = %track.lang_code,
        kind = %track.kind,
        name = track.name.as_deref().unwrap_or(""),
        "selected caption track"
    );

    let transcript_xml = client.fetch_transcript(video_id, &track.lang_code).await?;
    let lines = xml::parse_transcript(&transcript_xml)?;
    info!(%video_id, line_count = lines.len(), "parsed transcript");

    Ok(TranscriptOutcome::Captions {
        lang: track.lang_code.clone(),
        lines,
    })
}
