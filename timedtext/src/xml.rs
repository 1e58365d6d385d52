//! Minimal parser for the two fixed upstream document shapes.
//!
//! The upstream timedtext API serves exactly two schemas: a
//! `<transcript_list>` of `<track .../>` elements and a `<transcript>`
//! of `<text start=".." dur="..">payload</text>` elements. This module
//! extracts those into typed records; attribute bags never escape it.

use crate::decode::decode_entities;
use crate::error::{Error, Result, UpstreamDoc};
use crate::types::{CaptionTrack, TranscriptLine};

/// One extracted element: its attributes plus raw (undecoded) payload.
struct RawElement<'a> {
    attrs: Vec<(String, String)>,
    inner: &'a str,
}

impl RawElement<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse the track-list document into caption track records.
///
/// Zero `<track>` elements is a valid empty list, not an error; a
/// document without a `<transcript_list>` root is malformed.
pub fn parse_track_list(xml: &str) -> Result<Vec<CaptionTrack>> {
    let doc = UpstreamDoc::TrackList;
    if !has_root(xml, "transcript_list") {
        return Err(Error::Malformed {
            doc,
            reason: "missing <transcript_list> root".into(),
        });
    }

    let elements = collect_elements(xml, "track", doc)?;
    Ok(elements
        .iter()
        .map(|el| CaptionTrack {
            lang_code: el.attr("lang_code").unwrap_or_default().to_string(),
            kind: el.attr("kind").unwrap_or_default().to_string(),
            // Upstream flags the default track with the literal "true".
            is_default: el.attr("default") == Some("true"),
            name: el.attr("name").map(str::to_string),
        })
        .collect())
}

/// Parse a transcript document into decoded, filtered transcript lines.
///
/// Missing or unparsable `start`/`dur` attributes become 0, negative
/// values are clamped to 0, and lines that are blank after decoding and
/// trimming are dropped. Document order is preserved.
pub fn parse_transcript(xml: &str) -> Result<Vec<TranscriptLine>> {
    let doc = UpstreamDoc::Transcript;
    if !has_root(xml, "transcript") {
        return Err(Error::Malformed {
            doc,
            reason: "missing <transcript> root".into(),
        });
    }

    let elements = collect_elements(xml, "text", doc)?;
    Ok(elements
        .iter()
        .filter_map(|el| {
            let text = decode_entities(el.inner);
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptLine {
                start: parse_seconds(el.attr("start")),
                duration: parse_seconds(el.attr("dur")),
                text,
            })
        })
        .collect())
}

/// Parse a timing attribute, defaulting anything unusable to 0.
fn parse_seconds(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

/// Whether the document contains an element named `name`.
fn has_root(xml: &str, name: &str) -> bool {
    let open = format!("<{name}");
    let mut pos = 0;
    while let Some(found) = xml[pos..].find(&open) {
        let after = pos + found + open.len();
        match xml.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => return true,
            _ => pos = after,
        }
    }
    false
}

/// Collect every element named `name`, in document order.
fn collect_elements<'a>(
    xml: &'a str,
    name: &str,
    doc: UpstreamDoc,
) -> Result<Vec<RawElement<'a>>> {
    let open = format!("<{name}");
    let close = format!("</{name}>");
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(found) = xml[pos..].find(&open) {
        let after = pos + found + open.len();
        // Require a delimiter so "<track" does not match "<tracks".
        match xml.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
            _ => {
                pos = after;
                continue;
            }
        }

        let tag = scan_tag(&xml[after..]).map_err(|reason| Error::Malformed { doc, reason })?;
        let content_start = after + tag.consumed;
        if tag.self_closing {
            out.push(RawElement {
                attrs: tag.attrs,
                inner: "",
            });
            pos = content_start;
        } else {
            let Some(rel) = xml[content_start..].find(&close) else {
                return Err(Error::Malformed {
                    doc,
                    reason: format!("missing {close}"),
                });
            };
            out.push(RawElement {
                attrs: tag.attrs,
                inner: &xml[content_start..content_start + rel],
            });
            pos = content_start + rel + close.len();
        }
    }

    Ok(out)
}

struct Tag {
    attrs: Vec<(String, String)>,
    /// Bytes consumed from the start of the scan, including the `>`.
    consumed: usize,
    self_closing: bool,
}

/// Scan a tag body (everything after the element name) up to its `>`.
fn scan_tag(rest: &str) -> std::result::Result<Tag, String> {
    let bytes = rest.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let Some(&b) = bytes.get(i) else {
            return Err("unterminated tag".into());
        };
        match b {
            b'>' => {
                return Ok(Tag {
                    attrs,
                    consumed: i + 1,
                    self_closing: false,
                })
            }
            b'/' => {
                if bytes.get(i + 1) == Some(&b'>') {
                    return Ok(Tag {
                        attrs,
                        consumed: i + 2,
                        self_closing: true,
                    });
                }
                return Err("stray '/' in tag".into());
            }
            _ => {
                let name_start = i;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
                if i == name_start {
                    return Err(format!("unexpected character {:?} in tag", bytes[i] as char));
                }
                let name_end = i;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if bytes.get(i) != Some(&b'=') {
                    return Err(format!(
                        "attribute {:?} has no value",
                        &rest[name_start..name_end]
                    ));
                }
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let quote = match bytes.get(i) {
                    Some(&q @ (b'"' | b'\'')) => q,
                    _ => return Err("unquoted attribute value".into()),
                };
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err("unterminated attribute value".into());
                }
                attrs.push((
                    rest[name_start..name_end].to_string(),
                    decode_entities(&rest[value_start..i]),
                ));
                i += 1;
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_LIST: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript_list docid="123">
  <track id="0" name="" lang_code="en" lang_original="English" lang_translated="English" lang_default="true"/>
  <track id="1" name="" lang_code="nl" kind="asr" lang_original="Nederlands"/>
</transcript_list>"#;

    #[test]
    fn test_parse_track_list() {
        let tracks = parse_track_list(TRACK_LIST).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].lang_code, "en");
        assert_eq!(tracks[0].kind, "");
        assert!(!tracks[0].is_default);
        assert_eq!(tracks[1].lang_code, "nl");
        assert_eq!(tracks[1].kind, "asr");
    }

    #[test]
    fn test_default_flag_requires_exact_true() {
        let xml = r#"<transcript_list>
            <track lang_code="en" default="true"/>
            <track lang_code="de" default="TRUE"/>
        </transcript_list>"#;
        let tracks = parse_track_list(xml).unwrap();
        assert!(tracks[0].is_default);
        assert!(!tracks[1].is_default);
    }

    #[test]
    fn test_empty_track_list_is_not_an_error() {
        let tracks = parse_track_list("<transcript_list></transcript_list>").unwrap();
        assert!(tracks.is_empty());
        let tracks = parse_track_list("<transcript_list/>").unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_track_list_without_root_is_malformed() {
        let err = parse_track_list("not xml at all").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
        let err = parse_track_list("").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_unterminated_track_tag_is_malformed() {
        let err = parse_track_list("<transcript_list><track lang_code=\"en\"").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_unterminated_attribute_is_malformed() {
        let err =
            parse_track_list("<transcript_list><track lang_code=\"en/></transcript_list>")
                .unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_parse_transcript_decodes_and_maps() {
        let xml = r#"<transcript>
            <text start="1.5" dur="2.0">Hello &amp; world</text>
        </transcript>"#;
        let lines = parse_transcript(xml).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start, 1.5);
        assert_eq!(lines[0].duration, 2.0);
        assert_eq!(lines[0].text, "Hello & world");
    }

    #[test]
    fn test_blank_lines_are_dropped_and_order_kept() {
        let xml = r#"<transcript>
            <text start="0" dur="1">first</text>
            <text start="1" dur="1">   </text>
            <text start="2" dur="1"></text>
            <text start="3" dur="1"/>
            <text start="4" dur="1">second</text>
        </transcript>"#;
        let lines = parse_transcript(xml).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
        assert_eq!(lines[1].start, 4.0);
    }

    #[test]
    fn test_missing_and_invalid_timings_default_to_zero() {
        let xml = r#"<transcript>
            <text>no timings</text>
            <text start="abc" dur="-3.5">bad timings</text>
        </transcript>"#;
        let lines = parse_transcript(xml).unwrap();
        assert_eq!(lines[0].start, 0.0);
        assert_eq!(lines[0].duration, 0.0);
        assert_eq!(lines[1].start, 0.0);
        assert_eq!(lines[1].duration, 0.0);
    }

    #[test]
    fn test_empty_transcript_yields_no_lines() {
        let lines = parse_transcript("<transcript></transcript>").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_transcript_without_root_is_malformed() {
        let err = parse_transcript("<html>service unavailable</html>").unwrap_err();
        assert!(matches!(
            err,
            Error::Malformed {
                doc: UpstreamDoc::Transcript,
                ..
            }
        ));
    }

    #[test]
    fn test_track_list_root_does_not_satisfy_transcript_root() {
        // "<transcript_list" must not count as a "<transcript" root.
        let err = parse_transcript("<transcript_list></transcript_list>").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_missing_close_tag_is_malformed() {
        let err = parse_transcript("<transcript><text start=\"0\" dur=\"1\">oops").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_multiline_payload_and_quote_entity() {
        let xml = "<transcript><text start=\"0\" dur=\"1\">line one\nsaid &quot;hi&quot;</text></transcript>";
        let lines = parse_transcript(xml).unwrap();
        assert_eq!(lines[0].text, "line one\nsaid \"hi\"");
    }

    #[test]
    fn test_single_quoted_attributes() {
        let xml = "<transcript_list><track lang_code='en' kind='asr'/></transcript_list>";
        let tracks = parse_track_list(xml).unwrap();
        assert_eq!(tracks[0].lang_code, "en");
        assert!(tracks[0].is_asr());
    }
}
