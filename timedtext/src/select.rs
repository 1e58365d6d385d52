use crate::types::CaptionTrack;

/// Pick the best caption track for a language preference.
///
/// Returns `None` only when `tracks` is empty. Priority order:
/// 1. `lang` other than "auto": first track whose `lang_code` starts
///    with `lang`, compared case-insensitively.
/// 2. First auto-generated ("asr") track.
/// 3. First track flagged as the upstream default.
/// 4. First track in list order.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], lang: &str) -> Option<&'a CaptionTrack> {
    if lang != "auto" {
        let wanted = lang.to_lowercase();
        if let Some(track) = tracks
            .iter()
            .find(|t| t.lang_code.to_lowercase().starts_with(&wanted))
        {
            return Some(track);
        }
    }

    tracks
        .iter()
        .find(|t| t.is_asr())
        .or_else(|| tracks.iter().find(|t| t.is_default))
        .or_else(|| tracks.first())
}
