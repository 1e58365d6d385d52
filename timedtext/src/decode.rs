/// Decode the five entity forms the upstream caption documents use.
///
/// Literal substitution in a fixed order, `&amp;` first. This is not a
/// generic entity decoder: numeric references other than `&#39;` and
/// named entities beyond these five pass through unchanged, matching
/// the upstream contract.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}
