use crate::error::AuditError;
use url::{form_urlencoded, Url};

const STRIPPED_PREFIXES: [&str; 3] = ["https://", "http://", "www."];

/// Canonical form of a user-supplied site address: trimmed, lower-cased, any
/// scheme and leading `www.` removed, then re-prefixed with `https://`.
pub fn normalize_url(raw: &str) -> Result<String, AuditError> {
    let lowered = raw.trim().to_lowercase();
    let mut rest = lowered.as_str();

    // Repeat so that inputs like "https://www.www.x" settle in one pass.
    while let Some(stripped) = STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped;
    }

    if rest.is_empty() {
        return Err(AuditError::Validation("URL is required".to_string()));
    }

    let normalized = format!("https://{}", rest);
    match Url::parse(&normalized) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(normalized),
        _ => Err(AuditError::Validation(format!("not a valid URL: {}", raw.trim()))),
    }
}

/// First value of `key` in a raw query string. Duplicates and unrelated
/// pairs are tolerated.
pub fn first_query_value(query: Option<&str>, key: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}
