//! Pull `[Type: …]` tags out of accident log comments.

use super::{AccidentLog, AccidentTypeResult};
use regex::Regex;
use std::sync::LazyLock;

/// Matches `[Type: value]`. The keyword is case-insensitive.
static TYPE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[Type: ([^\]]+)\]").expect("tag pattern should be valid")
});

/// Extract the accident type from an accident log comment.
///
/// Only the first `[Type: …]` tag counts. Returns `None` if there is no tag,
/// or if the first tag is only whitespace.
///
/// ```
/// use procore_relay::accidents::extract_accident_type;
///
/// assert_eq!(
///     extract_accident_type("Slipped on ice. [TYPE:  Slip/Fall ]"),
///     Some("Slip/Fall"),
/// );
/// assert_eq!(extract_accident_type("Slipped on ice."), None);
/// ```
#[must_use]
pub fn extract_accident_type(comments: &str) -> Option<&str> {
    TYPE_TAG
        .captures(comments)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
}

/// Select the logs with an accident type, optionally only of one type.
///
/// `accident_type` is compared case-insensitively. Order is preserved.
#[must_use]
pub fn filter_logs(
    logs: &[AccidentLog],
    accident_type: Option<&str>,
) -> Vec<AccidentTypeResult> {
    logs.iter()
        .filter_map(|log| {
            let extracted = extract_accident_type(&log.comments)?;
            if let Some(wanted) = accident_type
                && !matches_type(extracted, wanted)
            {
                return None;
            }

            Some(AccidentTypeResult {
                accident_log_id: log.id,
                accident_type: extracted.to_owned(),
                date: log.date.clone(),
                reported_by: log.created_by.name.clone(),
                comments: log.comments.clone(),
            })
        })
        .collect()
}

/// Case-insensitive comparison of accident types.
///
/// Folds character by character, so a final `Σ` still matches `σ`.
fn matches_type(extracted: &str, wanted: &str) -> bool {
    extracted
        .chars()
        .flat_map(char::to_lowercase)
        .eq(wanted.chars().flat_map(char::to_lowercase))
}
