use chrono::NaiveDate;

/// Formats tried against the whole trimmed string before falling back to the
/// token scan.
const FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
];

/// Parse a loosely-formatted date out of free text, tolerating surrounding
/// prose such as "Reviewed in the United States on June 3, 2023". Returns
/// `None` when no date can be recovered; never panics.
pub fn parse_fuzzy(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    scan_tokens(trimmed)
}

/// Locate a month name in the token stream, then pick up the day from the
/// nearest in-range number (following tokens first, then preceding) and the
/// year from the first four-digit number anywhere.
fn scan_tokens(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect();

    let (month_idx, month) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| month_token(t).map(|m| (i, m)))?;

    let year = tokens
        .iter()
        .find_map(|t| t.parse::<i32>().ok().filter(|y| (1000..=9999).contains(y)))?;

    let day = tokens[month_idx + 1..]
        .iter()
        .find_map(|t| t.parse::<u32>().ok().filter(|d| (1..=31).contains(d)))
        .or_else(|| {
            tokens[..month_idx]
                .iter()
                .rev()
                .find_map(|t| t.parse::<u32>().ok().filter(|d| (1..=31).contains(d)))
        })?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_token(token: &str) -> Option<u32> {
    match token {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

// ── Tests ──
