pub mod date;
pub mod selectors;
pub mod text;

use scraper::{ElementRef, Html, Selector};

use crate::model::Review;
use text::{clean_text, parse_helpful_votes, parse_rating};

/// Extract every review fragment from one page of markup, in document order.
/// Each field is derived independently; a missing or malformed field takes its
/// default and never prevents the rest of the fragment from producing a record.
pub fn reviews(source_id: &str, html: &str) -> Vec<Review> {
    let doc = Html::parse_document(html);
    doc.select(&selectors::REVIEW)
        .map(|fragment| extract_one(source_id, fragment))
        .collect()
}

/// True while the page still links to a next page of results.
pub fn has_next_page(html: &str) -> bool {
    let doc = Html::parse_document(html);
    doc.select(&selectors::NEXT_PAGE).next().is_some()
}

fn extract_one(source_id: &str, fragment: ElementRef) -> Review {
    let record_id = fragment.value().attr("id").unwrap_or("").to_string();

    let author_name = first_text(fragment, &selectors::AUTHOR);
    let rating = first_text(fragment, &selectors::RATING)
        .and_then(|t| parse_rating(&t))
        .unwrap_or(0);
    let title = first_text(fragment, &selectors::TITLE);
    let body = first_text(fragment, &selectors::BODY);
    let verified = fragment.select(&selectors::VERIFIED).next().is_some();
    let date = first_text(fragment, &selectors::DATE)
        .and_then(|t| date::parse_fuzzy(&t))
        .map(|d| d.format("%Y-%m-%d").to_string());
    let variant = first_text(fragment, &selectors::VARIANT);
    let helpful_count = first_text(fragment, &selectors::HELPFUL)
        .map(|t| parse_helpful_votes(&t))
        .unwrap_or(0);

    Review {
        source_id: source_id.to_string(),
        record_id,
        author_name,
        rating,
        title,
        body,
        verified,
        date,
        variant,
        helpful_count,
    }
}

/// Walk the fallback list in priority order; the first selector that matches
/// an element wins, even if that element's text then cleans down to nothing.
fn first_text(fragment: ElementRef, fallbacks: &[Selector]) -> Option<String> {
    fallbacks
        .iter()
        .find_map(|sel| fragment.select(sel).next())
        .and_then(|el| clean_text(&el.text().collect::<String>()))
}

// ── Tests ──
