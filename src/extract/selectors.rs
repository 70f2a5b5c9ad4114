//! CSS selectors for the review page markup.
//!
//! Per-field fallback lists are ordered by priority; the first selector that
//! matches an element wins. Update here when the source layout changes.

use std::sync::LazyLock;

use scraper::Selector;

fn parse_all(sources: &[&str]) -> Vec<Selector> {
    sources.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// Container marking one review fragment.
pub static REVIEW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-hook='review']").unwrap());

pub static AUTHOR: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_all(&["span.a-profile-name"]));

pub static RATING: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        "i[data-hook='review-star-rating'] span",
        "i[data-hook='cmps-review-star-rating'] span",
    ])
});

pub static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        "a[data-hook='review-title'] span",
        "span[data-hook='review-title'] span",
    ])
});

pub static BODY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        "span[data-hook='review-body'] span",
        "span[data-hook='review-body']",
    ])
});

/// Verified-purchase badge; presence only, text is ignored.
pub static VERIFIED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span[data-hook='avp-badge']").unwrap());

pub static DATE: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_all(&["span[data-hook='review-date']"]));

// Variant sometimes sits in a small bullet link instead of the format strip
pub static VARIANT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        "span.a-color-secondary[data-hook='format-strip']",
        "a.a-size-mini",
    ])
});

pub static HELPFUL: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_all(&["span[data-hook='helpful-vote-statement']"]));

/// Pagination link; absent on the last page.
pub static NEXT_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.a-last a").unwrap());

// ── Tests ──
