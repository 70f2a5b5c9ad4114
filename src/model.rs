use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// One normalized product review. Field names are the wire format for both
/// the JSON array and NDJSON exports; absent optional fields serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub source_id: String,
    pub record_id: String,
    pub author_name: Option<String>,
    pub rating: u8,
    pub title: Option<String>,
    pub body: Option<String>,
    pub verified: bool,
    pub date: Option<String>,
    pub variant: Option<String>,
    pub helpful_count: u32,
}

/// The full star scale. An allowed set equal to this means "no filtering".
pub const FULL_SCALE: [u8; 5] = [1, 2, 3, 4, 5];

/// Drop later records that repeat an earlier `(source_id, record_id)` key.
/// First occurrence wins; relative order is preserved.
pub fn dedup_reviews(reviews: Vec<Review>) -> Vec<Review> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique = Vec::with_capacity(reviews.len());
    for review in reviews {
        let key = (review.source_id.clone(), review.record_id.clone());
        if seen.insert(key) {
            unique.push(review);
        }
    }
    unique
}

/// Retain only reviews whose rating is in the allowed set.
pub fn filter_by_stars(reviews: Vec<Review>, allowed: &BTreeSet<u8>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|r| allowed.contains(&r.rating))
        .collect()
}

/// True when the allowed set actually narrows the scale: non-empty and not
/// the full 1-5 range.
pub fn narrows_scale(allowed: &BTreeSet<u8>) -> bool {
    !allowed.is_empty() && *allowed != FULL_SCALE.iter().copied().collect()
}

// ── Tests ──
