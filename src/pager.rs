use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::extract;
use crate::fetch::Fetcher;
use crate::model::{dedup_reviews, filter_by_stars, narrows_scale, Review};

/// Drives pagination for one identifier: fetch, extract, accumulate, stop.
///
/// Fetch failures and empty pages end pagination early; the partial
/// accumulation is returned as-is, never an error. A failed page is not
/// retried.
pub struct ReviewScraper {
    fetcher: Fetcher,
    max_reviews: usize,
    delay_secs: f64,
    allowed_stars: BTreeSet<u8>,
}

impl ReviewScraper {
    pub fn new(
        fetcher: Fetcher,
        max_reviews: usize,
        delay_secs: f64,
        allowed_stars: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            fetcher,
            max_reviews,
            delay_secs,
            allowed_stars: allowed_stars.into_iter().collect(),
        }
    }

    /// All reviews for one identifier across pages, deduplicated by
    /// `(source_id, record_id)` and star-filtered once at the end. The max is
    /// a stopping threshold, not a cap: the result may exceed it by up to one
    /// page since no truncation is applied.
    pub async fn scrape_reviews(&self, source_id: &str) -> Vec<Review> {
        let mut accumulated: Vec<Review> = Vec::new();
        let mut page: u32 = 1;

        while accumulated.len() < self.max_reviews {
            let Some(html) = self.fetcher.fetch(source_id, page).await else {
                info!(
                    "stopping pagination for {} after fetch failure on page {}",
                    source_id, page
                );
                break;
            };

            let page_reviews = extract::reviews(source_id, &html);
            debug!(
                "parsed {} reviews from {} page {}",
                page_reviews.len(),
                source_id,
                page
            );

            if page_reviews.is_empty() {
                info!(
                    "no reviews on {} page {}, assuming end of pages",
                    source_id, page
                );
                break;
            }

            accumulated.extend(page_reviews);
            accumulated = dedup_reviews(accumulated);

            if accumulated.len() >= self.max_reviews {
                info!(
                    "reached max of {} reviews for {}",
                    self.max_reviews, source_id
                );
                break;
            }

            if !extract::has_next_page(&html) {
                info!("no next page link for {} after page {}", source_id, page);
                break;
            }

            page += 1;
            if self.delay_secs > 0.0 {
                tokio::time::sleep(Duration::from_secs_f64(self.delay_secs)).await;
            }
        }

        if narrows_scale(&self.allowed_stars) {
            accumulated = filter_by_stars(accumulated, &self.allowed_stars);
        }

        accumulated
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FULL_SCALE;

    fn fragment(id: &str, rating: u8) -> String {
        format!(
            r#"<div id="{id}" data-hook="review">
                 <span class="a-profile-name">Reviewer</span>
                 <i data-hook="review-star-rating"><span>{rating}.0 out of 5 stars</span></i>
                 <span data-hook="review-body"><span>Fine.</span></span>
               </div>"#
        )
    }

    fn page(fragments: &[String], has_next: bool) -> String {
        let pagination = if has_next {
            r##"<ul class="a-pagination"><li class="a-last"><a href="#">Next</a></li></ul>"##
        } else {
            ""
        };
        format!(
            "<html><body><div id=\"cm_cr-review_list\">{}</div>{}</body></html>",
            fragments.concat(),
            pagination
        )
    }

    fn scraper_for(server: &mockito::Server, max: usize, stars: &[u8]) -> ReviewScraper {
        let template = format!(
            "{}/product-reviews/{{asin}}?pageNumber={{page}}",
            server.url()
        );
        let fetcher = Fetcher::new(&template, None, 10).unwrap();
        ReviewScraper::new(fetcher, max, 0.0, stars.iter().copied())
    }

    #[tokio::test]
    async fn two_page_run_with_duplicate_and_empty_tail() {
        // Page 1: ten fragments, two sharing a record id; page 2 advertises a
        // next page but carries no fragments. Expect 9 records and a halt on
        // the empty page with no third fetch.
        let mut server = mockito::Server::new_async().await;

        let mut fragments: Vec<String> = (1..=9).map(|i| fragment(&format!("R{i}"), 5)).collect();
        fragments.push(fragment("R1", 2));

        let p1 = server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(200)
            .with_body(page(&fragments, true))
            .create_async()
            .await;
        let p2 = server
            .mock("GET", "/product-reviews/X1?pageNumber=2")
            .with_status(200)
            .with_body(page(&[], true))
            .create_async()
            .await;
        let p3 = server
            .mock("GET", "/product-reviews/X1?pageNumber=3")
            .expect(0)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 50, &FULL_SCALE);
        let reviews = scraper.scrape_reviews("X1").await;

        assert_eq!(reviews.len(), 9);
        // The first occurrence of R1 (rating 5) won the dedup
        assert!(reviews.iter().all(|r| r.rating == 5));
        p1.assert_async().await;
        p2.assert_async().await;
        p3.assert_async().await;
    }

    #[tokio::test]
    async fn missing_next_marker_halts_below_max() {
        let mut server = mockito::Server::new_async().await;
        let fragments: Vec<String> = (1..=3).map(|i| fragment(&format!("R{i}"), 4)).collect();

        server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(200)
            .with_body(page(&fragments, false))
            .create_async()
            .await;
        let p2 = server
            .mock("GET", "/product-reviews/X1?pageNumber=2")
            .expect(0)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 50, &FULL_SCALE);
        let reviews = scraper.scrape_reviews("X1").await;

        assert_eq!(reviews.len(), 3);
        p2.assert_async().await;
    }

    #[tokio::test]
    async fn threshold_reached_mid_page_stops_without_truncating() {
        let mut server = mockito::Server::new_async().await;
        let fragments: Vec<String> = (1..=5).map(|i| fragment(&format!("R{i}"), 4)).collect();

        server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(200)
            .with_body(page(&fragments, true))
            .create_async()
            .await;
        let p2 = server
            .mock("GET", "/product-reviews/X1?pageNumber=2")
            .expect(0)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 3, &FULL_SCALE);
        let reviews = scraper.scrape_reviews("X1").await;

        // Max is a threshold: the whole page stays, nothing beyond is fetched
        assert_eq!(reviews.len(), 5);
        p2.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_failure_returns_partial_result() {
        let mut server = mockito::Server::new_async().await;
        let fragments: Vec<String> = (1..=2).map(|i| fragment(&format!("R{i}"), 5)).collect();

        server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(200)
            .with_body(page(&fragments, true))
            .create_async()
            .await;
        server
            .mock("GET", "/product-reviews/X1?pageNumber=2")
            .with_status(503)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 50, &FULL_SCALE);
        let reviews = scraper.scrape_reviews("X1").await;

        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn immediate_fetch_failure_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(404)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 50, &FULL_SCALE);
        assert!(scraper.scrape_reviews("X1").await.is_empty());
    }

    #[tokio::test]
    async fn star_filter_applies_once_after_all_pages() {
        let mut server = mockito::Server::new_async().await;
        let fragments = vec![
            fragment("R1", 5),
            fragment("R2", 3),
            fragment("R3", 1),
            fragment("R4", 5),
        ];

        server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .with_status(200)
            .with_body(page(&fragments, false))
            .create_async()
            .await;

        let scraper = scraper_for(&server, 50, &[5]);
        let reviews = scraper.scrape_reviews("X1").await;

        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.rating == 5));
    }

    #[tokio::test]
    async fn zero_max_never_fetches() {
        let mut server = mockito::Server::new_async().await;
        let p1 = server
            .mock("GET", "/product-reviews/X1?pageNumber=1")
            .expect(0)
            .create_async()
            .await;

        let scraper = scraper_for(&server, 0, &FULL_SCALE);
        assert!(scraper.scrape_reviews("X1").await.is_empty());
        p1.assert_async().await;
    }
}
