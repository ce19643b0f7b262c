//! Ranking of claim reviews for display
//!
//! - **Filter**: reviews without a parseable review date are dropped.
//! - **Deduplicate**: one review per source URL, first occurrence wins. Reviews
//!   without a URL are never treated as duplicates of each other.
//! - **Order**: most recent review date first; same-day reviews keep input order.
//! - **Cap**: at most `top_n` reviews are returned.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDate};

use crate::model::ClaimReview;

/// Parse a review date as a calendar date
///
/// Accepts RFC 3339 timestamps (what the search API returns) and plain `YYYY-MM-DD`.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Rank `reviews` newest first and keep the top `top_n`
pub fn rank(reviews: Vec<ClaimReview>, top_n: NonZeroUsize) -> Vec<ClaimReview> {
    let total = reviews.len();
    let mut seen_urls = HashSet::new();

    let mut dated: Vec<(NaiveDate, ClaimReview)> = reviews
        .into_iter()
        .filter_map(|review| {
            let date = review.review_date.as_deref().and_then(parse_review_date)?;
            Some((date, review))
        })
        .filter(|(_, review)| match &review.source_url {
            Some(url) => seen_urls.insert(url.clone()),
            None => true,
        })
        .collect();

    // sort_by is stable
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));
    dated.truncate(top_n.get());

    tracing::debug!(
        total = total,
        ranked = dated.len(),
        top_n = top_n.get(),
        "Ranked claim reviews"
    );

    dated.into_iter().map(|(_, review)| review).collect()
}
