//! One-call search: rank, filter and paginate

use crate::search::pagination::{paginate, Page, PageRequest};
use crate::search::projection::SearchProjection;
use crate::search::ranking::rank_and_filter;

/// Rank `candidates` against `raw_query` and return the requested page.
///
/// The candidate collection is consumed; callers snapshot their store first.
pub fn search_page<T, P>(
    candidates: Vec<T>,
    raw_query: &str,
    request: PageRequest,
    projection: &P,
) -> Page<T>
where
    P: SearchProjection<T> + ?Sized,
{
    let candidate_count = candidates.len();
    let ranked = rank_and_filter(candidates, raw_query, projection);
    let page = paginate(ranked, request);

    tracing::debug!(
        query = raw_query,
        candidates = candidate_count,
        matched = page.total_count,
        page = page.page,
        total_pages = page.total_pages,
        "Search page computed"
    );

    page
}
