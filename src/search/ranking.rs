//! Substring matching and relevance ordering

use crate::search::normalize::normalize;
use crate::search::projection::SearchProjection;
use serde::{Deserialize, Serialize};

/// Where the query landed inside the candidate text.
///
/// Declaration order is rank order: prefix matches sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAnchor {
    Prefix = 0,
    Inner = 1,
}

/// Relevance of one candidate for one query.
///
/// Fields are compared in declaration order, lower is more relevant.
/// Positions and lengths are counted in chars of the normalized strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelevanceKey {
    pub anchor: MatchAnchor,
    pub first_match: usize,
    pub length_delta: usize,
}

impl RelevanceKey {
    /// `first_match` value for a text that does not contain the query.
    pub const NOT_FOUND: usize = usize::MAX;

    /// Compute the key for an already normalized text and query.
    pub fn compute(normalized_text: &str, normalized_query: &str) -> Self {
        let anchor = if normalized_text.starts_with(normalized_query) {
            MatchAnchor::Prefix
        } else {
            MatchAnchor::Inner
        };

        let first_match = normalized_text
            .find(normalized_query)
            .map(|byte_idx| normalized_text[..byte_idx].chars().count())
            .unwrap_or(Self::NOT_FOUND);

        let length_delta = normalized_text
            .chars()
            .count()
            .abs_diff(normalized_query.chars().count());

        Self {
            anchor,
            first_match,
            length_delta,
        }
    }

    pub fn is_match(&self) -> bool {
        self.first_match != Self::NOT_FOUND
    }
}

/// Filter and order candidates for a raw query.
///
/// A query that normalizes to nothing returns every candidate in the
/// projection's browse order. Otherwise only candidates whose normalized text
/// contains the normalized query survive, ordered by relevance and then by
/// tie-break key.
pub fn rank_and_filter<T, P>(candidates: Vec<T>, raw_query: &str, projection: &P) -> Vec<T>
where
    P: SearchProjection<T> + ?Sized,
{
    let query = normalize(raw_query.trim());

    if query.is_empty() {
        let mut browse = candidates;
        browse.sort_by(|a, b| projection.browse_order(a, b));
        return browse;
    }

    let mut ranked: Vec<(RelevanceKey, P::Key, T)> = candidates
        .into_iter()
        .filter_map(|item| {
            let text = normalize(projection.searchable_text(&item));
            let key = RelevanceKey::compute(&text, &query);
            if !key.is_match() {
                return None;
            }
            let tie_break = projection.tie_break_key(&item);
            Some((key, tie_break, item))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, _, item)| item).collect()
}
