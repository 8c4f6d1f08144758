//! Record projections consumed by the ranking engine

use crate::search::normalize::normalize;
use std::cmp::Ordering;

/// Describes how a record type is searched.
///
/// Implementations must return a tie-break key that is unique within any
/// candidate collection and ordered like the records' creation order;
/// otherwise rankings stop being reproducible.
pub trait SearchProjection<T> {
    /// Totally ordered, per-record unique key.
    type Key: Ord;

    /// Text the query is matched against.
    fn searchable_text<'a>(&self, item: &'a T) -> &'a str;

    /// Tie-break key used when relevance is equal.
    fn tie_break_key(&self, item: &T) -> Self::Key;

    /// Ordering applied when the query is blank.
    ///
    /// Defaults to alphabetical order on the normalized searchable text, so
    /// case and accents do not push names past "Z". Equal normalized text
    /// falls back to the raw text, then the tie-break key.
    fn browse_order(&self, a: &T, b: &T) -> Ordering {
        let (text_a, text_b) = (self.searchable_text(a), self.searchable_text(b));
        normalize(text_a)
            .cmp(&normalize(text_b))
            .then_with(|| text_a.cmp(text_b))
            .then_with(|| self.tie_break_key(a).cmp(&self.tie_break_key(b)))
    }
}

/// Projection assembled from two closures.
///
/// ```
/// use artisan_order_manager::search::{rank_and_filter, FnProjection};
///
/// struct Item {
///     id: u64,
///     name: String,
/// }
///
/// let items = vec![
///     Item { id: 1, name: "Poncho".into() },
///     Item { id: 2, name: "Manta".into() },
/// ];
/// let projection = FnProjection::new(|i: &Item| i.name.as_str(), |i: &Item| i.id);
/// let ranked = rank_and_filter(items, "man", &projection);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].id, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnProjection<F, G> {
    text_of: F,
    key_of: G,
}

impl<F, G> FnProjection<F, G> {
    pub fn new<T, K>(text_of: F, key_of: G) -> Self
    where
        K: Ord,
        F: Fn(&T) -> &str,
        G: Fn(&T) -> K,
    {
        Self { text_of, key_of }
    }
}

impl<T, K, F, G> SearchProjection<T> for FnProjection<F, G>
where
    K: Ord,
    F: Fn(&T) -> &str,
    G: Fn(&T) -> K,
{
    type Key = K;

    fn searchable_text<'a>(&self, item: &'a T) -> &'a str {
        (self.text_of)(item)
    }

    fn tie_break_key(&self, item: &T) -> K {
        (self.key_of)(item)
    }
}
