//! Accent-insensitive search, relevance ranking and windowed pagination
//!
//! Every list and picker in the service goes through the same pipeline:
//!
//! ```text
//!   raw query ──► normalize ──┐
//!                             ▼
//!   candidates ──► rank_and_filter (SearchProjection) ──► paginate ──► Page<T>
//! ```
//!
//! - **Normalization**: Unicode decomposition, combining marks removed, lower case
//! - **Ranking**: prefix matches first, then earlier matches, then closer lengths,
//!   then the record's tie-break key
//! - **Browse order**: a blank query keeps every candidate in the projection's
//!   browse order
//! - **Pagination**: clamped page sizes and a ten page navigation window
//!
//! # Example
//!
//! ```
//! use artisan_order_manager::search::{search_page, FnProjection, PageRequest};
//!
//! struct Product {
//!     id: u64,
//!     name: String,
//! }
//!
//! let products: Vec<Product> = ["Sombrero", "Poncho", "Tapiz"]
//!     .iter()
//!     .zip(1..)
//!     .map(|(name, id)| Product { id, name: name.to_string() })
//!     .collect();
//! let projection = FnProjection::new(|p: &Product| p.name.as_str(), |p: &Product| p.id);
//!
//! let page = search_page(products, "o", PageRequest::default(), &projection);
//! assert_eq!(page.total_count, 2);
//! assert_eq!(page.items[0].name, "Poncho");
//! ```

mod normalize;
mod pagination;
mod projection;
mod ranking;
mod service;

pub use normalize::normalize;
pub use pagination::{
    paginate, Page, PageRequest, PageWindow, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_WINDOW_SIZE,
};
pub use projection::{FnProjection, SearchProjection};
pub use ranking::{rank_and_filter, MatchAnchor, RelevanceKey};
pub use service::search_page;
