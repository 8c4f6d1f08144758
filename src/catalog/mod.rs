//! Clients, products, orders and order lines on top of the search engine
//!
//! [`CatalogService`] owns the write rules (field validation, uniqueness,
//! order totals) and exposes one search entry point per list view and picker.

pub mod email;
pub mod listing;
pub mod service;

pub use email::{verifier_from_config, AcceptAllDomains, DomainAllowList, DomainVerifier};
pub use listing::{
    filter_by_carnet, ClientPick, ClientsByName, LineListing, LinesByProductName, OrderListing,
    OrdersByClientName, PickerMode, ProductPick, ProductsByName,
};
pub use service::{CatalogService, Today};
