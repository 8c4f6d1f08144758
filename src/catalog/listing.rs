//! Per-entity search projections, list views and picker items

use crate::models::{Client, Money, Order, OrderLine, Product};
use crate::search::{rank_and_filter, SearchProjection};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};

/// Clients matched on their name
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientsByName;

impl SearchProjection<Client> for ClientsByName {
    type Key = u64;

    fn searchable_text<'a>(&self, item: &'a Client) -> &'a str {
        &item.name
    }

    fn tie_break_key(&self, item: &Client) -> u64 {
        item.id
    }
}

/// Products matched on their name
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductsByName;

impl SearchProjection<Product> for ProductsByName {
    type Key = u64;

    fn searchable_text<'a>(&self, item: &'a Product) -> &'a str {
        &item.name
    }

    fn tie_break_key(&self, item: &Product) -> u64 {
        item.id
    }
}

/// Order joined with its client's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderListing {
    #[serde(flatten)]
    pub order: Order,

    /// Empty when the client no longer exists
    pub client_name: String,
}

/// Orders matched on the client name; browsed by date
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdersByClientName;

impl SearchProjection<OrderListing> for OrdersByClientName {
    type Key = u64;

    fn searchable_text<'a>(&self, item: &'a OrderListing) -> &'a str {
        &item.client_name
    }

    fn tie_break_key(&self, item: &OrderListing) -> u64 {
        item.order.id
    }

    fn browse_order(&self, a: &OrderListing, b: &OrderListing) -> Ordering {
        a.order
            .ordered_at
            .cmp(&b.order.ordered_at)
            .then_with(|| a.order.id.cmp(&b.order.id))
    }
}

/// Order line joined with its product's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineListing {
    #[serde(flatten)]
    pub line: OrderLine,

    /// Empty when the product no longer exists
    pub product_name: String,

    pub subtotal: Money,
}

impl LineListing {
    pub fn new(line: OrderLine, product_name: String) -> Self {
        let subtotal = line.subtotal();
        Self {
            line,
            product_name,
            subtotal,
        }
    }
}

/// Order lines matched on the product name
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesByProductName;

impl SearchProjection<LineListing> for LinesByProductName {
    type Key = u64;

    fn searchable_text<'a>(&self, item: &'a LineListing) -> &'a str {
        &item.product_name
    }

    fn tie_break_key(&self, item: &LineListing) -> u64 {
        item.line.id
    }
}

/// How the client picker interprets its query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    /// Accent-insensitive name search
    #[default]
    Name,
    /// Digits of the identity card number
    Ci,
}

impl PickerMode {
    /// Unknown or missing modes fall back to name search.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|mode| mode.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// Client picker in `ci` mode.
///
/// The query's digits must appear in the carnet's decimal form; results are
/// ordered by carnet then id. A blank query browses by name.
pub fn filter_by_carnet(clients: Vec<Client>, raw_query: &str) -> Vec<Client> {
    let query = raw_query.trim();
    if query.is_empty() {
        return rank_and_filter(clients, query, &ClientsByName);
    }

    let digits: String = query.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut matches: Vec<Client> = clients
        .into_iter()
        .filter(|client| client.carnet.to_string().contains(digits.as_str()))
        .collect();
    matches.sort_by(|a, b| a.carnet.cmp(&b.carnet).then_with(|| a.id.cmp(&b.id)));
    matches
}

/// Client picker row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPick {
    pub id: u64,
    pub name: String,
    pub ci: u64,
    pub address: String,
}

impl From<Client> for ClientPick {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            ci: client.carnet,
            address: client.address,
        }
    }
}

/// Product picker row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPick {
    pub id: u64,
    pub name: String,
    pub price: Money,
}

impl From<Product> for ProductPick {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}
