pub mod factory;
pub mod store;

pub use factory::{create_in_memory_store, create_store};
pub use store::*;

use crate::error::Result;
use crate::models::{
    Client, ClientDraft, Money, Order, OrderDraft, OrderLine, OrderLineDraft, Product,
    ProductDraft,
};
use async_trait::async_trait;

/// Trait for catalog storage operations
///
/// Identifiers are assigned by the store, start at 1 and grow with creation
/// order, so they double as the search tie-break key.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a client and return it with its new id
    async fn insert_client(&self, draft: ClientDraft) -> Result<Client>;

    async fn get_client(&self, id: u64) -> Result<Option<Client>>;

    async fn update_client(&self, client: &Client) -> Result<()>;

    /// Snapshot of every client, in no particular order
    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product>;

    async fn get_product(&self, id: u64) -> Result<Option<Product>>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Insert an order with a zero total
    async fn insert_order(&self, draft: OrderDraft) -> Result<Order>;

    async fn get_order(&self, id: u64) -> Result<Option<Order>>;

    async fn update_order(&self, order: &Order) -> Result<()>;

    /// Delete an order together with its lines
    async fn delete_order(&self, id: u64) -> Result<()>;

    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn insert_line(
        &self,
        order_id: u64,
        draft: OrderLineDraft,
        unit_price: Money,
    ) -> Result<OrderLine>;

    async fn get_line(&self, id: u64) -> Result<Option<OrderLine>>;

    async fn update_line(&self, line: &OrderLine) -> Result<()>;

    async fn delete_line(&self, id: u64) -> Result<()>;

    /// Lines of one order, in no particular order
    async fn list_lines(&self, order_id: u64) -> Result<Vec<OrderLine>>;
}
