use crate::error::{AppError, Result};
use crate::models::{
    Client, ClientDraft, Money, Order, OrderDraft, OrderLine, OrderLineDraft, Product,
    ProductDraft,
};
use crate::state::CatalogStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic id source starting at 1
#[derive(Debug)]
struct Sequence(AtomicU64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// In-memory catalog store (for MVP and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    clients: Arc<DashMap<u64, Client>>,
    products: Arc<DashMap<u64, Product>>,
    orders: Arc<DashMap<u64, Order>>,
    lines: Arc<DashMap<u64, OrderLine>>,
    client_ids: Arc<Sequence>,
    product_ids: Arc<Sequence>,
    order_ids: Arc<Sequence>,
    line_ids: Arc<Sequence>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(DashMap::new()),
            products: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            lines: Arc::new(DashMap::new()),
            client_ids: Arc::new(Sequence::new()),
            product_ids: Arc::new(Sequence::new()),
            order_ids: Arc::new(Sequence::new()),
            line_ids: Arc::new(Sequence::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn replace<T: Clone>(map: &DashMap<u64, T>, id: u64, value: &T, entity: &str) -> Result<()> {
    match map.get_mut(&id) {
        Some(mut entry) => {
            *entry = value.clone();
            Ok(())
        }
        None => Err(AppError::not_found(entity, id)),
    }
}

fn snapshot<T: Clone>(map: &DashMap<u64, T>) -> Vec<T> {
    map.iter().map(|entry| entry.value().clone()).collect()
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn insert_client(&self, draft: ClientDraft) -> Result<Client> {
        let client = Client::from_draft(self.client_ids.next(), draft);
        self.clients.insert(client.id, client.clone());
        tracing::debug!(client_id = client.id, "Client saved");
        Ok(client)
    }

    async fn get_client(&self, id: u64) -> Result<Option<Client>> {
        Ok(self.clients.get(&id).map(|entry| entry.clone()))
    }

    async fn update_client(&self, client: &Client) -> Result<()> {
        replace(&self.clients, client.id, client, "Client")?;
        tracing::debug!(client_id = client.id, "Client updated");
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(snapshot(&self.clients))
    }

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product> {
        let product = Product::from_draft(self.product_ids.next(), draft);
        self.products.insert(product.id, product.clone());
        tracing::debug!(product_id = product.id, "Product saved");
        Ok(product)
    }

    async fn get_product(&self, id: u64) -> Result<Option<Product>> {
        Ok(self.products.get(&id).map(|entry| entry.clone()))
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        replace(&self.products, product.id, product, "Product")?;
        tracing::debug!(product_id = product.id, "Product updated");
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(snapshot(&self.products))
    }

    async fn insert_order(&self, draft: OrderDraft) -> Result<Order> {
        let order = Order::from_draft(self.order_ids.next(), draft);
        self.orders.insert(order.id, order.clone());
        tracing::debug!(order_id = order.id, "Order saved");
        Ok(order)
    }

    async fn get_order(&self, id: u64) -> Result<Option<Order>> {
        Ok(self.orders.get(&id).map(|entry| entry.clone()))
    }

    async fn update_order(&self, order: &Order) -> Result<()> {
        replace(&self.orders, order.id, order, "Order")?;
        tracing::debug!(order_id = order.id, "Order updated");
        Ok(())
    }

    async fn delete_order(&self, id: u64) -> Result<()> {
        if self.orders.remove(&id).is_none() {
            return Err(AppError::not_found("Order", id));
        }

        let before = self.lines.len();
        self.lines.retain(|_, line| line.order_id != id);
        tracing::debug!(
            order_id = id,
            lines_removed = before.saturating_sub(self.lines.len()),
            "Order deleted"
        );
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(snapshot(&self.orders))
    }

    async fn insert_line(
        &self,
        order_id: u64,
        draft: OrderLineDraft,
        unit_price: Money,
    ) -> Result<OrderLine> {
        if !self.orders.contains_key(&order_id) {
            return Err(AppError::not_found("Order", order_id));
        }

        let line = OrderLine {
            id: self.line_ids.next(),
            order_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price,
        };
        self.lines.insert(line.id, line.clone());
        tracing::debug!(line_id = line.id, order_id, "Order line saved");
        Ok(line)
    }

    async fn get_line(&self, id: u64) -> Result<Option<OrderLine>> {
        Ok(self.lines.get(&id).map(|entry| entry.clone()))
    }

    async fn update_line(&self, line: &OrderLine) -> Result<()> {
        replace(&self.lines, line.id, line, "Order line")?;
        tracing::debug!(line_id = line.id, "Order line updated");
        Ok(())
    }

    async fn delete_line(&self, id: u64) -> Result<()> {
        if self.lines.remove(&id).is_some() {
            tracing::debug!(line_id = id, "Order line deleted");
            Ok(())
        } else {
            Err(AppError::not_found("Order line", id))
        }
    }

    async fn list_lines(&self, order_id: u64) -> Result<Vec<OrderLine>> {
        Ok(self
            .lines
            .iter()
            .filter(|entry| entry.order_id == order_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}
