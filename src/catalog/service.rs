use crate::catalog::email::DomainVerifier;
use crate::catalog::listing::{
    filter_by_carnet, ClientPick, ClientsByName, LineListing, LinesByProductName, OrderListing,
    OrdersByClientName, PickerMode, ProductPick, ProductsByName,
};
use crate::error::{AppError, Result};
use crate::models::{
    order_date_floor, Client, ClientDraft, Money, Order, OrderDraft, OrderLine, OrderLineDraft,
    Product, ProductDraft,
};
use crate::search::{paginate, search_page, Page, PageRequest};
use crate::state::CatalogStore;
use chrono::{Local, NaiveDate};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors};

/// Source of "today" for order date checks
pub type Today = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Validation, uniqueness and order-total rules over a [`CatalogStore`]
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    verifier: Arc<dyn DomainVerifier>,
    today: Today,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, verifier: Arc<dyn DomainVerifier>) -> Self {
        Self {
            store,
            verifier,
            today: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the clock used for the "not in the past" order date rule
    pub fn with_today(mut self, today: Today) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    // ---- clients ----

    pub async fn create_client(&self, draft: ClientDraft) -> Result<Client> {
        let draft = self.check_client(draft, None).await?;
        let client = self.store.insert_client(draft).await?;
        tracing::info!(client_id = client.id, "Client created");
        Ok(client)
    }

    pub async fn update_client(&self, id: u64, draft: ClientDraft) -> Result<Client> {
        let mut client = self.get_client(id).await?;
        let draft = self.check_client(draft, Some(id)).await?;
        client.apply(draft);
        self.store.update_client(&client).await?;
        tracing::info!(client_id = id, "Client updated");
        Ok(client)
    }

    pub async fn get_client(&self, id: u64) -> Result<Client> {
        self.store
            .get_client(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client", id))
    }

    pub async fn search_clients(&self, query: &str, request: PageRequest) -> Result<Page<Client>> {
        let clients = self.store.list_clients().await?;
        Ok(search_page(clients, query, request, &ClientsByName))
    }

    pub async fn pick_clients(
        &self,
        query: &str,
        mode: PickerMode,
        request: PageRequest,
    ) -> Result<Page<ClientPick>> {
        let clients = self.store.list_clients().await?;
        let page = match mode {
            PickerMode::Name => search_page(clients, query, request, &ClientsByName),
            PickerMode::Ci => paginate(filter_by_carnet(clients, query), request),
        };
        Ok(page.map(ClientPick::from))
    }

    async fn check_client(&self, draft: ClientDraft, editing: Option<u64>) -> Result<ClientDraft> {
        let draft = draft.trimmed();
        let mut errors = field_errors(&draft);

        // Domain lookups only make sense for well-formed addresses.
        if !has_error(&errors, "email") {
            let accepted = match draft.email_domain() {
                Some(domain) => self.verifier.accepts(domain).await,
                None => false,
            };
            if !accepted {
                add_error(
                    &mut errors,
                    "email",
                    "email_domain",
                    "email domain does not accept mail",
                );
            }
        }
        fail_on(errors)?;

        let name = draft.name.to_lowercase();
        let duplicate = self.store.list_clients().await?.into_iter().any(|other| {
            Some(other.id) != editing
                && other.carnet == draft.carnet
                && other.name.to_lowercase() == name
        });
        if duplicate {
            return Err(AppError::Conflict(format!(
                "a client named '{}' with carnet {} already exists",
                draft.name, draft.carnet
            )));
        }

        Ok(draft)
    }

    // ---- products ----

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        let draft = self.check_product(draft, None).await?;
        let product = self.store.insert_product(draft).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        let draft = self.check_product(draft, Some(id)).await?;
        product.apply(draft);
        self.store.update_product(&product).await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn get_product(&self, id: u64) -> Result<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", id))
    }

    pub async fn search_products(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<Product>> {
        let products = self.store.list_products().await?;
        Ok(search_page(products, query, request, &ProductsByName))
    }

    pub async fn pick_products(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<ProductPick>> {
        Ok(self
            .search_products(query, request)
            .await?
            .map(ProductPick::from))
    }

    async fn check_product(
        &self,
        draft: ProductDraft,
        editing: Option<u64>,
    ) -> Result<ProductDraft> {
        let draft = draft.trimmed();
        fail_on(field_errors(&draft))?;

        let name = draft.name.to_lowercase();
        let duplicate = self
            .store
            .list_products()
            .await?
            .into_iter()
            .any(|other| Some(other.id) != editing && other.name.to_lowercase() == name);
        if duplicate {
            return Err(AppError::Conflict(format!(
                "a product named '{}' already exists",
                draft.name
            )));
        }

        Ok(draft)
    }

    // ---- orders ----

    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order> {
        let draft = self.check_order(draft).await?;
        let order = self.store.insert_order(draft).await?;
        tracing::info!(order_id = order.id, client_id = order.client_id, "Order created");
        Ok(order)
    }

    /// Edit an order; the total is recomputed from its lines.
    pub async fn update_order(&self, id: u64, draft: OrderDraft) -> Result<Order> {
        let mut order = self.fetch_order(id).await?;
        let draft = self.check_order(draft).await?;
        order.apply(draft);
        order.total = self.lines_total(id).await?;
        self.store.update_order(&order).await?;
        tracing::info!(order_id = id, total = %order.total, "Order updated");
        Ok(order)
    }

    /// Order with its total brought in line with its current lines
    pub async fn get_order(&self, id: u64) -> Result<Order> {
        let mut order = self.fetch_order(id).await?;
        let total = self.lines_total(id).await?;
        if order.total != total {
            order.total = total;
            self.store.update_order(&order).await?;
        }
        Ok(order)
    }

    pub async fn delete_order(&self, id: u64) -> Result<()> {
        self.store.delete_order(id).await?;
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }

    pub async fn search_orders(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<OrderListing>> {
        let names: HashMap<u64, String> = self
            .store
            .list_clients()
            .await?
            .into_iter()
            .map(|client| (client.id, client.name))
            .collect();

        let listings: Vec<OrderListing> = self
            .store
            .list_orders()
            .await?
            .into_iter()
            .map(|order| OrderListing {
                client_name: names.get(&order.client_id).cloned().unwrap_or_default(),
                order,
            })
            .collect();

        Ok(search_page(listings, query, request, &OrdersByClientName))
    }

    async fn fetch_order(&self, id: u64) -> Result<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order", id))
    }

    async fn check_order(&self, draft: OrderDraft) -> Result<OrderDraft> {
        let draft = draft.trimmed();
        let mut errors = field_errors(&draft);

        let floor = order_date_floor((self.today)());
        if draft.ordered_at < floor {
            add_error(
                &mut errors,
                "ordered_at",
                "date_range",
                "order date must be today or later",
            );
        }

        if !has_error(&errors, "client_id")
            && self.store.get_client(draft.client_id).await?.is_none()
        {
            add_error(
                &mut errors,
                "client_id",
                "client_missing",
                "client does not exist",
            );
        }

        fail_on(errors)?;
        Ok(draft)
    }

    async fn lines_total(&self, order_id: u64) -> Result<Money> {
        Ok(self
            .store
            .list_lines(order_id)
            .await?
            .iter()
            .map(OrderLine::subtotal)
            .sum())
    }

    async fn refresh_total(&self, order_id: u64) -> Result<Money> {
        let mut order = self.fetch_order(order_id).await?;
        order.total = self.lines_total(order_id).await?;
        self.store.update_order(&order).await?;
        tracing::debug!(order_id, total = %order.total, "Order total recalculated");
        Ok(order.total)
    }

    // ---- order lines ----

    pub async fn add_line(&self, order_id: u64, draft: OrderLineDraft) -> Result<OrderLine> {
        self.fetch_order(order_id).await?;
        let product = self.check_line(order_id, &draft, None).await?;

        let line = self.store.insert_line(order_id, draft, product.price).await?;
        self.refresh_total(order_id).await?;
        tracing::info!(line_id = line.id, order_id, product_id = line.product_id, "Order line added");
        Ok(line)
    }

    /// Edit a line; the unit price is re-read from the product.
    pub async fn update_line(&self, id: u64, draft: OrderLineDraft) -> Result<OrderLine> {
        let mut line = self.get_line(id).await?;
        let product = self.check_line(line.order_id, &draft, Some(id)).await?;

        line.product_id = draft.product_id;
        line.quantity = draft.quantity;
        line.unit_price = product.price;
        self.store.update_line(&line).await?;
        self.refresh_total(line.order_id).await?;
        tracing::info!(line_id = id, order_id = line.order_id, "Order line updated");
        Ok(line)
    }

    pub async fn delete_line(&self, id: u64) -> Result<()> {
        let line = self.get_line(id).await?;
        self.store.delete_line(id).await?;
        self.refresh_total(line.order_id).await?;
        tracing::info!(line_id = id, order_id = line.order_id, "Order line deleted");
        Ok(())
    }

    pub async fn get_line(&self, id: u64) -> Result<OrderLine> {
        self.store
            .get_line(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order line", id))
    }

    pub async fn search_lines(
        &self,
        order_id: u64,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<LineListing>> {
        self.fetch_order(order_id).await?;

        let names: HashMap<u64, String> = self
            .store
            .list_products()
            .await?
            .into_iter()
            .map(|product| (product.id, product.name))
            .collect();

        let listings: Vec<LineListing> = self
            .store
            .list_lines(order_id)
            .await?
            .into_iter()
            .map(|line| {
                let name = names.get(&line.product_id).cloned().unwrap_or_default();
                LineListing::new(line, name)
            })
            .collect();

        Ok(search_page(listings, query, request, &LinesByProductName))
    }

    /// Validate a line and return the product it points at.
    async fn check_line(
        &self,
        order_id: u64,
        draft: &OrderLineDraft,
        editing: Option<u64>,
    ) -> Result<Product> {
        let mut errors = field_errors(draft);

        let product = if has_error(&errors, "product_id") {
            None
        } else {
            self.store.get_product(draft.product_id).await?
        };
        if product.is_none() && !has_error(&errors, "product_id") {
            add_error(
                &mut errors,
                "product_id",
                "product_missing",
                "product does not exist",
            );
        }
        fail_on(errors)?;

        let duplicate = self
            .store
            .list_lines(order_id)
            .await?
            .into_iter()
            .any(|other| Some(other.id) != editing && other.product_id == draft.product_id);
        if duplicate {
            return Err(AppError::Conflict(format!(
                "product {} is already on order {}",
                draft.product_id, order_id
            )));
        }

        product.ok_or_else(|| AppError::not_found("Product", draft.product_id))
    }
}

fn field_errors<T: Validate>(draft: &T) -> ValidationErrors {
    draft.validate().err().unwrap_or_else(ValidationErrors::new)
}

fn has_error(errors: &ValidationErrors, field: &str) -> bool {
    errors.field_errors().contains_key(field)
}

fn add_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &'static str,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    errors.add(field, error);
}

fn fail_on(errors: ValidationErrors) -> Result<()> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}
