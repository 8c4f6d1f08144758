use crate::api::AppState;
use crate::catalog::{ClientPick, LineListing, OrderListing, PickerMode, ProductPick};
use crate::error::Result;
use crate::models::*;
use crate::search::{Page, PageRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query parameters shared by every list endpoint
///
/// Paging values stay strings so malformed ones fall back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    fn text(&self) -> &str {
        self.q.as_deref().unwrap_or("").trim()
    }

    fn request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.page_size.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PickerQuery {
    pub q: Option<String>,
    pub mode: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PickerQuery {
    fn list(&self) -> ListQuery {
        ListQuery {
            q: self.q.clone(),
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

/// Page of results echoed with the trimmed query
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub query: String,
    #[serde(flatten)]
    pub page: Page<T>,
}

impl<T> ListResponse<T> {
    fn new(query: &ListQuery, page: Page<T>) -> Json<Self> {
        Json(Self {
            query: query.text().to_string(),
            page,
        })
    }
}

// ---- clients ----

/// Search clients by name
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse<Client>>> {
    let page = state
        .catalog
        .search_clients(params.text(), params.request())
        .await?;
    Ok(ListResponse::new(&params, page))
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<ClientDraft>,
) -> Result<(StatusCode, Json<Client>)> {
    let client = state.catalog.create_client(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Client>> {
    Ok(Json(state.catalog.get_client(id).await?))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ClientDraft>,
) -> Result<Json<Client>> {
    Ok(Json(state.catalog.update_client(id, request).await?))
}

// ---- products ----

/// Search products by name
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse<Product>>> {
    let page = state
        .catalog
        .search_products(params.text(), params.request())
        .await?;
    Ok(ListResponse::new(&params, page))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog.create_product(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.get_product(id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ProductDraft>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.update_product(id, request).await?))
}

// ---- orders ----

/// Search orders by client name; a blank query lists them by date
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse<OrderListing>>> {
    let page = state
        .catalog
        .search_orders(params.text(), params.request())
        .await?;
    Ok(ListResponse::new(&params, page))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<OrderDraft>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.catalog.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>> {
    Ok(Json(state.catalog.get_order(id).await?))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<OrderDraft>,
) -> Result<Json<Order>> {
    Ok(Json(state.catalog.update_order(id, request).await?))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    state.catalog.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- order lines ----

/// Search one order's lines by product name
pub async fn list_lines(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse<LineListing>>> {
    let page = state
        .catalog
        .search_lines(order_id, params.text(), params.request())
        .await?;
    Ok(ListResponse::new(&params, page))
}

pub async fn create_line(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
    Json(request): Json<OrderLineDraft>,
) -> Result<(StatusCode, Json<LineResponse>)> {
    let line = state.catalog.add_line(order_id, request).await?;
    Ok((StatusCode::CREATED, Json(LineResponse::from(line))))
}

pub async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>> {
    let line = state.catalog.get_line(id).await?;
    Ok(Json(LineResponse::from(line)))
}

pub async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<OrderLineDraft>,
) -> Result<Json<LineResponse>> {
    let line = state.catalog.update_line(id, request).await?;
    Ok(Json(LineResponse::from(line)))
}

pub async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    state.catalog.delete_line(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Order line DTO with its computed subtotal
#[derive(Debug, Serialize)]
pub struct LineResponse {
    #[serde(flatten)]
    pub line: OrderLine,
    pub subtotal: Money,
}

impl From<OrderLine> for LineResponse {
    fn from(line: OrderLine) -> Self {
        let subtotal = line.subtotal();
        Self { line, subtotal }
    }
}

// ---- pickers ----

/// Client picker; `mode=ci` searches identity card digits
pub async fn pick_clients(
    State(state): State<AppState>,
    Query(params): Query<PickerQuery>,
) -> Result<Json<ListResponse<ClientPick>>> {
    let list = params.list();
    let mode = PickerMode::parse_lenient(params.mode.as_deref());
    let page = state
        .catalog
        .pick_clients(list.text(), mode, list.request())
        .await?;
    Ok(ListResponse::new(&list, page))
}

pub async fn pick_products(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse<ProductPick>>> {
    let page = state
        .catalog
        .pick_products(params.text(), params.request())
        .await?;
    Ok(ListResponse::new(&params, page))
}
