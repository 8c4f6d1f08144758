use crate::api::{handlers, AppState};
use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Clients
        .route(
            "/v1/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/v1/clients/:id",
            get(handlers::get_client).put(handlers::update_client),
        )
        // Products
        .route(
            "/v1/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/v1/products/:id",
            get(handlers::get_product).put(handlers::update_product),
        )
        // Orders
        .route(
            "/v1/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/v1/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        // Order lines
        .route(
            "/v1/orders/:id/lines",
            get(handlers::list_lines).post(handlers::create_line),
        )
        .route(
            "/v1/order-lines/:id",
            get(handlers::get_line)
                .put(handlers::update_line)
                .delete(handlers::delete_line),
        )
        // Pickers
        .route("/v1/pickers/clients", get(handlers::pick_clients))
        .route("/v1/pickers/products", get(handlers::pick_products))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
