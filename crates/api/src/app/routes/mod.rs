use axum::Router;

pub mod carts;
pub mod chat;
pub mod items;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/item", items::router())
        .nest("/cart", carts::router())
        .nest("/chat", chat::router())
}
