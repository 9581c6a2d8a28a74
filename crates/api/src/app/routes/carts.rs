use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use storefront_core::CartId;

use super::items::parse_item_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

const ROOT: &str = "/cart";

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_cart).get(list_carts))
        .route("/:id", get(get_cart).delete(delete_cart))
        .route("/:cart_id/add/:item_id", post(add_item_to_cart))
}

fn parse_cart_id(id: &str) -> Result<CartId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid cart id"))
}

pub async fn create_cart(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let cart = services.carts().add();

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("{ROOT}/{}", cart.id()))],
        Json(dto::cart_to_json(&cart)),
    )
        .into_response()
}

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_cart_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.carts().get_one(id) {
        Ok(cart) => (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /cart
///
/// Query parameters:
/// - `offset` / `limit`: window over stored carts (defaults 0 and 10, limit > 0)
/// - `min_price` / `max_price`: inclusive bounds on the cart total (non-negative)
/// - `min_quantity` / `max_quantity`: inclusive bounds on the total unit count
pub async fn list_carts(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::CartListQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query.map_err(errors::query_rejection).and_then(|Query(q)| q.into_query()) {
        Ok(q) => q,
        Err(res) => return res,
    };

    let carts = services
        .carts()
        .get_many(&query)
        .iter()
        .map(dto::cart_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(carts)).into_response()
}

pub async fn add_item_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path((cart_id, item_id)): Path<(String, String)>,
) -> axum::response::Response {
    let cart_id = match parse_cart_id(&cart_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let item_id = match parse_item_id(&item_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.add_item_to_cart(cart_id, item_id) {
        Ok(line) => (
            StatusCode::OK,
            [(header::LOCATION, format!("{ROOT}/{cart_id}/{item_id}"))],
            Json(dto::line_to_json(&line)),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_cart_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    services.carts().delete(id);
    StatusCode::OK.into_response()
}
