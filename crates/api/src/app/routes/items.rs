use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use storefront_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

const ROOT: &str = "/item";

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_item).get(list_items))
        .route(
            "/:id",
            get(get_item)
                .put(replace_item)
                .patch(patch_item)
                .delete(delete_item),
        )
}

pub(crate) fn parse_item_id(id: &str) -> Result<ItemId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    let item = services.items().add(body.into_item_info());

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("{ROOT}/{}", item.id))],
        Json(dto::item_to_json(&item)),
    )
        .into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.items().get_one(id) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /item
///
/// Query parameters:
/// - `offset`: position of the first stored item to consider (default: 0)
/// - `limit`: number of stored items to consider (default: 10, must be > 0)
/// - `min_price` / `max_price`: inclusive price bounds (non-negative)
/// - `show_deleted`: include items marked deleted (default: false)
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ItemListQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query.map_err(errors::query_rejection).and_then(|Query(q)| q.into_query()) {
        Ok(q) => q,
        Err(res) => return res,
    };

    let items = services
        .items()
        .get_many(&query)
        .iter()
        .map(dto::item_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn replace_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.items().replace(id, body.into_item_info()) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) if e.is_not_found() => errors::not_modified(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn patch_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::PatchItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.items().update(id, body.into_patch()) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) if e.is_not_found() => errors::not_modified(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    services.items().delete(id);
    StatusCode::OK.into_response()
}
