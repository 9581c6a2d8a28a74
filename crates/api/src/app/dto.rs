use axum::http::StatusCode;
use serde::Deserialize;

use storefront_carts::{Cart, CartLineItem, CartQuery};
use storefront_core::{Bounds, Pagination, query::DEFAULT_LIMIT};
use storefront_items::{Item, ItemInfo, ItemQuery, PatchItemInfo};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub price: f64,
}

impl ItemRequest {
    pub fn into_item_info(self) -> ItemInfo {
        ItemInfo::new(self.name, self.price)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchItemRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl PatchItemRequest {
    pub fn into_patch(self) -> PatchItemInfo {
        PatchItemInfo {
            name: self.name,
            price: self.price,
            deleted: None,
        }
    }
}

// -------------------------
// Query parameters
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ItemListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub show_deleted: Option<bool>,
}

impl ItemListQuery {
    pub fn into_query(self) -> Result<ItemQuery, axum::response::Response> {
        Ok(ItemQuery {
            pagination: pagination(self.offset, self.limit)?,
            price: price_bounds(self.min_price, self.max_price)?,
            show_deleted: self.show_deleted.unwrap_or(false),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CartListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_quantity: Option<u64>,
    pub max_quantity: Option<u64>,
}

impl CartListQuery {
    pub fn into_query(self) -> Result<CartQuery, axum::response::Response> {
        Ok(CartQuery {
            pagination: pagination(self.offset, self.limit)?,
            price: price_bounds(self.min_price, self.max_price)?,
            quantity: Bounds::new(self.min_quantity, self.max_quantity),
        })
    }
}

fn pagination(
    offset: Option<usize>,
    limit: Option<usize>,
) -> Result<Pagination, axum::response::Response> {
    Pagination::new(offset.unwrap_or(0), limit.unwrap_or(DEFAULT_LIMIT))
        .map_err(errors::store_error_to_response)
}

fn price_bounds(
    min: Option<f64>,
    max: Option<f64>,
) -> Result<Bounds<f64>, axum::response::Response> {
    for (name, value) in [("min_price", min), ("max_price", max)] {
        if value.is_some_and(|v| v.is_nan() || v < 0.0) {
            return Err(errors::json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                format!("{name} must be a non-negative number"),
            ));
        }
    }
    Ok(Bounds::new(min, max))
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.get(),
        "name": item.info.name,
        "price": item.info.price,
        "deleted": item.info.deleted,
    })
}

pub fn line_to_json(line: &CartLineItem) -> serde_json::Value {
    serde_json::json!({
        "id": line.id.get(),
        "name": line.info.name,
        "price": line.info.price,
        "quantity": line.quantity,
        "deleted": line.info.deleted,
    })
}

pub fn cart_to_json(cart: &Cart) -> serde_json::Value {
    serde_json::json!({
        "id": cart.id().get(),
        "items": cart.lines().map(line_to_json).collect::<Vec<_>>(),
        "price": cart.price(),
        "quantity": cart.quantity(),
    })
}

#[cfg(test)]
mod tests {
    use storefront_core::{CartId, ItemId};

    use super::*;

    #[test]
    fn list_query_defaults_to_first_page() {
        let Ok(q) = ItemListQuery::default().into_query() else {
            panic!("default query should be valid");
        };
        assert_eq!(q.pagination, Pagination::default());
        assert!(q.price.is_unbounded());
        assert!(!q.show_deleted);
    }

    #[test]
    fn zero_limit_is_unprocessable() {
        let res = ItemListQuery {
            limit: Some(0),
            ..ItemListQuery::default()
        }
        .into_query()
        .unwrap_err();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn negative_price_bound_is_unprocessable() {
        let res = CartListQuery {
            max_price: Some(-1.0),
            ..CartListQuery::default()
        }
        .into_query()
        .unwrap_err();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn cart_json_carries_totals() {
        let mut cart = Cart::new(CartId::new(3));
        let apple = Item::new(ItemId::new(0), ItemInfo::new("apple", 1.5));
        cart.add_item(&apple);
        cart.add_item(&apple);

        let json = cart_to_json(&cart);

        assert_eq!(json["id"], 3);
        assert_eq!(json["price"], 1.5);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["items"][0]["name"], "apple");
        assert_eq!(json["items"][0]["quantity"], 2);
    }

    #[test]
    fn patch_request_never_sets_deleted() {
        let patch = PatchItemRequest {
            name: None,
            price: Some(2.0),
        }
        .into_patch();
        assert_eq!(patch.deleted, None);
        assert_eq!(patch.price, Some(2.0));
    }
}
