use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    products::{
        dto::{CreatedProduct, MessageResponse, ProductPayload},
        repo_types::{NewProduct, Product},
    },
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .products
        .list()
        .await
        .map_err(ApiError::store("Failed to fetch products"))?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    state
        .products
        .get(id)
        .await
        .map_err(ApiError::store("Failed to fetch product"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedProduct>), ApiError> {
    let product = read_payload(payload)?;
    let id = state
        .products
        .create(&product)
        .await
        .map_err(ApiError::store("Failed to create product"))?;

    info!(id, name = %product.name, "product created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedProduct {
            message: "Product created".into(),
            id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let product = read_payload(payload)?;
    let id = parse_id(&id)?;
    let found = state
        .products
        .update(id, &product)
        .await
        .map_err(ApiError::store("Failed to update product"))?;
    if !found {
        return Err(ApiError::NotFound);
    }

    info!(id, "product updated");
    Ok(Json(MessageResponse::new("Product updated")))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let found = state
        .products
        .delete(id)
        .await
        .map_err(ApiError::store("Failed to delete product"))?;
    if !found {
        return Err(ApiError::NotFound);
    }

    info!(id, "product deleted");
    Ok(Json(MessageResponse::new("Product deleted")))
}

// A path id that is not an integer cannot match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn read_payload(
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<NewProduct, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "rejected product body");
        ApiError::MalformedBody
    })?;
    payload.validate().map_err(|e| {
        warn!("product body is missing fields");
        e
    })
}
