use axum::extract::{Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{NewProduct, Product, ProductPatch};
use crate::database::Filter;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

const NOT_FOUND: &str = "Product not found";

/// Path ids that are not UUIDs can never resolve to a stored product
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// POST /products
pub async fn create(State(state): State<AppState>, ApiJson(payload): ApiJson<NewProduct>) -> ApiResult<Product> {
    let product = payload.into_product(Uuid::new_v4());
    let stored = state.products().insert(&product).await?;

    tracing::info!("Created product {}", stored.id);
    Ok(ApiResponse::created("Product created successfully", stored))
}

/// GET /products - every product, in insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state.products().select_any(Filter::all()).await?;
    Ok(ApiResponse::success("Products retrieved successfully", products))
}

/// GET /products/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    let id = parse_id(&id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let product = state
        .products()
        .select_one(Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success("Product retrieved successfully", product))
}

/// PATCH /products/:id - overwrite `name` and/or `price` when present
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Product> {
    let id = parse_id(&id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    let products = state.products();

    let mut product = products
        .select_one(Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    if patch.is_empty() {
        return Ok(ApiResponse::success("Product updated successfully", product));
    }

    patch.apply(&mut product);

    // Deleted between the read and the write
    let updated = products
        .update_one(Filter::by_id(id), &product)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    tracing::info!("Updated product {}", updated.id);
    Ok(ApiResponse::success("Product updated successfully", updated))
}

/// DELETE /products/:id
///
/// A missing product answers 200 with `data: null` unless
/// `API_STRICT_DELETE` asks for 404.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Option<Product>> {
    let deleted = match parse_id(&id) {
        Some(id) => state.products().delete_one(Filter::by_id(id)).await?,
        None => None,
    };

    match deleted {
        Some(product) => {
            tracing::info!("Deleted product {}", product.id);
            Ok(ApiResponse::success("Product deleted successfully", Some(product)))
        }
        None if state.config.api.strict_delete => Err(ApiError::not_found(NOT_FOUND)),
        None => Ok(ApiResponse::success("No product matched the given id", None)),
    }
}
