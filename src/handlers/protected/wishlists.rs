use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::WishlistEntry;
use crate::database::Filter;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /wishlists/my-wishlist - entries owned by the caller
pub async fn mine(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<WishlistEntry>> {
    let entries = state
        .wishlists()
        .select_any(Filter::all().eq("email", identity.email))
        .await?;

    Ok(ApiResponse::success("Wishlist retrieved successfully", entries))
}

/// DELETE /wishlists/:id - only when the entry belongs to the caller
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<WishlistEntry> {
    let not_found = || ApiError::not_found("Wishlist entry not found");
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let filter = Filter::by_id(id).eq("email", identity.email.as_str());
    let deleted = state.wishlists().delete_one(filter).await?.ok_or_else(not_found)?;

    tracing::info!("Deleted wishlist entry {} for {}", deleted.id, identity.email);
    Ok(ApiResponse::success("Wishlist entry deleted successfully", deleted))
}
