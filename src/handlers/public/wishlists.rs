use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::{NewWishlistEntry, WishlistEntry};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// POST /wishlists
///
/// Open by default, in which case the body must name the owning `email`.
/// Behind the auth guard the owner is always the verified caller.
pub async fn create(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    ApiJson(payload): ApiJson<NewWishlistEntry>,
) -> ApiResult<WishlistEntry> {
    let email = match identity {
        Some(Extension(identity)) => identity.email,
        None => payload
            .email
            .clone()
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("Invalid request body: email is required"))?,
    };

    let entry = payload.into_entry(Uuid::new_v4(), email);
    let stored = state.wishlists().insert(&entry).await?;

    tracing::info!("Created wishlist entry {} for {}", stored.id, stored.email);
    Ok(ApiResponse::created("Wishlist entry created successfully", stored))
}
