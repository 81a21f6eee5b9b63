use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{IdentityVerifier, JwtVerifier};
use crate::config::AppConfig;
use crate::database::models::{Product, WishlistEntry};
use crate::database::{open_store, Collection, DocumentStore, Repository, StoreError};
use crate::handlers::{protected, public};
use crate::middleware::require_identity;

/// Shared per-process dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            verifier,
        }
    }

    /// Build the configured store and JWT verifier. Store bootstrap failures
    /// are logged and do not stop startup.
    pub async fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store = open_store(&config.database)?;
        if let Err(e) = store.bootstrap().await {
            tracing::error!("Error preparing document store: {}", e);
        } else {
            tracing::info!("Connected to document store successfully");
        }

        let verifier = Arc::new(JwtVerifier::new(&config.security));
        Ok(Self::new(config, store, verifier))
    }

    pub fn products(&self) -> Repository<Product> {
        Repository::new(Collection::Products, self.store.clone())
    }

    pub fn wishlists(&self) -> Repository<WishlistEntry> {
        Repository::new(Collection::Wishlists, self.store.clone())
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    Router::new()
        // Public
        .route("/", get(public::root).fallback(public::method_not_allowed))
        .route("/health", get(public::health).fallback(public::method_not_allowed))
        .merge(product_routes())
        .merge(wishlist_routes(&state))
        .fallback(public::not_found)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    use public::products;

    Router::new()
        .route(
            "/products",
            post(products::create)
                .get(products::list)
                .fallback(public::method_not_allowed),
        )
        .route(
            "/products/:id",
            get(products::get)
                .patch(products::update)
                .delete(products::delete)
                .fallback(public::method_not_allowed),
        )
}

fn wishlist_routes(state: &AppState) -> Router<AppState> {
    let guard = middleware::from_fn_with_state(state.clone(), require_identity);

    let mut open = Router::new();
    let mut guarded = Router::new()
        .route(
            "/wishlists/my-wishlist",
            get(protected::wishlists::mine).fallback(public::method_not_allowed),
        )
        .route(
            "/wishlists/:id",
            delete(protected::wishlists::delete).fallback(public::method_not_allowed),
        );

    let create = post(public::wishlists::create).fallback(public::method_not_allowed);
    if state.config.security.wishlist_create_requires_auth {
        guarded = guarded.route("/wishlists", create);
    } else {
        open = open.route("/wishlists", create);
    }

    open.merge(guarded.route_layer(guard))
}
