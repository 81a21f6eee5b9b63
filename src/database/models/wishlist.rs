use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A wishlist entry owned by the account identified by `email`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /wishlists`
#[derive(Debug, Clone, Deserialize)]
pub struct NewWishlistEntry {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewWishlistEntry {
    pub fn into_entry(mut self, id: Uuid, email: String) -> WishlistEntry {
        self.extra.remove("id");
        WishlistEntry {
            id,
            email,
            extra: self.extra,
        }
    }
}
