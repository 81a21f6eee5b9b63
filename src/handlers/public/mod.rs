// handlers/public - endpoints reachable without credentials
//
// `wishlists::create` is mounted behind the auth guard instead when
// SECURITY_WISHLIST_CREATE_REQUIRES_AUTH is enabled.

pub mod products;
pub mod root;
pub mod wishlists;

pub use root::{health, method_not_allowed, not_found, root};
