pub mod product;
pub mod wishlist;

pub use product::{NewProduct, Product, ProductPatch};
pub use wishlist::{NewWishlistEntry, WishlistEntry};
