// handlers/protected - endpoints behind `require_identity`
//
// Every handler here can rely on an `Identity` request extension.

pub mod wishlists;
