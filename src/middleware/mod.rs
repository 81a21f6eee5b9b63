pub mod auth;
pub mod json;
pub mod response;

pub use auth::{extract_credentials, require_identity, Credentials};
pub use json::ApiJson;
pub use response::{ApiResponse, ApiResult};
