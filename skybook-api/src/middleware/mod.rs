pub mod auth;

pub use auth::{admin_auth_middleware, has_permission, issue_token, Claims};
