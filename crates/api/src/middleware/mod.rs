//! Request extractors that guard handlers.
//!
//! - [`auth::AdminAuth`] -- Requires the `ADMIN_API_TOKEN` Bearer token.

pub mod auth;
