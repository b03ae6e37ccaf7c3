//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod error;
pub mod health;
pub mod identities;
pub mod rankings;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod votes;
pub mod works;

pub use error::ApiResult;
