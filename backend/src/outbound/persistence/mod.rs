//! PostgreSQL adapters built on Diesel, `diesel-async`, and `bb8`.
//!
//! Row structs and the schema stay private; repositories translate between
//! rows and domain types and map every database failure to a port error.

mod diesel_basic_error_mapping;
mod diesel_identity_repository;
mod diesel_vote_repository;
mod diesel_work_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_identity_repository::DieselIdentityRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use diesel_work_repository::DieselWorkRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
