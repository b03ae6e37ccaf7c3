//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local store used when no database is configured
//!   and by the HTTP tests
//! - **persistence**: PostgreSQL repositories built on Diesel
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
