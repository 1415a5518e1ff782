//! linnet Directory Client
//!
//! Contract between the reconciliation engine and the remote directory
//! service that maps phone numbers to stable, pseudonymous service
//! identifiers.
//!
//! The engine depends on two operations: a batched number lookup that
//! produces one consistent snapshot per reconciliation pass, and a
//! single-account liveness probe used on the unregistered-contact
//! fallback path. Transports implement [`DirectoryClient`]; everything
//! else here is the value vocabulary of those two calls.

pub mod client;
pub mod error;
pub mod types;

pub use client::DirectoryClient;
pub use error::{DirectoryError, DirectoryResult};
pub use types::{DirectoryEntry, LookupResponse};
