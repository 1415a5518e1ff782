//! linnet Core Library
//!
//! Shared identifier types for linnet.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`Aci`, `Pni`, `ConversationId`)
//! - [`service_id`] - The `ServiceId` union over the two identifier kinds
//! - [`e164`] - Normalized E.164 phone numbers
//! - [`error`] - Identifier validation errors (`IdentifierError`)
//!
//! # Example
//!
//! ```
//! use linnet_core::{Aci, E164, ServiceId};
//!
//! let number = E164::parse("+1 555 123 4567")?;
//! assert_eq!(number.as_str(), "+15551234567");
//!
//! // Explicitly widen the durable identifier into the union.
//! let id: ServiceId = Aci::new().into();
//! assert!(id.is_aci());
//! # Ok::<(), linnet_core::IdentifierError>(())
//! ```

pub mod e164;
pub mod error;
pub mod ids;
pub mod service_id;

// Re-export main types for convenient access
pub use e164::E164;
pub use error::{IdentifierError, Result};
pub use ids::{Aci, ConversationId, Pni};
pub use service_id::ServiceId;
