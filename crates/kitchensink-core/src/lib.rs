//! Domain layer for the Kitchensink membership client.
//!
//! Holds the server-owned read models (profile, update requests), the
//! pure validation rules, the staged-edit store, the role gate, and the
//! API trait seams the infrastructure layer implements.

pub mod api;
pub mod error;
pub mod otp;
pub mod pending;
pub mod profile;
pub mod session;
pub mod update_request;
pub mod validation;

// Re-export common types
pub use error::{KitchensinkError, Result};
pub use profile::{Profile, ProfileField, Role};
pub use session::{AuthSession, EditMode, ProfileAccess};
pub use update_request::{RequestStatus, UpdateRequest};
pub use validation::FieldErrors;
