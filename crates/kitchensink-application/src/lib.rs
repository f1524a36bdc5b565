//! Application layer: the workflows the screens drive.
//!
//! Each workflow owns its view state (loaded data, staged edits, form
//! phase) and talks to the service only through the core API traits.

pub mod directory;
pub mod edit_session;
pub mod form;
pub mod login;
pub mod moderation;

pub use directory::UserDirectory;
pub use edit_session::ProfileEditSession;
pub use form::FormPhase;
pub use login::{LoginFlow, LoginStep};
pub use moderation::ModerationQueue;
