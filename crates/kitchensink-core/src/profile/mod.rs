//! Profile domain: the server-owned snapshot and its editable fields.

pub mod field;
pub mod model;

pub use field::ProfileField;
pub use model::{Profile, Role};
