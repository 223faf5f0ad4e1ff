//! Data models consumed from the backend REST API.
//!
//! The backend owns and persists every entity; these are request-scoped copies
//! whose field names match the backend's JSON exactly.

mod auth;
mod comment;
mod consultation;
mod evaluation;
mod listing;
mod milestone;
mod project;
mod user;

pub use auth::*;
pub use comment::*;
pub use consultation::*;
pub use evaluation::*;
pub use listing::*;
pub use milestone::*;
pub use project::*;
pub use user::*;
