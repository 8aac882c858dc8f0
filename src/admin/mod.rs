//! Wiki data administration
//!
//! CRUD over the flat `*.json` files in the data directory, with filename
//! and content validation, backups before every overwrite or delete, and
//! an HTTP API for the admin panel.

pub mod access;
pub mod content;
pub mod filename;
pub mod routes;
pub mod store;

pub use access::AccessPolicy;
pub use content::{item_count, validate_json, ValidatedJson};
pub use filename::DataFileName;
pub use routes::{admin_router, AdminState};
pub use store::{DataStore, FileSummary, SaveOutcome};
