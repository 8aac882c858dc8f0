//! Build profile store: curated builds plus the pacts and weapons they use

pub mod build;
mod defaults;
mod loader;

pub use build::{pact_role_text, weapon_role_text, Build, BuildCatalog, NO_ROLE_TEXT};
pub use loader::load_catalog;
