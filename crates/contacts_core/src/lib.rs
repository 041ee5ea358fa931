//! Core domain logic for the contacts application.
//! This crate is the single source of truth for contact invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::category::{Category, CategoryId, CategorySeed, CategoryValidationError};
pub use model::contact::{
    Contact, ContactDraft, ContactField, ContactForm, ContactId, ContactValidationError,
    FieldError,
};
pub use projection::contact_view::{CategoryIndex, CategoryOption, ContactView};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{
    ContactAction, ContactFormPage, ContactService, ContactServiceError, FormMode,
    ServiceResult, SubmitOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
