//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for contacts and
//!   categories.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Contact writes must enforce `ContactDraft::validate()` before SQL.
//! - Repository APIs return semantic errors (`ContactNotFound`,
//!   `CategoryInUse`) in addition to DB transport errors.

pub mod category_repo;
pub mod contact_repo;
