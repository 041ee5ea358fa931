//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical `Contact` and `Category` records.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Every persisted record is identified by a store-generated integer id.
//! - `Contact::date_added` is written once at creation and never changed.

pub mod category;
pub mod contact;
