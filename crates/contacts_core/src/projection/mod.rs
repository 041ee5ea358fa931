//! View-facing projections of domain records.
//!
//! # Responsibility
//! - Shape contacts into display records with resolved category names.
//! - Shape categories into form select options.
//!
//! # Invariants
//! - Category names are resolved through a lookup map, one build per request.
//! - A dangling category reference projects to `None`, never an error.

pub mod contact_view;
