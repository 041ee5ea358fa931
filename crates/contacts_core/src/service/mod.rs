//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, repository calls and response selection for
//!   the contact list/detail/create/edit/delete flows.
//! - Keep the HTTP layer decoupled from storage details.

pub mod contact_service;
