//! HTTP surface for the contacts application.
//!
//! # Responsibility
//! - Route the five contact flows onto `contacts_core::ContactService`.
//! - Render HTML views and guard mutating requests with anti-forgery tokens.

pub mod config;
pub mod csrf;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

use axum::middleware;
use axum::routing::get;
use axum::Router;

pub use config::WebConfig;
pub use error::WebError;
pub use state::AppState;

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/contacts", get(handlers::list_contacts))
        .route("/contacts/details", get(handlers::contact_details_without_id))
        .route("/contacts/:id", get(handlers::contact_details))
        .route(
            "/contacts/create",
            get(handlers::create_form).post(handlers::create_submit),
        )
        .route("/contacts/edit", get(handlers::edit_form_without_id))
        .route(
            "/contacts/edit/:id",
            get(handlers::edit_form).post(handlers::edit_submit),
        )
        .route(
            "/contacts/delete",
            get(handlers::delete_confirmation_without_id),
        )
        .route(
            "/contacts/delete/:id",
            get(handlers::delete_confirmation).post(handlers::delete_submit),
        )
        .layer(middleware::from_fn(handlers::log_requests))
        .with_state(state)
}
