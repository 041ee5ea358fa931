//! HTTP handlers for the contact flows.
//!
//! # Responsibility
//! - Translate requests into `ContactService` calls.
//! - Choose between rendering a view, redirecting to the list, or 404.
//!
//! # Invariants
//! - Every POST passes anti-forgery verification before any service call.
//! - Successful submissions answer `303 See Other` to `/contacts`.

use crate::csrf::{self, CsrfToken};
use crate::error::WebError;
use crate::state::AppState;
use crate::views;
use axum::extract::{Path, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use contacts_core::{ContactForm, ContactId, SubmitOutcome};
use log::info;
use serde::Deserialize;
use std::time::Instant;

const LIST_PATH: &str = "/contacts";

/// Create/edit form body; unknown fields such as `dateAdded` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFormBody {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub category_id: String,
    pub csrf_token: String,
}

impl ContactFormBody {
    fn into_parts(self) -> (ContactForm, String) {
        let form = ContactForm {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            category_id: self.category_id,
        };
        (form, self.csrf_token)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteFormBody {
    pub csrf_token: String,
}

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_contacts(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let contacts = state.with_service(|service| service.list_contacts())?;
    Ok(Html(views::contact_list(&contacts)))
}

pub async fn contact_details(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_id("details", &raw_id)?;
    render_details(&state, Some(id))
}

pub async fn contact_details_without_id(
    State(state): State<AppState>,
) -> Result<Html<String>, WebError> {
    render_details(&state, None)
}

pub async fn create_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let token = CsrfToken::for_request(&headers);
    let page = state.with_service(|service| service.create_form())?;
    Ok(token.attach(Html(views::contact_form(&page, token.value())).into_response()))
}

pub async fn create_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(body): Form<ContactFormBody>,
) -> Result<Response, WebError> {
    let (form, submitted_token) = body.into_parts();
    csrf::verify(&headers, &submitted_token)?;

    let outcome = state.with_service(|service| service.create_contact(form))?;
    Ok(submit_response(outcome, &headers))
}

pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id("edit", &raw_id)?;
    render_edit_form(&state, &headers, Some(id))
}

pub async fn edit_form_without_id(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    render_edit_form(&state, &headers, None)
}

pub async fn edit_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Form(body): Form<ContactFormBody>,
) -> Result<Response, WebError> {
    let (form, submitted_token) = body.into_parts();
    csrf::verify(&headers, &submitted_token)?;
    let id = parse_id("edit_submit", &raw_id)?;

    let outcome = state.with_service(|service| service.update_contact(id, form))?;
    Ok(submit_response(outcome, &headers))
}

pub async fn delete_confirmation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id("delete", &raw_id)?;
    render_delete_confirmation(&state, &headers, Some(id))
}

pub async fn delete_confirmation_without_id(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    render_delete_confirmation(&state, &headers, None)
}

pub async fn delete_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Form(body): Form<DeleteFormBody>,
) -> Result<Redirect, WebError> {
    csrf::verify(&headers, &body.csrf_token)?;
    let id = parse_id("delete_submit", &raw_id)?;

    state.with_service(|service| service.delete_contact(id))?;
    Ok(Redirect::to(LIST_PATH))
}

/// Logs one line per request with method, path, status and duration.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=http_request module=web method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

fn render_details(state: &AppState, id: Option<ContactId>) -> Result<Html<String>, WebError> {
    let contact = state.with_service(|service| service.contact_details(id))?;
    Ok(Html(views::contact_details(&contact)))
}

fn render_edit_form(
    state: &AppState,
    headers: &HeaderMap,
    id: Option<ContactId>,
) -> Result<Response, WebError> {
    let token = CsrfToken::for_request(headers);
    let page = state.with_service(|service| service.edit_form(id))?;
    Ok(token.attach(Html(views::contact_form(&page, token.value())).into_response()))
}

fn render_delete_confirmation(
    state: &AppState,
    headers: &HeaderMap,
    id: Option<ContactId>,
) -> Result<Response, WebError> {
    let token = CsrfToken::for_request(headers);
    let contact = state.with_service(|service| service.delete_confirmation(id))?;
    Ok(token.attach(Html(views::delete_confirmation(&contact, token.value())).into_response()))
}

fn submit_response(outcome: SubmitOutcome, headers: &HeaderMap) -> Response {
    match outcome {
        SubmitOutcome::Saved(_) => Redirect::to(LIST_PATH).into_response(),
        SubmitOutcome::Rejected(page) => {
            let token = CsrfToken::for_request(headers);
            token.attach(Html(views::contact_form(&page, token.value())).into_response())
        }
    }
}

fn parse_id(action: &'static str, raw: &str) -> Result<ContactId, WebError> {
    raw.trim().parse().map_err(|_| WebError::InvalidPathId {
        action,
        raw: raw.to_string(),
    })
}
