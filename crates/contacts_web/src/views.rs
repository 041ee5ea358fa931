//! Server-side HTML views.
//!
//! Every user-supplied string passes through [`escape`] before it is
//! written into markup.

use crate::csrf::CSRF_FIELD;
use contacts_core::{ContactField, ContactFormPage, ContactView, FormMode};

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{} - Contacts</title></head><body>\
<nav><a href=\"/contacts\">Contacts</a></nav>\
<main>{body}</main>\
</body></html>",
        escape(title)
    )
}

pub fn contact_list(contacts: &[ContactView]) -> String {
    let rows = if contacts.is_empty() {
        "<tr><td colspan=\"6\">No contacts yet.</td></tr>".to_string()
    } else {
        contacts
            .iter()
            .map(|contact| {
                format!(
                    "<tr data-slug=\"{slug}\"><td>{first}</td><td>{last}</td><td>{phone}</td><td>{email}</td><td>{category}</td>\
<td><a href=\"/contacts/{id}\">Details</a> | <a href=\"/contacts/edit/{id}\">Edit</a> | <a href=\"/contacts/delete/{id}\">Delete</a></td></tr>",
                    slug = escape(&contact.slug),
                    first = escape(&contact.first_name),
                    last = escape(&contact.last_name),
                    phone = escape(&contact.phone),
                    email = escape(&contact.email),
                    category = escape(contact.category_label()),
                    id = contact.id,
                )
            })
            .collect::<String>()
    };

    layout(
        "Contacts",
        &format!(
            "<h1>Contacts</h1><p><a href=\"/contacts/create\">Create New</a></p>\
<table><thead><tr><th>First Name</th><th>Last Name</th><th>Phone</th><th>Email</th><th>Category</th><th></th></tr></thead>\
<tbody>{rows}</tbody></table>"
        ),
    )
}

fn contact_fields(contact: &ContactView) -> String {
    format!(
        "<dl><dt>First Name</dt><dd>{}</dd><dt>Last Name</dt><dd>{}</dd>\
<dt>Phone</dt><dd>{}</dd><dt>Email</dt><dd>{}</dd><dt>Category</dt><dd>{}</dd></dl>",
        escape(&contact.first_name),
        escape(&contact.last_name),
        escape(&contact.phone),
        escape(&contact.email),
        escape(contact.category_label()),
    )
}

pub fn contact_details(contact: &ContactView) -> String {
    layout(
        &contact.full_name,
        &format!(
            "<h1>{name}</h1>{fields}<dl><dt>Date Added</dt><dd>{added}</dd></dl>\
<p><a href=\"/contacts/edit/{id}\">Edit</a> | <a href=\"/contacts\">Back to List</a></p>",
            name = escape(&contact.full_name),
            fields = contact_fields(contact),
            added = escape(&contact.date_added_display()),
            id = contact.id,
        ),
    )
}

pub fn delete_confirmation(contact: &ContactView, csrf_token: &str) -> String {
    layout(
        "Delete",
        &format!(
            "<h1>Delete</h1><h3>Are you sure you want to delete this contact?</h3>{fields}\
<form method=\"post\" action=\"/contacts/delete/{id}\">{csrf}\
<button type=\"submit\">Delete</button> | <a href=\"/contacts\">Back to List</a></form>",
            fields = contact_fields(contact),
            id = contact.id,
            csrf = csrf_input(csrf_token),
        ),
    )
}

pub fn contact_form(page: &ContactFormPage, csrf_token: &str) -> String {
    let (title, action, id_input) = match page.mode {
        FormMode::Create => ("Create", "/contacts/create".to_string(), String::new()),
        FormMode::Edit(id) => (
            "Edit",
            format!("/contacts/edit/{id}"),
            format!(
                "<input type=\"hidden\" name=\"id\" value=\"{}\">",
                escape(&page.form.id)
            ),
        ),
    };

    let summary = if page.errors.is_empty() {
        String::new()
    } else {
        let items = page
            .errors
            .errors()
            .iter()
            .map(|error| format!("<li>{}</li>", escape(&error.message)))
            .collect::<String>();
        format!("<ul class=\"validation-summary\">{items}</ul>")
    };

    let options = page
        .categories
        .iter()
        .map(|option| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                option.id,
                if option.selected { " selected" } else { "" },
                escape(&option.name)
            )
        })
        .collect::<String>();

    let form = &page.form;
    let body = format!(
        "<h1>{title}</h1>{summary}<form method=\"post\" action=\"{action}\">{csrf}{id_input}\
{first}{last}{phone}{email}\
<div><label for=\"categoryId\">Category</label><select id=\"categoryId\" name=\"categoryId\">\
<option value=\"0\">-- Select Category --</option>{options}</select>{category_error}</div>\
<button type=\"submit\">Save</button> | <a href=\"/contacts\">Back to List</a></form>",
        csrf = csrf_input(csrf_token),
        first = text_input(page, ContactField::FirstName, &form.first_name, "text"),
        last = text_input(page, ContactField::LastName, &form.last_name, "text"),
        phone = text_input(page, ContactField::Phone, &form.phone, "tel"),
        email = text_input(page, ContactField::Email, &form.email, "email"),
        category_error = field_error(page, ContactField::CategoryId),
    );
    layout(title, &body)
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        "<h1>Not Found</h1><p>The requested contact does not exist.</p><p><a href=\"/contacts\">Back to List</a></p>",
    )
}

fn text_input(page: &ContactFormPage, field: ContactField, value: &str, kind: &str) -> String {
    let name = field.form_name();
    format!(
        "<div><label for=\"{name}\">{label}</label><input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\">{error}</div>",
        label = field.label(),
        value = escape(value),
        error = field_error(page, field),
    )
}

fn field_error(page: &ContactFormPage, field: ContactField) -> String {
    page.errors
        .message_for(field)
        .map(|message| format!("<span class=\"field-error\">{}</span>", escape(message)))
        .unwrap_or_default()
}

fn csrf_input(token: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{CSRF_FIELD}\" value=\"{}\">",
        escape(token)
    )
}
