//! Contact domain model and field validation.
//!
//! # Responsibility
//! - Define the persisted `Contact` record and its derived display fields.
//! - Parse raw form input into a typed, validated `ContactDraft`.
//!
//! # Invariants
//! - Names are 1..=50 characters, phone is 1..=15 characters.
//! - Email has exactly one `@`, not first or last, and no line breaks.
//! - Field text is persisted as submitted; only the required check ignores
//!   surrounding whitespace.
//! - `category_id` must be >= 1; anything else means "no category chosen".
//! - Validation collects every failing field, never only the first.

use crate::model::category::CategoryId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated contact identifier.
pub type ContactId = i64;

pub const NAME_MAX_CHARS: usize = 50;
pub const PHONE_MAX_CHARS: usize = 15;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\r\n]+@[^@\r\n]+$").expect("valid email regex"));

/// Input field names, as used by forms and validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Phone,
    Email,
    CategoryId,
}

impl ContactField {
    /// Form-encoded parameter name for this field.
    pub fn form_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::CategoryId => "categoryId",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::CategoryId => "Category",
        }
    }
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

/// All validation failures for one contact input.
///
/// Holds at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactValidationError {
    errors: Vec<FieldError>,
}

impl ContactValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the message recorded for `field`, if any.
    pub fn message_for(&self, field: ContactField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn push(&mut self, field: ContactField, message: impl Into<String>) {
        if self.message_for(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>();
        write!(f, "contact validation failed: {}", messages.join("; "))
    }
}

impl Error for ContactValidationError {}

/// Canonical persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub category_id: CategoryId,
    /// Unix epoch milliseconds, set once by the create flow.
    pub date_added: i64,
}

impl Contact {
    /// `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lowercased full name with spaces replaced by `-`.
    pub fn slug(&self) -> String {
        self.full_name().to_lowercase().replace(' ', "-")
    }

    /// Copies the editable fields into a draft.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            category_id: self.category_id,
        }
    }
}

/// Editable contact fields, typed and ready for persistence.
///
/// Write paths must call [`ContactDraft::validate`] before SQL mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub category_id: CategoryId,
}

impl ContactDraft {
    /// Checks every field rule and returns all failures at once.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let mut errors = ContactValidationError::default();
        check_text(
            &mut errors,
            ContactField::FirstName,
            &self.first_name,
            NAME_MAX_CHARS,
        );
        check_text(
            &mut errors,
            ContactField::LastName,
            &self.last_name,
            NAME_MAX_CHARS,
        );
        check_text(&mut errors, ContactField::Phone, &self.phone, PHONE_MAX_CHARS);

        if self.email.trim().is_empty() {
            errors.push(ContactField::Email, required_message(ContactField::Email));
        } else if !is_valid_email(&self.email) {
            errors.push(ContactField::Email, "Email is not a valid e-mail address.");
        }

        if self.category_id < 1 {
            errors.push(ContactField::CategoryId, "Please select a category");
        }

        errors.into_result()
    }
}

/// Raw contact input exactly as submitted by a form.
///
/// Kept verbatim so a rejected submission can be re-rendered unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Body id for edit submissions; empty for create.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub category_id: String,
}

impl ContactForm {
    /// Pre-fills a form from a stored contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            category_id: contact.category_id.to_string(),
        }
    }

    /// Parsed body id, `None` when empty or not an integer.
    pub fn parsed_id(&self) -> Option<ContactId> {
        self.id.trim().parse().ok()
    }

    /// Parsed category reference, `None` when empty or not an integer.
    pub fn selected_category(&self) -> Option<CategoryId> {
        self.category_id.trim().parse().ok()
    }

    /// Parses the category and validates the text fields as submitted.
    ///
    /// An unparsable category is treated like the `0` sentinel.
    pub fn to_draft(&self) -> Result<ContactDraft, ContactValidationError> {
        let draft = ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            category_id: self.selected_category().unwrap_or(0),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Returns whether `value` matches the accepted email grammar.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn check_text(errors: &mut ContactValidationError, field: ContactField, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(field, required_message(field));
    } else if value.chars().count() > max {
        errors.push(
            field,
            format!("{} must be at most {max} characters.", field.label()),
        );
    }
}

fn required_message(field: ContactField) -> String {
    format!("{} is required.", field.label())
}
