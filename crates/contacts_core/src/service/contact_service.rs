//! Contact use-case service.
//!
//! # Responsibility
//! - Implement the list, detail, create, edit and delete flows.
//! - Decide between render, redirect-worthy success and not-found.
//!
//! # Invariants
//! - Rejected input never reaches a repository write.
//! - Edit submissions whose body id differs from the path id mutate nothing.
//! - Every not-found outcome is logged with the offending id before return.

use crate::model::category::Category;
use crate::model::contact::{Contact, ContactForm, ContactId, ContactValidationError};
use crate::projection::contact_view::{
    category_options, project_contact, project_contacts, CategoryIndex, CategoryOption,
    ContactView,
};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::contact_repo::{ContactRepository, RepoError};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Flow that produced a not-found outcome, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    Details,
    Edit,
    EditSubmit,
    Delete,
    DeleteSubmit,
}

impl ContactAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Edit => "edit",
            Self::EditSubmit => "edit_submit",
            Self::Delete => "delete",
            Self::DeleteSubmit => "delete_submit",
        }
    }
}

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Missing id, unknown record, or path/body id mismatch.
    NotFound {
        action: ContactAction,
        contact_id: Option<ContactId>,
    },
    /// Backing-store failure; not recoverable within the request.
    Persistence(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                action,
                contact_id: Some(id),
            } => write!(f, "contact not found: {id} (action {})", action.as_str()),
            Self::NotFound {
                action,
                contact_id: None,
            } => write!(f, "contact id missing (action {})", action.as_str()),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

pub type ServiceResult<T> = Result<T, ContactServiceError>;

/// Which submit target a form page posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ContactId),
}

/// Everything needed to render the shared create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormPage {
    pub mode: FormMode,
    /// User input, verbatim.
    pub form: ContactForm,
    /// Empty unless a submission was rejected.
    pub errors: ContactValidationError,
    pub categories: Vec<CategoryOption>,
}

/// Result of a create or edit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; callers redirect to the list.
    Saved(Contact),
    /// Validation failed; callers re-render the form.
    Rejected(ContactFormPage),
}

/// Use-case service over contact and category repositories.
pub struct ContactService<C: ContactRepository, K: CategoryRepository> {
    contacts: C,
    categories: K,
    clock: fn() -> i64,
}

impl<C: ContactRepository, K: CategoryRepository> ContactService<C, K> {
    /// Creates a service stamping new contacts with the current UTC time.
    pub fn new(contacts: C, categories: K) -> Self {
        Self {
            contacts,
            categories,
            clock: now_epoch_ms,
        }
    }

    /// Replaces the creation-time source (epoch milliseconds).
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// List flow: every contact projected with its category name.
    pub fn list_contacts(&self) -> ServiceResult<Vec<ContactView>> {
        let contacts = self.contacts.list_contacts()?;
        let index = self.category_index()?;
        Ok(project_contacts(&contacts, &index))
    }

    /// Detail flow.
    pub fn contact_details(&self, id: Option<ContactId>) -> ServiceResult<ContactView> {
        self.find_view(ContactAction::Details, id)
    }

    /// Delete flow, confirmation step.
    pub fn delete_confirmation(&self, id: Option<ContactId>) -> ServiceResult<ContactView> {
        self.find_view(ContactAction::Delete, id)
    }

    /// Create flow, empty form.
    pub fn create_form(&self) -> ServiceResult<ContactFormPage> {
        self.form_page(
            FormMode::Create,
            ContactForm::default(),
            ContactValidationError::default(),
        )
    }

    /// Create flow, submission.
    pub fn create_contact(&self, form: ContactForm) -> ServiceResult<SubmitOutcome> {
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => return self.reject(FormMode::Create, form, errors),
        };

        let contact = self.contacts.create_contact(&draft, (self.clock)())?;
        info!(
            "event=contact_create module=service status=ok contact_id={}",
            contact.id
        );
        Ok(SubmitOutcome::Saved(contact))
    }

    /// Edit flow, form pre-filled from the stored record.
    pub fn edit_form(&self, id: Option<ContactId>) -> ServiceResult<ContactFormPage> {
        let contact = self.find_contact(ContactAction::Edit, id)?;
        self.form_page(
            FormMode::Edit(contact.id),
            ContactForm::from_contact(&contact),
            ContactValidationError::default(),
        )
    }

    /// Edit flow, submission for the record at `path_id`.
    ///
    /// The stored `date_added` is kept whatever the form carries.
    pub fn update_contact(
        &self,
        path_id: ContactId,
        form: ContactForm,
    ) -> ServiceResult<SubmitOutcome> {
        let body_id = form.parsed_id();
        if body_id != Some(path_id) {
            warn!(
                "event=contact_not_found module=service action={} reason=id_mismatch contact_id={} body_id={}",
                ContactAction::EditSubmit.as_str(),
                path_id,
                form.id.trim()
            );
            return Err(ContactServiceError::NotFound {
                action: ContactAction::EditSubmit,
                contact_id: Some(path_id),
            });
        }

        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => return self.reject(FormMode::Edit(path_id), form, errors),
        };

        match self.contacts.update_contact(path_id, &draft) {
            Ok(contact) => {
                info!(
                    "event=contact_update module=service status=ok contact_id={}",
                    contact.id
                );
                Ok(SubmitOutcome::Saved(contact))
            }
            Err(RepoError::ContactNotFound(id)) => {
                Err(not_found(ContactAction::EditSubmit, Some(id)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete flow, submission.
    pub fn delete_contact(&self, id: ContactId) -> ServiceResult<()> {
        match self.contacts.delete_contact(id) {
            Ok(()) => {
                info!("event=contact_delete module=service status=ok contact_id={id}");
                Ok(())
            }
            Err(RepoError::ContactNotFound(id)) => {
                Err(not_found(ContactAction::DeleteSubmit, Some(id)))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_contact(&self, action: ContactAction, id: Option<ContactId>) -> ServiceResult<Contact> {
        let Some(id) = id else {
            return Err(not_found(action, None));
        };
        self.contacts
            .get_contact(id)?
            .ok_or_else(|| not_found(action, Some(id)))
    }

    fn find_view(&self, action: ContactAction, id: Option<ContactId>) -> ServiceResult<ContactView> {
        let contact = self.find_contact(action, id)?;
        let index = self.category_index()?;
        Ok(project_contact(&contact, &index))
    }

    fn category_index(&self) -> ServiceResult<CategoryIndex> {
        let categories = self.categories.list_categories()?;
        Ok(CategoryIndex::new(&categories))
    }

    fn form_page(
        &self,
        mode: FormMode,
        form: ContactForm,
        errors: ContactValidationError,
    ) -> ServiceResult<ContactFormPage> {
        let categories: Vec<Category> = self.categories.list_categories()?;
        let options = category_options(&categories, form.selected_category());
        Ok(ContactFormPage {
            mode,
            form,
            errors,
            categories: options,
        })
    }

    fn reject(
        &self,
        mode: FormMode,
        form: ContactForm,
        errors: ContactValidationError,
    ) -> ServiceResult<SubmitOutcome> {
        info!(
            "event=contact_rejected module=service status=invalid fields={}",
            errors.errors().len()
        );
        self.form_page(mode, form, errors)
            .map(SubmitOutcome::Rejected)
    }
}

fn not_found(action: ContactAction, contact_id: Option<ContactId>) -> ContactServiceError {
    match contact_id {
        Some(id) => warn!(
            "event=contact_not_found module=service action={} contact_id={id}",
            action.as_str()
        ),
        None => warn!(
            "event=contact_not_found module=service action={} contact_id=none",
            action.as_str()
        ),
    }
    ContactServiceError::NotFound { action, contact_id }
}

fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
