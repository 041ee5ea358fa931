use crate::model::category::{Category, CategoryId};
use crate::model::contact::{Contact, ContactId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Contact as shown by list, detail and delete-confirm views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub category_id: CategoryId,
    /// `None` when no category has `category_id`.
    pub category_name: Option<String>,
    pub date_added: i64,
    pub full_name: String,
    pub slug: String,
}

impl ContactView {
    /// Category name, or empty when the reference dangles.
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or("")
    }

    /// `date_added` rendered as `YYYY-MM-DD HH:MM:SS UTC`.
    pub fn date_added_display(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.date_added)
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default()
    }
}

/// Category name lookup keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    names: HashMap<CategoryId, String>,
}

impl CategoryIndex {
    /// Builds the index; the first category wins on duplicate ids.
    pub fn new(categories: &[Category]) -> Self {
        let mut names = HashMap::with_capacity(categories.len());
        for category in categories {
            names
                .entry(category.id)
                .or_insert_with(|| category.name.clone());
        }
        Self { names }
    }

    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}

pub fn project_contact(contact: &Contact, categories: &CategoryIndex) -> ContactView {
    ContactView {
        id: contact.id,
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        phone: contact.phone.clone(),
        email: contact.email.clone(),
        category_id: contact.category_id,
        category_name: categories.name_of(contact.category_id).map(str::to_string),
        date_added: contact.date_added,
        full_name: contact.full_name(),
        slug: contact.slug(),
    }
}

/// Projects a collection, preserving input order.
pub fn project_contacts(contacts: &[Contact], categories: &CategoryIndex) -> Vec<ContactView> {
    contacts
        .iter()
        .map(|contact| project_contact(contact, categories))
        .collect()
}

/// One entry of the category select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub selected: bool,
}

pub fn category_options(
    categories: &[Category],
    selected: Option<CategoryId>,
) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|category| CategoryOption {
            id: category.id,
            name: category.name.clone(),
            selected: selected == Some(category.id),
        })
        .collect()
}
