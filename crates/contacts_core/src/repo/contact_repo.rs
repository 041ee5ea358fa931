//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `ContactDraft::validate()` before SQL mutations.
//! - `date_added` is written by `create_contact` only; updates never touch it.
//! - Every operation runs as one statement or one transaction.

use crate::db::migrations::ensure_schema_ready;
use crate::db::DbError;
use crate::model::category::{CategoryId, CategoryValidationError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone,
    email,
    category_id,
    date_added
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact and category persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    InvalidCategory(CategoryValidationError),
    Db(DbError),
    ContactNotFound(ContactId),
    CategoryNotFound(CategoryId),
    CategoryInUse {
        category_id: CategoryId,
        contact_count: usize,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidCategory(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::CategoryInUse {
                category_id,
                contact_count,
            } => write!(
                f,
                "category {category_id} is still referenced by {contact_count} contact(s)"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidCategory(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::ContactNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::CategoryInUse { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CategoryValidationError> for RepoError {
    fn from(value: CategoryValidationError) -> Self {
        Self::InvalidCategory(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// All contacts ordered by id.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Contacts whose category reference equals `category_id`.
    fn list_contacts_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Inserts a new contact stamped with `date_added` (epoch ms).
    fn create_contact(&self, draft: &ContactDraft, date_added: i64) -> RepoResult<Contact>;
    /// Replaces editable fields; the stored `date_added` is preserved.
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let contacts = stmt
            .query_map([], parse_contact_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn list_contacts_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} WHERE category_id = ?1 ORDER BY id ASC;"
        ))?;
        let contacts = stmt
            .query_map([category_id], parse_contact_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        select_contact(self.conn, id)
    }

    fn create_contact(&self, draft: &ContactDraft, date_added: i64) -> RepoResult<Contact> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO contacts (
                first_name,
                last_name,
                phone,
                email,
                category_id,
                date_added
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str(),
                draft.category_id,
                date_added,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let contact = select_contact(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created contact {id} missing on read-back"))
        })?;
        tx.commit()?;

        Ok(contact)
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                email = ?4,
                category_id = ?5
             WHERE id = ?6;",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str(),
                draft.category_id,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }

        let contact = select_contact(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("updated contact {id} missing on read-back"))
        })?;
        tx.commit()?;

        Ok(contact)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }

        Ok(())
    }
}

fn select_contact(conn: &Connection, id: ContactId) -> RepoResult<Option<Contact>> {
    let contact = conn
        .query_row(
            &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_contact_row,
        )
        .optional()?;
    Ok(contact)
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        category_id: row.get("category_id")?,
        date_added: row.get("date_added")?,
    })
}
