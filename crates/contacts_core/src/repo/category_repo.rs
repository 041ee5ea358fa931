//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read categories for forms and projections.
//! - Seed the fixed category rows into an empty store.
//! - Enforce the delete policy for categories still referenced by contacts.
//!
//! # Invariants
//! - Seeding is a no-op once any category row exists.
//! - A category referenced by at least one contact is never deleted.

use crate::db::migrations::ensure_schema_ready;
use crate::model::category::{Category, CategoryId, CategorySeed};
use crate::repo::contact_repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for category reads, seeding and deletion.
pub trait CategoryRepository {
    /// All categories ordered by id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Inserts `seed` when the table is empty; returns inserted row count.
    fn seed_categories(&self, seed: &CategorySeed) -> RepoResult<usize>;
    /// Deletes an unreferenced category.
    ///
    /// Fails with `CategoryInUse` while contacts still point at it.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id ASC;")?;
        let categories = stmt
            .query_map([], parse_category_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1;",
                [id],
                parse_category_row,
            )
            .optional()?;
        Ok(category)
    }

    fn seed_categories(&self, seed: &CategorySeed) -> RepoResult<usize> {
        seed.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM categories;", [], |row| {
            row.get(0)
        })?;
        if existing > 0 {
            return Ok(0);
        }

        for category in &seed.categories {
            tx.execute(
                "INSERT INTO categories (id, name) VALUES (?1, ?2);",
                params![category.id, category.name.as_str()],
            )?;
        }
        tx.commit()?;

        info!(
            "event=category_seed module=repo status=ok inserted={}",
            seed.categories.len()
        );
        Ok(seed.categories.len())
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let contact_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM contacts WHERE category_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        if contact_count > 0 {
            return Err(RepoError::CategoryInUse {
                category_id: id,
                contact_count: usize::try_from(contact_count).unwrap_or(usize::MAX),
            });
        }

        let changed = tx.execute("DELETE FROM categories WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::CategoryNotFound(id));
        }
        tx.commit()?;

        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
