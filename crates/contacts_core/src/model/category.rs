//! Category domain model and seed data.
//!
//! # Invariants
//! - Category names are 1..=50 characters.
//! - Seed rows carry fixed ids so contact references stay stable.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category identifier.
pub type CategoryId = i64;

pub const CATEGORY_NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    InvalidId(CategoryId),
    EmptyName,
    NameTooLong { chars: usize },
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "category id must be >= 1, got {id}"),
            Self::EmptyName => write!(f, "category name is required"),
            Self::NameTooLong { chars } => write!(
                f,
                "category name has {chars} characters; maximum is {CATEGORY_NAME_MAX_CHARS}"
            ),
        }
    }
}

impl Error for CategoryValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id < 1 {
            return Err(CategoryValidationError::InvalidId(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        let chars = self.name.chars().count();
        if chars > CATEGORY_NAME_MAX_CHARS {
            return Err(CategoryValidationError::NameTooLong { chars });
        }
        Ok(())
    }
}

/// Category rows inserted into an empty store at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySeed {
    pub categories: Vec<Category>,
}

impl CategorySeed {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Friend (1), Work (2), Family (3).
    pub fn defaults() -> Self {
        Self::new(vec![
            Category::new(1, "Friend"),
            Category::new(2, "Work"),
            Category::new(3, "Family"),
        ])
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        self.categories.iter().try_for_each(Category::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategorySeed, CategoryValidationError};

    #[test]
    fn default_seed_is_valid() {
        let seed = CategorySeed::defaults();
        assert!(seed.validate().is_ok());
        let names: Vec<&str> = seed.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Friend", "Work", "Family"]);
    }

    #[test]
    fn validate_rejects_bad_rows() {
        assert_eq!(
            Category::new(0, "x").validate(),
            Err(CategoryValidationError::InvalidId(0))
        );
        assert_eq!(
            Category::new(1, "  ").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert_eq!(
            Category::new(1, "n".repeat(51)).validate(),
            Err(CategoryValidationError::NameTooLong { chars: 51 })
        );
    }
}
