//! Directory store boundary
//!
//! The engine reads identities through [`DirectoryStore`] only. Lookups are
//! case-sensitive substring matches, capped at a configured result size and
//! returned in stable order. Stores never build queries by splicing the
//! search term into query text.

pub mod identity;
pub mod loader;
pub mod memory;
pub mod normalize;
pub mod sqlite;

pub use identity::{CustomRecord, Identity};
pub use memory::MemoryDirectory;
pub use normalize::{is_valid_manager_reference, normalize_person_name, normalize_query};
pub use sqlite::SqliteDirectory;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default cap on rows returned by one lookup
pub const DEFAULT_RESULT_SIZE: usize = 400;

/// Directory errors
///
/// Everything except `UnsupportedField` means the store cannot answer and the
/// request has to fail.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Store cannot be reached or is in a broken state
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table has no column for this field
    #[error("Field {field} is not searchable in the {table} table")]
    UnsupportedField { field: Field, table: Table },
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Searchable attribute of a directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    UniqueId,
    OrgUnit,
    Skill,
    Position,
    ManagerName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::UniqueId => "uniqueId",
            Field::OrgUnit => "orgUnit",
            Field::Skill => "skill",
            Field::Position => "position",
            Field::ManagerName => "managerName",
        };
        f.write_str(name)
    }
}

/// Which record set a lookup runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Table {
    /// The reports-to hierarchy
    Primary,
    /// User-maintained custom data
    Custom,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Primary => f.write_str("primary"),
            Table::Custom => f.write_str("custom"),
        }
    }
}

impl Field {
    /// Reject field/table combinations that have no backing column
    pub fn check(self, table: Table) -> DirectoryResult<()> {
        let supported = match table {
            Table::Primary => matches!(
                self,
                Field::Name | Field::UniqueId | Field::OrgUnit | Field::ManagerName
            ),
            Table::Custom => matches!(self, Field::Name | Field::Skill | Field::Position),
        };
        if supported {
            Ok(())
        } else {
            Err(DirectoryError::UnsupportedField { field: self, table })
        }
    }
}

/// Read-only identity lookup consumed by the engine
///
/// Calls are synchronous and may block; async callers run them on a
/// blocking thread.
pub trait DirectoryStore: Send + Sync {
    /// All records whose `field` contains `term`, capped and in stable order
    ///
    /// Custom-table rows come back as name-only identities
    /// (see [`CustomRecord::as_identity`]).
    fn find_by_field(&self, term: &str, field: Field, table: Table) -> DirectoryResult<Vec<Identity>>;

    /// First match of [`find_by_field`](Self::find_by_field), if any
    fn find_one(&self, term: &str, field: Field, table: Table) -> DirectoryResult<Option<Identity>> {
        Ok(self.find_by_field(term, field, table)?.into_iter().next())
    }

    /// Custom data for a person, matched by normalized name
    fn custom_record(&self, user: &str) -> DirectoryResult<Option<CustomRecord>>;

    /// Row cap applied to every [`find_by_field`](Self::find_by_field) call
    ///
    /// A lookup returning this many rows may have left matches out.
    fn result_size(&self) -> usize {
        DEFAULT_RESULT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_support() {
        assert!(Field::ManagerName.check(Table::Primary).is_ok());
        assert!(Field::Skill.check(Table::Custom).is_ok());
        assert!(Field::Name.check(Table::Custom).is_ok());

        let err = Field::OrgUnit.check(Table::Custom).unwrap_err();
        assert_eq!(err.to_string(), "Field orgUnit is not searchable in the custom table");
        assert!(Field::Skill.check(Table::Primary).is_err());
    }
}
