//! SQLite-backed directory store
//!
//! Every search term is bound as a statement parameter. Column expressions
//! come from the closed [`Field`] enum, never from caller input.

use super::identity::{CustomRecord, Identity};
use super::normalize::normalize_person_name;
use super::{DirectoryError, DirectoryResult, DirectoryStore, Field, Table, DEFAULT_RESULT_SIZE};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS hierarchy (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    unique_id TEXT NOT NULL,
    full_name TEXT NOT NULL,
    manager_name TEXT,
    title TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    org_unit TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS custom_data (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    user TEXT NOT NULL,
    position TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    skills TEXT NOT NULL DEFAULT '',
    team_dscrp TEXT NOT NULL DEFAULT '',
    distros TEXT NOT NULL DEFAULT '',
    share_pnts TEXT NOT NULL DEFAULT ''
);
"#;

const HIERARCHY_COLUMNS: &str = "unique_id, full_name, manager_name, title, location, org_unit";
const CUSTOM_COLUMNS: &str = "user, position, email, skills, team_dscrp, distros, share_pnts";

const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Directory stored in a SQLite database
pub struct SqliteDirectory {
    conn: Mutex<Connection>,
    result_size: usize,
}

impl SqliteDirectory {
    /// Open (or create) the database, retrying up to `attempts` times
    pub fn open(path: impl AsRef<Path>, attempts: u32) -> DirectoryResult<Self> {
        let path = path.as_ref();
        let attempts = attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match Connection::open(path) {
                Ok(conn) => {
                    info!("Opened directory database at {}", path.display());
                    return Self::with_connection(conn);
                }
                Err(e) => {
                    warn!(
                        "Failed to open directory database at {} (attempt {}/{}): {}",
                        path.display(),
                        attempt,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                    if attempt < attempts {
                        std::thread::sleep(RETRY_DELAY);
                    }
                }
            }
        }

        Err(DirectoryError::Unavailable(format!(
            "could not open {} after {} attempts: {}",
            path.display(),
            attempts,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    /// Private in-memory database
    pub fn open_in_memory() -> DirectoryResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DirectoryResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            result_size: DEFAULT_RESULT_SIZE,
        })
    }

    pub fn with_result_size(mut self, result_size: usize) -> Self {
        self.result_size = result_size;
        self
    }

    fn lock(&self) -> DirectoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DirectoryError::Unavailable("connection lock poisoned".to_string()))
    }

    /// Replace both tables with the given records in one transaction
    pub fn replace_all(&self, identities: &[Identity], custom: &[CustomRecord]) -> DirectoryResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM hierarchy", [])?;
        tx.execute("DELETE FROM custom_data", [])?;
        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO hierarchy ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                HIERARCHY_COLUMNS
            ))?;
            for i in identities {
                insert.execute(params![
                    i.unique_id,
                    i.full_name,
                    i.manager_name,
                    i.title,
                    i.location,
                    i.org_unit
                ])?;
            }

            let mut insert = tx.prepare(&format!(
                "INSERT INTO custom_data ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                CUSTOM_COLUMNS
            ))?;
            for r in custom {
                insert.execute(params![
                    r.user,
                    r.position,
                    r.email,
                    r.skills,
                    r.team_description,
                    r.distros,
                    r.sharepoints
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "Imported {} identities and {} custom records",
            identities.len(),
            custom.len()
        );
        Ok(())
    }

    pub fn identity_count(&self) -> DirectoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM hierarchy", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn column_expr(field: Field, table: Table) -> DirectoryResult<&'static str> {
    field.check(table)?;
    let expr = match (table, field) {
        (Table::Primary, Field::Name) => "replace(full_name, ' ', '_')",
        (Table::Primary, Field::UniqueId) => "unique_id",
        (Table::Primary, Field::OrgUnit) => "org_unit",
        (Table::Primary, Field::ManagerName) => "replace(manager_name, ' ', '_')",
        (Table::Custom, Field::Name) => "user",
        (Table::Custom, Field::Skill) => "skills",
        (Table::Custom, Field::Position) => "position",
        _ => return Err(DirectoryError::UnsupportedField { field, table }),
    };
    Ok(expr)
}

fn identity_from_row(row: &Row<'_>) -> rusqlite::Result<Identity> {
    Ok(Identity {
        unique_id: row.get(0)?,
        full_name: row.get(1)?,
        manager_name: row.get(2)?,
        title: row.get(3)?,
        location: row.get(4)?,
        org_unit: row.get(5)?,
    })
}

fn custom_from_row(row: &Row<'_>) -> rusqlite::Result<CustomRecord> {
    Ok(CustomRecord {
        user: row.get(0)?,
        position: row.get(1)?,
        email: row.get(2)?,
        skills: row.get(3)?,
        team_description: row.get(4)?,
        distros: row.get(5)?,
        sharepoints: row.get(6)?,
    })
}

impl DirectoryStore for SqliteDirectory {
    fn find_by_field(&self, term: &str, field: Field, table: Table) -> DirectoryResult<Vec<Identity>> {
        let expr = column_expr(field, table)?;
        // instr() is case-sensitive, unlike LIKE
        let (columns, from) = match table {
            Table::Primary => (HIERARCHY_COLUMNS, "hierarchy"),
            Table::Custom => (CUSTOM_COLUMNS, "custom_data"),
        };
        let sql = format!(
            "SELECT {} FROM {} WHERE instr({}, ?1) > 0 ORDER BY seq LIMIT ?2",
            columns, from, expr
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let limit = self.result_size as i64;
        let identities = match table {
            Table::Primary => stmt
                .query_map(params![term, limit], identity_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
            Table::Custom => stmt
                .query_map(params![term, limit], custom_from_row)?
                .map(|r| r.map(|record| record.as_identity()))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(identities)
    }

    fn custom_record(&self, user: &str) -> DirectoryResult<Option<CustomRecord>> {
        let user = normalize_person_name(user);
        if user.is_empty() {
            return Ok(None);
        }
        let conn = self.lock()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM custom_data WHERE instr(user, ?1) > 0 ORDER BY seq LIMIT 1",
                    CUSTOM_COLUMNS
                ),
                params![user],
                custom_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded() -> SqliteDirectory {
        let dir = SqliteDirectory::open_in_memory().unwrap();
        let identities = vec![
            Identity::new("E0_Bob_Jones", "Bob Jones").with_org_unit("Engineering"),
            Identity::new("E1_Alice_Smith", "Alice Smith").with_manager("E0_Bob_Jones").with_org_unit("Engineering"),
            Identity::new("E2_Sean_O'Neil", "Sean O'Neil").with_manager("E1_Alice_Smith").with_org_unit("Sales"),
        ];
        let mut alice = CustomRecord::new("Alice_Smith");
        alice.skills = "Rust, SQL".to_string();
        dir.replace_all(&identities, &[alice]).unwrap();
        dir
    }

    #[test]
    fn test_find_by_field() {
        let dir = seeded();
        let hits = dir.find_by_field("Alice_Smith", Field::Name, Table::Primary).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].manager_name.as_deref(), Some("E0_Bob_Jones"));

        let reports = dir.find_by_field("Bob_Jones", Field::ManagerName, Table::Primary).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].full_name, "Alice Smith");
    }

    #[test]
    fn test_case_sensitive_and_ordered() {
        let dir = seeded();
        assert!(dir.find_by_field("engineering", Field::OrgUnit, Table::Primary).unwrap().is_empty());

        let engineering = dir.find_by_field("Engineering", Field::OrgUnit, Table::Primary).unwrap();
        let names: Vec<_> = engineering.iter().map(|i| i.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bob Jones", "Alice Smith"]);
    }

    #[test]
    fn test_terms_are_bound_not_spliced() {
        let dir = seeded();
        let hits = dir.find_by_field("O'Neil", Field::Name, Table::Primary).unwrap();
        assert_eq!(hits.len(), 1);

        let hostile = dir
            .find_by_field("x') OR 1=1 --", Field::Name, Table::Primary)
            .unwrap();
        assert!(hostile.is_empty());
        assert_eq!(dir.identity_count().unwrap(), 3);
    }

    #[test]
    fn test_result_size_cap() {
        let dir = seeded().with_result_size(1);
        let hits = dir.find_by_field("E", Field::UniqueId, Table::Primary).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_custom_lookups() {
        let dir = seeded();
        let hits = dir.find_by_field("SQL", Field::Skill, Table::Custom).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "Alice_Smith");

        let record = dir.custom_record("Alice Smith").unwrap().unwrap();
        assert_eq!(record.skills, "Rust, SQL");
        assert!(dir.custom_record("Bob Jones").unwrap().is_none());
        assert!(dir.find_by_field("x", Field::ManagerName, Table::Custom).is_err());
    }

    #[test]
    fn test_open_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("directory.db");
        {
            let dir = SqliteDirectory::open(&path, 3).unwrap();
            dir.replace_all(&[Identity::new("E1_Alice_Smith", "Alice Smith")], &[]).unwrap();
        }
        let reopened = SqliteDirectory::open(&path, 1).unwrap();
        assert_eq!(reopened.identity_count().unwrap(), 1);
    }

    #[test]
    fn test_open_failure_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("directory.db");
        let err = SqliteDirectory::open(&path, 2).err().unwrap();
        assert!(matches!(err, DirectoryError::Unavailable(_)));
    }
}
