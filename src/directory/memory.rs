//! In-process directory store

use super::identity::{CustomRecord, Identity};
use super::normalize::{normalize_person_name, underscore_form};
use super::{DirectoryResult, DirectoryStore, Field, Table, DEFAULT_RESULT_SIZE};
use std::borrow::Cow;
use tracing::debug;

/// Directory held entirely in memory
///
/// Records keep their insertion order, which is the order lookups return.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    identities: Vec<Identity>,
    custom: Vec<CustomRecord>,
    result_size: usize,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            identities: Vec::new(),
            custom: Vec::new(),
            result_size: DEFAULT_RESULT_SIZE,
        }
    }

    pub fn from_records(identities: Vec<Identity>, custom: Vec<CustomRecord>) -> Self {
        debug!(
            "Memory directory with {} identities and {} custom records",
            identities.len(),
            custom.len()
        );
        Self {
            identities,
            custom,
            result_size: DEFAULT_RESULT_SIZE,
        }
    }

    pub fn with_result_size(mut self, result_size: usize) -> Self {
        self.result_size = result_size;
        self
    }

    pub fn insert(&mut self, identity: Identity) {
        self.identities.push(identity);
    }

    pub fn insert_custom(&mut self, record: CustomRecord) {
        self.custom.push(record);
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn custom_records(&self) -> &[CustomRecord] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

fn primary_value(identity: &Identity, field: Field) -> Option<Cow<'_, str>> {
    match field {
        Field::Name => Some(Cow::Owned(underscore_form(&identity.full_name))),
        Field::UniqueId => Some(Cow::Borrowed(identity.unique_id.as_str())),
        Field::OrgUnit => Some(Cow::Borrowed(identity.org_unit.as_str())),
        Field::ManagerName => identity
            .manager_name
            .as_deref()
            .map(|m| Cow::Owned(underscore_form(m))),
        Field::Skill | Field::Position => None,
    }
}

fn custom_value(record: &CustomRecord, field: Field) -> Option<&str> {
    match field {
        Field::Name => Some(record.user.as_str()),
        Field::Skill => Some(record.skills.as_str()),
        Field::Position => Some(record.position.as_str()),
        Field::UniqueId | Field::OrgUnit | Field::ManagerName => None,
    }
}

impl DirectoryStore for MemoryDirectory {
    fn find_by_field(&self, term: &str, field: Field, table: Table) -> DirectoryResult<Vec<Identity>> {
        field.check(table)?;

        let matches = match table {
            Table::Primary => self
                .identities
                .iter()
                .filter(|i| primary_value(i, field).is_some_and(|v| v.contains(term)))
                .take(self.result_size)
                .cloned()
                .collect(),
            Table::Custom => self
                .custom
                .iter()
                .filter(|r| custom_value(r, field).is_some_and(|v| v.contains(term)))
                .take(self.result_size)
                .map(CustomRecord::as_identity)
                .collect(),
        };
        Ok(matches)
    }

    fn custom_record(&self, user: &str) -> DirectoryResult<Option<CustomRecord>> {
        let user = normalize_person_name(user);
        if user.is_empty() {
            return Ok(None);
        }
        Ok(self.custom.iter().find(|r| r.user.contains(&user)).cloned())
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}
