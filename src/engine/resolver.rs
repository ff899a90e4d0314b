//! Search term to identity resolution

use crate::directory::{normalize_query, DirectoryStore, Field, Identity, Table};
use tracing::debug;

use super::context::BuildContext;
use super::EngineResult;

/// Outcome of resolving a search term
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveResult {
    None,
    OneMatch(Identity),
    ManyMatches(Vec<Identity>),
}

impl ResolveResult {
    pub fn from_matches(mut matches: Vec<Identity>) -> Self {
        match matches.len() {
            0 => ResolveResult::None,
            1 => ResolveResult::OneMatch(matches.remove(0)),
            _ => ResolveResult::ManyMatches(matches),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolveResult::None)
    }

    pub fn len(&self) -> usize {
        match self {
            ResolveResult::None => 0,
            ResolveResult::OneMatch(_) => 1,
            ResolveResult::ManyMatches(all) => all.len(),
        }
    }

    /// Every match, for consumers that take one-to-many results as they are
    pub fn into_vec(self) -> Vec<Identity> {
        match self {
            ResolveResult::None => Vec::new(),
            ResolveResult::OneMatch(one) => vec![one],
            ResolveResult::ManyMatches(all) => all,
        }
    }
}

/// Table a field is searched in
pub fn table_for(field: Field) -> Table {
    match field {
        Field::Skill | Field::Position => Table::Custom,
        Field::Name | Field::UniqueId | Field::OrgUnit | Field::ManagerName => Table::Primary,
    }
}

/// Resolve `term` against `field`
///
/// Name queries are normalized to `First_Last` first; attribute terms are
/// used as typed. A blank term resolves to nothing without a lookup.
pub fn resolve<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    term: &str,
    field: Field,
) -> EngineResult<ResolveResult> {
    let term = match field {
        Field::Name => match normalize_query(term) {
            Some(normalized) => normalized,
            None => return Ok(ResolveResult::None),
        },
        _ if term.trim().is_empty() => return Ok(ResolveResult::None),
        _ => term.to_string(),
    };

    let matches = ctx.lookup(&term, field, table_for(field))?;
    let result = ResolveResult::from_matches(matches);
    debug!("Resolved {:?} on {}: {} match(es)", term, field, result.len());
    Ok(result)
}
