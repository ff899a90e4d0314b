//! Request entry points
//!
//! Every method starts a fresh [`BuildContext`], so no graph state survives
//! from one request to the next and concurrent requests never share one.

use crate::config::EngineConfig;
use crate::directory::{normalize_query, CustomRecord, DirectoryStore, Field, Identity, Table};
use crate::graph::{Graph, REPORTS_TO_PREFIX};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::aggregation::build_aggregation;
use super::context::BuildContext;
use super::resolver::{resolve, ResolveResult};
use super::tree::build_rooted_tree;
use super::EngineResult;

/// What kind of view a response carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseKind {
    /// Reports-to tree below one person
    Tree,
    /// Flat view over a skill, position or org unit
    Aggregation,
    /// Several people matched; the caller has to pick one
    Disambiguation,
    /// Nothing matched
    Empty,
}

/// One entry of a disambiguation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub display_name: String,
}

impl From<&Identity> for Candidate {
    fn from(identity: &Identity) -> Self {
        Candidate {
            id: identity.unique_id.clone(),
            display_name: identity.full_name.clone(),
        }
    }
}

/// Result of one request: the graph plus what the UI needs to warn about
#[derive(Debug, Clone, Serialize)]
pub struct GraphResponse {
    #[serde(flatten)]
    pub graph: Graph,
    /// Set when the budget cut part of the relation off
    pub truncated: bool,
    pub candidates: Vec<Candidate>,
    pub kind: ResponseKind,
}

impl GraphResponse {
    pub fn empty() -> Self {
        GraphResponse {
            graph: Graph::new(),
            truncated: false,
            candidates: Vec::new(),
            kind: ResponseKind::Empty,
        }
    }

    fn from_context<S: DirectoryStore + ?Sized>(ctx: BuildContext<'_, S>, kind: ResponseKind) -> Self {
        let (graph, truncated) = ctx.finish();
        GraphResponse {
            graph,
            truncated,
            candidates: Vec::new(),
            kind,
        }
    }

    fn disambiguation(matches: &[Identity]) -> Self {
        GraphResponse {
            candidates: matches.iter().map(Candidate::from).collect(),
            kind: ResponseKind::Disambiguation,
            ..Self::empty()
        }
    }
}

/// Details shown for a clicked node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub name: String,
    pub reports_to: Option<String>,
    /// Custom position when one is set, hierarchy title otherwise
    pub title: String,
    pub location: String,
    pub org_unit: String,
    pub custom: Option<CustomRecord>,
}

impl NodeDetails {
    fn new(identity: Identity, custom: Option<CustomRecord>) -> Self {
        let title = custom
            .as_ref()
            .map(|c| c.position.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or(identity.title);
        NodeDetails {
            name: identity.full_name,
            reports_to: identity.manager_name,
            title,
            location: identity.location,
            org_unit: identity.org_unit,
            custom,
        }
    }
}

/// Graph construction over a shared directory
pub struct Explorer<S: DirectoryStore + ?Sized> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: DirectoryStore + ?Sized> Explorer<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn context(&self) -> BuildContext<'_, S> {
        BuildContext::new(&*self.store, &self.config)
    }

    /// Free-text search
    ///
    /// Tried in order: person name, custom position, custom skill, org
    /// unit. A name with several matches yields a candidate list instead of
    /// a graph.
    pub fn search(&self, term: &str) -> EngineResult<GraphResponse> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(GraphResponse::empty());
        }
        let mut ctx = self.context();

        match resolve(&mut ctx, term, Field::Name)? {
            ResolveResult::OneMatch(identity) => {
                info!("Search {:?}: tree for {}", term, identity.full_name);
                build_rooted_tree(&mut ctx, &identity)?;
                return Ok(GraphResponse::from_context(ctx, ResponseKind::Tree));
            }
            ResolveResult::ManyMatches(matches) => {
                info!("Search {:?}: {} candidates", term, matches.len());
                return Ok(GraphResponse::disambiguation(&matches));
            }
            ResolveResult::None => {}
        }

        for field in [Field::Position, Field::Skill, Field::OrgUnit] {
            let matches = resolve(&mut ctx, term, field)?.into_vec();
            if matches.is_empty() {
                continue;
            }

            let (base, attribute_search) = match field {
                Field::OrgUnit => (format!("\"{}\"", term), false),
                _ => (term.to_string(), true),
            };
            info!("Search {:?}: {} members by {}", term, matches.len(), field);
            build_aggregation(&mut ctx, &base, &matches, attribute_search)?;
            return Ok(GraphResponse::from_context(ctx, ResponseKind::Aggregation));
        }

        info!("Search {:?}: no results", term);
        Ok(GraphResponse::empty())
    }

    /// Tree for a candidate picked from a disambiguation list
    pub fn select_candidate(&self, unique_id: &str) -> EngineResult<GraphResponse> {
        let unique_id = unique_id.trim();
        if unique_id.is_empty() {
            return Ok(GraphResponse::empty());
        }
        let mut ctx = self.context();
        let picked = ctx
            .lookup(unique_id, Field::UniqueId, Table::Primary)?
            .into_iter()
            .find(|i| i.unique_id == unique_id);

        match picked {
            Some(identity) => self.tree_response(ctx, &identity),
            None => {
                debug!("Candidate {} not in directory", unique_id);
                Ok(GraphResponse::empty())
            }
        }
    }

    /// Re-root the view on a clicked node
    ///
    /// Placeholder and container labels are unwrapped first. A label that
    /// names nobody is searched as free text, so clicking an aggregation
    /// container repeats that search.
    pub fn visit_node(&self, node_id: &str) -> EngineResult<GraphResponse> {
        let label = node_label(node_id);
        if label.is_empty() {
            return Ok(GraphResponse::empty());
        }

        let mut ctx = self.context();
        match self.find_person(&mut ctx, label)? {
            Some(identity) => self.tree_response(ctx, &identity),
            None => self.search(label),
        }
    }

    /// Landing view: the viewer's own tree, or the top of the organization
    pub fn home(&self, viewer_name: Option<&str>) -> EngineResult<GraphResponse> {
        let mut ctx = self.context();

        if let Some(viewer) = viewer_name.filter(|v| !v.trim().is_empty()) {
            if let Some(identity) = self.find_person(&mut ctx, viewer)? {
                return self.tree_response(ctx, &identity);
            }
            debug!("Viewer {:?} not in directory, showing {}", viewer, self.config.top_node);
        }

        match self.find_person(&mut ctx, &self.config.top_node)? {
            Some(identity) => self.tree_response(ctx, &identity),
            None => Ok(GraphResponse::empty()),
        }
    }

    /// Directory and custom data for a clicked node
    pub fn node_details(&self, node_id: &str) -> EngineResult<Option<NodeDetails>> {
        let label = node_label(node_id);
        if label.is_empty() {
            return Ok(None);
        }

        let mut ctx = self.context();
        let Some(identity) = self.find_person(&mut ctx, label)? else {
            return Ok(None);
        };
        let custom = self.store.custom_record(&identity.full_name)?;
        Ok(Some(NodeDetails::new(identity, custom)))
    }

    fn tree_response(&self, mut ctx: BuildContext<'_, S>, root: &Identity) -> EngineResult<GraphResponse> {
        build_rooted_tree(&mut ctx, root)?;
        Ok(GraphResponse::from_context(ctx, ResponseKind::Tree))
    }

    /// Name lookup preferring an exact node-key match over the first hit
    fn find_person(&self, ctx: &mut BuildContext<'_, S>, name: &str) -> EngineResult<Option<Identity>> {
        let Some(query) = normalize_query(name) else {
            return Ok(None);
        };
        let matches = ctx.lookup(&query, Field::Name, Table::Primary)?;
        let exact = matches.iter().position(|i| i.node_key().as_str() == query);
        Ok(match exact {
            Some(index) => matches.into_iter().nth(index),
            None => matches.into_iter().next(),
        })
    }
}

/// Strip the placeholder prefix and container quotes from a node id
fn node_label(node_id: &str) -> &str {
    let label = node_id.trim();
    let label = label.strip_prefix(REPORTS_TO_PREFIX).unwrap_or(label);
    label.trim_matches('"').trim()
}
