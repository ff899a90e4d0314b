//! Request-scoped state of one graph-construction pass

use crate::config::EngineConfig;
use crate::directory::{DirectoryStore, Field, Identity, Table};
use crate::graph::{Graph, TraversalBudget};
use std::time::Instant;
use tracing::warn;

use super::EngineResult;

/// Everything one pass mutates
///
/// Owns the graph, the budget and the truncation flag for exactly one
/// request. Directory lookups go through [`lookup`](Self::lookup) so the
/// pass can stop once its query or time ceiling is reached.
pub struct BuildContext<'a, S: DirectoryStore + ?Sized> {
    store: &'a S,
    graph: Graph,
    budget: TraversalBudget,
    truncated: bool,
    queries: usize,
    max_queries: usize,
    deadline: Option<Instant>,
    ceiling_hit: bool,
}

impl<'a, S: DirectoryStore + ?Sized> BuildContext<'a, S> {
    pub fn new(store: &'a S, config: &EngineConfig) -> Self {
        Self {
            store,
            graph: Graph::new(),
            budget: config.budget(),
            truncated: false,
            queries: 0,
            max_queries: config.max_queries,
            deadline: config.time_limit().map(|limit| Instant::now() + limit),
            ceiling_hit: false,
        }
    }

    pub fn with_budget(mut self, budget: TraversalBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn budget(&self) -> TraversalBudget {
        self.budget
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn queries(&self) -> usize {
        self.queries
    }

    /// Run one directory lookup against the pass ceilings
    ///
    /// Once the query count or the deadline is exhausted every further
    /// lookup yields nothing and the pass is marked truncated.
    pub fn lookup(&mut self, term: &str, field: Field, table: Table) -> EngineResult<Vec<Identity>> {
        if self.ceiling_reached() {
            if !self.ceiling_hit {
                warn!(
                    "Query ceiling reached after {} lookups, returning partial graph",
                    self.queries
                );
                self.ceiling_hit = true;
            }
            self.truncated = true;
            return Ok(Vec::new());
        }
        self.queries += 1;
        Ok(self.store.find_by_field(term, field, table)?)
    }

    pub fn lookup_one(&mut self, term: &str, field: Field, table: Table) -> EngineResult<Option<Identity>> {
        Ok(self.lookup(term, field, table)?.into_iter().next())
    }

    /// Whether a lookup returning `rows` rows hit the store's row cap
    pub fn is_full_page(&self, rows: usize) -> bool {
        rows >= self.store.result_size()
    }

    fn ceiling_reached(&self) -> bool {
        self.queries >= self.max_queries || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Hand the finished graph and its truncation flag to the caller
    pub fn finish(self) -> (Graph, bool) {
        (self.graph, self.truncated)
    }
}
