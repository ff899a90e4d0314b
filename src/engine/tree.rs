//! Bounded expansion of the reports-to relation below a root
//!
//! The directory stores "X reports to Y" on X, so expanding a node means
//! asking for everyone whose manager reference matches it. Expansion is
//! depth-first and bounded by the pass budget:
//! - a report already on screen gets another link but no new node
//! - a new report is added at `parent group + 1` with weight `1 / parent group`
//! - once the node ceiling is reached further reports are left out
//! - a node at the depth limit is added but not expanded

use crate::directory::{DirectoryStore, Field, Identity, Table};
use crate::graph::{Link, Node, NodeKey};
use tracing::debug;

use super::boss::attach_boss;
use super::context::BuildContext;
use super::EngineResult;

/// Tree for a single identity: its manager, itself, and its reports
///
/// The root sits at group 0, or at group 1 when a manager placeholder was
/// attached above it.
pub fn build_rooted_tree<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    root: &Identity,
) -> EngineResult<()> {
    let root_key = root.node_key();
    let with_boss = root
        .manager_name
        .as_deref()
        .is_some_and(|manager| attach_boss(ctx.graph_mut(), &root_key, manager));

    build_tree(ctx, root_key, u32::from(with_boss))
}

/// Add `root` at `root_group` and expand everything below it
pub fn build_tree<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    root: NodeKey,
    root_group: u32,
) -> EngineResult<()> {
    ctx.graph_mut().add_node(Node::person(root.clone(), root_group));
    if ctx.budget().allows_expansion(root_group, ctx.node_count()) {
        expand(ctx, &root, root_group)?;
    } else if has_hidden_reports(ctx, &root)? {
        ctx.mark_truncated();
    }

    debug!(
        "Tree for {}: {} nodes, {} links, truncated={}",
        root,
        ctx.node_count(),
        ctx.graph().link_count(),
        ctx.is_truncated()
    );
    Ok(())
}

fn expand<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    parent: &NodeKey,
    parent_group: u32,
) -> EngineResult<()> {
    let reports = ctx.lookup(parent.as_str(), Field::ManagerName, Table::Primary)?;
    if ctx.is_full_page(reports.len()) {
        ctx.mark_truncated();
    }
    let group = parent_group + 1;

    for report in reports {
        let key = report.node_key();
        if key.as_str().is_empty() {
            continue;
        }

        if ctx.graph().contains(key.as_str()) {
            // Reached again through another path: keep the first group
            ctx.graph_mut().add_link(Link::descent(key, parent.clone(), parent_group));
            continue;
        }

        if !ctx.budget().has_room(ctx.node_count()) {
            ctx.mark_truncated();
            continue;
        }

        ctx.graph_mut().add_node(Node::person(key.clone(), group));
        ctx.graph_mut().add_link(Link::descent(key.clone(), parent.clone(), parent_group));

        if ctx.budget().allows_expansion(group, ctx.node_count()) {
            expand(ctx, &key, group)?;
        } else if has_hidden_reports(ctx, &key)? {
            ctx.mark_truncated();
        }
    }
    Ok(())
}

/// Whether a node left unexpanded has reports that are not on screen
fn has_hidden_reports<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    key: &NodeKey,
) -> EngineResult<bool> {
    let reports = ctx.lookup(key.as_str(), Field::ManagerName, Table::Primary)?;
    Ok(reports
        .iter()
        .any(|r| !ctx.graph().contains(r.node_key().as_str())))
}
