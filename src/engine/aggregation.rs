//! Flat membership view for a skill, position or org unit

use crate::directory::{DirectoryStore, Field, Identity, Table};
use crate::graph::{Link, Node, NodeKey};
use tracing::debug;

use super::boss::{attach_boss_key, manager_key, needs_placeholder};
use super::context::BuildContext;
use super::EngineResult;

/// Manager reference used when a custom-data member has no hierarchy entry
pub const NO_BOSS_FOUND: &str = "No_Boss_Found";

/// Build a container node `base` with every match hanging off it
///
/// Each member gets its manager attached and a unit link to the container;
/// nothing below the members is expanded. With `attribute_search` the
/// matches are name-only custom-data rows and each manager is looked up in
/// the hierarchy first.
///
/// Members stop being added once the next one (with its manager
/// placeholder) would exceed the node ceiling. A full page of matches means
/// the store may have held more; both cases mark the pass truncated.
pub fn build_aggregation<S: DirectoryStore + ?Sized>(
    ctx: &mut BuildContext<'_, S>,
    base: &str,
    matches: &[Identity],
    attribute_search: bool,
) -> EngineResult<()> {
    if ctx.is_full_page(matches.len()) {
        ctx.mark_truncated();
    }

    let base = NodeKey::new(base);
    ctx.graph_mut().add_node(Node::container(base.clone()));

    for member in matches {
        let key = member.node_key();
        if key.as_str().is_empty() {
            continue;
        }

        let manager = if attribute_search {
            match ctx.lookup_one(key.as_str(), Field::Name, Table::Primary)? {
                Some(entry) => entry.manager_name.and_then(|m| manager_key(&key, &m)),
                None => Some(NO_BOSS_FOUND.to_string()),
            }
        } else {
            member.manager_name.as_deref().and_then(|m| manager_key(&key, m))
        };

        let needed = usize::from(!ctx.graph().contains(key.as_str()))
            + usize::from(manager.as_deref().is_some_and(|m| needs_placeholder(ctx.graph(), m)));
        if !ctx.budget().fits(ctx.node_count(), needed) {
            debug!("Aggregation {} stopped at {} nodes", base, ctx.node_count());
            ctx.mark_truncated();
            break;
        }

        if let Some(manager) = &manager {
            attach_boss_key(ctx.graph_mut(), &key, manager);
        }
        ctx.graph_mut().add_node(Node::person(key.clone(), 1));
        ctx.graph_mut().add_link(Link::unit(key, base.clone()));
    }

    debug!(
        "Aggregation {}: {} members, {} nodes",
        base,
        matches.len(),
        ctx.node_count()
    );
    Ok(())
}
