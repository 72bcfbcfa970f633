//! Visibility filter applied after assembly.

use indexmap::IndexSet;
use log::debug;

use temporal_flow_core::{identifier::Id, model::DiagramModel};

/// Drops every node that is neither the source nor the target of an edge.
///
/// Node order is preserved and the per-category id registries are
/// restricted to the surviving nodes. Edges are passed through untouched,
/// including those whose endpoints name no node. Running the filter on its
/// own output returns an equal model.
pub fn visible(model: &DiagramModel) -> DiagramModel {
    let connected: IndexSet<Id> = model
        .edges()
        .iter()
        .flat_map(|edge| [edge.source(), edge.target()])
        .collect();

    let nodes: Vec<_> = model
        .nodes()
        .iter()
        .filter(|node| connected.contains(&node.id()))
        .cloned()
        .collect();

    let node_ids = model
        .all_node_ids()
        .iter()
        .map(|(category, ids)| {
            let kept: IndexSet<Id> = ids
                .iter()
                .filter(|id| connected.contains(*id))
                .copied()
                .collect();
            (*category, kept)
        })
        .collect();

    debug!(
        kept = nodes.len(),
        dropped = model.node_count() - nodes.len();
        "Isolated nodes filtered"
    );
    DiagramModel::new(nodes, node_ids, model.edges().to_vec())
}
