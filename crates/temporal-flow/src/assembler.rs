//! Merges the per-category builder outputs into one [`DiagramModel`].

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};
use rayon::prelude::*;

use temporal_flow_core::{
    category::Category,
    entity::EntityStore,
    identifier::Id,
    model::{CategoryResult, DiagramModel, Edge, EdgeId},
};

use crate::builder::CategoryBuilder;

type BuilderOutput = (CategoryResult, IndexMap<EdgeId, Edge>);

/// Runs the three category builders over `store` and merges their output.
///
/// Nodes are concatenated callers, workflows, activities. Edges are merged in
/// the same order; when two builders emit the same [`EdgeId`] the earlier
/// builder's edge is kept and the later one is dropped without error.
///
/// With `parallel` set the builders run on the rayon pool. The merge always
/// consumes their results in [`Category::ALL`] order, so the model is the
/// same either way.
///
/// Endpoints are not checked against the node set. An edge whose target is
/// not defined in any category stays in the model.
pub fn assemble(store: &EntityStore, parallel: bool) -> DiagramModel {
    let builders: Vec<CategoryBuilder<'_>> = Category::ALL
        .into_iter()
        .map(|category| CategoryBuilder::new(category, store.records(category)))
        .collect();

    let run = |builder: &CategoryBuilder<'_>| -> BuilderOutput {
        (builder.produce_nodes(), builder.produce_edges())
    };
    let outputs: Vec<BuilderOutput> = if parallel {
        builders.par_iter().map(run).collect()
    } else {
        builders.iter().map(run).collect()
    };

    let mut nodes = Vec::new();
    let mut node_ids = IndexMap::new();
    let mut seen: IndexSet<EdgeId> = IndexSet::new();
    let mut edges = Vec::new();

    for (result, category_edges) in outputs {
        let category = result.category();
        let (category_nodes, ids) = result.into_parts();

        let mut discarded = 0usize;
        for (id, edge) in category_edges {
            if seen.insert(id) {
                edges.push(edge);
            } else {
                trace!(category:% = category, edge_id:% = id; "Duplicate edge discarded");
                discarded += 1;
            }
        }

        debug!(
            category:% = category,
            nodes = category_nodes.len(),
            duplicate_edges = discarded;
            "Category merged"
        );
        nodes.extend(category_nodes);
        node_ids.insert(category, ids);
    }

    warn_collisions(&node_ids);

    let model = DiagramModel::new(nodes, node_ids, edges);
    info!(nodes = model.node_count(), edges = model.edge_count(); "Graph assembled");
    model
}

/// Reports identifiers registered under more than one category.
///
/// Such identifiers produce several nodes with the same id; the collision
/// is logged and left as is.
fn warn_collisions(node_ids: &IndexMap<Category, IndexSet<Id>>) {
    let mut owners: IndexMap<Id, Vec<Category>> = IndexMap::new();
    for (category, ids) in node_ids {
        for id in ids {
            owners.entry(*id).or_default().push(*category);
        }
    }

    for (id, categories) in owners.iter().filter(|(_, c)| c.len() > 1) {
        let categories = categories
            .iter()
            .map(Category::prefix)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(id:% = id, categories:% = categories; "Identifier defined in more than one category");
    }
}
