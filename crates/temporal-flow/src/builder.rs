//! Per-category node and edge production.
//!
//! A [`CategoryBuilder`] sees a single category's mapping and nothing else.
//! Callers, workflows and activities share one type; the category tag picks
//! the behaviour, so the assembler can treat all three uniformly.

use indexmap::IndexMap;
use log::{debug, trace};

use temporal_flow_core::{
    category::Category,
    entity::EntityRecord,
    identifier::Id,
    model::{CategoryResult, Edge, EdgeId, Node},
};

/// Converts one category's records into nodes and edges.
#[derive(Debug, Clone, Copy)]
pub struct CategoryBuilder<'a> {
    category: Category,
    records: &'a IndexMap<Id, EntityRecord>,
}

impl<'a> CategoryBuilder<'a> {
    pub fn new(category: Category, records: &'a IndexMap<Id, EntityRecord>) -> Self {
        Self { category, records }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Emits one node per record, in mapping order.
    pub fn produce_nodes(&self) -> CategoryResult {
        let mut result = CategoryResult::new(self.category);
        for record in self.records.values() {
            result.push(Node::new(self.category, record.clone()));
        }

        debug!(category:% = self.category, nodes = result.nodes().len(); "Nodes produced");
        result
    }

    /// Walks every record's downstream chain and emits its hops.
    ///
    /// Each record contributes a path `id -> d0 -> d1 -> ...`, never a star
    /// from `id` to every downstream entry. Within this builder a repeated
    /// hop overwrites the earlier entry in place.
    ///
    /// Activities are leaves: their builder yields no edges whatever their
    /// records contain.
    pub fn produce_edges(&self) -> IndexMap<EdgeId, Edge> {
        let mut edges = IndexMap::new();

        match self.category {
            Category::Activity => {}
            Category::Caller | Category::Workflow => {
                for (identifier, record) in self.records {
                    let mut source = *identifier;
                    for target in record.downstream() {
                        let edge = Edge::new(source, *target);
                        trace!(edge_id:% = edge.id(); "Hop");
                        edges.insert(edge.id(), edge);
                        source = *target;
                    }
                }
            }
        }

        debug!(category:% = self.category, edges = edges.len(); "Edges produced");
        edges
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,6}"
    }

    fn chain_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
        (identifier(), prop::collection::vec(identifier(), 0..8))
    }

    fn mapping_strategy() -> impl Strategy<Value = IndexMap<Id, EntityRecord>> {
        prop::collection::vec(chain_strategy(), 0..12).prop_map(|chains| {
            chains
                .into_iter()
                .map(|(id, downstream)| {
                    let id = Id::new(&id);
                    let downstream = downstream.iter().map(|d| Id::new(d)).collect();
                    (id, EntityRecord::new(id, downstream, "prop.py"))
                })
                .collect()
        })
    }

    fn category_strategy() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    // ===================
    // Property Test Functions
    // ===================

    /// One node per mapping entry, each id equal to its key exactly once.
    fn check_nodes_match_mapping(
        category: Category,
        records: &IndexMap<Id, EntityRecord>,
    ) -> Result<(), TestCaseError> {
        let result = CategoryBuilder::new(category, records).produce_nodes();

        prop_assert_eq!(result.nodes().len(), records.len());
        for (node, key) in result.nodes().iter().zip(records.keys()) {
            prop_assert_eq!(node.id(), *key);
            prop_assert_eq!(node.category(), category);
        }
        Ok(())
    }

    /// Activities yield no edges regardless of their downstream content.
    fn check_activity_edges_empty(
        records: &IndexMap<Id, EntityRecord>,
    ) -> Result<(), TestCaseError> {
        let edges = CategoryBuilder::new(Category::Activity, records).produce_edges();

        prop_assert!(edges.is_empty());
        Ok(())
    }

    /// A single chain yields consecutive hops in order.
    fn check_chain_hops(root: &str, downstream: &[String]) -> Result<(), TestCaseError> {
        let root_id = Id::new(root);
        let downstream_ids: Vec<Id> = downstream.iter().map(|d| Id::new(d)).collect();
        let records: IndexMap<Id, EntityRecord> = [(
            root_id,
            EntityRecord::new(root_id, downstream_ids.clone(), "prop.py"),
        )]
        .into_iter()
        .collect();

        let edges = CategoryBuilder::new(Category::Workflow, &records).produce_edges();

        let mut expected: IndexMap<EdgeId, Edge> = IndexMap::new();
        let mut source = root_id;
        for target in &downstream_ids {
            let edge = Edge::new(source, *target);
            expected.insert(edge.id(), edge);
            source = *target;
        }
        let produced: Vec<Edge> = edges.values().copied().collect();
        let expected: Vec<Edge> = expected.values().copied().collect();
        prop_assert_eq!(produced, expected);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn nodes_match_mapping(category in category_strategy(), records in mapping_strategy()) {
            check_nodes_match_mapping(category, &records)?;
        }

        #[test]
        fn activity_edges_empty(records in mapping_strategy()) {
            check_activity_edges_empty(&records)?;
        }

        #[test]
        fn chain_hops((root, downstream) in chain_strategy()) {
            check_chain_hops(&root, &downstream)?;
        }
    }
}
