//! Typed node/edge model produced by graph construction.
//!
//! # Overview
//!
//! - [`Node`] - One per input record, tagged with its [`Category`].
//! - [`Edge`] - A single hop of an invocation chain, identified by [`EdgeId`].
//! - [`CategoryResult`] - Nodes produced by one category builder.
//! - [`DiagramModel`] - The merged, deduplicated model handed to layout and rendering.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::{
    category::Category,
    entity::EntityRecord,
    identifier::{EDGE_SEPARATOR, Id},
};

/// A graph node wrapping the record it was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: Id,
    category: Category,
    payload: EntityRecord,
}

impl Node {
    /// Creates the node for `payload`. Its id is the record identifier.
    pub fn new(category: Category, payload: EntityRecord) -> Self {
        Self {
            id: payload.identifier(),
            category,
            payload,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn payload(&self) -> &EntityRecord {
        &self.payload
    }
}

/// Rendering style marker carried by every edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Curve,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Curve => f.write_str("curve"),
        }
    }
}

/// Identity of an edge: always `source + "-" + target`.
///
/// Two edges are the same edge iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(Id);

impl EdgeId {
    /// Builds the id of the hop `source -> target`.
    pub fn new(source: Id, target: Id) -> Self {
        Self(source.chain(target))
    }

    /// Returns the underlying interned id.
    pub fn as_id(&self) -> Id {
        self.0
    }

    /// Splits the id on the last separator.
    ///
    /// Recovers `(source, target)` only when neither identifier contains
    /// [`EDGE_SEPARATOR`]; with separators inside identifiers the split is
    /// ambiguous and the result reflects the last one.
    ///
    /// # Examples
    ///
    /// ```
    /// use temporal_flow_core::{identifier::Id, model::EdgeId};
    ///
    /// let id = EdgeId::new(Id::new("w1"), Id::new("a1"));
    /// assert_eq!(id.endpoints(), Some(("w1".to_string(), "a1".to_string())));
    /// ```
    pub fn endpoints(&self) -> Option<(String, String)> {
        self.0.with_str(|value| {
            value
                .rsplit_once(EDGE_SEPARATOR)
                .map(|(source, target)| (source.to_string(), target.to_string()))
        })
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialEq<&str> for EdgeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A directed hop between two entities.
///
/// Edges are derived from invocation chains and are only constructible
/// through [`Edge::new`], which keeps the id consistent with the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    id: EdgeId,
    source: Id,
    target: Id,
    kind: EdgeKind,
}

impl Edge {
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            id: EdgeId::new(source, target),
            source,
            target,
            kind: EdgeKind::Curve,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// Nodes produced by a single category builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResult {
    category: Category,
    nodes: Vec<Node>,
    node_ids: IndexSet<Id>,
}

impl CategoryResult {
    /// Creates an empty result for `category`.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            nodes: Vec::new(),
            node_ids: IndexSet::new(),
        }
    }

    /// Appends a node and registers its id.
    pub fn push(&mut self, node: Node) {
        self.node_ids.insert(node.id());
        self.nodes.push(node);
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_ids(&self) -> &IndexSet<Id> {
        &self.node_ids
    }

    /// Splits the result into its nodes and id set.
    pub fn into_parts(self) -> (Vec<Node>, IndexSet<Id>) {
        (self.nodes, self.node_ids)
    }
}

/// The unified diagram model.
///
/// Nodes are ordered callers, workflows, activities. Edges are in
/// first-seen order and carry unique ids. An edge endpoint may name a node
/// that is absent from `nodes`; consumers are expected to tolerate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagramModel {
    nodes: Vec<Node>,
    node_ids: IndexMap<Category, IndexSet<Id>>,
    edges: Vec<Edge>,
}

impl DiagramModel {
    /// Creates a model from already merged parts.
    pub fn new(
        nodes: Vec<Node>,
        node_ids: IndexMap<Category, IndexSet<Id>>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            nodes,
            node_ids,
            edges,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the id registry of every category, in processing order.
    pub fn all_node_ids(&self) -> &IndexMap<Category, IndexSet<Id>> {
        &self.node_ids
    }

    /// Returns the ids registered for `category`, if the category was assembled.
    pub fn node_ids(&self, category: Category) -> Option<&IndexSet<Id>> {
        self.node_ids.get(&category)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Returns the first category, in processing order, registering `id`.
    pub fn category_of(&self, id: Id) -> Option<Category> {
        self.node_ids
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(category, _)| *category)
    }

    /// Returns `true` if some edge starts or ends at `id`.
    pub fn is_connected(&self, id: Id) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source() == id || edge.target() == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Splits the model into nodes, id registry and edges.
    pub fn into_parts(self) -> (Vec<Node>, IndexMap<Category, IndexSet<Id>>, Vec<Edge>) {
        (self.nodes, self.node_ids, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> EntityRecord {
        EntityRecord::new(Id::new(id), Vec::new(), "test.py")
    }

    #[test]
    fn test_node_id_is_record_identifier() {
        let node = Node::new(Category::Workflow, record("w1"));

        assert_eq!(node.id(), "w1");
        assert_eq!(node.category(), Category::Workflow);
        assert_eq!(node.payload().path(), "test.py");
    }

    #[test]
    fn test_edge_id_format() {
        let edge = Edge::new(Id::new("c1"), Id::new("w1"));

        assert_eq!(edge.id(), "c1-w1");
        assert_eq!(edge.source(), "c1");
        assert_eq!(edge.target(), "w1");
        assert_eq!(edge.kind(), EdgeKind::Curve);
    }

    #[test]
    fn test_same_endpoints_same_edge() {
        let e1 = Edge::new(Id::new("x"), Id::new("y"));
        let e2 = Edge::new(Id::new("x"), Id::new("y"));

        assert_eq!(e1.id(), e2.id());
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_endpoints_ambiguous_with_separator() {
        // Both hops collapse to "send-email-log"; the split picks the last '-'.
        let id = EdgeId::new(Id::new("send"), Id::new("email-log"));
        let other = EdgeId::new(Id::new("send-email"), Id::new("log"));

        assert_eq!(id, "send-email-log");
        assert_eq!(id, other);
        assert_eq!(
            id.endpoints(),
            Some(("send-email".to_string(), "log".to_string()))
        );
    }

    #[test]
    fn test_category_result_push() {
        let mut result = CategoryResult::new(Category::Activity);
        result.push(Node::new(Category::Activity, record("a1")));
        result.push(Node::new(Category::Activity, record("a2")));

        assert_eq!(result.category(), Category::Activity);
        assert_eq!(result.nodes().len(), 2);
        assert!(result.node_ids().contains(&Id::new("a1")));
        assert!(result.node_ids().contains(&Id::new("a2")));
    }

    #[test]
    fn test_model_lookup() {
        let mut ids = IndexMap::new();
        ids.insert(Category::Caller, IndexSet::from([Id::new("c1")]));
        ids.insert(Category::Workflow, IndexSet::from([Id::new("w1")]));

        let model = DiagramModel::new(
            vec![
                Node::new(Category::Caller, record("c1")),
                Node::new(Category::Workflow, record("w1")),
            ],
            ids,
            vec![Edge::new(Id::new("c1"), Id::new("w1"))],
        );

        assert_eq!(model.node_count(), 2);
        assert_eq!(model.edge_count(), 1);
        assert_eq!(model.node(Id::new("w1")).map(Node::category), Some(Category::Workflow));
        assert!(model.node(Id::new("missing")).is_none());
        assert_eq!(model.category_of(Id::new("c1")), Some(Category::Caller));
        assert!(model.is_connected(Id::new("c1")));
        assert!(!model.is_connected(Id::new("a1")));
        assert!(model.node_ids(Category::Activity).is_none());
    }

    #[test]
    fn test_model_serializes_categories_as_keys() {
        let mut ids = IndexMap::new();
        ids.insert(Category::Caller, IndexSet::from([Id::new("c9")]));
        let model = DiagramModel::new(
            vec![Node::new(Category::Caller, record("c9"))],
            ids,
            Vec::new(),
        );

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["node_ids"]["caller"][0], "c9");
        assert_eq!(value["nodes"][0]["category"], "caller");
        assert_eq!(value["nodes"][0]["payload"]["path"], "test.py");
    }
}
