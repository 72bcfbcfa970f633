//! The `flow` document consumed by the rendering collaborator.
//!
//! ```json
//! {
//!   "nodes": [{
//!     "id": "w1",
//!     "type": "custom",
//!     "data": { "prefix": "workflow", "source_data": { "data": ["a1"], "path": "wf.py" } },
//!     "position": { "x": 0, "y": 0 },
//!     "handles": { "source": "w1", "target": "w1" }
//!   }],
//!   "edges": [{ "id": "w1-a1", "source": "w1", "target": "a1", "type": "curve" }]
//! }
//! ```
//!
//! Every node is placed at the origin; positions are assigned downstream.

use log::debug;
use serde::Serialize;

use temporal_flow_core::{
    identifier::Id,
    model::{DiagramModel, Edge, EdgeId, EdgeKind, Node},
};

use crate::export::{self, Exporter};

const NODE_TYPE: &str = "custom";

#[derive(Serialize)]
struct Document<'a> {
    nodes: Vec<FlowNode<'a>>,
    edges: Vec<FlowEdge>,
}

#[derive(Serialize)]
struct FlowNode<'a> {
    id: Id,
    #[serde(rename = "type")]
    node_type: &'static str,
    data: NodeData<'a>,
    position: Position,
    handles: Handles,
}

#[derive(Serialize)]
struct NodeData<'a> {
    prefix: &'static str,
    source_data: SourceData<'a>,
}

#[derive(Serialize)]
struct SourceData<'a> {
    data: &'a [Id],
    #[serde(skip_serializing_if = "Option::is_none")]
    docstring: Option<&'a str>,
    path: &'a str,
}

#[derive(Serialize)]
struct Position {
    x: f32,
    y: f32,
}

/// One inbound and one outbound connection point, both keyed by the node id.
#[derive(Serialize)]
struct Handles {
    source: Id,
    target: Id,
}

#[derive(Serialize)]
struct FlowEdge {
    id: EdgeId,
    source: Id,
    target: Id,
    #[serde(rename = "type")]
    kind: EdgeKind,
}

impl<'a> From<&'a Node> for FlowNode<'a> {
    fn from(node: &'a Node) -> Self {
        let payload = node.payload();
        Self {
            id: node.id(),
            node_type: NODE_TYPE,
            data: NodeData {
                prefix: node.category().prefix(),
                source_data: SourceData {
                    data: payload.downstream(),
                    docstring: payload.docstring(),
                    path: payload.path(),
                },
            },
            position: Position { x: 0.0, y: 0.0 },
            handles: Handles {
                source: node.id(),
                target: node.id(),
            },
        }
    }
}

impl From<&Edge> for FlowEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id(),
            source: edge.source(),
            target: edge.target(),
            kind: edge.kind(),
        }
    }
}

/// Writes the node/edge document for the rendering collaborator.
#[derive(Debug, Clone, Copy)]
pub struct FlowExporter {
    pretty: bool,
}

impl FlowExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for FlowExporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Exporter for FlowExporter {
    fn export(&self, model: &DiagramModel) -> Result<String, export::Error> {
        let document = Document {
            nodes: model.nodes().iter().map(FlowNode::from).collect(),
            edges: model.edges().iter().map(FlowEdge::from).collect(),
        };
        debug!(
            nodes = document.nodes.len(),
            edges = document.edges.len();
            "Exporting flow document"
        );

        export::to_json(&document, self.pretty)
    }
}
