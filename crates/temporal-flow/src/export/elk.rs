//! The `elk` document consumed by the layered layout collaborator.
//!
//! Layout options are written as strings, the way the layout engine reads
//! them. Node handles sit on the left (inbound) and right (outbound) sides.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use temporal_flow_core::{
    category::Category,
    identifier::Id,
    model::{DiagramModel, EdgeId},
};

use crate::{
    config::LayoutConfig,
    export::{self, Exporter},
};

const ROOT_ID: &str = "root";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Graph {
    id: &'static str,
    layout_options: IndexMap<&'static str, String>,
    children: Vec<Child>,
    edges: Vec<ElkEdge>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Child {
    id: Id,
    width: u32,
    height: u32,
    target_position: &'static str,
    source_position: &'static str,
    category: Category,
}

#[derive(Serialize)]
struct ElkEdge {
    id: EdgeId,
    sources: [Id; 1],
    targets: [Id; 1],
}

/// Writes the layered-layout graph for the layout collaborator.
#[derive(Debug, Clone)]
pub struct ElkExporter<'a> {
    layout: &'a LayoutConfig,
    pretty: bool,
}

impl<'a> ElkExporter<'a> {
    pub fn new(layout: &'a LayoutConfig, pretty: bool) -> Self {
        Self { layout, pretty }
    }

    fn layout_options(&self) -> IndexMap<&'static str, String> {
        IndexMap::from([
            ("elk.algorithm", self.layout.algorithm().to_string()),
            ("elk.direction", self.layout.direction().to_string()),
            (
                "elk.layered.spacing.nodeNodeBetweenLayers",
                self.layout.layer_spacing().to_string(),
            ),
            ("elk.spacing.nodeNode", self.layout.node_spacing().to_string()),
        ])
    }
}

impl Exporter for ElkExporter<'_> {
    fn export(&self, model: &DiagramModel) -> Result<String, export::Error> {
        let (width, height) = (self.layout.node_width(), self.layout.node_height());
        if width == 0 || height == 0 {
            return Err(export::Error::Render(format!(
                "node size must be positive, got {width}x{height}"
            )));
        }

        let children = model
            .nodes()
            .iter()
            .map(|node| Child {
                id: node.id(),
                width,
                height,
                target_position: "left",
                source_position: "right",
                category: node.category(),
            })
            .collect();

        let edges = model
            .edges()
            .iter()
            .map(|edge| ElkEdge {
                id: edge.id(),
                sources: [edge.source()],
                targets: [edge.target()],
            })
            .collect();

        let graph = Graph {
            id: ROOT_ID,
            layout_options: self.layout_options(),
            children,
            edges,
        };
        debug!(
            children = graph.children.len(),
            edges = graph.edges.len(),
            algorithm = self.layout.algorithm();
            "Exporting elk document"
        );

        export::to_json(&graph, self.pretty)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use temporal_flow_core::entity::{EntityRecord, EntityStore};

    use super::*;
    use crate::assembler::assemble;

    fn sample_model() -> DiagramModel {
        let store = EntityStore::new()
            .with_record(
                Category::Workflow,
                EntityRecord::new(Id::new("w1"), vec![Id::new("a1")], "workflows.py"),
            )
            .with_record(
                Category::Activity,
                EntityRecord::new(Id::new("a1"), vec![], "activities.py"),
            );
        assemble(&store, false)
    }

    fn export_value(layout: &LayoutConfig) -> Value {
        let json = ElkExporter::new(layout, true).export(&sample_model()).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_default_layout_options() {
        let value = export_value(&LayoutConfig::default());

        assert_eq!(value["id"], "root");
        assert_eq!(
            value["layoutOptions"],
            json!({
                "elk.algorithm": "layered",
                "elk.direction": "RIGHT",
                "elk.layered.spacing.nodeNodeBetweenLayers": "130",
                "elk.spacing.nodeNode": "30"
            })
        );
    }

    #[test]
    fn test_children_shape() {
        let value = export_value(&LayoutConfig::default());

        assert_eq!(
            value["children"][0],
            json!({
                "id": "w1",
                "width": 150,
                "height": 50,
                "targetPosition": "left",
                "sourcePosition": "right",
                "category": "workflow"
            })
        );
        assert_eq!(value["children"][1]["category"], "activity");
    }

    #[test]
    fn test_edges_shape() {
        let value = export_value(&LayoutConfig::default());

        assert_eq!(
            value["edges"],
            json!([{ "id": "w1-a1", "sources": ["w1"], "targets": ["a1"] }])
        );
    }

    #[test]
    fn test_configured_layout() {
        let layout: LayoutConfig = toml::from_str(
            r#"
            direction = "DOWN"
            node_spacing = 12
            node_width = 200
            "#,
        )
        .unwrap();

        let value = export_value(&layout);

        assert_eq!(value["layoutOptions"]["elk.direction"], "DOWN");
        assert_eq!(value["layoutOptions"]["elk.spacing.nodeNode"], "12");
        assert_eq!(value["children"][0]["width"], 200);
        assert_eq!(value["children"][0]["height"], 50);
    }

    #[test]
    fn test_zero_size_rejected() {
        let layout: LayoutConfig = toml::from_str("node_height = 0").unwrap();

        let result = ElkExporter::new(&layout, false).export(&sample_model());

        assert!(matches!(result, Err(export::Error::Render(_))));
    }
}
