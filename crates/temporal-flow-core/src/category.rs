//! The three fixed entity categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Partition of the input records.
///
/// The declaration order is the processing order used everywhere a
/// deterministic sequence is needed: callers, then workflows, then
/// activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Code that starts or signals workflows.
    Caller,
    /// Workflow definitions; their chains lead to activities or child workflows.
    Workflow,
    /// Activities. Always leaves of the graph.
    Activity,
}

impl Category {
    /// All categories in processing order.
    pub const ALL: [Category; 3] = [Category::Caller, Category::Workflow, Category::Activity];

    /// Returns the lowercase prefix naming this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Caller => "caller",
            Category::Workflow => "workflow",
            Category::Activity => "activity",
        }
    }

    /// Returns `true` if records of this category may contribute edges.
    pub fn has_downstream(&self) -> bool {
        !matches!(self, Category::Activity)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caller" => Ok(Category::Caller),
            "workflow" => Ok(Category::Workflow),
            "activity" => Ok(Category::Activity),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}
