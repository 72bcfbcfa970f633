//! Input records and the snapshot that holds them.
//!
//! An [`EntityStore`] is produced by the ingestion layer and never mutated
//! by graph construction. Each category owns an insertion-ordered mapping
//! from identifier to [`EntityRecord`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::{category::Category, identifier::Id};

/// Source-of-truth data for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    identifier: Id,
    downstream: Vec<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docstring: Option<String>,
    path: String,
}

impl EntityRecord {
    /// Creates a record with the given invocation chain.
    ///
    /// # Arguments
    ///
    /// * `identifier` - Unique name within the record's category
    /// * `downstream` - Entities invoked by this one, in invocation order
    /// * `path` - Where the record was found (usually a source file)
    pub fn new(identifier: Id, downstream: Vec<Id>, path: impl Into<String>) -> Self {
        Self {
            identifier,
            downstream,
            docstring: None,
            path: path.into(),
        }
    }

    /// Attaches a free-text annotation.
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn identifier(&self) -> Id {
        self.identifier
    }

    /// The invocation chain, in order. May be empty.
    pub fn downstream(&self) -> &[Id] {
        &self.downstream
    }

    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Immutable snapshot of every record, grouped by [`Category`].
///
/// Identifiers are unique within a category only. The same string may be
/// present under two categories; nothing here prevents it.
///
/// # Examples
///
/// ```
/// use temporal_flow_core::{
///     category::Category,
///     entity::{EntityRecord, EntityStore},
///     identifier::Id,
/// };
///
/// let store = EntityStore::new()
///     .with_record(
///         Category::Caller,
///         EntityRecord::new(Id::new("c1"), vec![Id::new("w1")], "api.py"),
///     )
///     .with_record(Category::Workflow, EntityRecord::new(Id::new("w1"), vec![], "workflows.py"));
///
/// assert_eq!(store.len(), 2);
/// assert!(store.records(Category::Activity).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    callers: IndexMap<Id, EntityRecord>,
    workflows: IndexMap<Id, EntityRecord>,
    activities: IndexMap<Id, EntityRecord>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mapping for `category`.
    pub fn records(&self, category: Category) -> &IndexMap<Id, EntityRecord> {
        match category {
            Category::Caller => &self.callers,
            Category::Workflow => &self.workflows,
            Category::Activity => &self.activities,
        }
    }

    /// Inserts `record` under `category`, keyed by its identifier.
    ///
    /// A record with the same identifier is replaced in place: the last
    /// write wins and the first insertion position is kept. Returns the
    /// replaced record, if any.
    pub fn insert(&mut self, category: Category, record: EntityRecord) -> Option<EntityRecord> {
        let records = match category {
            Category::Caller => &mut self.callers,
            Category::Workflow => &mut self.workflows,
            Category::Activity => &mut self.activities,
        };
        records.insert(record.identifier(), record)
    }

    /// Builder-style variant of [`EntityStore::insert`].
    pub fn with_record(mut self, category: Category, record: EntityRecord) -> Self {
        self.insert(category, record);
        self
    }

    /// Returns every category defining `id`, in processing order.
    pub fn categories_of(&self, id: Id) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| self.records(*category).contains_key(&id))
    }

    /// Total number of records across all categories.
    pub fn len(&self) -> usize {
        self.callers.len() + self.workflows.len() + self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, downstream: &[&str]) -> EntityRecord {
        EntityRecord::new(
            Id::new(id),
            downstream.iter().map(|d| Id::new(d)).collect(),
            "test.py",
        )
    }

    #[test]
    fn test_empty_store() {
        let store = EntityStore::new();

        assert!(store.is_empty());
        for category in Category::ALL {
            assert!(store.records(category).is_empty());
        }
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut store = EntityStore::new();
        store.insert(Category::Workflow, record("w1", &["a1"]));
        store.insert(Category::Workflow, record("w2", &[]));
        let replaced = store.insert(Category::Workflow, record("w1", &["a2"]));

        assert_eq!(replaced.map(|r| r.downstream().to_vec()), Some(vec![Id::new("a1")]));

        let workflows = store.records(Category::Workflow);
        assert_eq!(workflows.len(), 2);
        // Position of the first insertion is kept
        let first = workflows.get_index(0).map(|(id, _)| *id);
        assert_eq!(first, Some(Id::new("w1")));
        assert_eq!(workflows[&Id::new("w1")].downstream(), &[Id::new("a2")]);
    }

    #[test]
    fn test_categories_are_independent() {
        let store = EntityStore::new()
            .with_record(Category::Caller, record("shared", &[]))
            .with_record(Category::Activity, record("shared", &[]));

        assert_eq!(store.len(), 2);
        let categories: Vec<_> = store.categories_of(Id::new("shared")).collect();
        assert_eq!(categories, vec![Category::Caller, Category::Activity]);
        assert_eq!(store.categories_of(Id::new("missing")).count(), 0);
    }

    #[test]
    fn test_record_accessors() {
        let record = record("w1", &["a1", "a2"]).with_docstring("Ships the order");

        assert_eq!(record.identifier(), "w1");
        assert_eq!(record.downstream().len(), 2);
        assert_eq!(record.docstring(), Some("Ships the order"));
        assert_eq!(record.path(), "test.py");
    }
}
