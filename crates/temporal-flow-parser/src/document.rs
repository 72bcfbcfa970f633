//! Deserialization of the JSON entity document.
//!
//! The document is read in two passes: the outer shape is deserialized with
//! every record kept as raw JSON, then each record is deserialized on its
//! own. A bad record therefore produces a diagnostic pointing at that record
//! while the remaining records are still checked.

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;
use serde_json::value::RawValue;

use temporal_flow_core::{
    category::Category,
    entity::{EntityRecord, EntityStore},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

type RawCategory<'a> = IndexMap<String, &'a RawValue>;

/// Outer shape: three optional category objects keyed by identifier.
#[derive(Debug, Deserialize)]
struct EntityDocument<'a> {
    #[serde(borrow, default)]
    callers: Option<RawCategory<'a>>,
    #[serde(borrow, default)]
    workflows: Option<RawCategory<'a>>,
    #[serde(borrow, default)]
    activities: Option<RawCategory<'a>>,
}

impl<'a> EntityDocument<'a> {
    fn take(&mut self, category: Category) -> RawCategory<'a> {
        let slot = match category {
            Category::Caller => &mut self.callers,
            Category::Workflow => &mut self.workflows,
            Category::Activity => &mut self.activities,
        };
        slot.take().unwrap_or_default()
    }
}

/// Top-level key holding `category`'s records.
pub(crate) fn section_key(category: Category) -> &'static str {
    match category {
        Category::Caller => "callers",
        Category::Workflow => "workflows",
        Category::Activity => "activities",
    }
}

/// One record: `{"data": [...], "docstring": "...", "path": "..."}`.
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(default)]
    data: Vec<String>,
    #[serde(default)]
    docstring: Option<String>,
    path: String,
}

impl Record {
    fn into_entity(self, identifier: &str) -> EntityRecord {
        let downstream = self.data.iter().map(|id| Id::new(id)).collect();
        let record = EntityRecord::new(Id::new(identifier), downstream, self.path);
        match self.docstring {
            Some(docstring) => record.with_docstring(docstring),
            None => record,
        }
    }
}

/// Parse a JSON entity document into an [`EntityStore`].
pub(crate) fn parse_document(source: &str) -> Result<EntityStore, ParseError> {
    let mut document: EntityDocument<'_> =
        serde_json::from_str(source).map_err(|err| document_error(source, &err))?;

    let mut collector = DiagnosticCollector::new();
    let mut store = EntityStore::new();

    for category in Category::ALL {
        let raw_records = document.take(category);
        debug!(category:%, records = raw_records.len(); "Reading category");

        for (identifier, raw) in raw_records {
            match serde_json::from_str::<Record>(raw.get()) {
                Ok(record) => {
                    trace!(category:%, identifier; "Record read");
                    store.insert(category, record.into_entity(&identifier));
                }
                Err(err) => collector.emit(record_error(source, category, &identifier, raw, &err)),
            }
        }
    }

    collector.finish()?;
    Ok(store)
}

/// Strip serde_json's trailing " at line X column Y" from an error message.
fn bare_message(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rsplit_once(" at line ") {
        Some((bare, _)) => bare.to_string(),
        None => message,
    }
}

fn document_error(source: &str, err: &serde_json::Error) -> ParseError {
    let span = Span::from_line_column(source, err.line(), err.column());
    let message = bare_message(err);

    let diagnostic = match err.classify() {
        serde_json::error::Category::Eof => Diagnostic::error("unexpected end of input")
            .with_code(ErrorCode::E101)
            .with_label(span, message),
        serde_json::error::Category::Data => Diagnostic::error("invalid entity document")
            .with_code(ErrorCode::E200)
            .with_label(span, message)
            .with_help(
                "the document is an object with optional `callers`, `workflows` and `activities` objects",
            ),
        serde_json::error::Category::Syntax | serde_json::error::Category::Io => {
            Diagnostic::error("malformed JSON")
                .with_code(ErrorCode::E100)
                .with_label(span, message)
        }
    };

    diagnostic.into()
}

fn record_error(
    source: &str,
    category: Category,
    identifier: &str,
    raw: &RawValue,
    err: &serde_json::Error,
) -> Diagnostic {
    let record_span = Span::of_slice(source, raw.get()).unwrap_or_default();
    let inner = Span::from_line_column(raw.get(), err.line(), err.column());
    let span = Span::new(record_span.start() + inner.start()..record_span.start() + inner.end());

    Diagnostic::error(format!("invalid {category} record `{identifier}`"))
        .with_code(ErrorCode::E200)
        .with_label(span, bare_message(err))
        .with_secondary_label(record_span, "in this record")
        .with_help(
            "records need a `path` string, an optional `docstring` and an optional `data` list of identifiers",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let source = r#"{
            "callers": {"c1": {"data": ["w1"], "path": "api.py"}},
            "workflows": {"w1": {"data": ["a1", "a2"], "docstring": "Ships orders", "path": "wf.py"}},
            "activities": {"a1": {"data": [], "path": "act.py"}, "a2": {"path": "act.py"}}
        }"#;

        let store = parse_document(source).expect("valid document");

        assert_eq!(store.len(), 4);
        let w1 = &store.records(Category::Workflow)[&Id::new("w1")];
        assert_eq!(w1.downstream(), &[Id::new("a1"), Id::new("a2")]);
        assert_eq!(w1.docstring(), Some("Ships orders"));
        assert_eq!(w1.path(), "wf.py");
        assert!(store.records(Category::Activity)[&Id::new("a2")].downstream().is_empty());
    }

    #[test]
    fn test_missing_and_null_categories_are_empty() {
        let store = parse_document(r#"{"callers": null}"#).expect("valid document");

        assert!(store.is_empty());
    }

    #[test]
    fn test_preserves_document_order() {
        let source = r#"{"workflows": {
            "zeta": {"path": "a"}, "alpha": {"path": "b"}, "mid": {"path": "c"}
        }}"#;

        let store = parse_document(source).expect("valid document");
        let order: Vec<String> = store
            .records(Category::Workflow)
            .keys()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let source = r#"{"callers": {
            "c1": {"data": ["w1"], "path": "old.py"},
            "c1": {"data": ["w2"], "path": "new.py"}
        }}"#;

        let store = parse_document(source).expect("valid document");
        let callers = store.records(Category::Caller);
        assert_eq!(callers.len(), 1);
        assert_eq!(callers[&Id::new("c1")].path(), "new.py");
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_document(r#"{"callers": {,}}"#).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        // Points at (or right around) the stray comma.
        let start = diag.labels()[0].span().start();
        assert!((12..=14).contains(&start), "unexpected span start {start}");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse_document(r#"{"callers": {"#).unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_unexpected_eof_inside_non_ascii_key() {
        let source = "{\"callers\": {\"é";

        let err = parse_document(source).unwrap_err();

        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E101));
        let span = diagnostic.labels()[0].span();
        assert!(source.is_char_boundary(span.start()));
        assert!(source.is_char_boundary(span.end()));
    }

    #[test]
    fn test_bad_record_after_non_ascii_text() {
        let source = r#"{"workflows": {"w1": {"docstring": "Überweisung prüfen", "data": 7, "path": "wf.py"}}}"#;

        let err = parse_document(source).unwrap_err();

        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
        let span = diagnostic.labels()[0].span();
        assert!(source.get(span.start()..span.end()).is_some());
    }

    #[test]
    fn test_wrong_document_shape() {
        let err = parse_document(r#"["c1", "w1"]"#).unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_every_bad_record_is_reported() {
        let source = r#"{
            "workflows": {"w1": {"data": ["a1"]}, "w2": {"path": "ok.py"}},
            "activities": {"a1": {"data": "a2", "path": "act.py"}}
        }"#;

        let err = parse_document(source).unwrap_err();
        let diagnostics = err.diagnostics();

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "invalid workflow record `w1`");
        assert_eq!(diagnostics[1].message(), "invalid activity record `a1`");
        assert!(diagnostics.iter().all(|d| d.code() == Some(ErrorCode::E200)));

        // The secondary label covers the offending record.
        let record_span = diagnostics[0].labels()[1].span();
        assert_eq!(
            &source[record_span.start()..record_span.end()],
            r#"{"data": ["a1"]}"#
        );
    }
}
