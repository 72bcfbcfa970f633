//! Advisory checks over a parsed [`EntityStore`].
//!
//! Graph construction accepts every store; these checks only point out
//! input that will produce a surprising graph. All findings are warnings.

use indexmap::IndexSet;

use temporal_flow_core::{category::Category, entity::EntityStore, identifier::Id};

use crate::{
    document::section_key,
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Run every lint over `store`.
///
/// `source` is the document the store was parsed from; it is only used to
/// attach labels to the findings.
pub(crate) fn lint_store(source: &str, store: &EntityStore) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    warnings.extend(separator_in_identifier(source, store));
    warnings.extend(shared_identifiers(source, store));
    warnings.extend(undefined_downstream(source, store));
    warnings
}

/// `text` as a JSON string literal, escapes included.
fn quoted(text: &str) -> Option<String> {
    serde_json::to_string(text).ok()
}

/// Span of the first `needle` at or after `from` that is used as an object
/// key, quotes excluded.
fn key_after(source: &str, from: usize, needle: &str) -> Option<Span> {
    let mut from = from;
    while let Some(found) = source.get(from..)?.find(needle) {
        let start = from + found;
        let end = start + needle.len();
        if source[end..].trim_start().starts_with(':') {
            return Some(Span::new(start + 1..end - 1));
        }
        from = end;
    }
    None
}

/// Span of the key defining `id` under `category`'s section of `source`.
fn definition(source: &str, category: Category, id: Id) -> Option<Span> {
    let section = key_after(source, 0, &quoted(section_key(category))?)?;
    let needle = id.with_str(quoted)?;
    key_after(source, section.end(), &needle)
}

/// Span of the first quoted occurrence of `id` in `source`, quotes excluded.
fn first_mention(source: &str, id: Id) -> Option<Span> {
    let needle = id.with_str(quoted)?;
    source
        .find(&needle)
        .map(|start| Span::new(start + 1..start + needle.len() - 1))
}

/// Where to point at `id`: its first definition, or its first mention when
/// no category defines it.
fn locate(source: &str, store: &EntityStore, id: Id) -> Option<Span> {
    match store.categories_of(id).next() {
        Some(category) => definition(source, category, id).or_else(|| first_mention(source, id)),
        None => first_mention(source, id),
    }
}

fn with_label_at(diagnostic: Diagnostic, span: Option<Span>, label: &str) -> Diagnostic {
    match span {
        Some(span) => diagnostic.with_label(span, label),
        None => diagnostic,
    }
}

/// Every identifier mentioned by the store, defined or referenced, in order.
fn mentioned_identifiers(store: &EntityStore) -> IndexSet<Id> {
    let mut ids = IndexSet::new();
    for category in Category::ALL {
        for (id, record) in store.records(category) {
            ids.insert(*id);
            ids.extend(record.downstream().iter().copied());
        }
    }
    ids
}

fn separator_in_identifier(source: &str, store: &EntityStore) -> Vec<Diagnostic> {
    mentioned_identifiers(store)
        .into_iter()
        .filter(|id| id.contains_separator())
        .map(|id| {
            let diagnostic = Diagnostic::warning(format!(
                "identifier `{id}` contains the edge separator `-`"
            ))
            .with_code(ErrorCode::E300)
            .with_help("edge ids are `source-target`; distinct hops may collapse into one edge");
            with_label_at(diagnostic, locate(source, store, id), "contains `-`")
        })
        .collect()
}

fn shared_identifiers(source: &str, store: &EntityStore) -> Vec<Diagnostic> {
    let mut reported = IndexSet::new();
    let mut warnings = Vec::new();

    for category in Category::ALL {
        for id in store.records(category).keys() {
            let categories: Vec<Category> = store.categories_of(*id).collect();
            if categories.len() < 2 || !reported.insert(*id) {
                continue;
            }

            let names: Vec<&str> = categories.iter().map(Category::prefix).collect();
            let mut diagnostic = Diagnostic::warning(format!(
                "identifier `{id}` is defined as {}",
                names.join(" and ")
            ))
            .with_code(ErrorCode::E301)
            .with_help("node ids are not qualified by category; rename one of the definitions");

            let mut definitions = categories
                .iter()
                .filter_map(|c| definition(source, *c, *id).map(|span| (*c, span)));
            if let Some((first, span)) = definitions.next() {
                diagnostic = diagnostic.with_label(span, format!("defined as {first} here"));
            }
            for (other, span) in definitions {
                diagnostic =
                    diagnostic.with_secondary_label(span, format!("also defined as {other} here"));
            }
            warnings.push(diagnostic);
        }
    }

    warnings
}

fn undefined_downstream(source: &str, store: &EntityStore) -> Vec<Diagnostic> {
    let mut reported = IndexSet::new();
    let mut warnings = Vec::new();

    for category in Category::ALL.into_iter().filter(Category::has_downstream) {
        for (owner, record) in store.records(category) {
            for target in record.downstream() {
                if store.categories_of(*target).next().is_some() || !reported.insert(*target) {
                    continue;
                }

                let diagnostic = Diagnostic::warning(format!(
                    "`{owner}` invokes `{target}`, which is not defined"
                ))
                .with_code(ErrorCode::E302)
                .with_help("the edge is kept, but no node will be drawn for its endpoint");
                let span = first_mention(source, *target);
                warnings.push(with_label_at(diagnostic, span, "undefined"));
            }
        }
    }

    warnings
}
