//! Document filter model
//!
//! A [`Filter`] is a conjunction of terms; a term is either a condition on a
//! named field or a union of sub-filters (`Or`). This mirrors the filter
//! documents the list endpoints build: exact matches for scoping ids, a
//! soft-delete guard, and a union of case-insensitive regex probes for text
//! search.

use regex::{Regex, RegexBuilder};

use crate::core::field::FieldValue;
use crate::core::normalize::normalize_search;
use crate::store::Document;

/// Condition applied to a single field
#[derive(Debug, Clone)]
pub enum Cond {
    /// Field equals the value
    Eq(FieldValue),

    /// Field differs from the value
    Ne(FieldValue),

    /// Field is a string matching the regex
    Matches(Regex),

    /// Field is an array containing the value
    Contains(FieldValue),
}

impl Cond {
    fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Cond::Eq(expected) => value == expected,
            Cond::Ne(expected) => value != expected,
            Cond::Matches(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Cond::Contains(expected) => value.as_array().is_some_and(|a| a.contains(expected)),
        }
    }
}

/// One term of a filter conjunction
#[derive(Debug, Clone)]
enum Term {
    Field { name: String, cond: Cond },
    Or(Vec<Filter>),
}

/// A conjunction of field conditions and `Or` unions.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<Term>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.terms.push(Term::Field {
            name: field.to_string(),
            cond: Cond::Eq(value.into()),
        });
        self
    }

    /// Require `field != value`
    pub fn ne(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.terms.push(Term::Field {
            name: field.to_string(),
            cond: Cond::Ne(value.into()),
        });
        self
    }

    /// Require the string field to match the regex
    pub fn matches(mut self, field: &str, regex: Regex) -> Self {
        self.terms.push(Term::Field {
            name: field.to_string(),
            cond: Cond::Matches(regex),
        });
        self
    }

    /// Require the array field to contain the value
    pub fn contains(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.terms.push(Term::Field {
            name: field.to_string(),
            cond: Cond::Contains(value.into()),
        });
        self
    }

    /// Require at least one of the branches to match
    pub fn or(mut self, branches: Vec<Filter>) -> Self {
        self.terms.push(Term::Or(branches));
        self
    }

    /// Append every term of `other` to this conjunction
    pub fn and(mut self, other: Filter) -> Self {
        self.terms.extend(other.terms);
        self
    }

    /// Evaluate the filter against a document
    pub fn matches_doc<T: Document>(&self, doc: &T) -> bool {
        self.terms.iter().all(|term| match term {
            Term::Field { name, cond } => cond.matches(&doc.field(name)),
            Term::Or(branches) => branches.iter().any(|f| f.matches_doc(doc)),
        })
    }
}

/// Build a case-insensitive substring regex from an already-escaped pattern.
fn ci_regex(escaped: &str) -> Option<Regex> {
    RegexBuilder::new(escaped)
        .case_insensitive(true)
        .build()
        .ok()
}

/// Build the text-search union used by every list endpoint.
///
/// Two parallel probes, unioned: the normalized term (diacritics stripped)
/// against the stored normalized field, and the raw term against the raw
/// fields. Both terms are regex-escaped first. When normalization strips the
/// term to nothing (special characters only), only the raw probes remain.
/// Returns `None` for blank terms.
pub fn text_search(term: &str, normalized_field: &str, raw_fields: &[&str]) -> Option<Filter> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let raw_regex = ci_regex(&regex::escape(term))?;
    let normalized = normalize_search(term);

    let mut branches = Vec::new();
    if !normalized.is_empty() {
        let normalized_regex = ci_regex(&regex::escape(&normalized))?;
        branches.push(Filter::new().matches(normalized_field, normalized_regex));
    }
    for field in raw_fields {
        branches.push(Filter::new().matches(field, raw_regex.clone()));
    }

    Some(Filter::new().or(branches))
}
