//! List query criteria and the shared filter/sort engine.
//!
//! Every list view composes the same criteria: optional free text matched
//! case-insensitively as a substring against the entity's designated
//! haystacks, zero or more discrete exact-match filters, and a sort order.
//! Filtering always happens before pagination, so the reported `total`
//! reflects the post-filter, pre-page count. The helpers here are pure; the
//! local adapter runs them in-process and the remote adapter forwards the
//! criteria as query parameters instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, Stamped};

/// Order in which filtered rows are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Store order. Creates prepend, so this is newest-first by insertion.
    #[default]
    Insertion,
    /// `updatedAt` descending, ties broken by `createdAt` descending.
    MostRecent,
}

/// Composite list criteria: free text, discrete filters, and sort order.
///
/// An absent or blank text value and an absent or empty filter value both
/// mean "no constraint", never "match empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    text: Option<String>,
    filters: BTreeMap<String, String>,
    sort: SortOrder,
}

impl ListQuery {
    /// Criteria matching everything, in insertion order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the free-text needle.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a discrete exact-match filter on a wire field name.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Sort results most-recently-updated first.
    #[must_use]
    pub fn most_recent(mut self) -> Self {
        self.sort = SortOrder::MostRecent;
        self
    }

    /// The free-text needle, if one is set.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The discrete filters in effect.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// The requested sort order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Whether one record satisfies every criterion.
    ///
    /// Free text is a case-insensitive substring test over the entity's
    /// haystacks; it is never tokenised or fuzzy. Discrete filters compare
    /// wire values exactly; a record lacking the field does not match.
    #[must_use]
    pub fn matches<E: EntityKind>(&self, record: &Stamped<E>) -> bool {
        if let Some(needle) = self.active_text() {
            let hit = record
                .fields()
                .search_text()
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(field, value)| {
                record.fields().discrete_field(field).as_deref() == Some(value.as_str())
            })
    }

    /// Filter and order a whole collection.
    #[must_use]
    pub fn apply<E: EntityKind>(&self, rows: Vec<Stamped<E>>) -> Vec<Stamped<E>> {
        let mut kept: Vec<Stamped<E>> = rows
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        if self.sort == SortOrder::MostRecent {
            kept.sort_by(|a, b| {
                b.updated_at()
                    .cmp(&a.updated_at())
                    .then(b.created_at().cmp(&a.created_at()))
            });
        }
        kept
    }

    /// Render the criteria as wire query parameters for the remote adapter.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(needle) = self.text() {
            if !needle.trim().is_empty() {
                pairs.push(("q".to_owned(), needle.to_owned()));
            }
        }
        for (field, value) in &self.filters {
            if !value.is_empty() {
                pairs.push((field.clone(), value.clone()));
            }
        }
        pairs
    }

    /// The lowercased needle, or `None` when text imposes no constraint.
    fn active_text(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
    }
}
