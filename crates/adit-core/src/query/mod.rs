//! Module: query
//! Responsibility: filtered + searched + sorted views over a record slice.
//! Does not own: pagination, selection, or any mutation of the collection.
//! Boundary: pure function from `(records, QuerySpec)` to an ordered view.


use crate::{
    record::{Record, is_field},
    value::{Value, order_cmp},
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Asc => ord,
            Self::Desc => ord.reverse(),
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// SortSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: OrderDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Asc)
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Desc)
    }
}

///
/// FilterChoice
///
/// One dropdown's worth of constraint. `Any` is the explicit "no constraint"
/// choice; an absent entry behaves the same way.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum FilterChoice {
    #[default]
    Any,
    Is(Value),
}

impl FilterChoice {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Is(_))
    }
}

///
/// FilterSet
///
/// Filter-key → choice map. Setting a key replaces its previous choice;
/// `Any` entries are kept (the field is still validated) but constrain
/// nothing.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSet {
    entries: Vec<(String, FilterChoice)>,
}

impl FilterSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set or replace the choice for a filter key.
    pub fn set(&mut self, field: impl Into<String>, choice: FilterChoice) {
        let field = field.into();

        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = choice,
            None => self.entries.push((field, choice)),
        }
    }

    #[must_use]
    pub fn choice(&self, field: &str) -> &FilterChoice {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&FilterChoice::Any, |(_, choice)| choice)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &FilterChoice)> {
        self.entries
            .iter()
            .map(|(name, choice)| (name.as_str(), choice))
    }

    /// Active constraints only (`Any` entries are skipped).
    pub fn active(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(name, choice)| match choice {
            FilterChoice::Is(value) => Some((name.as_str(), value)),
            FilterChoice::Any => None,
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// QuerySpec
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QuerySpec {
    pub search: String,
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
}

///
/// QueryError
///
/// Contract errors: a spec naming a field the record kind does not have is a
/// programming mistake in the calling screen, caught before any evaluation.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("unknown filter field '{field}' for {kind}")]
    UnknownFilterField { kind: &'static str, field: String },

    #[error("unknown sort field '{field}' for {kind}")]
    UnknownSortField { kind: &'static str, field: String },
}

/// Evaluate a query spec against a record slice.
///
/// Every returned record satisfies the search predicate and every active
/// filter; every excluded record fails at least one. Sorting is stable, so
/// equal-key records keep their relative order from the input collection.
pub fn run<'a, R: Record>(records: &'a [R], spec: &QuerySpec) -> Result<Vec<&'a R>, QueryError> {
    validate::<R>(spec)?;

    let needle = spec.search.trim().to_lowercase();

    let mut view: Vec<&R> = records
        .iter()
        .filter(|record| matches_search(*record, &needle) && matches_filters(*record, &spec.filters))
        .collect();

    if let Some(sort) = &spec.sort {
        view.sort_by(|a, b| {
            let left = a.field(&sort.field).unwrap_or(Value::Null);
            let right = b.field(&sort.field).unwrap_or(Value::Null);

            sort.direction.apply(order_cmp(&left, &right))
        });
    }

    Ok(view)
}

fn validate<R: Record>(spec: &QuerySpec) -> Result<(), QueryError> {
    if let Some(sort) = &spec.sort {
        if !is_field::<R>(&sort.field) {
            return Err(QueryError::UnknownSortField {
                kind: R::KIND,
                field: sort.field.clone(),
            });
        }
    }

    for (field, _) in spec.filters.entries() {
        if !is_field::<R>(field) {
            return Err(QueryError::UnknownFilterField {
                kind: R::KIND,
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    R::SEARCH_FIELDS.iter().any(|name| {
        record
            .field(name)
            .as_ref()
            .and_then(Value::as_search_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn matches_filters<R: Record>(record: &R, filters: &FilterSet) -> bool {
    filters
        .active()
        .all(|(field, expected)| record.field(field).as_ref() == Some(expected))
}
