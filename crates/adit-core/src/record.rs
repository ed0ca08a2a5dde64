use crate::{
    types::{Id, Timestamp},
    value::Value,
};

///
/// Record
///
/// One administrable record kind. The domain layer implements this once per
/// screen; the query, pagination, and selection surfaces are generic over it.
///
/// Contract: `field` returns `Some` for every name in `FIELDS`, and
/// `SEARCH_FIELDS` is a subset of `FIELDS` whose values are text.
///

pub trait Record: Sized {
    /// Stable kind label used in notices, errors, and tracing.
    const KIND: &'static str;

    /// Field names addressable by sort and filter specs.
    const FIELDS: &'static [&'static str];

    /// Subset of `FIELDS` visible to full-text search.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> Id<Self>;

    fn created_at(&self) -> Timestamp;

    /// Surface one field as a [`Value`]; `None` for unknown names.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Returns `true` if `name` is addressable on `R`.
#[must_use]
pub fn is_field<R: Record>(name: &str) -> bool {
    R::FIELDS.contains(&name)
}
