//! Core engine for Adit: typed record identities, the field value model,
//! query/pagination/selection primitives, and the `Record` trait the domain
//! layer implements.

// public exports are one module level down
pub mod page;
pub mod query;
pub mod record;
pub mod select;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No engine internals or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{FilterChoice, OrderDirection, QuerySpec, SortSpec},
        record::Record,
        types::{Id, TimeOfDay, Timestamp},
        value::Value,
    };
}
