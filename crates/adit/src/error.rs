use thiserror::Error as ThisError;

///
/// ValidationError
///
/// A create draft is missing a required field. Detected before any mutation;
/// the caller renders the field name, nothing is stored.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("required field '{field}' is missing")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self { field }
    }
}

///
/// TransitionError
///
/// A status action was requested from a state whose transition table does not
/// allow it. The record is left untouched.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("cannot {action} a {kind} in status '{from}'")]
pub struct TransitionError {
    pub kind: &'static str,
    pub from: &'static str,
    pub action: &'static str,
}

///
/// StoreError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("no {kind} record with id {id}")]
    UnknownId { kind: &'static str, id: String },
}
