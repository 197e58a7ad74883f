//! Record model for departments and sellers.
//!
//! # Responsibility
//! - Define the plain records persisted by the DAO layer.
//! - Expose the identity contract shared by every record kind.
//!
//! # Invariants
//! - Identity is `None` until the store assigns one on first insert.
//! - An assigned identity is never replaced.
//! - `validate` holds for every record written to or read from the store.

pub mod department;
pub mod seller;

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Identity contract shared by all persisted records.
///
/// Services stay generic over this trait, so adding a record kind only
/// requires a new model type and a DAO for it.
pub trait Entity {
    /// Store-generated key type.
    type Id: Copy + Eq + Debug + Display;

    /// Short lowercase record kind used in log events and messages.
    const KIND: &'static str;

    /// Returns the store identity, or `None` before first persistence.
    fn id(&self) -> Option<Self::Id>;

    /// Records the identity generated by the store.
    ///
    /// # Errors
    /// - Returns the already assigned id when identity is set; the record is
    ///   left untouched.
    fn assign_id(&mut self, id: Self::Id) -> Result<(), Self::Id>;

    /// Checks the field invariants the store relies on.
    ///
    /// DAOs call this before every write and after every read, so a row that
    /// could not be read back is never written.
    fn validate(&self) -> Result<(), RecordError>;
}

/// Field invariant broken by a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Text field is empty after trim.
    BlankField {
        kind: &'static str,
        field: &'static str,
    },
    /// Numeric field is NaN or infinite.
    NonFiniteValue {
        kind: &'static str,
        field: &'static str,
    },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { kind, field } => write!(f, "{kind}.{field} must not be blank"),
            Self::NonFiniteValue { kind, field } => {
                write!(f, "{kind}.{field} must be a finite number")
            }
        }
    }
}

impl Error for RecordError {}

pub(crate) fn require_filled(
    kind: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::BlankField { kind, field });
    }
    Ok(())
}

pub(crate) fn assign_once<I: Copy>(slot: &mut Option<I>, id: I) -> Result<(), I> {
    match *slot {
        Some(existing) => Err(existing),
        None => {
            *slot = Some(id);
            Ok(())
        }
    }
}
