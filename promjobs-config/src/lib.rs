mod decode;
mod one_or_many;
mod path;
pub mod prometheus;
mod targets;

pub use decode::{decode, from_slice};
pub use one_or_many::OneOrMany;
pub use path::{FieldPath, Segment};
pub use prometheus::{Document, GlobalConfig, Job, Params, RelabelRule, StaticTargetGroup};
pub use targets::targets;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Everything that can go wrong while turning a document into a [`Document`].
///
/// All variants but [`DecodeError::Syntax`] point at the offending field, so
/// callers can report where the document stopped making sense.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input bytes are not a well-formed YAML (or JSON) document.
    #[error("Unable to parse document: {0}")]
    Syntax(#[from] serde_yaml::Error),
    /// A value had a different shape than the one the schema expects there.
    #[error("{path}: expected {expected}, found {found}")]
    UnexpectedType {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },
    /// A required field is absent.
    #[error("{path}: missing required field")]
    MissingField { path: FieldPath },
    /// A recognized field holds a value that could not be coerced into its
    /// type.
    #[error("{path}: {reason}")]
    InvalidField { path: FieldPath, reason: String },
    /// A one-or-many field was neither a single element nor a sequence of
    /// elements. Both attempts are kept.
    #[error(
        "{path}: expected a single {element} or a sequence of them \
         (as single: {single}; as sequence: {many})"
    )]
    OneOrMany {
        path: FieldPath,
        element: &'static str,
        single: Box<DecodeError>,
        many: Box<DecodeError>,
    },
}

impl DecodeError {
    /// The field the error is about, if the error is tied to one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            DecodeError::Syntax(_) => None,
            DecodeError::UnexpectedType { path, .. }
            | DecodeError::MissingField { path }
            | DecodeError::InvalidField { path, .. }
            | DecodeError::OneOrMany { path, .. } => Some(path),
        }
    }
}
