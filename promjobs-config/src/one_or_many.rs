use crate::{DecodeError, FieldPath, Result};
use serde_yaml::Value;
use tracing::debug;

/// The two shapes a one-or-many field can take in a document.
///
/// Prometheus configurations are often hand written, and a lone object is
/// accepted wherever a list of them is expected. Consumers should not care
/// which shape was used, so the decoder settles it here and hands out a
/// plain [`Vec`] through [`OneOrMany::into_vec`].
#[derive(Clone, Debug, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Decode `value` as either a single element or a sequence of elements.
    ///
    /// The single interpretation is always tried first; the sequence
    /// interpretation only runs when it failed. When both fail, the error
    /// carries the reason of each attempt.
    pub fn resolve<F>(
        value: Value,
        path: &FieldPath,
        element: &'static str,
        decode_one: F,
    ) -> Result<Self>
    where
        F: Fn(Value, &FieldPath) -> Result<T>,
    {
        let single = match decode_one(value.clone(), path) {
            Ok(one) => {
                debug!(%path, element, "decoded single element");
                return Ok(OneOrMany::One(one));
            }
            Err(err) => err,
        };

        let many = match value {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| decode_one(item, &path.index(index)))
                .collect::<Result<Vec<_>>>(),
            other => Err(DecodeError::UnexpectedType {
                path: path.clone(),
                expected: "a sequence",
                found: kind(&other),
            }),
        };

        match many {
            Ok(items) => {
                debug!(%path, element, count = items.len(), "decoded sequence");
                Ok(OneOrMany::Many(items))
            }
            Err(err) => Err(DecodeError::OneOrMany {
                path: path.clone(),
                element,
                single: Box::new(single),
                many: Box::new(err),
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Human readable name of the kind of value, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
