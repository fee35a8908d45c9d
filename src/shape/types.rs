//! Shape types

use super::record::{Composite, CompositeSequence};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;

/// One column of an output schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Member name, used verbatim as the column header
    pub name: String,
    /// Zero-based position in the record's declared member order
    pub position: usize,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Build an ordered field list from member names
    pub fn list<I, S>(names: I) -> Vec<Field>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| Field::new(name, position))
            .collect()
    }
}

/// Structural classification of one input value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// An already-resolved value; contributes no columns
    Scalar(String),
    /// A single record
    Composite {
        /// Declared member order
        fields: Vec<Field>,
    },
    /// A sequence of records sharing one element type
    SequenceOfComposite {
        /// Element type's declared member order
        fields: Vec<Field>,
        /// Number of elements
        len: usize,
    },
}

impl Shape {
    /// Fields this shape contributes to a header, if any
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Shape::Scalar(_) => None,
            Shape::Composite { fields } | Shape::SequenceOfComposite { fields, .. } => {
                Some(fields)
            }
        }
    }

    /// Number of data rows this shape produces
    pub fn row_count(&self) -> usize {
        match self {
            Shape::Scalar(_) => 0,
            Shape::Composite { .. } => 1,
            Shape::SequenceOfComposite { len, .. } => *len,
        }
    }

    /// Check if this is a scalar shape
    pub fn is_scalar(&self) -> bool {
        matches!(self, Shape::Scalar(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(value) => write!(f, "scalar({value})"),
            Shape::Composite { fields } => write!(f, "composite({} fields)", fields.len()),
            Shape::SequenceOfComposite { fields, len } => {
                write!(f, "sequence({len} x {} fields)", fields.len())
            }
        }
    }
}

/// One value handed to a flatten call
///
/// Callers decide what to flatten; the builder dispatches on the variant.
pub enum Input<'a> {
    /// Auxiliary key or label; never produces rows
    Scalar(String),
    /// A single record
    Composite(&'a dyn Composite),
    /// A sequence of records
    Sequence(&'a dyn CompositeSequence),
}

impl<'a> Input<'a> {
    /// Wrap a scalar value
    pub fn scalar(value: impl Into<String>) -> Self {
        Input::Scalar(value.into())
    }

    /// Short name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Scalar(_) => "scalar",
            Input::Composite(_) => "composite",
            Input::Sequence(_) => "sequence",
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Input::Composite(_) => f.write_str("Composite(..)"),
            Input::Sequence(seq) => f.debug_struct("Sequence").field("len", &seq.len()).finish(),
        }
    }
}

impl<'a> TryFrom<&'a Value> for Input<'a> {
    type Error = Error;

    /// Classify an untyped JSON value.
    ///
    /// Strings, numbers and booleans are scalars, objects are composites and
    /// arrays are sequences. `null` has no shape.
    fn try_from(value: &'a Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Input::Scalar(s.clone())),
            Value::Number(n) => Ok(Input::Scalar(n.to_string())),
            Value::Bool(b) => Ok(Input::Scalar(b.to_string())),
            Value::Object(map) => Ok(Input::Composite(map)),
            Value::Array(items) => Ok(Input::Sequence(items)),
            Value::Null => Err(Error::shape("null value has no shape")),
        }
    }
}
