//! Record capability traits
//!
//! Flattening never inspects types at runtime. A record exposes its member
//! names and values through [`Composite`]; a sequence exposes its element
//! type's member names through [`CompositeSequence`]. Typed records get both
//! from the [`Record`] descriptor (usually generated by [`crate::record!`]);
//! untyped JSON gets them from the adapters below.

use super::types::Field;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single record with a fixed, named set of members (object safe)
pub trait Composite {
    /// Member names in declaration order
    fn fields(&self) -> Result<Vec<Field>>;

    /// Current value of one member; absent members are `Value::Null`
    fn value_of(&self, field: &Field) -> Result<Value>;
}

/// A sequence of records sharing one element type (object safe)
pub trait CompositeSequence {
    /// The element type's member names in declaration order
    fn element_fields(&self) -> Result<Vec<Field>>;

    /// Number of elements
    fn len(&self) -> usize;

    /// Check if the sequence has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`
    fn element(&self, index: usize) -> Option<&dyn Composite>;
}

/// Compile-time descriptor for a typed record
///
/// The member list belongs to the type, so an empty `Vec<T>` still knows its
/// header.
pub trait Record {
    /// Member names in declaration order
    const FIELDS: &'static [&'static str];

    /// Value of the member at `index` in [`Record::FIELDS`]
    fn value_at(&self, index: usize) -> Result<Value>;

    /// Ordered field list for this record type
    fn schema() -> Vec<Field> {
        Field::list(Self::FIELDS.iter().copied())
    }
}

/// Convert one member to a cell value
pub fn to_cell_value<T: Serialize + ?Sized>(field: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::serialization(field, e.to_string()))
}

/// Declare a struct together with its [`Record`] descriptor.
///
/// ```rust
/// ffingest::record! {
///     #[derive(Debug, Clone, serde::Serialize)]
///     pub struct Quarter {
///         pub number: u32,
///         pub away_score: u32,
///         pub home_score: u32,
///     }
/// }
///
/// use ffingest::shape::Record;
/// assert_eq!(Quarter::FIELDS, &["number", "away_score", "home_score"]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::shape::Record for $name {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn value_at(&self, index: usize) -> $crate::Result<$crate::JsonValue> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return $crate::shape::to_cell_value(stringify!($field), &self.$field);
                    }
                    position += 1;
                )*
                Err($crate::Error::shape(format!(
                    "{} has no member at position {}",
                    stringify!($name),
                    index
                )))
            }
        }
    };
}

impl<T: Record> Composite for T {
    fn fields(&self) -> Result<Vec<Field>> {
        Ok(T::schema())
    }

    fn value_of(&self, field: &Field) -> Result<Value> {
        self.value_at(field.position)
    }
}

impl<T: Record> CompositeSequence for Vec<T> {
    fn element_fields(&self) -> Result<Vec<Field>> {
        Ok(T::schema())
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> Option<&dyn Composite> {
        self.get(index).map(|record| record as &dyn Composite)
    }
}

// ============================================================================
// Untyped JSON adapters
// ============================================================================

/// A JSON object is a record whose members are its keys in document order.
impl Composite for Map<String, Value> {
    fn fields(&self) -> Result<Vec<Field>> {
        Ok(Field::list(self.keys().cloned()))
    }

    fn value_of(&self, field: &Field) -> Result<Value> {
        Ok(self.get(&field.name).cloned().unwrap_or(Value::Null))
    }
}

/// A JSON array is a sequence whose element type is taken from its first
/// element. Later elements are read by member name.
impl CompositeSequence for Vec<Value> {
    fn element_fields(&self) -> Result<Vec<Field>> {
        ensure_objects(self)?;
        let first = self.first().and_then(Value::as_object).ok_or_else(|| {
            Error::shape("cannot introspect element type of an empty untyped sequence")
        })?;
        Ok(Field::list(first.keys().cloned()))
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> Option<&dyn Composite> {
        self.get(index)
            .and_then(Value::as_object)
            .map(|map| map as &dyn Composite)
    }
}

/// An untyped JSON array paired with a declared column list.
///
/// The declared columns define the header even when the array is empty.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredSequence<'a> {
    items: &'a [Value],
    columns: &'a [String],
}

impl<'a> DeclaredSequence<'a> {
    /// Create a declared sequence
    pub fn new(items: &'a [Value], columns: &'a [String]) -> Self {
        Self { items, columns }
    }

    /// Declared columns
    pub fn columns(&self) -> &[String] {
        self.columns
    }
}

impl CompositeSequence for DeclaredSequence<'_> {
    fn element_fields(&self) -> Result<Vec<Field>> {
        ensure_objects(self.items)?;
        Ok(Field::list(self.columns.iter().cloned()))
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn element(&self, index: usize) -> Option<&dyn Composite> {
        self.items
            .get(index)
            .and_then(Value::as_object)
            .map(|map| map as &dyn Composite)
    }
}

/// Every element of an untyped sequence must be an object
fn ensure_objects(items: &[Value]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(Error::shape(format!(
                "sequence element {index} is {}, not an object",
                json_kind(item)
            )));
        }
    }
    Ok(())
}

/// Human-readable JSON type name
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
