//! Shape inspection

use super::types::{Input, Shape};
use crate::error::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// Classify one input and enumerate its fields.
///
/// Fails with a shape error when a composite's members cannot be enumerated,
/// when a sequence's element type cannot be introspected, or when a record
/// declares the same member twice.
pub fn inspect(input: &Input<'_>) -> Result<Shape> {
    let shape = match input {
        Input::Scalar(value) => Shape::Scalar(value.clone()),
        Input::Composite(record) => {
            let fields = record.fields()?;
            ensure_unique(fields.iter().map(|f| f.name.as_str()))?;
            Shape::Composite { fields }
        }
        Input::Sequence(sequence) => {
            let fields = sequence.element_fields()?;
            ensure_unique(fields.iter().map(|f| f.name.as_str()))?;
            Shape::SequenceOfComposite {
                fields,
                len: sequence.len(),
            }
        }
    };

    debug!("Inspected {} input as {}", input.kind(), shape);
    Ok(shape)
}

fn ensure_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::shape(format!("member '{name}' is declared twice")));
        }
    }
    Ok(())
}
