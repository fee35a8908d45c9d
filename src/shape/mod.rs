//! Shape inspection module
//!
//! Classifies flatten inputs as scalar, composite or sequence-of-composite
//! and derives their column list.
//!
//! # Features
//!
//! - **Capability traits**: records describe themselves, no runtime reflection
//! - **Typed records**: the `record!` macro generates a compile-time descriptor
//! - **Untyped records**: JSON objects and arrays flatten in document order
//! - **Declared columns**: untyped sequences can carry an explicit header

mod inspector;
mod record;
mod types;

pub use inspector::inspect;
pub use record::{to_cell_value, Composite, CompositeSequence, DeclaredSequence, Record};
pub use types::{Field, Input, Shape};

pub(crate) use record::json_kind;
