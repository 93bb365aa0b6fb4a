/// Set element representation.
///
/// Defines the `SetValue` type, the hashable form of a resolved value used as
/// the element type of `Value::Set`. Integers and reals share one numeric
/// representation so that `{1}` and `{1.0}` are the same set.
pub mod set_value;

pub mod core;

pub use self::{core::Value, set_value::SetValue};
