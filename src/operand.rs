/// Operation categories and the sets operand kinds declare.
pub mod capability;

/// The `Operand` enum and its capability-gated dispatch.
pub mod core;

/// Constant text.
pub mod string;

/// Constant numbers.
pub mod number;

/// Constant sets: cardinality ordering, membership and order-independent
/// equivalence.
pub mod set;

/// Constants backed by an arithmetic expression over variables.
pub mod arithmetic;

pub use self::{
    arithmetic::ArithmeticConstant,
    capability::{Capabilities, Capability},
    core::{Operand, OperandKind},
    number::NumberConstant,
    set::{Member, SetConstant},
    string::StringConstant,
};
