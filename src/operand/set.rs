use std::{collections::HashSet, fmt::Display, sync::Arc};

use tracing::debug;

use crate::{
    context::Context,
    error::{OperandError, OperandResult},
    operand::{
        capability::{Capabilities, Capability},
        core::Operand,
    },
    util::num::len_to_i64,
    value::{SetValue, Value},
};

/// An item handed to [`SetConstant::try_new`] by a builder.
///
/// Builders working from parsed input may hold either operands or raw
/// literal values; only operands can become set members.
#[derive(Debug, Clone)]
pub enum Member {
    /// A proper operand.
    Operand(Operand),
    /// A bare value that was never wrapped in an operand.
    Raw(Value),
}

impl From<Operand> for Member {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Constant set of operands.
///
/// The members are frozen at construction. Under a context the set resolves
/// to the set of its members' values; ordering compares the number of members
/// with an integer; membership asks each member whether it equals the
/// candidate.
#[derive(Debug, Clone)]
pub struct SetConstant {
    members: Arc<[Operand]>,
}

impl SetConstant {
    pub const CAPABILITIES: Capabilities =
        Capabilities::of(&[Capability::Equality, Capability::Inequality, Capability::Membership]);

    pub fn new(members: impl IntoIterator<Item = Operand>) -> Self {
        Self { members: members.into_iter().collect() }
    }

    /// Builds a set from builder items, rejecting anything that is not an
    /// operand.
    ///
    /// # Errors
    /// Returns [`OperandError::NonOperandMember`] for the first raw item.
    ///
    /// # Example
    /// ```
    /// use operanda::{
    ///     operand::{Member, Operand, SetConstant},
    ///     value::Value,
    /// };
    ///
    /// let ok = SetConstant::try_new([Member::from(Operand::string("a"))]);
    /// assert!(ok.is_ok());
    ///
    /// let bad = SetConstant::try_new([Member::from(Operand::string("a")),
    ///                                 Member::from(Value::from("b"))]);
    /// assert!(bad.is_err());
    /// ```
    pub fn try_new(items: impl IntoIterator<Item = Member>) -> OperandResult<Self> {
        let members = items.into_iter()
                           .map(|item| match item {
                               Member::Operand(operand) => Ok(operand),
                               Member::Raw(value) => {
                                   Err(OperandError::NonOperandMember { item: value.to_text() })
                               },
                           })
                           .collect::<OperandResult<Vec<_>>>()?;
        Ok(Self::new(members))
    }

    #[must_use]
    pub fn constant_value(&self) -> &[Operand] {
        &self.members
    }

    /// Number of member operands.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    /// Resolves every member under `context`; duplicates collapse.
    ///
    /// # Errors
    /// Propagates the first member that fails to resolve.
    pub fn to_value(&self, context: &Context) -> OperandResult<Value> {
        self.resolve(context).map(Value::Set)
    }

    /// Checks that `value` holds exactly the resolved members.
    ///
    /// # Errors
    /// Fails if `value` is not a set, or if a member fails to resolve.
    pub fn equals(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let other = value.as_set()?;
        Ok(*other == self.resolve(context)?)
    }

    /// Checks that the set has fewer members than `value`.
    ///
    /// # Errors
    /// Fails unless `value` is exactly an integer; `2.5` is rejected, not
    /// truncated.
    pub fn less_than(&self, value: &Value, _context: &Context) -> OperandResult<bool> {
        Ok(len_to_i64(self.cardinality()) < value.as_exact_integer()?)
    }

    /// Checks that the set has more members than `value`.
    ///
    /// # Errors
    /// Fails unless `value` is exactly an integer.
    pub fn greater_than(&self, value: &Value, _context: &Context) -> OperandResult<bool> {
        Ok(len_to_i64(self.cardinality()) > value.as_exact_integer()?)
    }

    /// Checks that some member equals `value`.
    ///
    /// A member that cannot be compared with `value` (wrong type, or no
    /// equality at all) simply does not match; the scan moves on to the next
    /// member. Any other failure is returned.
    ///
    /// # Errors
    /// Propagates member failures other than type mismatches.
    pub fn belongs_to(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        for member in self.members.iter() {
            match member.equals(value, context) {
                Ok(true) => return Ok(true),
                Ok(false) => {},
                Err(e) if e.is_type_mismatch() => {
                    debug!(member = %member, value = %value, error = %e, "set member skipped");
                },
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    /// Checks that every element of the set `value` belongs to this set.
    ///
    /// # Errors
    /// Fails if `value` is not a set, or as [`Self::belongs_to`] does.
    pub fn is_subset(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        for item in value.as_set()? {
            if !self.belongs_to(&Value::from(item.clone()), context)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Checks that `other` holds equivalent members, ignoring order.
    ///
    /// Each member of `other` consumes one equivalent, not yet consumed member
    /// of this set.
    ///
    /// # Errors
    /// Returns [`OperandError::EquivalenceMismatch`] when the cardinalities
    /// differ or some members find no partner; `unmatched` lists them.
    pub fn check_equivalence(&self, other: &Self) -> OperandResult<()> {
        if self.cardinality() != other.cardinality() {
            return Err(OperandError::EquivalenceMismatch {
                details: format!("Sets {self} and {other} do not have the same cardinality"),
                unmatched: Vec::new(),
            });
        }

        let mut unmatched: Vec<&Operand> = self.members.iter().collect();
        let mut orphans = Vec::new();
        for element in other.members.iter() {
            match unmatched.iter().position(|candidate| candidate.is_equivalent(element)) {
                Some(index) => {
                    unmatched.swap_remove(index);
                },
                None => orphans.push(element),
            }
        }

        if unmatched.is_empty() {
            return Ok(());
        }
        let unmatched: Vec<String> = unmatched.into_iter()
                                              .chain(orphans)
                                              .map(ToString::to_string)
                                              .collect();
        Err(OperandError::EquivalenceMismatch { details: format!("No match for the following elements: {}",
                                                                 unmatched.join(", ")),
                                                unmatched })
    }

    fn resolve(&self, context: &Context) -> OperandResult<HashSet<SetValue>> {
        self.members
            .iter()
            .map(|member| member.to_value(context).map(SetValue::from))
            .collect()
    }
}

impl Display for SetConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items: Vec<String> = self.members.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}
