use std::{fmt::Display, sync::Arc};

use crate::{
    context::Context,
    error::{OperandError, OperandResult},
    operand::{
        arithmetic::ArithmeticConstant,
        capability::{Capabilities, Capability},
        number::NumberConstant,
        set::SetConstant,
        string::StringConstant,
    },
    value::Value,
    variable::Variable,
};

/// The kind of an operand, i.e. the tag of its [`Operand`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    String,
    Number,
    Arithmetic,
    Set,
    Variable,
}

impl OperandKind {
    /// The capabilities every operand of this kind has.
    ///
    /// Variables declare their own set per implementation, so `None` is
    /// returned for [`OperandKind::Variable`]; ask the instance instead.
    ///
    /// # Example
    /// ```
    /// use operanda::operand::{Capability, OperandKind};
    ///
    /// let set = OperandKind::Set.static_capabilities().unwrap();
    /// assert!(set.contains(Capability::Membership));
    ///
    /// let string = OperandKind::String.static_capabilities().unwrap();
    /// assert!(!string.contains(Capability::Inequality));
    ///
    /// assert!(OperandKind::Variable.static_capabilities().is_none());
    /// ```
    #[must_use]
    pub const fn static_capabilities(self) -> Option<Capabilities> {
        match self {
            Self::String => Some(StringConstant::CAPABILITIES),
            Self::Number => Some(NumberConstant::CAPABILITIES),
            Self::Arithmetic => Some(ArithmeticConstant::CAPABILITIES),
            Self::Set => Some(SetConstant::CAPABILITIES),
            Self::Variable => None,
        }
    }
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Arithmetic => "Arithmetic",
            Self::Set => "Set",
            Self::Variable => "Variable",
        };
        write!(f, "{name}")
    }
}

/// Anything that can produce a value under a context and take part in a
/// declared subset of comparisons.
///
/// Every comparison checks the operand's capability set first and fails with
/// [`OperandError::UnsupportedOperation`] when the category is not declared,
/// then dispatches on the variant. Constants ignore the context (except for
/// the variables an arithmetic constant or a set member refers to); variables
/// read it on every call.
///
/// Operands are immutable once built and can be shared between threads.
///
/// # Example
/// ```
/// use operanda::{context::Context, operand::Operand, value::Value};
///
/// let context = Context::default();
/// let price = Operand::number(10.0);
///
/// assert!(price.greater_than(&Value::from("9.5"), &context).unwrap());
/// assert!(price.equals(&Value::Integer(10), &context).unwrap());
/// assert!(price.belongs_to(&Value::Integer(10), &context).is_err());
/// ```
#[derive(Debug, Clone)]
pub enum Operand {
    /// A constant piece of text.
    String(StringConstant),
    /// A constant double.
    Number(NumberConstant),
    /// An arithmetic expression over variables.
    Arithmetic(ArithmeticConstant),
    /// A constant set of operands.
    Set(SetConstant),
    /// A value read from the context at evaluation time.
    Variable(Arc<dyn Variable>),
}

impl From<StringConstant> for Operand {
    fn from(c: StringConstant) -> Self {
        Self::String(c)
    }
}

impl From<NumberConstant> for Operand {
    fn from(c: NumberConstant) -> Self {
        Self::Number(c)
    }
}

impl From<ArithmeticConstant> for Operand {
    fn from(c: ArithmeticConstant) -> Self {
        Self::Arithmetic(c)
    }
}

impl From<SetConstant> for Operand {
    fn from(c: SetConstant) -> Self {
        Self::Set(c)
    }
}

impl From<Arc<dyn Variable>> for Operand {
    fn from(v: Arc<dyn Variable>) -> Self {
        Self::Variable(v)
    }
}

impl Operand {
    /// Shorthand for a [`StringConstant`] operand.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(StringConstant::new(text))
    }

    /// Shorthand for a [`NumberConstant`] operand.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(NumberConstant::new(value))
    }

    /// Shorthand for a [`SetConstant`] operand.
    pub fn set(members: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(SetConstant::new(members))
    }

    /// Shorthand for a variable operand.
    pub fn variable(variable: impl Variable + 'static) -> Self {
        Self::Variable(Arc::new(variable))
    }

    #[must_use]
    pub const fn kind(&self) -> OperandKind {
        match self {
            Self::String(_) => OperandKind::String,
            Self::Number(_) => OperandKind::Number,
            Self::Arithmetic(_) => OperandKind::Arithmetic,
            Self::Set(_) => OperandKind::Set,
            Self::Variable(_) => OperandKind::Variable,
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Variable(v) => v.capabilities(),
            other => other.kind().static_capabilities().unwrap_or(Capabilities::NONE),
        }
    }

    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Fails unless this operand supports `capability`.
    ///
    /// # Errors
    /// Returns [`OperandError::UnsupportedOperation`] naming `operation`.
    pub fn require(&self, capability: Capability, operation: &'static str) -> OperandResult<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(self.unsupported(capability, operation))
        }
    }

    /// Returns the value this operand denotes under `context`.
    ///
    /// # Errors
    /// Fails if a variable cannot be read from `context` or an arithmetic
    /// expression cannot be evaluated.
    pub fn to_value(&self, context: &Context) -> OperandResult<Value> {
        match self {
            Self::String(s) => Ok(Value::Text(s.constant_value().to_string())),
            Self::Number(n) => Ok(Value::Real(n.constant_value())),
            Self::Arithmetic(a) => a.evaluate(context).map(Value::Real),
            Self::Set(s) => s.to_value(context),
            Self::Variable(v) => v.to_value(context),
        }
    }

    /// # Errors
    /// Fails if the operand has no equality, or if `value` cannot be coerced
    /// to what the operand compares against.
    pub fn equals(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Equality, "equals")?;
        match self {
            Self::String(s) => Ok(s.equals(value)),
            Self::Number(n) => n.equals(value),
            Self::Arithmetic(a) => a.equals(value, context),
            Self::Set(s) => s.equals(value, context),
            Self::Variable(v) => v.equals(value, context),
        }
    }

    /// # Errors
    /// Fails if the operand has no inequality, or if `value` cannot be
    /// coerced.
    pub fn greater_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Inequality, "greater_than")?;
        match self {
            Self::Number(n) => n.greater_than(value),
            Self::Arithmetic(a) => a.greater_than(value, context),
            Self::Set(s) => s.greater_than(value, context),
            Self::Variable(v) => v.greater_than(value, context),
            Self::String(_) => Err(self.unsupported(Capability::Inequality, "greater_than")),
        }
    }

    /// # Errors
    /// Fails if the operand has no inequality, or if `value` cannot be
    /// coerced.
    pub fn less_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Inequality, "less_than")?;
        match self {
            Self::Number(n) => n.less_than(value),
            Self::Arithmetic(a) => a.less_than(value, context),
            Self::Set(s) => s.less_than(value, context),
            Self::Variable(v) => v.less_than(value, context),
            Self::String(_) => Err(self.unsupported(Capability::Inequality, "less_than")),
        }
    }

    /// # Errors
    /// Fails if the operand has no membership.
    pub fn belongs_to(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Membership, "belongs_to")?;
        match self {
            Self::Set(s) => s.belongs_to(value, context),
            Self::Variable(v) => v.belongs_to(value, context),
            _ => Err(self.unsupported(Capability::Membership, "belongs_to")),
        }
    }

    /// # Errors
    /// Fails if the operand has no membership or `value` is not a set.
    pub fn is_subset(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Membership, "is_subset")?;
        match self {
            Self::Set(s) => s.is_subset(value, context),
            Self::Variable(v) => v.is_subset(value, context),
            _ => Err(self.unsupported(Capability::Membership, "is_subset")),
        }
    }

    /// Reads the operand as a truth value on its own.
    ///
    /// # Errors
    /// Fails if the operand has no boolean capability.
    pub fn is_true(&self, context: &Context) -> OperandResult<bool> {
        self.require(Capability::Boolean, "is_true")?;
        match self {
            Self::Variable(v) => v.is_true(context),
            _ => Err(self.unsupported(Capability::Boolean, "is_true")),
        }
    }

    /// Structural equality: same kind and same constant value.
    ///
    /// This is not a runtime comparison and never looks at a context. Sets
    /// compare their members as multisets, arithmetic constants compare their
    /// expression text and resolved variables, and variables are equivalent
    /// only to themselves.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.constant_value() == b.constant_value(),
            (Self::Arithmetic(a), Self::Arithmetic(b)) => {
                a.constant_value().is_equivalent(b.constant_value())
            },
            (Self::Set(a), Self::Set(b)) => a.check_equivalence(b).is_ok(),
            (Self::Variable(a), Self::Variable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Asserts that `other` is structurally equivalent to this operand.
    ///
    /// Meant for offline checks, such as verifying that two independently
    /// built operand trees denote the same thing.
    ///
    /// # Errors
    /// Returns [`OperandError::EquivalenceMismatch`] describing the first
    /// difference.
    ///
    /// # Example
    /// ```
    /// use operanda::operand::Operand;
    ///
    /// let left = Operand::set([Operand::string("a"), Operand::string("b")]);
    /// let right = Operand::set([Operand::string("b"), Operand::string("a")]);
    /// assert!(left.check_equivalence(&right).is_ok());
    ///
    /// let other = Operand::set([Operand::string("c"), Operand::string("d")]);
    /// assert!(left.check_equivalence(&other).is_err());
    /// ```
    pub fn check_equivalence(&self, other: &Self) -> OperandResult<()> {
        if self.kind() != other.kind() {
            return Err(OperandError::EquivalenceMismatch {
                details: format!("{self} and {other} are of different kinds ({} and {})",
                                 self.kind(),
                                 other.kind()),
                unmatched: Vec::new(),
            });
        }
        match (self, other) {
            (Self::Set(a), Self::Set(b)) => a.check_equivalence(b),
            _ if self.is_equivalent(other) => Ok(()),
            _ => Err(OperandError::EquivalenceMismatch {
                details: format!("Operands {self} and {other} represent different values"),
                unmatched: Vec::new(),
            }),
        }
    }

    fn unsupported(&self, capability: Capability, operation: &'static str) -> OperandError {
        OperandError::UnsupportedOperation { kind: self.kind(),
                                             capability,
                                             operation }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Arithmetic(a) => write!(f, "{a}"),
            Self::Set(s) => write!(f, "{s}"),
            Self::Variable(v) => write!(f, "{}", v.name()),
        }
    }
}
