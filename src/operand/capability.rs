use std::fmt::Display;

/// A category of relational operations an operand may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `equals`.
    Equality,
    /// `greater_than` and `less_than`.
    Inequality,
    /// `belongs_to` and `is_subset`.
    Membership,
    /// Use as a truth value on its own (`is_true`).
    Boolean,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 4] = [Self::Equality, Self::Inequality, Self::Membership, Self::Boolean];

    const fn bit(self) -> u8 {
        match self {
            Self::Equality => 1,
            Self::Inequality => 1 << 1,
            Self::Membership => 1 << 2,
            Self::Boolean => 1 << 3,
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Equality => "equality",
            Self::Inequality => "inequality",
            Self::Membership => "membership",
            Self::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

/// A fixed set of [`Capability`] values.
///
/// Operand kinds declare their set as a constant, so it can be inspected
/// without an instance, e.g. to validate an expression tree before any
/// context exists.
///
/// # Example
/// ```
/// use operanda::operand::{Capabilities, Capability};
///
/// const ORDERED: Capabilities = Capabilities::of(&[Capability::Equality, Capability::Inequality]);
///
/// assert!(ORDERED.contains(Capability::Inequality));
/// assert!(!ORDERED.contains(Capability::Membership));
/// assert_eq!(ORDERED.to_string(), "{equality, inequality}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Builds a set from a list of capabilities.
    #[must_use]
    pub const fn of(capabilities: &[Capability]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < capabilities.len() {
            bits |= capabilities[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Returns a copy of this set with `capability` added.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
