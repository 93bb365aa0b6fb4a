/// Parser entry points.
///
/// Contains the top-level expression rule and the routine that parses a whole
/// token sequence, rejecting leftovers.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative levels.
pub mod binary;

/// Unary, power and primary parsing.
///
/// Handles negation, right-associative exponentiation, literals and
/// parentheses.
pub mod unary;
