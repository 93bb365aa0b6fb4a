use std::sync::Arc;

use operanda::{
    context::Context,
    error::OperandError,
    operand::{Capability, Member, NumberConstant, Operand, OperandKind, SetConstant},
    value::Value,
    variable::{FieldKind, PathVariable},
};
use serde_json::json;

fn ctx() -> Context {
    Context::default()
}

fn strings(items: &[&str]) -> Operand {
    Operand::set(items.iter().map(|s| Operand::string(*s)))
}

fn text_set(items: &[&str]) -> Value {
    items.iter().copied().collect()
}

#[test]
fn capability_sets_per_kind() {
    let string = Operand::string("a");
    let number = Operand::number(1.0);
    let set = strings(&["a"]);

    assert!(string.supports(Capability::Equality));
    assert!(!string.supports(Capability::Inequality));
    assert!(!string.supports(Capability::Membership));

    assert!(number.supports(Capability::Inequality));
    assert!(!number.supports(Capability::Membership));

    assert!(set.supports(Capability::Membership));
    assert!(set.supports(Capability::Inequality));
    assert!(!set.supports(Capability::Boolean));

    assert_eq!(set.capabilities(), OperandKind::Set.static_capabilities().unwrap());
}

#[test]
fn unsupported_operations_are_typed_errors() {
    let string = Operand::string("hola");

    let err = string.greater_than(&Value::from("a"), &ctx()).unwrap_err();
    assert!(matches!(err,
                     OperandError::UnsupportedOperation { kind: OperandKind::String,
                                                          capability: Capability::Inequality,
                                                          operation: "greater_than" }));

    assert!(matches!(string.belongs_to(&Value::from("o"), &ctx()),
                     Err(OperandError::UnsupportedOperation { .. })));
    assert!(matches!(Operand::number(1.0).is_subset(&text_set(&["a"]), &ctx()),
                     Err(OperandError::UnsupportedOperation { .. })));
    assert!(matches!(Operand::number(1.0).is_true(&ctx()),
                     Err(OperandError::UnsupportedOperation { .. })));
}

#[test]
fn string_equality_coerces_right_hand_side_to_text() {
    let five = Operand::string("5");

    assert!(five.equals(&Value::Integer(5), &ctx()).unwrap());
    assert!(five.equals(&Value::Real(5.0), &ctx()).unwrap());
    assert!(five.equals(&Value::from("5"), &ctx()).unwrap());
    assert!(!five.equals(&Value::from("5.0"), &ctx()).unwrap());
    assert!(Operand::string("true").equals(&Value::Bool(true), &ctx()).unwrap());
}

#[test]
fn number_comparisons_coerce_to_double() {
    let n = Operand::number(2.5);

    assert!(n.equals(&Value::from("2.5"), &ctx()).unwrap());
    assert!(n.greater_than(&Value::Integer(2), &ctx()).unwrap());
    assert!(n.less_than(&Value::from(" 3 "), &ctx()).unwrap());
    assert!(!n.less_than(&Value::Real(2.5), &ctx()).unwrap());
}

#[test]
fn number_coercion_failure_carries_the_value() {
    let err = Operand::number(1.0).equals(&Value::from("one"), &ctx()).unwrap_err();

    assert_eq!(err,
               OperandError::CoercionFailure { value:    "one".to_string(),
                                               expected: "a number", });
}

#[test]
fn number_construction_rejects_non_numeric_literals() {
    assert!(NumberConstant::try_from_value(&Value::from("12")).is_ok());
    assert!(matches!(NumberConstant::try_from_value(&Value::from("twelve")),
                     Err(OperandError::NonNumericLiteral { .. })));
}

#[test]
fn nan_follows_ieee_ordering() {
    let nan = Operand::number(f64::NAN);

    assert!(!nan.equals(&Value::Real(f64::NAN), &ctx()).unwrap());
    assert!(!nan.greater_than(&Value::Integer(0), &ctx()).unwrap());
    assert!(!nan.less_than(&Value::Integer(0), &ctx()).unwrap());
}

#[test]
fn set_membership() {
    let set = strings(&["a", "b"]);

    assert!(set.belongs_to(&Value::from("a"), &ctx()).unwrap());
    assert!(!set.belongs_to(&Value::from("c"), &ctx()).unwrap());
}

#[test]
fn set_membership_skips_members_of_another_type() {
    let set = Operand::set([Operand::number(1.0), Operand::string("x")]);

    // The number member cannot compare with "x"; it is skipped, not fatal.
    assert!(set.belongs_to(&Value::from("x"), &ctx()).unwrap());
    assert!(!set.belongs_to(&Value::from("y"), &ctx()).unwrap());
    assert!(set.belongs_to(&Value::Integer(1), &ctx()).unwrap());
}

#[test]
fn set_membership_propagates_context_failures() {
    let missing = Operand::variable(PathVariable::new(["missing"], FieldKind::Number));
    let set = Operand::set([missing]);

    assert!(matches!(set.belongs_to(&Value::Integer(1), &ctx()),
                     Err(OperandError::MissingContextValue { .. })));
}

#[test]
fn set_subsets() {
    let abc = strings(&["a", "b", "c"]);
    let ab = strings(&["a", "b"]);

    assert!(abc.is_subset(&text_set(&["a", "b"]), &ctx()).unwrap());
    assert!(!ab.is_subset(&text_set(&["a", "b", "c"]), &ctx()).unwrap());
    assert!(ab.is_subset(&text_set(&[]), &ctx()).unwrap());
    assert!(matches!(ab.is_subset(&Value::from("a"), &ctx()),
                     Err(OperandError::CoercionFailure { .. })));
}

#[test]
fn set_cardinality_ordering() {
    let set = strings(&["a", "b", "c"]);

    assert!(set.less_than(&Value::Integer(4), &ctx()).unwrap());
    assert!(!set.less_than(&Value::Integer(3), &ctx()).unwrap());
    assert!(set.greater_than(&Value::Real(2.0), &ctx()).unwrap());
    assert!(set.greater_than(&Value::from("2"), &ctx()).unwrap());
}

#[test]
fn set_cardinality_rejects_fractional_bounds() {
    let set = strings(&["a", "b"]);

    assert!(matches!(set.less_than(&Value::Real(2.5), &ctx()),
                     Err(OperandError::CoercionFailure { expected: "an integer", .. })));
    assert!(matches!(set.greater_than(&Value::from("two"), &ctx()),
                     Err(OperandError::CoercionFailure { .. })));
}

#[test]
fn set_equality_compares_resolved_values() {
    let set = Operand::set([Operand::number(1.0), Operand::number(2.0)]);
    let same: Value = [1, 2].into_iter().collect();
    let reals: Value = [2.0, 1.0].into_iter().collect();
    let other: Value = [1, 3].into_iter().collect();

    assert!(set.equals(&same, &ctx()).unwrap());
    assert!(set.equals(&reals, &ctx()).unwrap());
    assert!(!set.equals(&other, &ctx()).unwrap());
    assert!(set.equals(&Value::Integer(1), &ctx()).is_err());
}

#[test]
fn set_resolves_members_under_context() {
    let price = Operand::variable(PathVariable::new(["price"], FieldKind::Number));
    let set = Operand::set([price, Operand::number(3.0)]);

    let context = Context::new(json!({ "price": 7 }));
    let expected: Value = [7.0, 3.0].into_iter().collect();
    assert_eq!(set.to_value(&context).unwrap(), expected);

    // Duplicates collapse.
    let context = Context::new(json!({ "price": 3 }));
    let expected: Value = [3.0].into_iter().collect();
    assert_eq!(set.to_value(&context).unwrap(), expected);
}

#[test]
fn set_construction_rejects_raw_items() {
    let err = SetConstant::try_new([Member::from(Operand::string("a")), Member::from(Value::Integer(4))]).unwrap_err();

    assert_eq!(err,
               OperandError::NonOperandMember { item: "4".to_string() });
}

#[test]
fn equivalence_of_constants() {
    assert!(Operand::string("a").check_equivalence(&Operand::string("a")).is_ok());
    assert!(Operand::string("a").check_equivalence(&Operand::string("b")).is_err());
    assert!(Operand::number(1.0).check_equivalence(&Operand::number(1.0)).is_ok());
    assert!(matches!(Operand::number(1.0).check_equivalence(&Operand::string("1")),
                     Err(OperandError::EquivalenceMismatch { .. })));
}

#[test]
fn set_equivalence_ignores_order() {
    let left = Operand::set([Operand::string("a"), Operand::number(1.0), strings(&["x", "y"])]);
    let right = Operand::set([strings(&["y", "x"]), Operand::string("a"), Operand::number(1.0)]);

    assert!(left.check_equivalence(&right).is_ok());
}

#[test]
fn set_equivalence_names_unmatched_elements() {
    let left = strings(&["a", "b"]);
    let right = strings(&["c", "d"]);

    let Err(OperandError::EquivalenceMismatch { details, unmatched }) = left.check_equivalence(&right)
    else {
        panic!("sets with disjoint elements must not be equivalent");
    };
    assert!(details.contains("No match"));
    assert_eq!(unmatched.len(), 4);
    assert!(unmatched.contains(&"\"a\"".to_string()));
    assert!(unmatched.contains(&"\"d\"".to_string()));
}

#[test]
fn set_equivalence_checks_cardinality_and_multiplicity() {
    let two = strings(&["a", "a"]);
    let one = strings(&["a"]);
    let mixed = strings(&["a", "b"]);

    assert!(matches!(two.check_equivalence(&one),
                     Err(OperandError::EquivalenceMismatch { .. })));
    assert!(two.check_equivalence(&mixed).is_err());
    assert!(two.check_equivalence(&two.clone()).is_ok());
}

#[test]
fn variables_are_equivalent_only_to_themselves() {
    let price = Operand::variable(PathVariable::new(["price"], FieldKind::Number));
    let same_path = Operand::variable(PathVariable::new(["price"], FieldKind::Number));

    assert!(price.check_equivalence(&price.clone()).is_ok());
    assert!(price.check_equivalence(&same_path).is_err());
}

#[test]
fn variables_read_the_context_on_every_call() {
    let price = Operand::variable(PathVariable::new(["stock", "price"], FieldKind::Number));
    let cheap = Context::new(json!({ "stock": { "price": 5 } }));
    let pricey = Context::new(json!({ "stock": { "price": "50.5" } }));

    assert!(price.less_than(&Value::Integer(10), &cheap).unwrap());
    assert!(price.greater_than(&Value::Integer(10), &pricey).unwrap());
    assert!(price.equals(&Value::from("50.5"), &pricey).unwrap());
    assert!(matches!(price.to_value(&Context::default()),
                     Err(OperandError::MissingContextValue { .. })));
}

#[test]
fn boolean_variables() {
    let owned = Operand::variable(PathVariable::new(["stock", "owned"], FieldKind::Bool));
    let context = Context::new(json!({ "stock": { "owned": true } }));

    assert!(owned.supports(Capability::Boolean));
    assert!(owned.is_true(&context).unwrap());
    assert!(owned.equals(&Value::Integer(1), &context).unwrap());
    assert!(!owned.is_true(&Context::new(json!({ "stock": { "owned": 0 } }))).unwrap());
    assert!(owned.greater_than(&Value::Integer(0), &context).is_err());
}

#[test]
fn history_variables() {
    let context = Context::new(json!({
        "stock": { "close_price": 9.0, "data": [{ "close_price": 8.0 }, { "close_price": 7.5 }] }
    }));
    let close = PathVariable::new(["stock", "close_price"], FieldKind::Number);

    let today = Operand::variable(close.clone());
    let yesterday = Operand::variable(close.with_history("data", 1));

    assert_eq!(today.to_value(&context).unwrap(), Value::Real(9.0));
    assert_eq!(yesterday.to_value(&context).unwrap(), Value::Real(7.5));
}

#[test]
fn set_variables_support_membership() {
    let tags = Operand::variable(PathVariable::new(["tags"], FieldKind::Set));
    let context = Context::new(json!({ "tags": ["tech", "large-cap"] }));

    assert!(tags.belongs_to(&Value::from("tech"), &context).unwrap());
    assert!(tags.is_subset(&text_set(&["tech"]), &context).unwrap());
    assert!(!tags.is_subset(&text_set(&["tech", "energy"]), &context).unwrap());
    assert!(tags.less_than(&Value::Integer(3), &context).is_err());
}

#[test]
fn operand_trees_evaluate_concurrently() {
    let price = Operand::variable(PathVariable::new(["price"], FieldKind::Number));
    let tree = Arc::new(Operand::set([price, Operand::number(100.0)]));

    std::thread::scope(|scope| {
        for i in 0..8 {
            let tree = Arc::clone(&tree);
            scope.spawn(move || {
                     let context = Context::new(json!({ "price": i }));
                     assert!(tree.belongs_to(&Value::Integer(i), &context).unwrap());
                     assert!(tree.belongs_to(&Value::Integer(100), &context).unwrap());
                 });
        }
    });
}
