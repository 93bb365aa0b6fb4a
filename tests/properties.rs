use operanda::{
    context::Context,
    get_result,
    interpreter::evaluate,
    operand::Operand,
    value::Value,
};
use proptest::prelude::*;
use serde_json::json;

// Finite doubles, including negatives and tiny magnitudes.
fn finite() -> impl Strategy<Value = f64> {
    prop_oneof![-1.0e12f64..1.0e12f64, -1.0f64..1.0f64, Just(0.0), Just(-0.0)]
}

// The empty operator puts two operands side by side, which must not parse.
fn operator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("**"), Just("")]
}

// `a op b op c ...` over small non-negative integers, without identifiers.
fn numeric_source() -> impl Strategy<Value = String> {
    (0u32..50, prop::collection::vec((operator(), 0u32..5), 0..8)).prop_map(|(first, rest)| {
        let mut source = first.to_string();
        for (op, operand) in rest {
            source.push_str(&format!(" {op} {operand}"));
        }
        source
    })
}

proptest! {
    #[test]
    fn number_equals_its_own_value(x in finite()) {
        let number = Operand::number(x);
        let context = Context::default();

        prop_assert!(number.equals(&Value::Real(x), &context).unwrap());
        prop_assert!(number.equals(&Value::from(x.to_string()), &context).unwrap());
        prop_assert!(!number.less_than(&Value::Real(x), &context).unwrap());
        prop_assert!(!number.greater_than(&Value::Real(x), &context).unwrap());
    }

    #[test]
    fn set_ordering_compares_cardinality(size in 0usize..20, bound in -5i64..25) {
        let set = Operand::set((0..size).map(|i| Operand::string(format!("item{i}"))));
        let context = Context::default();
        let size = i64::try_from(size).unwrap();

        prop_assert_eq!(set.less_than(&Value::Integer(bound), &context).unwrap(), size < bound);
        prop_assert_eq!(set.greater_than(&Value::Integer(bound), &context).unwrap(), size > bound);
    }

    #[test]
    fn expressions_without_identifiers_round_trip(source in numeric_source()) {
        let direct = evaluate(&source);
        let through_operands = get_result(&source, &Context::default(), ":");

        match direct {
            Ok(value) => prop_assert_eq!(through_operands.unwrap(), value),
            Err(_) => prop_assert!(through_operands.is_err(), "{} evaluated through operands", source),
        }
    }

    #[test]
    fn substituted_values_keep_their_sign(x in -1_000_000i64..1_000_000) {
        let context = Context::new(json!({ "x": x }));
        let expected = f64::from(i32::try_from(x).unwrap());

        prop_assert_eq!(get_result("x * 2", &context, ":").unwrap(), expected * 2.0);
        prop_assert_eq!(get_result("0 - x", &context, ":").unwrap(), -expected);
        prop_assert_eq!(get_result("x ^ 2", &context, ":").unwrap(), expected * expected);
    }
}
