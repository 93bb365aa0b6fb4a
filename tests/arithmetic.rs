use std::sync::Arc;

use operanda::{
    arithmetic::{ArithmeticExpression, SubstitutionStage, TokenTree},
    context::Context,
    error::{ExpressionError, OperandError},
    get_result,
    interpreter::{MAX_TOKENS, evaluate},
    namespace::{PathNamespace, Registry},
    operand::{Capability, Operand},
    parse_arithmetic,
    tokenizer::tokenize,
    value::Value,
    variable::{FieldKind, PathVariable},
};
use serde_json::{Value as JsonValue, json};

fn run(source: &str, context: JsonValue) -> Result<f64, OperandError> {
    get_result(source, &Context::new(context), ":")
}

fn expression(source: &str, namespace: &Registry) -> ArithmeticExpression {
    let tokens = tokenize(source, ":").unwrap();
    ArithmeticExpression::new(tokens, namespace).unwrap()
}

/// `x` reads `bare`, `ns:x` reads `scoped`.
fn shadowing_registry() -> Registry {
    let mut registry = Registry::new();
    registry.bind("x", PathVariable::new(["bare"], FieldKind::Number));
    registry.scope_mut("ns")
            .bind("x", PathVariable::new(["scoped"], FieldKind::Number));
    registry
}

#[test]
fn restricted_evaluator_precedence() {
    assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
    assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
    assert_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
    assert_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
    assert_eq!(evaluate("(-2) ** 2").unwrap(), 4.0);
    assert_eq!(evaluate("2 ** -1").unwrap(), 0.5);
    assert_eq!(evaluate("--3").unwrap(), 3.0);
    assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
    assert_eq!(evaluate("12 / 3 / 2").unwrap(), 2.0);
    assert_eq!(evaluate(".5 + 2.").unwrap(), 2.5);
    assert_eq!(evaluate("1e3").unwrap(), 1000.0);
}

#[test]
fn restricted_evaluator_rejects_everything_else() {
    for source in ["1; import os",
                   "__import__('os').system('ls')",
                   "x + 1",
                   "abs(-1)",
                   "1 if 1 else 2",
                   "[1, 2]",
                   "1 == 1",
                   "2 % 3"]
    {
        assert!(matches!(evaluate(source), Err(ExpressionError::UnexpectedCharacter { .. })),
                "{source} must be rejected");
    }
}

#[test]
fn restricted_evaluator_grammar_errors() {
    assert_eq!(evaluate(""), Err(ExpressionError::UnexpectedEndOfInput));
    assert_eq!(evaluate("1 +"), Err(ExpressionError::UnexpectedEndOfInput));
    assert_eq!(evaluate("(1 + 2"),
               Err(ExpressionError::ExpectedClosingParen { position: 0 }));
    assert!(matches!(evaluate("1 2"), Err(ExpressionError::TrailingTokens { position: 2, .. })));
    assert!(matches!(evaluate("* 2"), Err(ExpressionError::UnexpectedToken { position: 0, .. })));
    assert!(matches!(evaluate("1e400"), Err(ExpressionError::LiteralTooLarge { .. })));

    let long = vec!["1"; MAX_TOKENS].join("+");
    assert_eq!(evaluate(&long), Err(ExpressionError::TooManyTokens { limit: MAX_TOKENS }));
}

#[test]
fn restricted_evaluator_arithmetic_errors() {
    assert_eq!(evaluate("1 / 0"), Err(ExpressionError::DivisionByZero));
    assert_eq!(evaluate("0 ** -1"), Err(ExpressionError::DivisionByZero));
    assert!(matches!(evaluate("(-8) ** 0.5"), Err(ExpressionError::ComplexResult { .. })));
    assert!(matches!(evaluate("10 ** 400"), Err(ExpressionError::Overflow { .. })));
}

#[test]
fn tokenizer_nests_parentheses() {
    let trees = tokenize("a ** (b - (c))", ":").unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(TokenTree::flatten(&trees),
               ["a", "**", "(", "b", "-", "(", "c", ")", ")"]);
    assert!(matches!(&trees[2], TokenTree::Group(items) if items.len() == 5));
}

#[test]
fn tokenizer_errors() {
    assert_eq!(tokenize("(x + 1", ":"),
               Err(ExpressionError::ExpectedClosingParen { position: 0 }));
    assert_eq!(tokenize("x + 1)", ":"),
               Err(ExpressionError::UnexpectedToken { token:    ")".to_string(),
                                                      position: 5, }));
    assert!(matches!(tokenize("x; 1", ":"),
                     Err(ExpressionError::UnexpectedCharacter { position: 1, .. })));
    assert_eq!(tokenize("2 * x$", ":"),
               Err(ExpressionError::UnexpectedCharacter { text:     "$".to_string(),
                                                          position: 5, }));
    assert!(matches!(tokenize("a.b", ":"),
                     Err(ExpressionError::UnexpectedCharacter { position: 1, .. })));
    assert!(matches!(tokenize("1 . 2", ":"),
                     Err(ExpressionError::UnexpectedCharacter { position: 2, .. })));
}

#[test]
fn tokenizer_keeps_adjacent_operands_apart() {
    let trees = tokenize("2x 3", ":").unwrap();

    assert_eq!(TokenTree::flatten(&trees), ["2", "x", "3"]);
}

#[test]
fn qualified_and_bare_names_keep_their_own_variables() {
    let context = json!({ "ns": { "x": 5 }, "x": 2 });

    assert_eq!(run("ns:x + x", context.clone()).unwrap(), 7.0);
    assert_eq!(run("x + ns:x", context.clone()).unwrap(), 7.0);
    assert_eq!(run("ns:x * x - x", context).unwrap(), 8.0);
}

#[test]
fn registry_scopes_resolve_shadowed_names() {
    let registry = shadowing_registry();
    let context = Context::new(json!({ "bare": 2, "scoped": 5 }));

    let expression = expression("ns:x + x", &registry);
    assert_eq!(expression.variables().len(), 2);
    assert_eq!(expression.evaluate(&context).unwrap(), 7.0);
}

#[test]
fn substitution_stages_run_independently() {
    let registry = shadowing_registry();
    let context = Context::new(json!({ "bare": 2, "scoped": 5 }));
    let expression = expression("ns:x + x", &registry);

    let qualified = expression.substitute(expression.flattened().to_vec(),
                                          SubstitutionStage::Qualified,
                                          &context)
                              .unwrap();
    assert_eq!(qualified, ["5", "+", "x"]);

    let bare_only = expression.substitute(expression.flattened().to_vec(),
                                          SubstitutionStage::Bare,
                                          &context)
                              .unwrap();
    assert_eq!(bare_only, ["ns:x", "+", "2"]);

    let both = expression.substitute(qualified, SubstitutionStage::Bare, &context)
                         .unwrap();
    assert_eq!(both, ["5", "+", "2"]);
    assert_eq!(expression.substituted(&context).unwrap(), "5 + 2");
}

#[test]
fn caret_means_power() {
    assert_eq!(run("x ^ 2", json!({ "x": 3 })).unwrap(), 9.0);
    assert_eq!(run("2 ^ 3 ^ 2", json!({})).unwrap(), 512.0);
}

#[test]
fn negative_values_substitute_as_a_unit() {
    assert_eq!(run("x ^ 2", json!({ "x": -3 })).unwrap(), 9.0);
    assert_eq!(run("1 - x", json!({ "x": -3 })).unwrap(), 4.0);
    assert_eq!(run("-x", json!({ "x": -3.5 })).unwrap(), 3.5);
}

#[test]
fn expressions_without_identifiers_match_the_evaluator() {
    for source in ["2 * (3 + 4) ** 2", "1 / 4 - 0.25", "-(2 - 7) * .5", "3 ^ 2 ^ 0.5"] {
        let direct = evaluate(&source.replace('^', "**")).unwrap();
        assert_eq!(run(source, json!({})).unwrap(), direct);
    }
}

#[test]
fn values_are_read_on_every_evaluation() {
    let operand = parse_arithmetic("(high + low) / 2", &PathNamespace::default(), ":").unwrap();

    let first = Context::new(json!({ "high": 10, "low": 6 }));
    let second = Context::new(json!({ "high": 20, "low": 6 }));

    assert_eq!(operand.evaluate(&first).unwrap(), 8.0);
    assert_eq!(operand.evaluate(&second).unwrap(), 13.0);
}

#[test]
fn custom_separator() {
    let context = json!({ "stock": { "price": 4 } });

    assert_eq!(run("stock:price * 2", context.clone()).unwrap(), 8.0);
    assert_eq!(get_result("stock.price * 2", &Context::new(context), ".").unwrap(), 8.0);

    let tokens = vec![TokenTree::token("x")];
    assert!(matches!(ArithmeticExpression::with_separator(tokens, &PathNamespace::default(), ""),
                     Err(OperandError::EmptySeparator)));
}

#[test]
fn unresolved_identifiers_fail_at_construction() {
    let registry = shadowing_registry();
    let tokens = tokenize("ns:y + 1", ":").unwrap();

    let err = ArithmeticExpression::new(tokens, &registry).unwrap_err();
    assert_eq!(err,
               OperandError::UnresolvedIdentifier { name:   "y".to_string(),
                                                    scopes: vec!["ns".to_string()], });
    assert_eq!(err.to_string(), "Cannot resolve 'y' in scope 'ns'.");
}

#[test]
fn missing_context_values_surface_at_evaluation() {
    assert!(matches!(run("volume * 2", json!({ "price": 1 })),
                     Err(OperandError::MissingContextValue { .. })));
    assert!(matches!(run("price * 2", json!({ "price": "cheap" })),
                     Err(OperandError::ContextTypeMismatch { .. })));
}

#[test]
fn substituted_text_cannot_inject_code() {
    let namespace = PathNamespace::new(FieldKind::Text);
    let operand = parse_arithmetic("x + 1", &namespace, ":").unwrap();
    let context = Context::new(json!({ "x": "1; import os" }));

    let Err(OperandError::UnsafeExpression { expression, source }) = operand.evaluate(&context) else {
        panic!("injected text must not evaluate");
    };
    assert_eq!(expression, "1; import os + 1");
    assert!(matches!(source, ExpressionError::UnexpectedCharacter { position: 1, .. }));
}

#[test]
fn malformed_identifiers_fail_at_construction() {
    for token in ["os.system", "x$", "a.b", "__import__('os')", "2x"] {
        let tokens = vec![TokenTree::token(token), TokenTree::token("+"), TokenTree::token("1")];
        let result = ArithmeticExpression::new(tokens, &Registry::new());

        assert_eq!(result.unwrap_err(),
                   OperandError::InvalidIdentifier { token: token.to_string() },
                   "{token} must be rejected");
    }
}

#[test]
fn numeric_literals_are_not_identifiers() {
    let tokens = vec![TokenTree::token("1e5"), TokenTree::token("/"), TokenTree::token("1.5")];
    let expression = ArithmeticExpression::with_separator(tokens, &Registry::new(), ".").unwrap();

    assert!(expression.variables().is_empty());
    assert_eq!(expression.evaluate(&Context::default()).unwrap(), 1e5 / 1.5);
}

#[test]
fn tokens_outside_the_grammar_are_rejected_by_the_evaluator() {
    let tokens = vec![TokenTree::token("$"), TokenTree::token("+"), TokenTree::token("1")];
    let expression = ArithmeticExpression::new(tokens, &PathNamespace::default()).unwrap();

    assert!(matches!(expression.evaluate(&Context::default()),
                     Err(OperandError::UnsafeExpression { .. })));
}

#[test]
fn out_of_grammar_source_is_unsafe() {
    let Err(OperandError::UnsafeExpression { expression, source }) = run("1; import os", json!({})) else {
        panic!("statement text must not parse");
    };
    assert_eq!(expression, "1; import os");
    assert!(matches!(source, ExpressionError::UnexpectedCharacter { position: 1, .. }));

    assert!(matches!(run("(1 + 2", json!({})),
                     Err(OperandError::Tokenize(ExpressionError::ExpectedClosingParen { .. }))));
}

#[test]
fn adjacent_operands_are_not_fused() {
    let context = json!({ "x": 5, "y": 3 });

    for source in ["x y", "2x", "2 3", "(x) (y)"] {
        assert!(matches!(run(source, context.clone()),
                         Err(OperandError::UnsafeExpression { source: ExpressionError::TrailingTokens { .. },
                                                              .. })),
                "{source} must be rejected");
    }
}

#[test]
fn repeated_identifiers_share_one_variable() {
    let registry = shadowing_registry();
    let context = Context::new(json!({ "bare": 2, "scoped": 5 }));
    let expression = expression("x * x + ns:x", &registry);

    assert_eq!(expression.variables().len(), 2);
    assert_eq!(expression.evaluate(&context).unwrap(), 9.0);
}

#[test]
fn arithmetic_operands_evaluate_concurrently() {
    let operand = Arc::new(Operand::from(parse_arithmetic("x * 2 + ns:x", &PathNamespace::default(), ":").unwrap()));

    std::thread::scope(|scope| {
        for i in 0..8 {
            let operand = Arc::clone(&operand);
            scope.spawn(move || {
                     let context = Context::new(json!({ "x": i, "ns": { "x": 1 } }));
                     let expected = f64::from(i * 2 + 1);
                     assert_eq!(operand.to_value(&context).unwrap(), Value::Real(expected));
                 });
        }
    });
}

#[test]
fn arithmetic_failures_are_unsafe_expressions() {
    assert!(matches!(run("x / 0", json!({ "x": 1 })),
                     Err(OperandError::UnsafeExpression { source: ExpressionError::DivisionByZero, .. })));
}

#[test]
fn arithmetic_operands_compare_numerically() {
    let operand = Operand::from(parse_arithmetic("price * qty", &PathNamespace::default(), ":").unwrap());
    let context = Context::new(json!({ "price": 2.5, "qty": 4 }));

    assert!(operand.supports(Capability::Inequality));
    assert!(!operand.supports(Capability::Membership));
    assert!(operand.equals(&Value::Integer(10), &context).unwrap());
    assert!(operand.greater_than(&Value::from("9.5"), &context).unwrap());
    assert!(!operand.less_than(&Value::Real(10.0), &context).unwrap());
    assert!(matches!(operand.equals(&Value::from("ten"), &context),
                     Err(OperandError::CoercionFailure { .. })));
    assert_eq!(operand.to_value(&context).unwrap(), Value::Real(10.0));
}

#[test]
fn arithmetic_equivalence_requires_the_same_variables() {
    let registry = shadowing_registry();
    let left = Operand::from(parse_arithmetic("ns:x + 1", &registry, ":").unwrap());
    let same = Operand::from(parse_arithmetic("ns:x + 1", &registry, ":").unwrap());
    let fresh = Operand::from(parse_arithmetic("ns:x + 1", &shadowing_registry(), ":").unwrap());
    let other = Operand::from(parse_arithmetic("ns:x + 2", &registry, ":").unwrap());

    assert!(left.check_equivalence(&same).is_ok());
    assert!(left.check_equivalence(&fresh).is_err());
    assert!(left.check_equivalence(&other).is_err());
}
