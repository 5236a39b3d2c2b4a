// tests/template_tests.rs

use std::sync::Arc;

use anise_lang::{Context, Error, EvalError, ParseError, Registry, Value, exp, render_template};

fn rendered(source: &str) -> String {
    match render_template(source) {
        Ok(text) => text,
        Err(err) => panic!("{source:?} failed: {err}"),
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_logical_operands_are_grouped() {
    assert_eq!(
        rendered(r#"age >= 18 && country == "NL""#),
        r#"and ( ge .age 18 ) ( eq .country "NL" )"#
    );
    assert_eq!(
        rendered("a || b && c"),
        "or ( .a ) ( and ( .b ) ( .c ) )"
    );
}

#[test]
fn test_comparison_keywords() {
    let cases = [
        ("a == 1", "eq .a 1"),
        ("a != 1", "ne .a 1"),
        ("a < 1", "lt .a 1"),
        ("a <= 1", "le .a 1"),
        ("a > 1", "gt .a 1"),
        ("a >= 1", "ge .a 1"),
    ];
    for (source, expected) in cases {
        assert_eq!(rendered(source), expected, "source {source:?}");
    }
}

#[test]
fn test_arithmetic_keywords() {
    assert_eq!(rendered("price - 1"), "sub .price 1");
    assert_eq!(rendered("price / 2"), "div .price 2");
    assert_eq!(rendered("price % 2"), "mod .price 2");
}

#[test]
fn test_power_spelling_normalized() {
    assert_eq!(rendered("2 ^ 3"), "** 2 3");
    assert_eq!(rendered("2 ** 3"), "** 2 3");
    assert_eq!(rendered("a // 2"), "// .a 2");
}

#[test]
fn test_dotted_variable() {
    assert_eq!(rendered("user.age > 18"), "gt .user.age 18");
}

#[test]
fn test_float_literal_fixed_precision() {
    assert_eq!(rendered("total * 1.21"), "mul .total 1.210000");
}

#[test]
fn test_negative_literal() {
    assert_eq!(rendered("x > -5"), "gt .x -5");
}

#[test]
fn test_calls_and_arrays() {
    assert_eq!(rendered("now()"), "now");
    assert_eq!(rendered("contains(tags, 'vip')"), r#"contains .tags "vip""#);
    assert_eq!(rendered("sum(int[1, 2 + 3])"), "sum [1, add 2 3]");
}

#[test]
fn test_backtick_string_renders_quoted() {
    assert_eq!(rendered("name == `bob`"), r#"eq .name "bob""#);
}

#[test]
fn test_render_parse_error() {
    assert!(matches!(
        render_template("a &&"),
        Err(ParseError::UnexpectedEof)
    ));
}

// ============================================================================
// Template-side evaluation
// ============================================================================

#[test]
fn test_exp_with_pairs() {
    let pairs = [
        Value::String("foo".into()),
        Value::Integer(5),
        Value::String("rate".into()),
        Value::Float(0.5),
    ];
    assert_eq!(exp(&Context::new(), "foo == 5", &pairs), Ok(true));
    assert_eq!(exp(&Context::new(), "foo * rate > 3", &pairs), Ok(false));
}

#[test]
fn test_exp_condition_must_be_boolean() {
    let pairs = [Value::String("a".into()), Value::Integer(2)];
    assert_eq!(
        exp(&Context::new(), "a * 2", &pairs),
        Err(Error::Eval(EvalError::NonBooleanResult("int")))
    );
}

#[test]
fn test_exp_without_pairs() {
    assert_eq!(exp(&Context::new(), "1 + 1 == 2", &[]), Ok(true));
    assert_eq!(
        exp(&Context::new(), "a", &[]),
        Err(Error::Eval(EvalError::UndefinedVariable("a".into())))
    );
}

#[test]
fn test_exp_uses_caller_context() {
    let mut registry = Registry::empty();
    registry.register("is_even", |_ctx, args| match args {
        [Value::Integer(n)] => Ok(Value::Boolean(n % 2 == 0)),
        _ => Ok(Value::Boolean(false)),
    });
    let ctx = Context::with_registry(Arc::new(registry));
    let pairs = [Value::String("n".into()), Value::Integer(4)];

    assert_eq!(exp(&ctx, "is_even(n)", &pairs), Ok(true));
    assert_eq!(
        exp(&ctx, "sqrt(n) == 2.0", &pairs),
        Err(Error::Eval(EvalError::UnknownFunction("sqrt".into())))
    );

    let shallow = Context::new().with_max_depth(0);
    assert_eq!(
        exp(&shallow, r#"len(map(int[1], "_x")) == 1"#, &[]),
        Err(Error::Eval(EvalError::NestingLimit(0)))
    );
}

#[test]
fn test_exp_rejects_malformed_pairs() {
    assert!(matches!(
        exp(&Context::new(), "a", &[Value::String("a".into())]),
        Err(Error::Bindings(_))
    ));
    assert!(matches!(
        exp(&Context::new(), "a", &[Value::Integer(1), Value::Integer(2)]),
        Err(Error::Bindings(_))
    ));
}
