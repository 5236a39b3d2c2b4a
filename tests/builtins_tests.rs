// tests/builtins_tests.rs

use std::collections::HashMap;
use std::sync::Arc;

use anise_lang::{Context, Error, EvalError, NativeFunction, Registry, Value, evaluate};

fn eval(source: &str) -> Result<Value, Error> {
    evaluate(&Context::new(), source)
}

fn ok(source: &str) -> Value {
    match eval(source) {
        Ok(value) => value,
        Err(err) => panic!("{source:?} failed: {err}"),
    }
}

fn eval_err(source: &str) -> EvalError {
    match eval(source) {
        Err(Error::Eval(err)) => err,
        other => panic!("expected evaluation error for {source:?}, got {other:?}"),
    }
}

fn ints(values: &[i64]) -> Value {
    Value::Array(values.iter().copied().map(Value::Integer).collect())
}

fn strings(values: &[&str]) -> Value {
    Value::Array(values.iter().map(|s| Value::String(s.to_string())).collect())
}

fn assert_close(value: Value, expected: f64) {
    match value {
        Value::Float(f) => assert!((f - expected).abs() < 1e-9, "{f} != {expected}"),
        other => panic!("expected float near {expected}, got {other:?}"),
    }
}

// ============================================================================
// Combinators
// ============================================================================

#[test]
fn test_filter() {
    assert_eq!(ok(r#"filter(int[1, 2, 3, 4], "x > 2")"#), ints(&[3, 4]));
    assert_eq!(ok(r#"filter(int[], "x > 2")"#), ints(&[]));
}

#[test]
fn test_filter_keeps_only_true() {
    // Non-boolean results drop the element rather than failing
    assert_eq!(ok(r#"filter(int[1, 2], "x")"#), ints(&[]));
}

#[test]
fn test_map() {
    assert_eq!(ok(r#"map(int[1, 2, 3], "_x * 2")"#), ints(&[2, 4, 6]));
    assert_eq!(ok(r#"map(string["a", "b"], "_i")"#), ints(&[0, 1]));
}

#[test]
fn test_map_error_names_expression() {
    let err = eval_err(r#"map(int[1], "_x +")"#);
    assert!(matches!(err, EvalError::SubExpression { ref expression, .. } if expression == "_x +"));
    assert!(err.to_string().contains("Parse error"));
}

#[test]
fn test_reduce() {
    assert_eq!(ok(r#"reduce(int[1, 2, 3], "add")"#), Value::Integer(6));
    assert_eq!(ok(r#"reduce(int[1, 2, 3], "mul", 10)"#), Value::Integer(60));
    assert_eq!(ok(r#"reduce(int[], "add", 7)"#), Value::Integer(7));
}

#[test]
fn test_reduce_errors() {
    assert!(matches!(
        eval_err(r#"reduce(int[], "add")"#),
        EvalError::InvalidArgument { .. }
    ));
    assert_eq!(
        eval_err(r#"reduce(int[1, 2], "nope")"#),
        EvalError::UnknownFunction("nope".to_string())
    );
}

#[test]
fn test_reduce_with_function_value() {
    let longest = NativeFunction::new("longest", |_ctx: &Context, args: &[Value]| {
        let [Value::String(a), Value::String(b)] = args else {
            return Ok(Value::Boolean(false));
        };
        Ok(Value::String(if b.len() > a.len() { b.clone() } else { a.clone() }))
    });
    let ctx = Context::new().bind_variables(HashMap::from([
        ("pick".to_string(), Value::Function(longest)),
        ("words".to_string(), strings(&["to", "three", "four"])),
    ]));

    assert_eq!(
        evaluate(&ctx, "reduce(words, pick)").unwrap(),
        Value::String("three".into())
    );
}

#[test]
fn test_nesting_limit() {
    let ctx = Context::new().with_max_depth(1);
    assert_eq!(
        evaluate(&ctx, r#"map(int[1], "_x + 1")"#).unwrap(),
        ints(&[2])
    );

    let err = evaluate(&ctx, r#"map(int[1], "map(int[1], '_x')")"#).unwrap_err();
    let Error::Eval(EvalError::SubExpression { source, .. }) = &err else {
        panic!("expected sub-expression failure, got {err:?}");
    };
    assert_eq!(**source, Error::Eval(EvalError::NestingLimit(1)));
}

#[test]
fn test_nested_combinators_within_limit() {
    assert_eq!(
        ok(r#"map(int[1, 2], "len(filter(int[1, 2, 3], 'x > 1'))")"#),
        ints(&[2, 2])
    );
}

// ============================================================================
// Structural array functions
// ============================================================================

#[test]
fn test_len() {
    assert_eq!(ok(r#"len("héllo")"#), Value::Integer(5));
    assert_eq!(ok("len(int[1, 2, 3])"), Value::Integer(3));
    assert!(matches!(eval_err("len(5)"), EvalError::ArgumentType { .. }));
}

#[test]
fn test_concat() {
    assert_eq!(ok(r#"concat("a", "b", "c")"#), Value::String("abc".into()));
    assert_eq!(ok("concat(int[1], int[2, 3])"), ints(&[1, 2, 3]));
    assert!(matches!(eval_err(r#"concat("a", int[1])"#), EvalError::ArgumentType { .. }));
}

#[test]
fn test_reverse_sort_unique() {
    assert_eq!(ok("reverse(int[1, 2, 3])"), ints(&[3, 2, 1]));
    assert_eq!(ok(r#"reverse("abc")"#), Value::String("cba".into()));
    assert_eq!(ok("sort(int[3, 1, 2])"), ints(&[1, 2, 3]));
    assert_eq!(ok(r#"sort(string["b", "a"])"#), strings(&["a", "b"]));
    assert_eq!(ok("sort(int[])"), ints(&[]));
    assert_eq!(ok("unique(int[1, 2, 1, 3, 2])"), ints(&[1, 2, 3]));
}

#[test]
fn test_sort_mixed_kinds_rejected() {
    assert!(matches!(eval_err(r#"sort(any[1, "a"])"#), EvalError::ArgumentType { .. }));
}

#[test]
fn test_slice() {
    assert_eq!(ok("slice(int[1, 2, 3, 4], 1, 3)"), ints(&[2, 3]));
    assert!(matches!(
        eval_err("slice(int[1, 2], 1, 5)"),
        EvalError::InvalidArgument { .. }
    ));
}

// ============================================================================
// Math
// ============================================================================

#[test]
fn test_math_functions() {
    assert_eq!(ok("sqrt(16)"), Value::Float(4.0));
    assert_eq!(ok("abs(-3)"), Value::Integer(3));
    assert_eq!(ok("abs(-2.5)"), Value::Float(2.5));
    assert_eq!(ok("double(21)"), Value::Integer(42));
    assert_eq!(ok("hypot(3, 4)"), Value::Float(5.0));
    assert_close(ok("log(8, 2)"), 3.0);
    assert_close(ok("log10(1000)"), 3.0);
    assert_close(ok("rad2deg(deg2rad(90))"), 90.0);
}

#[test]
fn test_rounding_returns_int() {
    assert_eq!(ok("ceil(1.2)"), Value::Integer(2));
    assert_eq!(ok("floor(1.8)"), Value::Integer(1));
    assert_eq!(ok("round(2.5)"), Value::Integer(3));
    assert_eq!(ok("round(7)"), Value::Integer(7));
}

#[test]
fn test_math_type_errors() {
    assert!(matches!(eval_err(r#"sqrt("x")"#), EvalError::ArgumentType { .. }));
    assert!(matches!(eval_err("sqrt(1, 2)"), EvalError::Arity { .. }));
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_statistics() {
    assert_eq!(ok("mean(1, 2, 3)"), Value::Float(2.0));
    assert_eq!(ok("mean(int[1, 2, 3])"), Value::Float(2.0));
    assert_eq!(ok("median(3, 1, 2, 10)"), Value::Float(2.5));
    assert_eq!(ok("mode(1, 2, 2, 3, 3)"), Value::Float(2.0));
    assert_eq!(ok("variance(2, 4, 4, 4, 5, 5, 7, 9)"), Value::Float(32.0 / 7.0));
    assert_eq!(ok("stddev(2, 4, 4, 4, 5, 5, 7, 9)"), Value::Float(2.0));
}

#[test]
fn test_extremes_and_sum_keep_ints() {
    assert_eq!(ok("max(1, 5, 3)"), Value::Integer(5));
    assert_eq!(ok("min(int[4, 2], 3)"), Value::Integer(2));
    assert_eq!(ok("max(1, 2.5)"), Value::Float(2.5));
    assert_eq!(ok("sum(1, 2, 3)"), Value::Integer(6));
    assert_eq!(ok("sum(1, 2.5)"), Value::Float(3.5));
}

#[test]
fn test_statistics_errors() {
    assert!(matches!(eval_err("mean()"), EvalError::Arity { .. }));
    assert!(matches!(eval_err("variance(1)"), EvalError::InvalidArgument { .. }));
    assert!(matches!(eval_err(r#"sum(1, "2")"#), EvalError::ArgumentType { .. }));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_functions() {
    assert_eq!(ok(r#"upper("abc")"#), Value::String("ABC".into()));
    assert_eq!(ok(r#"lower("ABC")"#), Value::String("abc".into()));
    assert_eq!(ok(r#"trim("  x  ")"#), Value::String("x".into()));
    assert_eq!(ok(r#"contains("haystack", "st")"#), Value::Boolean(true));
    assert_eq!(ok(r#"contains(int[1, 2], 2)"#), Value::Boolean(true));
    assert_eq!(ok(r#"startswith("anise", "an")"#), Value::Boolean(true));
    assert_eq!(ok(r#"endswith("anise", "an")"#), Value::Boolean(false));
    assert_eq!(ok(r#"split("a,b", ",")"#), strings(&["a", "b"]));
    assert_eq!(ok(r#"split("ab", "")"#), strings(&["a", "b"]));
}

#[test]
fn test_matches() {
    assert_eq!(ok(r#"matches("abc123", "^[a-z]+[0-9]+$")"#), Value::Boolean(true));
    assert!(matches!(
        eval_err(r#"matches("x", "(")"#),
        EvalError::InvalidArgument { .. }
    ));
}

// ============================================================================
// Dates and times
// ============================================================================

#[test]
fn test_date_parsing() {
    assert_eq!(
        ok(r#"date("2024-03-01")"#).to_string(),
        "2024-03-01 00:00:00"
    );
    assert_eq!(ok(r#"time("13:45:00")"#).to_string(), "1970-01-01 13:45:00");
    assert!(matches!(
        eval_err(r#"date("01/03/2024")"#),
        EvalError::InvalidArgument { .. }
    ));
}

#[test]
fn test_date_differences() {
    assert_eq!(
        ok(r#"diffdate(date("2024-03-01"), date("2024-02-01"))"#),
        Value::Integer(29)
    );
    assert_eq!(
        ok(r#"difftime(time("10:00:00"), time("10:01:30"))"#),
        Value::Integer(90)
    );
}

// ============================================================================
// Random and completions
// ============================================================================

#[test]
fn test_rand_and_shuffle() {
    match ok(r#"rand("int", 10)"#) {
        Value::Integer(n) => assert!((0..10).contains(&n)),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        eval_err(r#"rand("complex")"#),
        EvalError::InvalidArgument { .. }
    ));

    let Value::Array(mut shuffled) = ok("shuffle(int[3, 1, 2])") else {
        panic!("expected array");
    };
    shuffled.sort_by_key(|v| v.as_int());
    assert_eq!(Value::Array(shuffled), ints(&[1, 2, 3]));
}

#[test]
fn test_ai_without_service() {
    assert_eq!(
        eval_err(r#"ai("gpt", "hello")"#),
        EvalError::Completion("no completion service configured".to_string())
    );
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_extension() {
    let mut registry = Registry::standard();
    registry.register("triple", |_ctx, args| match args {
        [Value::Integer(n)] => Ok(Value::Integer(n * 3)),
        _ => Ok(Value::Boolean(false)),
    });
    let ctx = Context::with_registry(Arc::new(registry));

    assert_eq!(evaluate(&ctx, "triple(sqrt(4) // 1)").unwrap(), Value::Integer(6));
    assert!(eval("triple(1)").is_err());
}

#[test]
fn test_standard_names() {
    let registry = Registry::standard();
    for name in ["add", "exp", "pow", "filter", "map", "reduce", "mean", "date", "ai", "rand"] {
        assert!(registry.contains(name), "missing {name}");
    }
    let names = registry.names();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}
