//! Array builtins, including the combinators that re-enter the evaluator.
//!
//! `filter` and `map` take their per-element expression as source text and
//! run the full lex/parse/evaluate pipeline on it once per element. Each run
//! gets a context holding *only* the loop bindings (`x` for `filter`; `_i`
//! and `_x` for `map`); outer variables are not visible inside.

use std::{cmp::Ordering, collections::HashMap};

use log::debug;

use super::{
    Registry, array_arg, expect_arity, expect_arity_between, expect_min_arity, int_arg,
    invalid_argument, string_arg,
};
use crate::{context::Context, evaluator::EvalError, pipeline, value::Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register("filter", filter);
    registry.register("map", map);
    registry.register("reduce", reduce);
    registry.register("concat", concat);
    registry.register("reverse", reverse);
    registry.register("sort", sort);
    registry.register("unique", unique);
    registry.register("slice", slice);
    registry.register("len", len);
}

/// Evaluate `source` against a fresh context holding only `bindings`.
fn reenter(ctx: &Context, source: &str, bindings: HashMap<String, Value>) -> Result<Value, EvalError> {
    let inner = ctx.nested(bindings)?;
    debug!("re-entering at depth {}: {source}", inner.depth());
    pipeline::evaluate(&inner, source).map_err(|err| EvalError::SubExpression {
        expression: source.to_string(),
        source: Box::new(err),
    })
}

/// `filter(array, expr)`: keep the elements for which `expr` is `true`.
pub fn filter(ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("filter", args, 2)?;
    let items = array_arg("filter", &args[0])?;
    let source = string_arg("filter", &args[1])?;

    let mut kept = Vec::new();
    for item in items {
        let bindings = HashMap::from([("x".to_string(), item.clone())]);
        if reenter(ctx, source, bindings)? == Value::Boolean(true) {
            kept.push(item.clone());
        }
    }
    Ok(Value::Array(kept))
}

/// `map(array, expr)`: evaluate `expr` per element with `_i` (index) and
/// `_x` (element) bound.
pub fn map(ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("map", args, 2)?;
    let items = array_arg("map", &args[0])?;
    let source = string_arg("map", &args[1])?;

    let mut mapped = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let bindings = HashMap::from([
            ("_i".to_string(), Value::Integer(index as i64)),
            ("_x".to_string(), item.clone()),
        ]);
        mapped.push(reenter(ctx, source, bindings)?);
    }
    Ok(Value::Array(mapped))
}

/// `reduce(array, fn, [init])`: left fold. `fn` is a registry name or a
/// function value; without `init` the first element seeds the fold.
pub fn reduce(ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity_between("reduce", args, 2, 3)?;
    let items = array_arg("reduce", &args[0])?;

    let func = match &args[1] {
        Value::String(name) => ctx
            .registry()
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?,
        Value::Function(func) => func.clone(),
        other => {
            return Err(EvalError::ArgumentType {
                function: "reduce".into(),
                expected: "a function name or function",
                found: other.type_name(),
            });
        }
    };

    let (mut acc, rest) = match args.get(2) {
        Some(init) => (init.clone(), items),
        None => match items.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => return Err(invalid_argument("reduce", "empty array without an initial value")),
        },
    };

    for item in rest {
        acc = func.call(ctx, &[acc, item.clone()])?;
    }
    Ok(acc)
}

/// `concat(a, b, ...)`: all strings join into a string, all arrays into an array.
pub fn concat(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_min_arity("concat", args, 2)?;
    match &args[0] {
        Value::String(_) => {
            let mut out = String::new();
            for arg in args {
                out.push_str(string_arg("concat", arg)?);
            }
            Ok(Value::String(out))
        }
        Value::Array(_) => {
            let mut out = Vec::new();
            for arg in args {
                out.extend_from_slice(array_arg("concat", arg)?);
            }
            Ok(Value::Array(out))
        }
        other => Err(EvalError::ArgumentType {
            function: "concat".into(),
            expected: "string or array",
            found: other.type_name(),
        }),
    }
}

pub fn reverse(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("reverse", args, 1)?;
    match &args[0] {
        Value::String(s) => Ok(Value::String(s.chars().rev().collect())),
        Value::Array(items) => Ok(Value::Array(items.iter().rev().cloned().collect())),
        other => Err(EvalError::ArgumentType {
            function: "reverse".into(),
            expected: "string or array",
            found: other.type_name(),
        }),
    }
}

/// `sort(array)`: ascending. The first element decides the kind (int, float
/// or string) and every other element must match it.
pub fn sort(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("sort", args, 1)?;
    let items = array_arg("sort", &args[0])?;
    let Some(first) = items.first() else {
        return Ok(Value::Array(Vec::new()));
    };

    let expected = match first {
        Value::Integer(_) => "an int",
        Value::Float(_) => "a float",
        Value::String(_) => "a string",
        other => {
            return Err(EvalError::ArgumentType {
                function: "sort".into(),
                expected: "int, float or string elements",
                found: other.type_name(),
            });
        }
    };
    if let Some(odd) = items.iter().find(|v| v.type_name() != first.type_name()) {
        return Err(EvalError::ArgumentType {
            function: "sort".into(),
            expected,
            found: odd.type_name(),
        });
    }

    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => Ordering::Equal,
    });
    Ok(Value::Array(sorted))
}

/// `unique(array)`: first occurrence of each value, order preserved.
pub fn unique(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("unique", args, 1)?;
    let items = array_arg("unique", &args[0])?;

    let mut result = Vec::new();
    for item in items {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    Ok(Value::Array(result))
}

/// `slice(array, start, end)`: elements `start..end`.
pub fn slice(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("slice", args, 3)?;
    let items = array_arg("slice", &args[0])?;
    let start = int_arg("slice", &args[1])?;
    let end = int_arg("slice", &args[2])?;

    let range = usize::try_from(start)
        .ok()
        .zip(usize::try_from(end).ok())
        .filter(|(s, e)| s <= e && *e <= items.len());
    match range {
        Some((s, e)) => Ok(Value::Array(items[s..e].to_vec())),
        None => Err(invalid_argument(
            "slice",
            format!("range {start}..{end} out of bounds for length {}", items.len()),
        )),
    }
}

/// `len(x)`: characters in a string or elements in an array.
pub fn len(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("len", args, 1)?;
    let n = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        other => {
            return Err(EvalError::ArgumentType {
                function: "len".into(),
                expected: "string or array",
                found: other.type_name(),
            });
        }
    };
    Ok(Value::Integer(n as i64))
}
