use std::f64::consts::PI;

use super::{Registry, expect_arity, float_to_int, number_arg};
use crate::{evaluator::EvalError, value::Value};

fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// `n`th root of `x`.
fn root(x: f64, n: f64) -> f64 {
    x.powf(1.0 / n)
}

/// Logarithm of `x` in `base`.
fn log(x: f64, base: f64) -> f64 {
    x.ln() / base.ln()
}

/// Float functions of one number. Ints are promoted.
const UNARY: &[(&str, fn(f64) -> f64)] = &[
    ("sqrt", f64::sqrt),
    ("log10", f64::log10),
    ("log2", f64::log2),
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
    ("sinh", f64::sinh),
    ("cosh", f64::cosh),
    ("tanh", f64::tanh),
    ("deg2rad", deg2rad),
    ("rad2deg", rad2deg),
];

/// Float functions of two numbers.
const BINARY: &[(&str, fn(f64, f64) -> f64)] = &[
    ("root", root),
    ("hypot", f64::hypot),
    ("log", log),
];

/// Rounding functions: an int passes through, a float is rounded to an int.
const ROUNDING: &[(&str, fn(f64) -> f64)] = &[
    ("ceil", f64::ceil),
    ("floor", f64::floor),
    ("round", f64::round),
];

pub(crate) fn register(registry: &mut Registry) {
    for &(name, f) in UNARY {
        registry.register(name, move |_, args| {
            expect_arity(name, args, 1)?;
            Ok(Value::Float(f(number_arg(name, &args[0])?)))
        });
    }

    for &(name, f) in BINARY {
        registry.register(name, move |_, args| {
            expect_arity(name, args, 2)?;
            let a = number_arg(name, &args[0])?;
            let b = number_arg(name, &args[1])?;
            Ok(Value::Float(f(a, b)))
        });
    }

    for &(name, f) in ROUNDING {
        registry.register(name, move |_, args| {
            expect_arity(name, args, 1)?;
            match &args[0] {
                Value::Integer(n) => Ok(Value::Integer(*n)),
                other => float_to_int(name, f(number_arg(name, other)?)).map(Value::Integer),
            }
        });
    }

    registry.register("abs", |_, args| {
        expect_arity("abs", args, 1)?;
        match &args[0] {
            Value::Integer(n) => n
                .checked_abs()
                .map(Value::Integer)
                .ok_or_else(|| EvalError::IntegerOverflow("abs".into())),
            other => Ok(Value::Float(number_arg("abs", other)?.abs())),
        }
    });

    registry.register("double", |_, args| {
        expect_arity("double", args, 1)?;
        match &args[0] {
            Value::Integer(n) => n
                .checked_mul(2)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::IntegerOverflow("double".into())),
            other => Ok(Value::Float(number_arg("double", other)? * 2.0)),
        }
    });
}
