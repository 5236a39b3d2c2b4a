//! Arithmetic builtins. The evaluator routes `+ - * / // % **` here as well.
//!
//! Mixed int/float operands go through `Decimal` so that `3 * 1.1` is `3.3`
//! rather than `3.3000000000000003`; the plain float operation is the
//! fallback when a value has no decimal representation.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use super::{Registry, expect_arity, float_to_int, number_arg};
use crate::{context::Context, evaluator::EvalError, value::Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register("add", add);
    registry.register("sub", sub);
    registry.register("mul", mul);
    registry.register("div", div);
    registry.register("divint", divint);
    registry.register("mod", modulo);
    registry.register("exp", power);
    registry.register("pow", power);
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(n) => Decimal::from_i64(*n),
        Value::Float(n) => Decimal::from_f64(*n),
        _ => None,
    }
}

/// One arithmetic operator, described by how it acts on each operand family.
struct Numeric {
    name: &'static str,
    symbol: &'static str,
    int: fn(i64, i64) -> Result<i64, EvalError>,
    decimal: fn(Decimal, Decimal) -> Option<Decimal>,
    float: fn(f64, f64) -> f64,
}

impl Numeric {
    fn apply(&self, args: &[Value]) -> Result<Value, EvalError> {
        expect_arity(self.name, args, 2)?;
        let (left, right) = (&args[0], &args[1]);
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => (self.int)(*a, *b).map(Value::Integer),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float((self.float)(*a, *b))),
            (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
                Ok(Value::Float(self.mixed(left, right)))
            }
            _ => Err(EvalError::TypeMismatch {
                left: left.type_name(),
                op: self.symbol.to_string(),
                right: right.type_name(),
            }),
        }
    }

    fn mixed(&self, left: &Value, right: &Value) -> f64 {
        if let Some(a) = to_decimal(left)
            && let Some(b) = to_decimal(right)
            && let Some(r) = (self.decimal)(a, b)
            && let Some(r) = r.to_f64()
        {
            return r;
        }
        // Both operands are numbers here
        let a = left.as_float().unwrap_or(f64::NAN);
        let b = right.as_float().unwrap_or(f64::NAN);
        (self.float)(a, b)
    }
}

fn overflow(name: &str) -> EvalError {
    EvalError::IntegerOverflow(name.to_string())
}

/// `+`: numbers, or two strings concatenated.
pub fn add(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    if let [Value::String(a), Value::String(b)] = args {
        return Ok(Value::String(format!("{a}{b}")));
    }
    Numeric {
        name: "add",
        symbol: "+",
        int: |a, b| a.checked_add(b).ok_or_else(|| overflow("add")),
        decimal: Decimal::checked_add,
        float: |a, b| a + b,
    }
    .apply(args)
}

pub fn sub(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    Numeric {
        name: "sub",
        symbol: "-",
        int: |a, b| a.checked_sub(b).ok_or_else(|| overflow("sub")),
        decimal: Decimal::checked_sub,
        float: |a, b| a - b,
    }
    .apply(args)
}

pub fn mul(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    Numeric {
        name: "mul",
        symbol: "*",
        int: |a, b| a.checked_mul(b).ok_or_else(|| overflow("mul")),
        decimal: Decimal::checked_mul,
        float: |a, b| a * b,
    }
    .apply(args)
}

fn int_div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    a.checked_div(b).ok_or_else(|| overflow("div"))
}

/// `/`: two ints divide with truncation; any float operand gives a float.
pub fn div(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    Numeric {
        name: "div",
        symbol: "/",
        int: int_div,
        decimal: Decimal::checked_div,
        float: |a, b| a / b,
    }
    .apply(args)
}

/// `//`: both operands truncated to int, then integer division.
pub fn divint(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("divint", args, 2)?;
    let truncate = |value: &Value| match value {
        Value::Integer(n) => Ok(*n),
        Value::Float(n) => float_to_int("divint", n.trunc()),
        _ => Err(EvalError::TypeMismatch {
            left: args[0].type_name(),
            op: "//".to_string(),
            right: args[1].type_name(),
        }),
    };
    let a = truncate(&args[0])?;
    let b = truncate(&args[1])?;
    int_div(a, b).map(Value::Integer)
}

/// `%`: remainder with the sign of the dividend.
pub fn modulo(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    Numeric {
        name: "mod",
        symbol: "%",
        int: |a, b| {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_rem(b).ok_or_else(|| overflow("mod"))
        },
        decimal: Decimal::checked_rem,
        float: |a, b| a % b,
    }
    .apply(args)
}

/// `**` / `^`: always a float, whatever the operand kinds.
pub fn power(_ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_arity("exp", args, 2)?;
    match (&args[0], &args[1]) {
        (a, b) if a.is_number() && b.is_number() => {
            let base = number_arg("exp", a)?;
            let exponent = number_arg("exp", b)?;
            Ok(Value::Float(base.powf(exponent)))
        }
        (a, b) => Err(EvalError::TypeMismatch {
            left: a.type_name(),
            op: "**".to_string(),
            right: b.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Builtin = fn(&Context, &[Value]) -> Result<Value, EvalError>;

    fn call(f: Builtin, a: Value, b: Value) -> Result<Value, EvalError> {
        f(&Context::new(), &[a, b])
    }

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    fn float(n: f64) -> Value {
        Value::Float(n)
    }

    #[test]
    fn test_int_division_truncates() {
        assert_eq!(call(div, int(7), int(2)), Ok(int(3)));
        assert_eq!(call(div, int(-7), int(2)), Ok(int(-3)));
        assert_eq!(call(div, int(7), float(2.0)), Ok(float(3.5)));
    }

    #[test]
    fn test_divint_truncates_floats() {
        assert_eq!(call(divint, float(7.9), int(2)), Ok(int(3)));
        assert_eq!(call(divint, int(1), float(0.5)), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_mixed_uses_decimal() {
        assert_eq!(call(mul, int(3), float(1.1)), Ok(float(3.3)));
        assert_eq!(call(add, float(0.1), int(2)), Ok(float(2.1)));
    }

    #[test]
    fn test_overflow_and_zero() {
        assert_eq!(
            call(add, int(i64::MAX), int(1)),
            Err(EvalError::IntegerOverflow("add".into()))
        );
        assert_eq!(call(modulo, int(5), int(0)), Err(EvalError::DivisionByZero));
        assert_eq!(call(div, float(1.0), float(0.0)), Ok(float(f64::INFINITY)));
    }

    #[test]
    fn test_power_is_float() {
        assert_eq!(call(power, int(2), int(10)), Ok(float(1024.0)));
    }

    #[test]
    fn test_unsupported_pair() {
        let err = call(sub, Value::from("a"), int(1)).unwrap_err();
        assert_eq!(err.to_string(), "Type error: cannot apply '-' to string and int");
    }
}
