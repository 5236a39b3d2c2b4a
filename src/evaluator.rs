use thiserror::Error;

use crate::{
    ast::{ArrayType, BinOp, Expr, LogicalOp},
    builtins::arith,
    context::Context,
    pipeline,
    value::Value,
};

/// Errors that can occur while evaluating an expression.
///
/// The first failing sub-evaluation aborts the whole evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Variable path absent from the context
    #[error("Undefined variable: {0} is not defined")]
    UndefinedVariable(String),

    /// No builtin registered under this name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments to a builtin
    #[error("Arity error: {function}() expects {expected}, got {found}")]
    Arity {
        function: String,
        expected: String,
        found: usize,
    },

    /// Argument of the wrong kind
    #[error("Type error: {function}() expects {expected} argument, got {found}")]
    ArgumentType {
        function: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Argument of the right kind but an unusable value
    #[error("Invalid argument to {function}(): {message}")]
    InvalidArgument { function: String, message: String },

    /// Operator applied to an unsupported pair of operand kinds
    #[error("Type error: cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        left: &'static str,
        op: String,
        right: &'static str,
    },

    /// Logical operator with a non-boolean operand
    #[error("Type error: operands of '{op}' must be bool, got {left} and {right}")]
    NonBooleanOperand {
        op: LogicalOp,
        left: &'static str,
        right: &'static str,
    },

    /// Boolean evaluation produced something else
    #[error("Type error: expression produced {0}, expected bool")]
    NonBooleanResult(&'static str),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow in '{0}'")]
    IntegerOverflow(String),

    /// Element that does not match an array literal's declared type
    #[error("Type error: {array}[...] element {index} is {found}")]
    ArrayElementType {
        array: ArrayType,
        index: usize,
        found: &'static str,
    },

    /// Too many nested `map`/`filter` re-entries
    #[error("Nesting limit of {0} exceeded")]
    NestingLimit(usize),

    /// Failure of a per-element expression inside `map`/`filter`
    #[error("error evaluating expression '{expression}': {source}")]
    SubExpression {
        expression: String,
        source: Box<pipeline::Error>,
    },

    /// Error reported by the completion service
    #[error("Completion error: {0}")]
    Completion(String),
}

/// Tree-walking evaluator.
///
/// Holds only a borrowed context; evaluation never mutates it.
pub struct Evaluator<'a> {
    ctx: &'a Context,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Evaluator { ctx }
    }

    /// Evaluates a parsed expression against the evaluator's context.
    ///
    /// # Examples
    ///
    /// ```
    /// use anise_lang::{Context, Evaluator, Value, parser::parse};
    ///
    /// let ctx = Context::new();
    /// let expr = parse("2 + 3 * 4").unwrap();
    ///
    /// let result = Evaluator::new(&ctx).evaluate(&expr).unwrap();
    /// assert_eq!(result, Value::Integer(14));
    /// ```
    pub fn evaluate(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Variable(name) => self
                .ctx
                .lookup(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expr::BinaryOp { op, left, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                self.apply_binop(op, left_val, right_val)
            }
            Expr::LogicalOp { op, left, right } => {
                // No short-circuit: the right side is evaluated (and may fail)
                // whatever the left side produced.
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                apply_logical(*op, &left_val, &right_val)
            }
            Expr::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.ctx.registry().call(self.ctx, name, &values)
            }
            Expr::Array {
                element_type,
                elements,
            } => {
                let mut items = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    let value = self.evaluate(element)?;
                    items.push(check_element(*element_type, index, value)?);
                }
                Ok(Value::Array(items))
            }
        }
    }

    fn apply_binop(&self, op: &BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
        let args = [left, right];
        match op {
            BinOp::Add => arith::add(self.ctx, &args),
            BinOp::Subtract => arith::sub(self.ctx, &args),
            BinOp::Multiply => arith::mul(self.ctx, &args),
            BinOp::Divide => arith::div(self.ctx, &args),
            BinOp::DivideInt => arith::divint(self.ctx, &args),
            BinOp::Modulo => arith::modulo(self.ctx, &args),
            BinOp::Power => arith::power(self.ctx, &args),
            BinOp::ShiftLeft | BinOp::ShiftRight => {
                let [left, right] = &args;
                apply_shift(op, left, right)
            }
            BinOp::Apply(name) => Err(EvalError::UnsupportedOperator(format!(
                "function name '{name}' in operator position"
            ))),
            _ => {
                let [left, right] = &args;
                compare(op, left, right).map(Value::Boolean)
            }
        }
    }
}

fn apply_logical(op: LogicalOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(match op {
            LogicalOp::And => *a && *b,
            LogicalOp::Or => *a || *b,
        })),
        _ => Err(EvalError::NonBooleanOperand {
            op,
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

fn apply_shift(op: &BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
        return Err(EvalError::TypeMismatch {
            left: left.type_name(),
            op: op.to_string(),
            right: right.type_name(),
        });
    };

    let shifted = u32::try_from(*b).ok().and_then(|amount| match op {
        BinOp::ShiftLeft => a.checked_shl(amount),
        _ => a.checked_shr(amount),
    });
    shifted
        .map(Value::Integer)
        .ok_or_else(|| EvalError::IntegerOverflow(op.to_string()))
}

/// Apply a comparison operator to two values of one ordered kind.
fn ordered<T: PartialOrd>(op: &BinOp, a: T, b: T) -> bool {
    match op {
        BinOp::Equal => a == b,
        BinOp::NotEqual => a != b,
        BinOp::LessThan => a < b,
        BinOp::LessEqual => a <= b,
        BinOp::GreaterThan => a > b,
        _ => a >= b,
    }
}

/// Comparison over strings, numbers (int promoted against float) and
/// timestamps. Any other pairing is a type mismatch.
pub fn compare(op: &BinOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    if !op.is_comparison() {
        return Err(EvalError::UnsupportedOperator(op.to_string()));
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(ordered(op, a, b)),
        (Value::Integer(a), Value::Integer(b)) => Ok(ordered(op, a, b)),
        (Value::Float(a), Value::Float(b)) => Ok(ordered(op, a, b)),
        (Value::Integer(a), Value::Float(b)) => Ok(ordered(op, *a as f64, *b)),
        (Value::Float(a), Value::Integer(b)) => Ok(ordered(op, *a, *b as f64)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Ok(ordered(op, a, b)),
        _ => Err(EvalError::TypeMismatch {
            left: left.type_name(),
            op: op.to_string(),
            right: right.type_name(),
        }),
    }
}

fn check_element(element_type: ArrayType, index: usize, value: Value) -> Result<Value, EvalError> {
    let ok = match (element_type, &value) {
        (ArrayType::Any, _) => true,
        (ArrayType::Int, Value::Integer(_)) => true,
        (ArrayType::Float, Value::Float(_)) => true,
        (ArrayType::Float, Value::Integer(n)) => return Ok(Value::Float(*n as f64)),
        (ArrayType::String, Value::String(_)) => true,
        (ArrayType::Time, Value::Timestamp(_)) => true,
        _ => false,
    };

    if ok {
        Ok(value)
    } else {
        Err(EvalError::ArrayElementType {
            array: element_type,
            index,
            found: value.type_name(),
        })
    }
}
