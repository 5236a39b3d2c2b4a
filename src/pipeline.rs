//! Source text in, value (or template text) out.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::{
    context::Context,
    evaluator::{EvalError, Evaluator},
    parser::{self, ParseError},
    template,
    value::Value,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Malformed flat key/value list passed to [`exp`]
    #[error("Bindings error: {0}")]
    Bindings(String),
}

/// Lex, parse and evaluate `source` against `ctx`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use anise_lang::{Context, Value, pipeline};
///
/// let ctx = Context::new().bind_variables(HashMap::from([
///     ("price".to_string(), Value::Integer(40)),
/// ]));
/// assert_eq!(pipeline::evaluate(&ctx, "price * 2").unwrap(), Value::Integer(80));
/// ```
pub fn evaluate(ctx: &Context, source: &str) -> Result<Value, Error> {
    let expr = parser::parse(source)?;
    debug!("parsed '{source}' as {expr:?}");
    Ok(Evaluator::new(ctx).evaluate(&expr)?)
}

/// Like [`evaluate`], but the result must be a boolean.
pub fn evaluate_bool(ctx: &Context, source: &str) -> Result<bool, Error> {
    match evaluate(ctx, source)? {
        Value::Boolean(b) => Ok(b),
        other => Err(EvalError::NonBooleanResult(other.type_name()).into()),
    }
}

/// New context whose variables are exactly `variables`.
pub fn bind_variables(ctx: &Context, variables: HashMap<String, Value>) -> Context {
    ctx.bind_variables(variables)
}

/// Parse `source` and render it as template-engine condition syntax.
pub fn render_template(source: &str) -> Result<String, ParseError> {
    let expr = parser::parse(source)?;
    Ok(template::render(&expr))
}

/// Evaluate the condition `source` with variables given as a flat
/// `key, value, key, value` list, for use from inside a template.
///
/// The pairs replace whatever variables `ctx` holds; its registry and
/// nesting limit carry over. The result must be a boolean.
pub fn exp(ctx: &Context, source: &str, pairs: &[Value]) -> Result<bool, Error> {
    if pairs.len() % 2 != 0 {
        return Err(Error::Bindings(format!(
            "expected key/value pairs, got {} values",
            pairs.len()
        )));
    }

    let mut variables = HashMap::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks_exact(2) {
        let Value::String(key) = &pair[0] else {
            return Err(Error::Bindings(format!(
                "keys must be strings, got {}",
                pair[0].type_name()
            )));
        };
        variables.insert(key.clone(), pair[1].clone());
    }

    evaluate_bool(&ctx.bind_variables(variables), source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_bool_rejects_numbers() {
        let err = evaluate_bool(&Context::new(), "1 + 1").unwrap_err();
        assert_eq!(err, Error::Eval(EvalError::NonBooleanResult("int")));
    }

    #[test]
    fn test_exp_pairs() {
        let pairs = ["foo".into(), Value::Integer(5), "bar".into(), Value::Integer(2)];
        assert_eq!(exp(&Context::new(), "foo == 5", &pairs), Ok(true));
        assert_eq!(exp(&Context::new(), "foo < bar", &pairs), Ok(false));
    }

    #[test]
    fn test_exp_requires_boolean() {
        let pairs = ["a".into(), Value::Integer(1), "b".into(), Value::Integer(2)];
        assert_eq!(
            exp(&Context::new(), "a + b", &pairs),
            Err(Error::Eval(EvalError::NonBooleanResult("int")))
        );
    }

    #[test]
    fn test_exp_odd_count() {
        assert!(matches!(exp(&Context::new(), "a", &["a".into()]), Err(Error::Bindings(_))));
    }

    #[test]
    fn test_exp_non_string_key() {
        let err = exp(&Context::new(), "a", &[Value::Integer(1), Value::Integer(2)]).unwrap_err();
        assert_eq!(err, Error::Bindings("keys must be strings, got int".into()));
    }
}
