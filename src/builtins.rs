//! Name-keyed table of host functions.
//!
//! Every explicit call `name(args)` is dispatched through a [`Registry`], and
//! the arithmetic operators call the same functions directly, so `a + b` and
//! `add(a, b)` cannot disagree.
//!
//! A registry is an ordinary value. [`Registry::standard`] builds the full
//! builtin table; [`Registry::shared_standard`] hands out one process-wide
//! copy of it. Registration takes `&mut self`, so extending a registry that
//! evaluations already share means building a new one and handing out a new
//! `Arc`; contexts created earlier keep the table they started with.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock},
};

use chrono::NaiveDateTime;
use log::trace;

use crate::{
    completion::CompletionService,
    context::Context,
    evaluator::EvalError,
    value::{NativeFunction, Value},
};

pub mod ai;
pub mod arith;
pub mod array;
pub mod datetime;
pub mod math;
pub mod random;
pub mod stats;
pub mod string;

static STANDARD: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::standard()));

#[derive(Clone, Default)]
pub struct Registry {
    functions: HashMap<String, NativeFunction>,
    completion: Option<Arc<dyn CompletionService>>,
}

impl Registry {
    /// Registry with no functions at all.
    pub fn empty() -> Self {
        Registry::default()
    }

    /// Registry holding every builtin. No completion service is installed;
    /// see [`Registry::with_completion_service`].
    pub fn standard() -> Self {
        let mut registry = Registry::empty();
        arith::register(&mut registry);
        math::register(&mut registry);
        stats::register(&mut registry);
        array::register(&mut registry);
        string::register(&mut registry);
        datetime::register(&mut registry);
        random::register(&mut registry);
        ai::register(&mut registry);
        registry
    }

    /// The process-wide standard registry, built on first use.
    pub fn shared_standard() -> Arc<Registry> {
        Arc::clone(&STANDARD)
    }

    /// Register (or replace) a function under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use anise_lang::{Registry, Value};
    ///
    /// let mut registry = Registry::standard();
    /// registry.register("answer", |_, _| Ok(Value::Integer(42)));
    /// assert!(registry.contains("answer"));
    /// ```
    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&Context, &[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.register_native(NativeFunction::new(name, func));
    }

    pub fn register_native(&mut self, func: NativeFunction) {
        self.functions.insert(func.name().to_string(), func);
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn with_completion_service(mut self, service: Arc<dyn CompletionService>) -> Self {
        self.completion = Some(service);
        self
    }

    pub fn completion_service(&self) -> Option<&Arc<dyn CompletionService>> {
        self.completion.as_ref()
    }

    /// Look up `name` and call it with already-evaluated arguments.
    pub fn call(&self, ctx: &Context, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        trace!("call {name}() with {} argument(s)", args.len());
        let func = self
            .get(name)
            .ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
        func.call(ctx, args)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("functions", &self.functions.len())
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

// ========================================
// Argument helpers
// ========================================

fn plural(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

pub(crate) fn expect_arity(function: &str, args: &[Value], n: usize) -> Result<(), EvalError> {
    if args.len() == n {
        return Ok(());
    }
    Err(EvalError::Arity {
        function: function.to_string(),
        expected: format!("exactly {n} {}", plural(n)),
        found: args.len(),
    })
}

pub(crate) fn expect_arity_between(
    function: &str,
    args: &[Value],
    min: usize,
    max: usize,
) -> Result<(), EvalError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    Err(EvalError::Arity {
        function: function.to_string(),
        expected: format!("{min} to {max} arguments"),
        found: args.len(),
    })
}

pub(crate) fn expect_min_arity(function: &str, args: &[Value], min: usize) -> Result<(), EvalError> {
    if args.len() >= min {
        return Ok(());
    }
    Err(EvalError::Arity {
        function: function.to_string(),
        expected: format!("at least {min} {}", plural(min)),
        found: args.len(),
    })
}

fn argument_type(function: &str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::ArgumentType {
        function: function.to_string(),
        expected,
        found: found.type_name(),
    }
}

pub(crate) fn number_arg(function: &str, value: &Value) -> Result<f64, EvalError> {
    value.as_float().ok_or_else(|| argument_type(function, "a number", value))
}

pub(crate) fn int_arg(function: &str, value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or_else(|| argument_type(function, "an int", value))
}

pub(crate) fn string_arg<'v>(function: &str, value: &'v Value) -> Result<&'v str, EvalError> {
    value.as_str().ok_or_else(|| argument_type(function, "a string", value))
}

pub(crate) fn array_arg<'v>(function: &str, value: &'v Value) -> Result<&'v [Value], EvalError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(argument_type(function, "an array", other)),
    }
}

pub(crate) fn time_arg(function: &str, value: &Value) -> Result<NaiveDateTime, EvalError> {
    match value {
        Value::Timestamp(t) => Ok(*t),
        other => Err(argument_type(function, "a time", other)),
    }
}

pub(crate) fn invalid_argument(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::InvalidArgument {
        function: function.to_string(),
        message: message.into(),
    }
}

/// Float result converted back to an integer, failing when it does not fit.
pub(crate) fn float_to_int(function: &str, n: f64) -> Result<i64, EvalError> {
    if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(EvalError::IntegerOverflow(function.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_names() {
        let registry = Registry::standard();
        for name in ["add", "exp", "pow", "mean", "filter", "map", "reduce", "ai", "len"] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_unknown_function() {
        let ctx = Context::new();
        let err = Registry::empty().call(&ctx, "nope", &[]).unwrap_err();
        assert_eq!(err, EvalError::UnknownFunction("nope".into()));
    }

    #[test]
    fn test_arity_message() {
        let err = expect_arity("add", &[Value::Integer(1)], 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Arity error: add() expects exactly 2 arguments, got 1"
        );
    }
}
