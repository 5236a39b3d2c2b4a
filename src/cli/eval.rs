//! Evaluate anise expressions from the command line

use std::collections::HashMap;

use super::{CliError, parse_var, value_to_json, variables_from_json};
use crate::{Config, Value, parser, pipeline};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON object whose keys become variables
    pub context: Option<String>,
    /// `name=value` bindings, applied over the context
    pub vars: Vec<String>,
    /// Require a boolean result
    pub as_bool: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of an eval operation
#[derive(Debug, PartialEq)]
pub enum EvalOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated to a value
    Value(serde_json::Value),
    /// Expression evaluated to a boolean under `--bool`
    Bool(bool),
}

/// Execute an eval operation
pub fn execute_eval(options: &EvalOptions, config: &Config) -> Result<EvalOutcome, CliError> {
    if options.syntax_only {
        parser::parse(&options.expression)?;
        return Ok(EvalOutcome::SyntaxValid);
    }

    let mut variables = match &options.context {
        Some(json) => variables_from_json(serde_json::from_str(json)?)?,
        None => HashMap::new(),
    };
    for binding in &options.vars {
        let (name, value) = parse_var(binding)?;
        variables.insert(name, value);
    }

    let ctx = config.context().bind_variables(variables);
    if options.as_bool {
        let result = pipeline::evaluate_bool(&ctx, &options.expression)?;
        return Ok(EvalOutcome::Bool(result));
    }

    let result: Value = pipeline::evaluate(&ctx, &options.expression)?;
    Ok(EvalOutcome::Value(value_to_json(result)))
}

/// Names of every function the configured registry provides
pub fn list_functions(config: &Config) -> Vec<String> {
    config
        .registry()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}
