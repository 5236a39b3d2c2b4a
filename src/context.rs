use std::{collections::HashMap, sync::Arc};

use crate::{builtins::Registry, config::DEFAULT_MAX_NESTING, evaluator::EvalError, value::Value};

/// Variable bindings plus the function registry an evaluation runs against.
///
/// A context is read-only during evaluation. Binding new variables produces a
/// new context whose mapping *replaces* the old one; nothing is merged. The
/// registry handle and the nesting limit carry over.
#[derive(Debug, Clone)]
pub struct Context {
    variables: HashMap<String, Value>,
    registry: Arc<Registry>,
    depth: usize,
    max_depth: usize,
}

impl Context {
    /// Empty context backed by the shared standard registry.
    pub fn new() -> Self {
        Context::with_registry(Registry::shared_standard())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Context {
            variables: HashMap::new(),
            registry,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING,
        }
    }

    /// Limit on how deeply `map`/`filter` may re-enter the evaluator.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// New context whose variables are exactly `variables`.
    pub fn bind_variables(&self, variables: HashMap<String, Value>) -> Self {
        Context {
            variables,
            registry: Arc::clone(&self.registry),
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    /// Context for one level of combinator re-entry.
    pub(crate) fn nested(&self, variables: HashMap<String, Value>) -> Result<Self, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::NestingLimit(self.max_depth));
        }
        let mut ctx = self.bind_variables(variables);
        ctx.depth += 1;
        Ok(ctx)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn shared_registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve a dotted path: the first segment is a variable, each further
    /// segment a key in the mapping found so far.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut value = self.variables.get(segments.next()?)?;

        for segment in segments {
            value = match value {
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(value)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
