use log::warn;

use super::{Registry, expect_min_arity, string_arg};
use crate::{context::Context, evaluator::EvalError, value::Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register("ai", ai);
}

/// `ai(provider, part, ...)`: ask the registry's completion service. Every
/// part is turned into text with its display form.
pub fn ai(ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
    expect_min_arity("ai", args, 2)?;
    let provider = string_arg("ai", &args[0])?;
    let parts: Vec<String> = args[1..].iter().map(ToString::to_string).collect();

    let service = ctx
        .registry()
        .completion_service()
        .ok_or_else(|| EvalError::Completion("no completion service configured".to_string()))?;

    service.complete(provider, &parts).map(Value::String).map_err(|err| {
        warn!("completion via '{provider}' failed: {err}");
        EvalError::Completion(err.to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::completion::{CompletionError, CompletionService, build_prompt};

    struct Echo;

    impl CompletionService for Echo {
        fn complete(&self, provider: &str, parts: &[String]) -> Result<String, CompletionError> {
            match provider {
                "gpt" => Ok(build_prompt(parts)),
                other => Err(CompletionError::UnsupportedProvider(other.to_string())),
            }
        }
    }

    fn context() -> Context {
        let registry = Registry::standard().with_completion_service(Arc::new(Echo));
        Context::with_registry(Arc::new(registry))
    }

    #[test]
    fn test_parts_reach_service() {
        let result = ai(&context(), &["gpt".into(), "sum".into(), Value::Integer(3)]);
        assert_eq!(result, Ok(Value::String("sum : 3".into())));
    }

    #[test]
    fn test_service_error_surfaces() {
        let err = ai(&context(), &["bard".into(), "x".into()]).unwrap_err();
        assert_eq!(
            err,
            EvalError::Completion("unsupported provider 'bard'".into())
        );
    }

    #[test]
    fn test_missing_service() {
        let ctx = Context::new();
        assert!(matches!(
            ai(&ctx, &["gpt".into(), "x".into()]),
            Err(EvalError::Completion(_))
        ));
    }
}
