use regex::Regex;

use super::{Registry, expect_arity, invalid_argument, string_arg};
use crate::{evaluator::EvalError, value::Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register("upper", |_, args| {
        expect_arity("upper", args, 1)?;
        Ok(Value::String(string_arg("upper", &args[0])?.to_uppercase()))
    });

    registry.register("lower", |_, args| {
        expect_arity("lower", args, 1)?;
        Ok(Value::String(string_arg("lower", &args[0])?.to_lowercase()))
    });

    registry.register("trim", |_, args| {
        expect_arity("trim", args, 1)?;
        Ok(Value::String(string_arg("trim", &args[0])?.trim().to_string()))
    });

    // Substring test on strings, membership test on arrays.
    registry.register("contains", |_, args| {
        expect_arity("contains", args, 2)?;
        match &args[0] {
            Value::Array(items) => Ok(Value::Boolean(items.contains(&args[1]))),
            haystack => {
                let haystack = string_arg("contains", haystack)?;
                let needle = string_arg("contains", &args[1])?;
                Ok(Value::Boolean(haystack.contains(needle)))
            }
        }
    });

    registry.register("startswith", |_, args| {
        expect_arity("startswith", args, 2)?;
        let s = string_arg("startswith", &args[0])?;
        let prefix = string_arg("startswith", &args[1])?;
        Ok(Value::Boolean(s.starts_with(prefix)))
    });

    registry.register("endswith", |_, args| {
        expect_arity("endswith", args, 2)?;
        let s = string_arg("endswith", &args[0])?;
        let suffix = string_arg("endswith", &args[1])?;
        Ok(Value::Boolean(s.ends_with(suffix)))
    });

    registry.register("matches", |_, args| {
        expect_arity("matches", args, 2)?;
        let s = string_arg("matches", &args[0])?;
        let pattern = string_arg("matches", &args[1])?;
        let re = Regex::new(pattern)
            .map_err(|e| invalid_argument("matches", format!("invalid regex: {e}")))?;
        Ok(Value::Boolean(re.is_match(s)))
    });

    // An empty delimiter splits into characters.
    registry.register("split", |_, args| {
        expect_arity("split", args, 2)?;
        let s = string_arg("split", &args[0])?;
        let delim = string_arg("split", &args[1])?;
        let parts: Vec<Value> = if delim.is_empty() {
            s.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            s.split(delim).map(Value::from).collect()
        };
        Ok(Value::Array(parts))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let mut registry = Registry::empty();
        register(&mut registry);
        registry.call(&Context::new(), name, args)
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(call("upper", &["abc".into()]), Ok("ABC".into()));
        assert_eq!(call("trim", &["  x ".into()]), Ok("x".into()));
    }

    #[test]
    fn test_contains_string_and_array() {
        assert_eq!(call("contains", &["hello".into(), "ell".into()]), Ok(true.into()));
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(call("contains", &[arr, Value::Integer(3)]), Ok(false.into()));
    }

    #[test]
    fn test_matches_bad_pattern() {
        let err = call("matches", &["abc".into(), "(".into()]).unwrap_err();
        assert!(matches!(err, EvalError::InvalidArgument { .. }));
    }

    #[test]
    fn test_split() {
        assert_eq!(
            call("split", &["a,b".into(), ",".into()]),
            Ok(Value::Array(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            call("split", &["ab".into(), "".into()]),
            Ok(Value::Array(vec!["a".into(), "b".into()]))
        );
    }
}
