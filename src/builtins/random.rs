use rand::{Rng, seq::SliceRandom};

use super::{Registry, array_arg, expect_arity, expect_arity_between, int_arg, invalid_argument, string_arg};
use crate::value::Value;

pub(crate) fn register(registry: &mut Registry) {
    // rand("int" | "float", [bound]): a positive bound limits the range to
    // [0, bound); without one, ints span [0, i64::MAX) and floats [0, 1).
    registry.register("rand", |_, args| {
        expect_arity_between("rand", args, 1, 2)?;
        let kind = string_arg("rand", &args[0])?;
        let bound = match args.get(1) {
            Some(value) => int_arg("rand", value)?,
            None => 0,
        };

        let mut rng = rand::thread_rng();
        match kind {
            "int" if bound > 0 => Ok(Value::Integer(rng.gen_range(0..bound))),
            "int" => Ok(Value::Integer(rng.gen_range(0..i64::MAX))),
            "float" | "float64" if bound > 0 => Ok(Value::Float(rng.r#gen::<f64>() * bound as f64)),
            "float" | "float64" => Ok(Value::Float(rng.r#gen::<f64>())),
            other => Err(invalid_argument(
                "rand",
                format!("unknown kind '{other}', expected \"int\" or \"float\""),
            )),
        }
    });

    registry.register("shuffle", |_, args| {
        expect_arity("shuffle", args, 1)?;
        let mut items = array_arg("shuffle", &args[0])?.to_vec();
        items.shuffle(&mut rand::thread_rng());
        Ok(Value::Array(items))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::Context, evaluator::EvalError};

    fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let mut registry = Registry::empty();
        register(&mut registry);
        registry.call(&Context::new(), name, args)
    }

    #[test]
    fn test_rand_respects_bound() {
        for _ in 0..50 {
            match call("rand", &["int".into(), Value::Integer(3)]) {
                Ok(Value::Integer(n)) => assert!((0..3).contains(&n)),
                other => panic!("unexpected {other:?}"),
            }
            match call("rand", &["float".into()]) {
                Ok(Value::Float(n)) => assert!((0.0..1.0).contains(&n)),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_rand_unknown_kind() {
        assert!(call("rand", &["dice".into()]).is_err());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<Value> = (0..10).map(Value::Integer).collect();
        let Ok(Value::Array(mut shuffled)) = call("shuffle", &[Value::Array(items.clone())]) else {
            panic!("shuffle failed");
        };
        shuffled.sort_by_key(|v| v.as_int());
        assert_eq!(shuffled, items);
    }
}
