//! Descriptive statistics over a variadic list of numbers. Array arguments
//! are flattened one level, so `mean(1, 2, 3)` and `mean(int[1, 2, 3])` agree.

use std::cmp::Ordering;

use super::{Registry, expect_min_arity, invalid_argument};
use crate::{evaluator::EvalError, value::Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register("mean", |_, args| {
        let values = floats("mean", args)?;
        Ok(Value::Float(mean(&values)))
    });

    registry.register("median", |_, args| {
        let mut values = floats("median", args)?;
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };
        Ok(Value::Float(median))
    });

    registry.register("mode", |_, args| {
        let mut values = floats("mode", args)?;
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        // Longest run in sorted order; the first (smallest) wins ties.
        let (mut best, mut best_count) = (values[0], 0);
        let mut start = 0;
        while start < values.len() {
            let run = values[start..].iter().take_while(|v| **v == values[start]).count().max(1);
            if run > best_count {
                best = values[start];
                best_count = run;
            }
            start += run;
        }
        Ok(Value::Float(best))
    });

    registry.register("variance", |_, args| {
        let values = floats("variance", args)?;
        if values.len() < 2 {
            return Err(invalid_argument("variance", "needs at least two values"));
        }
        Ok(Value::Float(squared_deviation(&values) / (values.len() - 1) as f64))
    });

    registry.register("stddev", |_, args| {
        let values = floats("stddev", args)?;
        Ok(Value::Float((squared_deviation(&values) / values.len() as f64).sqrt()))
    });

    registry.register("max", |_, args| extreme("max", args, Ordering::Greater));
    registry.register("min", |_, args| extreme("min", args, Ordering::Less));

    registry.register("sum", |_, args| {
        expect_min_arity("sum", args, 1)?;
        let mut sum_int: i64 = 0;
        let mut sum_float: f64 = 0.0;
        let mut has_float = false;

        for value in flatten("sum", args)? {
            match value {
                Value::Integer(n) if !has_float => {
                    sum_int = sum_int
                        .checked_add(*n)
                        .ok_or_else(|| EvalError::IntegerOverflow("sum".into()))?;
                }
                Value::Float(n) => {
                    if !has_float {
                        sum_float = sum_int as f64;
                        has_float = true;
                    }
                    sum_float += n;
                }
                other => sum_float += other.as_float().unwrap_or_default(),
            }
        }

        if has_float {
            Ok(Value::Float(sum_float))
        } else {
            Ok(Value::Integer(sum_int))
        }
    });
}

/// Arguments with arrays spliced in. Every resulting value is a number.
fn flatten<'a>(function: &str, args: &'a [Value]) -> Result<Vec<&'a Value>, EvalError> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        let items = match arg {
            Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        for item in items {
            if !item.is_number() {
                return Err(EvalError::ArgumentType {
                    function: function.to_string(),
                    expected: "a number",
                    found: item.type_name(),
                });
            }
            values.push(item);
        }
    }
    Ok(values)
}

/// Flattened arguments as floats; at least one value is required.
fn floats(function: &str, args: &[Value]) -> Result<Vec<f64>, EvalError> {
    expect_min_arity(function, args, 1)?;
    let values: Vec<f64> = flatten(function, args)?
        .into_iter()
        .filter_map(Value::as_float)
        .collect();
    if values.is_empty() {
        return Err(invalid_argument(function, "no values"));
    }
    Ok(values)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn squared_deviation(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

/// Largest (`Greater`) or smallest (`Less`) value. Ints stay ints unless a
/// float is among the inputs.
fn extreme(function: &str, args: &[Value], keep: Ordering) -> Result<Value, EvalError> {
    expect_min_arity(function, args, 1)?;
    let values = flatten(function, args)?;
    let Some((first, rest)) = values.split_first() else {
        return Err(invalid_argument(function, "no values"));
    };

    let mut best = *first;
    for value in rest {
        let (a, b) = (value.as_float(), best.as_float());
        if a.partial_cmp(&b) == Some(keep) {
            best = *value;
        }
    }

    if values.iter().all(|v| matches!(v, Value::Integer(_))) {
        Ok(best.clone())
    } else {
        Ok(Value::Float(best.as_float().unwrap_or(f64::NAN)))
    }
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

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    #[test]
    fn test_median_sorts() {
        assert_eq!(call("median", &ints(&[9, 1, 5])), Ok(Value::Float(5.0)));
        assert_eq!(call("median", &ints(&[4, 1, 3, 2])), Ok(Value::Float(2.5)));
    }

    #[test]
    fn test_mode_ties_pick_smallest() {
        assert_eq!(call("mode", &ints(&[3, 3, 1, 1, 2])), Ok(Value::Float(1.0)));
        assert_eq!(call("mode", &ints(&[2, 7, 7])), Ok(Value::Float(7.0)));
    }

    #[test]
    fn test_sample_variance_population_stddev() {
        let values = ints(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(call("stddev", &values), Ok(Value::Float(2.0)));
        assert_eq!(call("variance", &ints(&[1, 2, 3, 4])), Ok(Value::Float(5.0 / 3.0)));
    }

    #[test]
    fn test_arrays_are_flattened() {
        let arr = Value::Array(ints(&[1, 2, 3]));
        assert_eq!(call("mean", &[arr.clone()]), Ok(Value::Float(2.0)));
        assert_eq!(call("sum", &[arr.clone(), Value::Integer(4)]), Ok(Value::Integer(10)));
        assert_eq!(call("max", &[arr]), Ok(Value::Integer(3)));
    }

    #[test]
    fn test_extremes_promote_with_floats() {
        assert_eq!(
            call("min", &[Value::Integer(2), Value::Float(2.5), Value::Integer(-1)]),
            Ok(Value::Float(-1.0))
        );
        assert_eq!(call("sum", &[Value::Integer(1), Value::Float(0.5)]), Ok(Value::Float(1.5)));
    }

    #[test]
    fn test_non_number_rejected() {
        let err = call("mean", &[Value::Integer(1), Value::Boolean(true)]).unwrap_err();
        assert!(matches!(err, EvalError::ArgumentType { found: "bool", .. }));
    }
}
