//! Date and time parsing and differencing.
//!
//! `date` and `time` produce full timestamps: a date at midnight, or a time of
//! day on 1970-01-01. Differences are absolute and truncated to whole units.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{Registry, expect_arity, invalid_argument, string_arg, time_arg};
use crate::{evaluator::EvalError, value::TIMESTAMP_FORMAT};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

pub(crate) fn register(registry: &mut Registry) {
    registry.register("date", |_, args| {
        expect_arity("date", args, 1)?;
        let text = string_arg("date", &args[0])?;
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|e| unparsable("date", text, e))?;
        Ok(date.and_time(NaiveTime::MIN).into())
    });

    registry.register("time", |_, args| {
        expect_arity("time", args, 1)?;
        let text = string_arg("time", &args[0])?;
        let time = NaiveTime::parse_from_str(text, TIME_FORMAT)
            .map_err(|e| unparsable("time", text, e))?;
        Ok(NaiveDate::default().and_time(time).into())
    });

    registry.register("datetime", |_, args| {
        expect_arity("datetime", args, 1)?;
        let text = string_arg("datetime", &args[0])?;
        let stamp = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .map_err(|e| unparsable("datetime", text, e))?;
        Ok(stamp.into())
    });

    registry.register("diffdate", |_, args| {
        expect_arity("diffdate", args, 2)?;
        let a = time_arg("diffdate", &args[0])?;
        let b = time_arg("diffdate", &args[1])?;
        Ok((a - b).num_days().abs().into())
    });

    registry.register("difftime", |_, args| {
        expect_arity("difftime", args, 2)?;
        let a = time_arg("difftime", &args[0])?;
        let b = time_arg("difftime", &args[1])?;
        Ok((a - b).num_seconds().abs().into())
    });
}

fn unparsable(function: &str, text: &str, err: chrono::ParseError) -> EvalError {
    invalid_argument(function, format!("cannot parse '{text}': {err}"))
}
