//! Built-in format-constraint evaluators for the day-boundary checks the
//! German "Stromtag" (932/933) and "Gastag" (934/935) time conditions
//! expand into, plus the "no UTC offset" check (931).
//!
//! These exist because `ahb-resolve`'s time-condition expansion manufactures
//! references to keys 932-935 out of thin air (see `UB1`/`UB2`/`UB3` in
//! `ahb_common::TimeCondition`); an embedder providing its own `FcEvaluator`
//! for every other key still needs *something* to answer these five, so the
//! engine ships them itself. [`BuiltinFcEvaluator`] can be composed with an
//! embedder's own evaluator by trying one, then falling back to the other.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use chrono_tz::Europe::Berlin;

use crate::provider::{FcEvaluator, NotImplemented};
use crate::result::EvaluatedFormatConstraint;

/// Parses `entered_input` as an offset-aware ISO-8601 datetime, accepting a
/// trailing `Z` as a stand-in for `+00:00`. Returns a descriptive
/// [`EvaluatedFormatConstraint`] failure for an empty/missing input, a
/// datetime lacking an explicit offset, or unparsable input.
fn parse_offset_datetime(entered_input: Option<&str>) -> Result<DateTime<FixedOffset>, EvaluatedFormatConstraint> {
    let input = match entered_input {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(EvaluatedFormatConstraint::unfulfilled(
                "An empty or None string cannot be parsed as datetime",
            ))
        }
    };
    let normalized = match input.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => input.to_string(),
    };
    match DateTime::parse_from_rfc3339(&normalized) {
        Ok(dt) => Ok(dt),
        Err(err) => {
            if normalized.parse::<NaiveDateTime>().is_ok() {
                Err(EvaluatedFormatConstraint::unfulfilled(format!(
                    "Neither offset nor timezone was given: '{input}'"
                )))
            } else {
                Err(EvaluatedFormatConstraint::unfulfilled(format!("'{input}' is not a valid datetime: {err}")))
            }
        }
    }
}

fn is_stromtag_limit(date_time: DateTime<FixedOffset>) -> bool {
    let local = date_time.with_timezone(&Berlin);
    local.hour() == 0 && local.minute() == 0 && local.second() == 0
}

fn is_gastag_limit(date_time: DateTime<FixedOffset>) -> bool {
    let local = date_time.with_timezone(&Berlin);
    local.hour() == 6 && local.minute() == 0 && local.second() == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Strom,
    Gas,
}

impl Tag {
    fn name(self) -> &'static str {
        match self {
            Tag::Strom => "Stromtag",
            Tag::Gas => "Gastag",
        }
    }
}

fn evaluate_xtag_limit(entered_input: Option<&str>, tag: Tag) -> EvaluatedFormatConstraint {
    let date_time = match parse_offset_datetime(entered_input) {
        Ok(dt) => dt,
        Err(failure) => return failure,
    };
    let on_limit = match tag {
        Tag::Strom => is_stromtag_limit(date_time),
        Tag::Gas => is_gastag_limit(date_time),
    };
    if on_limit {
        EvaluatedFormatConstraint::fulfilled()
    } else {
        EvaluatedFormatConstraint::unfulfilled(format!(
            "The given datetime '{}' is not the limit of a {}",
            date_time.to_rfc3339(),
            tag.name()
        ))
    }
}

fn evaluate_no_utc_offset(entered_input: Option<&str>) -> EvaluatedFormatConstraint {
    let date_time = match parse_offset_datetime(entered_input) {
        Ok(dt) => dt,
        Err(failure) => return failure,
    };
    if date_time.offset().local_minus_utc() == 0 {
        EvaluatedFormatConstraint::fulfilled()
    } else {
        EvaluatedFormatConstraint::unfulfilled(format!(
            "The given datetime '{}' does not have a UTC offset of '+00:00'",
            date_time.to_rfc3339()
        ))
    }
}

/// The five format-constraint evaluators the engine ships out of the box:
/// 931 (exactly-zero UTC offset), 932/933 (Stromtag boundary), 934/935
/// (Gastag boundary). 932 and 933 are identical in behavior -- likewise
/// 934 and 935 -- the split exists in the source handbooks to distinguish
/// daylight-saving from standard time, which does not change what a
/// datetime-with-offset check actually has to verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFcEvaluator;

#[async_trait]
impl FcEvaluator for BuiltinFcEvaluator {
    async fn evaluate(&self, key: &str, entered_input: Option<&str>) -> Result<EvaluatedFormatConstraint, NotImplemented> {
        match key {
            "931" => Ok(evaluate_no_utc_offset(entered_input)),
            "932" | "933" => Ok(evaluate_xtag_limit(entered_input, Tag::Strom)),
            "934" | "935" => Ok(evaluate_xtag_limit(entered_input, Tag::Gas)),
            _ => Err(NotImplemented { key: key.to_string() }),
        }
    }
}
