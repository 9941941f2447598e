pub mod scalar;

use chrono::NaiveDate;

/// Whether a command argument must be present, and whether it absorbs the rest
/// of the input. At most one tail form is allowed, and only in last position;
/// no required form may follow an optional one. The engine trusts callers on
/// both points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Required,
    Optional,
    RequiredTail,
    OptionalTail,
}

/// The value a raw token must parse to in order to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Uint,
    Date,
    Time,
    Duration,
}

impl ValueKind {
    fn describe(&self) -> &'static str {
        match self {
            ValueKind::Str => "string",
            ValueKind::Uint => "non-negative int",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::Duration => "duration",
        }
    }
}

/// One position in a command's argument list: arity plus demanded value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgForm {
    pub arity: Arity,
    pub kind: ValueKind,
}

impl ArgForm {
    pub fn required(kind: ValueKind) -> Self {
        Self { arity: Arity::Required, kind }
    }

    pub fn optional(kind: ValueKind) -> Self {
        Self { arity: Arity::Optional, kind }
    }

    pub fn tail(kind: ValueKind) -> Self {
        Self { arity: Arity::RequiredTail, kind }
    }

    pub fn optional_tail(kind: ValueKind) -> Self {
        Self { arity: Arity::OptionalTail, kind }
    }
}

/// The parsed result for one argument form. `Missing` marks an optional
/// argument the user declined (with `.` or by omission). Tail forms of
/// non-string kind produce `Many`; string tails join into a single `Str`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Missing,
    Str(String),
    Uint(u64),
    Date(String),
    Time(String),
    Duration(u64),
    Many(Vec<ParsedValue>),
}

impl ParsedValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, ParsedValue::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::Str(s) | ParsedValue::Date(s) | ParsedValue::Time(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ParsedValue::Uint(v) | ParsedValue::Duration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[ParsedValue]> {
        match self {
            ParsedValue::Many(values) => Some(values),
            _ => None,
        }
    }
}

/// Parse the raw tokens of one command against its declared argument forms.
///
/// Tokens are consumed positionally, one per form, except that a tail form
/// swallows every remaining token. On success the result holds exactly one
/// `ParsedValue` per form. On failure the result is a message for the user,
/// naming the 1-based argument position (or, inside a tail, the offending raw
/// value) and the demanded kind. No partial results escape a failed parse.
///
/// `today` is the reference date for every date argument, threaded through so
/// results do not depend on the wall clock.
pub fn parse(
    raw_inputs: &[String],
    forms: &[ArgForm],
    today: NaiveDate,
) -> Result<Vec<ParsedValue>, String> {
    let mut parsed_inputs = Vec::with_capacity(forms.len());
    for (index, form) in forms.iter().enumerate() {
        let mut raw_value = raw_inputs.get(index).map(String::as_str);

        match form.arity {
            Arity::Required | Arity::RequiredTail => {
                if raw_value.is_none() {
                    return Err(format!(
                        "Command Failure: arg number {} not found in command",
                        index + 1
                    ));
                }
            }
            Arity::Optional | Arity::OptionalTail => {
                // a lone dot is an explicit "no value"
                if raw_value == Some(".") {
                    raw_value = None;
                }
            }
        }

        match form.arity {
            Arity::Required | Arity::Optional => match raw_value {
                None => parsed_inputs.push(ParsedValue::Missing),
                Some(raw) => match parse_scalar(raw, form.kind, today) {
                    Some(value) => parsed_inputs.push(value),
                    None => {
                        return Err(format!(
                            "Command Failure: arg number {} could not be parsed to a {}. \
                             Raw value was:\n{}",
                            index + 1,
                            form.kind.describe(),
                            raw
                        ));
                    }
                },
            },
            Arity::RequiredTail | Arity::OptionalTail => {
                if raw_value.is_none() {
                    parsed_inputs.push(ParsedValue::Missing);
                    break;
                }
                let raw_tail = &raw_inputs[index..];
                if form.kind == ValueKind::Str {
                    parsed_inputs.push(ParsedValue::Str(raw_tail.join(" ")));
                } else {
                    let mut values = Vec::with_capacity(raw_tail.len());
                    for raw in raw_tail {
                        match parse_scalar(raw, form.kind, today) {
                            Some(value) => values.push(value),
                            None => {
                                return Err(format!(
                                    "Command Failure: not all elements of end arg could be \
                                     parsed to a {}. Offending raw value was:\n{}",
                                    form.kind.describe(),
                                    raw
                                ));
                            }
                        }
                    }
                    parsed_inputs.push(ParsedValue::Many(values));
                }
                // a tail form is always the last one
                break;
            }
        }
    }
    Ok(parsed_inputs)
}

fn parse_scalar(raw: &str, kind: ValueKind, today: NaiveDate) -> Option<ParsedValue> {
    match kind {
        ValueKind::Str => Some(ParsedValue::Str(raw.to_string())),
        ValueKind::Uint => scalar::parse_unsigned_int(raw).map(ParsedValue::Uint),
        ValueKind::Date => scalar::parse_date(raw, Some(today)).map(ParsedValue::Date),
        ValueKind::Time => scalar::parse_time(raw).map(ParsedValue::Time),
        ValueKind::Duration => scalar::parse_duration(raw).map(ParsedValue::Duration),
    }
}
