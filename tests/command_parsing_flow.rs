use chrono::NaiveDate;

use scheduler::commands::Command;
use scheduler::input::{self, ArgForm, ParsedValue, ValueKind};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 12, 28).unwrap() // a Monday
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn add_attendance_arguments_parse_end_to_end() {
    let parsed = input::parse(
        &tokens(&["n29", "13:00", "14:30", "work", "monthly", "planning", "review"]),
        &Command::AddAttendance.forms(),
        today(),
    )
    .unwrap();
    assert_eq!(
        parsed,
        vec![
            ParsedValue::Date("2021-01-29 Fri".to_string()),
            ParsedValue::Time("13:00".to_string()),
            ParsedValue::Time("14:30".to_string()),
            ParsedValue::Str("work".to_string()),
            ParsedValue::Str("monthly planning review".to_string()),
        ]
    );
}

#[test]
fn add_deadline_accepts_fuzzy_duration_and_date() {
    let parsed = input::parse(
        &tokens(&["f", "9", "1:80", "uni", "hand", "in", "the", "essay"]),
        &Command::AddDeadline.forms(),
        today(),
    )
    .unwrap();
    assert_eq!(
        parsed,
        vec![
            ParsedValue::Date("2021-01-01 Fri".to_string()),
            ParsedValue::Time("09:00".to_string()),
            ParsedValue::Duration(140),
            ParsedValue::Str("uni".to_string()),
            ParsedValue::Str("hand in the essay".to_string()),
        ]
    );
}

#[test]
fn modify_with_dots_and_omissions_yields_missing_markers() {
    let parsed = input::parse(
        &tokens(&["12", ".", "10:00"]),
        &Command::ModifyAttendance.forms(),
        today(),
    )
    .unwrap();
    assert_eq!(
        parsed,
        vec![
            ParsedValue::Uint(12),
            ParsedValue::Missing,
            ParsedValue::Time("10:00".to_string()),
            ParsedValue::Missing,
            ParsedValue::Missing,
            ParsedValue::Missing,
        ]
    );
}

#[test]
fn delete_tail_parses_every_id_or_rejects_the_whole_command() {
    let parsed = input::parse(&tokens(&["1", "3", "49"]), &Command::Delete.forms(), today());
    assert_eq!(
        parsed,
        Ok(vec![ParsedValue::Many(vec![
            ParsedValue::Uint(1),
            ParsedValue::Uint(3),
            ParsedValue::Uint(49),
        ])])
    );

    let err = input::parse(&tokens(&["1", "x", "49"]), &Command::Delete.forms(), today())
        .unwrap_err();
    assert!(err.contains("end arg"), "{err}");
    assert!(err.ends_with('x'), "{err}");
}

#[test]
fn missing_required_argument_cites_its_position() {
    let err = input::parse(
        &tokens(&["2021-01-05"]),
        &Command::AddAttendance.forms(),
        today(),
    )
    .unwrap_err();
    assert_eq!(err, "Command Failure: arg number 2 not found in command");
}

#[test]
fn date_argument_failure_cites_kind_and_raw_value() {
    let err = input::parse(
        &tokens(&["someday", "9", ".", "work", "x"]),
        &Command::AddAttendance.forms(),
        today(),
    )
    .unwrap_err();
    assert!(err.contains("arg number 1"), "{err}");
    assert!(err.contains("date"), "{err}");
    assert!(err.ends_with("someday"), "{err}");
}

#[test]
fn parsing_is_deterministic_for_a_fixed_reference_date() {
    let forms = [ArgForm::required(ValueKind::Date)];
    let first = input::parse(&tokens(&["nth"]), &forms, today()).unwrap();
    let second = input::parse(&tokens(&["nth"]), &forms, today()).unwrap();
    // "n" + "th": one week past the next Thursday
    assert_eq!(first, vec![ParsedValue::Date("2021-01-07 Thu".to_string())]);
    assert_eq!(first, second);
}
