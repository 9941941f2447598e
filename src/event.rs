use std::fmt;

/// What kind of event this is, with the kind-specific field inline. A closed
/// set: exhaustive matches at the serialization and display sites below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Something to be at, optionally until `end_time` ("HH:MM").
    Attendance { end_time: Option<String> },
    /// Something to finish by, optionally carrying an expected duration in minutes.
    Deadline { duration: Option<u64> },
}

/// One schedule entry. Dates and times are stored in their canonical string
/// forms ("YYYY-MM-DD Www" and "HH:MM"), which sort chronologically as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub date: String,
    pub time: String,
    pub kind: EventKind,
    pub tag: String,
    pub description: String,
}

impl Event {
    /// Serialize to the one-line pipe-delimited storage form. The description
    /// goes last so embedded spaces survive; `|` never appears in field values
    /// because the input loop strips it.
    pub fn to_line(&self) -> String {
        let (kind, extra) = match &self.kind {
            EventKind::Attendance { end_time } => {
                ("ATTENDANCE", end_time.clone().unwrap_or_default())
            }
            EventKind::Deadline { duration } => (
                "DEADLINE",
                duration.map(|d| d.to_string()).unwrap_or_default(),
            ),
        };
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.date, self.time, kind, extra, self.tag, self.description
        )
    }

    /// Parse a line previously produced by [`Event::to_line`].
    pub fn from_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.splitn(6, '|').collect();
        let [date, time, kind, extra, tag, description] = fields[..] else {
            return Err(format!("expected 6 pipe-delimited fields, got: {line}"));
        };
        let kind = match kind {
            "ATTENDANCE" => EventKind::Attendance {
                end_time: (!extra.is_empty()).then(|| extra.to_string()),
            },
            "DEADLINE" => EventKind::Deadline {
                duration: if extra.is_empty() {
                    None
                } else {
                    Some(
                        extra
                            .parse::<u64>()
                            .map_err(|_| format!("bad duration field: {extra}"))?,
                    )
                },
            },
            other => return Err(format!("unknown event kind: {other}")),
        };
        Ok(Event {
            date: date.to_string(),
            time: time.to_string(),
            kind,
            tag: tag.to_string(),
            description: description.to_string(),
        })
    }

    /// Short form used in the schedule printout, without date or time (those
    /// come from the surrounding listing).
    pub fn summary(&self) -> String {
        let kind = match &self.kind {
            EventKind::Attendance { end_time: Some(end) } => format!("attendance until {end}"),
            EventKind::Attendance { end_time: None } => "attendance".to_string(),
            EventKind::Deadline { duration: Some(minutes) } => {
                format!("deadline ({minutes} min)")
            }
            EventKind::Deadline { duration: None } => "deadline".to_string(),
        };
        format!("{}, {}, {}", kind, self.tag, self.description)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date: {}, time: {}, {}",
            self.date,
            self.time,
            self.summary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance() -> Event {
        Event {
            date: "2020-12-29 Tue".to_string(),
            time: "13:00".to_string(),
            kind: EventKind::Attendance {
                end_time: Some("14:30".to_string()),
            },
            tag: "work".to_string(),
            description: "weekly sync with the team".to_string(),
        }
    }

    #[test]
    fn line_round_trip_preserves_spaced_description() {
        let event = attendance();
        assert_eq!(Event::from_line(&event.to_line()).unwrap(), event);
    }

    #[test]
    fn line_round_trip_with_absent_optional_fields() {
        let event = Event {
            kind: EventKind::Attendance { end_time: None },
            ..attendance()
        };
        assert_eq!(Event::from_line(&event.to_line()).unwrap(), event);

        let event = Event {
            kind: EventKind::Deadline { duration: None },
            ..attendance()
        };
        assert_eq!(Event::from_line(&event.to_line()).unwrap(), event);
    }

    #[test]
    fn deadline_duration_survives_the_round_trip() {
        let event = Event {
            kind: EventKind::Deadline { duration: Some(90) },
            ..attendance()
        };
        let line = event.to_line();
        assert_eq!(line, "2020-12-29 Tue|13:00|DEADLINE|90|work|weekly sync with the team");
        assert_eq!(Event::from_line(&line).unwrap(), event);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(Event::from_line("").is_err());
        assert!(Event::from_line("2020-12-29 Tue|13:00|PARTY||work|fun").is_err());
        assert!(Event::from_line("2020-12-29 Tue|13:00|DEADLINE|soon|work|x").is_err());
        assert!(Event::from_line("only|four|fields|here").is_err());
    }
}
