use chrono::{Datelike, Days, Local, NaiveDate};

// Weekday tokens accepted by the date parser, Monday-first. The one/two letter
// forms are the shortest unambiguous prefixes.
const WEEKDAY_MINIMAL: [&str; 7] = ["m", "tu", "w", "th", "f", "sa", "su"];
const WEEKDAY_SHORT: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Parse a string composed entirely of decimal digits into a non-negative integer.
/// Leading zeros are fine. Anything else (including the empty string) fails.
pub fn parse_unsigned_int(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok()
}

/// Parse a user-entered time into the uniform "HH:MM" form.
///
/// Accepted shapes, by length: a bare hour ("5", "17") which gets ":00" appended,
/// or "H:MM" / "HH:MM" with hour < 24 and minutes < 60.
pub fn parse_time(raw: &str) -> Option<String> {
    let len = raw.len();
    if (len == 1 || len == 2) && raw.bytes().all(|b| b.is_ascii_digit()) {
        let hour: u32 = raw.parse().ok()?;
        if hour < 24 {
            return Some(format!("{:02}:00", hour));
        }
        return None;
    }
    if (len == 4 || len == 5) && raw.as_bytes()[len - 3] == b':' {
        let hour_part = &raw[..len - 3];
        let minute_part = &raw[len - 2..];
        if !hour_part.bytes().all(|b| b.is_ascii_digit())
            || !minute_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let hour: u32 = hour_part.parse().ok()?;
        let minute: u32 = minute_part.parse().ok()?;
        if hour < 24 && minute < 60 {
            return Some(format!("{:02}:{:02}", hour, minute));
        }
    }
    None
}

/// Parse a user-entered duration into a count of minutes.
///
/// Accepted shapes: "H:M" (either side may be blank, meaning 0; minutes are NOT
/// capped at 59 — "1:80" is 140), a bare hour count ("2" is 120), "NNm" minutes,
/// "NNh" hours, and "NhM" / "NhMm" combinations.
pub fn parse_duration(raw: &str) -> Option<u64> {
    let s = raw.to_ascii_lowercase();
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return None;
        }
        let hours = blank_or_digits(parts[0])?;
        let minutes = blank_or_digits(parts[1])?;
        return hours.checked_mul(60)?.checked_add(minutes);
    }
    if let Some(h_at) = s.find('h') {
        if s[h_at + 1..].contains('h') {
            return None;
        }
        let hours = digits(&s[..h_at])?;
        let rest = &s[h_at + 1..];
        if rest.is_empty() {
            return hours.checked_mul(60);
        }
        let minutes = digits(rest.strip_suffix('m').unwrap_or(rest))?;
        return hours.checked_mul(60)?.checked_add(minutes);
    }
    match s.strip_suffix('m') {
        Some(body) => digits(body),
        None => digits(&s)?.checked_mul(60),
    }
}

/// Parse a user-entered date into the uniform "YYYY-MM-DD Www" form, resolved
/// against `today` (defaults to the local calendar date when not supplied).
///
/// Three input families:
/// - delimited numeric: "D", "M<sep>D" or "Y<sep>M<sep>D" where any non-digit
///   character separates the terms; omitted year/month resolve to the first
///   occurrence not earlier than today
/// - the literal "today"
/// - relative: a run of `n` characters followed by nothing (that many days from
///   today), a day of month (that many month rolls past the first upcoming
///   occurrence), or a weekday token (that many weeks past the next such weekday)
pub fn parse_date(raw: &str, today: Option<NaiveDate>) -> Option<String> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    if raw.is_empty() {
        return None;
    }
    let s = raw.to_ascii_lowercase();
    if s == "today" {
        return Some(canonical_date(today));
    }
    let n_count = s.bytes().take_while(|&b| b == b'n').count();
    let suffix = &s[n_count..];
    if n_count > 0 || weekday_index(suffix).is_some() {
        return parse_relative_date(suffix, n_count as u64, today);
    }
    parse_delimited_date(&s, today)
}

fn parse_relative_date(suffix: &str, n_count: u64, today: NaiveDate) -> Option<String> {
    if suffix.is_empty() {
        return today.checked_add_days(Days::new(n_count)).map(canonical_date);
    }
    if suffix.bytes().all(|b| b.is_ascii_digit()) {
        let day: u32 = suffix.parse().ok()?;
        return nth_upcoming_day_of_month(day, n_count, today).map(canonical_date);
    }
    if let Some(target) = weekday_index(suffix) {
        let current = today.weekday().num_days_from_monday() as u64;
        let mut ahead = (target as u64 + 7 - current) % 7;
        if ahead == 0 {
            // "this coming X" is never today
            ahead = 7;
        }
        ahead += n_count * 7;
        return today.checked_add_days(Days::new(ahead)).map(canonical_date);
    }
    None
}

fn parse_delimited_date(s: &str, today: NaiveDate) -> Option<String> {
    // Every non-digit character is a separator; consecutive, leading or trailing
    // separators leave an empty term, which is a hard failure.
    let terms: Vec<&str> = s.split(|c: char| !c.is_ascii_digit()).collect();
    if terms.iter().any(|t| t.is_empty()) {
        return None;
    }
    match terms[..] {
        [day] => nth_upcoming_day_of_month(day.parse().ok()?, 0, today).map(canonical_date),
        [month, day] => {
            let month: u32 = month.parse().ok()?;
            let day: u32 = day.parse().ok()?;
            if !(1..=12).contains(&month) || day < 1 {
                return None;
            }
            let mut year = today.year();
            if (today.month(), today.day()) >= (month, day) {
                year += 1;
            }
            NaiveDate::from_ymd_opt(year, month, day).map(canonical_date)
        }
        [year, month, day] => {
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            let day: u32 = day.parse().ok()?;
            if !(1..=9999).contains(&year) || !(1..=12).contains(&month) || day < 1 {
                return None;
            }
            NaiveDate::from_ymd_opt(year, month, day).map(canonical_date)
        }
        _ => None,
    }
}

// First upcoming month holding the given day of month (rolling past this month
// when today's day has already reached it), then `extra_rolls` further months.
// The day-of-month bound is only checked against the final month.
fn nth_upcoming_day_of_month(day: u32, extra_rolls: u64, today: NaiveDate) -> Option<NaiveDate> {
    if day < 1 {
        return None;
    }
    let (mut year, mut month) = (today.year(), today.month());
    if today.day() >= day {
        roll_month(&mut year, &mut month);
    }
    for _ in 0..extra_rolls {
        roll_month(&mut year, &mut month);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn roll_month(year: &mut i32, month: &mut u32) {
    if *month == 12 {
        *year += 1;
        *month = 1;
    } else {
        *month += 1;
    }
}

fn weekday_index(token: &str) -> Option<usize> {
    WEEKDAY_MINIMAL
        .iter()
        .position(|&w| w == token)
        .or_else(|| WEEKDAY_SHORT.iter().position(|&w| w == token))
}

fn canonical_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d %a").to_string()
}

// In "H:M" a blank side counts as zero; any other non-digit content fails.
fn blank_or_digits(side: &str) -> Option<u64> {
    if side.is_empty() {
        return Some(0);
    }
    digits(side)
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u64>().ok()
}
