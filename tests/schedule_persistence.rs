use std::env;
use std::fs;

use chrono::NaiveDate;

use scheduler::input::scalar;
use scheduler::schedule::Schedule;
use scheduler::store::Store;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 12, 28).unwrap()
}

fn temp_store(name: &str) -> Store {
    let dir = env::temp_dir().join(format!("scheduler_it_{}_{name}", std::process::id()));
    fs::remove_dir_all(&dir).ok();
    Store::new(dir)
}

fn populated_schedule() -> Schedule {
    let mut schedule = Schedule::new();
    let date = scalar::parse_date("n29", Some(today())).unwrap();
    let time = scalar::parse_time("9").unwrap();
    schedule.add_attendance(
        date,
        time,
        scalar::parse_time("10:30"),
        "work".to_string(),
        "quarterly planning with the whole team".to_string(),
    );
    schedule.add_deadline(
        scalar::parse_date("2021-02-01", Some(today())).unwrap(),
        scalar::parse_time("17").unwrap(),
        scalar::parse_duration("2h30m"),
        "uni".to_string(),
        "hand in the essay".to_string(),
    );
    schedule
}

#[test]
fn parsed_values_survive_save_and_load_unchanged() {
    let store = temp_store("roundtrip");
    let schedule = populated_schedule();
    store.save(&schedule).unwrap();
    let reloaded = store.load().unwrap().unwrap();
    assert_eq!(reloaded.to_lines(), schedule.to_lines());
    assert_eq!(reloaded.to_string(), schedule.to_string());
}

#[test]
fn stored_canonical_fields_reparse_to_themselves() {
    let schedule = populated_schedule();
    for (_, event) in schedule.iter() {
        // the date portion of the canonical form re-parses to the same canonical form
        assert_eq!(
            scalar::parse_date(&event.date[..10], Some(today())).as_deref(),
            Some(event.date.as_str())
        );
        assert_eq!(scalar::parse_time(&event.time).as_deref(), Some(event.time.as_str()));
    }
}

#[test]
fn descriptions_with_spaces_survive_the_file_format() {
    let store = temp_store("spaces");
    let schedule = populated_schedule();
    store.save(&schedule).unwrap();
    let reloaded = store.load().unwrap().unwrap();
    let descriptions: Vec<String> = reloaded
        .iter()
        .map(|(_, e)| e.description.clone())
        .collect();
    assert!(descriptions.contains(&"quarterly planning with the whole team".to_string()));
    assert!(descriptions.contains(&"hand in the essay".to_string()));
}

#[test]
fn reload_after_a_wipe_yields_an_empty_schedule() {
    let store = temp_store("wipe");
    store.save(&populated_schedule()).unwrap();
    store.backup(&populated_schedule(), "WIPE_SCHEDULE").unwrap();
    store.save(&Schedule::new()).unwrap();
    let reloaded = store.load().unwrap().unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.to_string(), "SCHEDULE:");
}
