use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use tracing::{error, warn};

use crate::commands::{self, BLANKS_DEFAULT, BLANKS_MAX, Command};
use crate::input::{self, ParsedValue};
use crate::schedule::Schedule;
use crate::store::Store;

/// Startup arguments. The interactive loop itself takes over after these.
#[derive(Parser)]
#[command(name = "scheduler", about = "Personal command-line schedule manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<StartupCommand>,
    /// Path to a KEY=VALUE config file (otherwise the CONFIG_FILE env var).
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum StartupCommand {
    /// Print the schedule before entering the interactive loop, for use from
    /// an OS task scheduler.
    Print,
}

/// Split one prompt line into raw command tokens: `|` stripped, lowercased,
/// whitespace-delimited.
pub fn tokenize(line: &str) -> Vec<String> {
    line.replace('|', "")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

enum LoopControl {
    Continue,
    Quit,
}

/// The interactive application: a schedule, its store, and the command loop.
pub struct App {
    schedule: Schedule,
    store: Store,
}

impl App {
    pub fn new(schedule: Schedule, store: Store) -> Self {
        Self { schedule, store }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn run(&mut self) {
        loop {
            let line = match Text::new(">>>").prompt() {
                Ok(line) => line,
                // prompt torn down (ctrl-c, ctrl-d, closed terminal)
                Err(_) => break,
            };
            let tokens = tokenize(&line);
            if tokens.is_empty() {
                continue;
            }
            match self.dispatch(&tokens) {
                LoopControl::Continue => println!(),
                LoopControl::Quit => break,
            }
        }
    }

    fn dispatch(&mut self, tokens: &[String]) -> LoopControl {
        let Some(command) = Command::lookup(&tokens[0]) else {
            println!(
                "Command '{}' not recognized. Type 'help' for help",
                tokens[0]
            );
            return LoopControl::Continue;
        };

        let today = Local::now().date_naive();
        let parsed = match input::parse(&tokens[1..], &command.forms(), today) {
            Ok(values) => values,
            Err(message) => {
                warn!(command = %tokens[0], "rejected command arguments");
                println!("{message}");
                println!("{}", command.usage());
                return LoopControl::Continue;
            }
        };

        match command {
            Command::Help => println!("{}", commands::help_page()),
            Command::Blanks => {
                let count = match &parsed[..] {
                    [ParsedValue::Uint(n)] => *n,
                    _ => BLANKS_DEFAULT,
                };
                if count > BLANKS_MAX {
                    println!(
                        "Command Failure: Inputted number value: {count}, exceeds the maximum \
                         allowable value of: {BLANKS_MAX}"
                    );
                } else {
                    print!("{}", "\n".repeat(count as usize));
                }
            }
            Command::Print => println!("{}", self.schedule),
            Command::AddAttendance => {
                if let [
                    ParsedValue::Date(date),
                    ParsedValue::Time(time),
                    end_time,
                    ParsedValue::Str(tag),
                    ParsedValue::Str(description),
                ] = &parsed[..]
                {
                    let (id, rendered) = self.schedule.add_attendance(
                        date.clone(),
                        time.clone(),
                        opt_string(end_time),
                        tag.clone(),
                        description.clone(),
                    );
                    println!("New Event Added:\nID: {id}, Event: {rendered}");
                }
            }
            Command::AddDeadline => {
                if let [
                    ParsedValue::Date(date),
                    ParsedValue::Time(time),
                    duration,
                    ParsedValue::Str(tag),
                    ParsedValue::Str(description),
                ] = &parsed[..]
                {
                    let (id, rendered) = self.schedule.add_deadline(
                        date.clone(),
                        time.clone(),
                        duration.as_uint(),
                        tag.clone(),
                        description.clone(),
                    );
                    println!("New Event Added:\nID: {id}, Event: {rendered}");
                }
            }
            Command::ModifyAttendance => {
                if let [ParsedValue::Uint(id), date, time, end_time, tag, description] =
                    &parsed[..]
                {
                    let result = self.schedule.modify_attendance(
                        *id,
                        opt_string(date),
                        opt_string(time),
                        opt_string(end_time),
                        opt_string(tag),
                        opt_string(description),
                    );
                    report_modify(*id, result);
                }
            }
            Command::ModifyDeadline => {
                if let [ParsedValue::Uint(id), date, time, duration, tag, description] =
                    &parsed[..]
                {
                    let result = self.schedule.modify_deadline(
                        *id,
                        opt_string(date),
                        opt_string(time),
                        duration.as_uint(),
                        opt_string(tag),
                        opt_string(description),
                    );
                    report_modify(*id, result);
                }
            }
            Command::Delete => {
                if let [ParsedValue::Many(ids)] = &parsed[..] {
                    for value in ids {
                        if let ParsedValue::Uint(id) = value {
                            if self.schedule.delete(*id).is_some() {
                                println!("Event: {id} Successfully Deleted");
                            } else {
                                println!("\tERROR: Event: {id} Could Not Be Deleted");
                            }
                        }
                    }
                }
            }
            Command::Save => {
                self.save();
            }
            Command::SaveAndPrint => {
                if self.save() {
                    println!();
                    println!("{}", self.schedule);
                    println!();
                    println!("Above Represents Print After Save");
                }
            }
            Command::Reload => {
                if let Err(e) = self.store.backup(&self.schedule, "RELOAD") {
                    error!("backup before reload failed: {e}");
                }
                match self.store.load() {
                    Ok(Some(schedule)) => {
                        self.schedule = schedule;
                        println!("Schedule Reloaded; Changes Since Last Save Discarded");
                    }
                    Ok(None) => {
                        self.schedule = Schedule::new();
                        println!("Events File Does Not Exist; Starting With An Empty Schedule");
                    }
                    Err(e) => {
                        error!("reload failed: {e}");
                        println!("Command Failure: schedule could not be reloaded: {e}");
                    }
                }
            }
            Command::Quit => {
                self.save();
                return LoopControl::Quit;
            }
            Command::QuitWithoutSaving => {
                if let Err(e) = self.store.backup(&self.schedule, "QUIT_WITHOUT_SAVING") {
                    error!("backup before quit failed: {e}");
                }
                return LoopControl::Quit;
            }
            Command::WipeSchedule => {
                let confirmed = Confirm::new(
                    "Are you sure that you want to remove all events from the schedule and save?",
                )
                .with_default(false)
                .prompt()
                .unwrap_or(false);
                if confirmed {
                    if let Err(e) = self.store.backup(&self.schedule, "WIPE_SCHEDULE") {
                        error!("backup before wipe failed: {e}");
                    }
                    self.schedule = Schedule::new();
                    if self.save() {
                        println!("Schedule Successfully Wiped");
                    }
                } else {
                    println!("Schedule Wipe Not Performed");
                }
            }
        }
        LoopControl::Continue
    }

    fn save(&self) -> bool {
        match self.store.save(&self.schedule) {
            Ok(()) => {
                println!("Save Complete");
                true
            }
            Err(e) => {
                error!("save failed: {e}");
                println!("Command Failure: schedule could not be saved: {e}");
                false
            }
        }
    }
}

fn opt_string(value: &ParsedValue) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn report_modify(id: u64, result: Result<(u64, String), String>) {
    match result {
        Ok((new_id, rendered)) => println!(
            "Event Successfully Modified\nNew Event ID: {new_id}\nNew Event: {rendered}"
        ),
        Err(reason) => println!("Event {id} Could Not Be Modified: Error Message: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn tok(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn temp_app(name: &str) -> App {
        let dir = env::temp_dir().join(format!("scheduler_cli_{}_{name}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        App::new(Schedule::new(), Store::new(dir))
    }

    #[test]
    fn tokenize_strips_pipes_and_lowercases() {
        assert_eq!(
            tokenize("  ADD_Attendance  n29 13:00 . Work  team|sync  "),
            tok(&["add_attendance", "n29", "13:00", ".", "work", "teamsync"])
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn add_and_delete_through_dispatch() {
        let mut app = temp_app("add_delete");
        app.dispatch(&tok(&[
            "aa",
            "2030-01-15",
            "9",
            ".",
            "work",
            "planning",
            "meeting",
        ]));
        assert_eq!(app.schedule().len(), 1);
        let (id, event) = app.schedule().iter().next().map(|(i, e)| (i, e.clone())).unwrap();
        assert_eq!(event.time, "09:00");
        assert_eq!(event.description, "planning meeting");

        app.dispatch(&tok(&["d", &id.to_string()]));
        assert!(app.schedule().is_empty());
    }

    #[test]
    fn bad_arguments_do_not_mutate_the_schedule() {
        let mut app = temp_app("bad_args");
        app.dispatch(&tok(&["aa", "not-a-date", "9", ".", "work", "x"]));
        app.dispatch(&tok(&["ad", "2030-01-15", "25:00", ".", "work", "x"]));
        app.dispatch(&tok(&["aa", "2030-01-15", "9"]));
        assert!(app.schedule().is_empty());
    }

    #[test]
    fn modify_deadline_through_dispatch_keeps_omitted_fields() {
        let mut app = temp_app("modify");
        app.dispatch(&tok(&["ad", "2030-01-15", "17", "2h30m", "tax", "file", "it"]));
        let id = app.schedule().iter().next().map(|(i, _)| i).unwrap();
        app.dispatch(&tok(&["md", &id.to_string(), ".", "18:30"]));
        let event = app.schedule().iter().next().map(|(_, e)| e.clone()).unwrap();
        assert_eq!(event.date, "2030-01-15 Tue");
        assert_eq!(event.time, "18:30");
        assert_eq!(event.description, "file it");
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let mut app = temp_app("unknown");
        app.dispatch(&tok(&["frobnicate"]));
        assert!(app.schedule().is_empty());
    }
}
