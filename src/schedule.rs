use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SchedulerError};
use crate::event::{Event, EventKind};

/// The in-memory schedule: events ordered by date, then time, then id. Both
/// keys are canonical strings, which order chronologically as plain text. Ids
/// are unique across the schedule and never reused within a session.
#[derive(Debug, Default)]
pub struct Schedule {
    events: BTreeMap<String, BTreeMap<String, BTreeMap<u64, Event>>>,
    highest_event_id: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a schedule from the lines of the events file.
    pub fn from_lines(lines: &[String]) -> Result<Self> {
        let mut schedule = Self::new();
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event = Event::from_line(line).map_err(|reason| {
                SchedulerError::CorruptEvents(format!("line {}: {}", index + 1, reason))
            })?;
            schedule.add(event);
        }
        Ok(schedule)
    }

    /// One storage line per event, in schedule order.
    pub fn to_lines(&self) -> Vec<String> {
        self.iter().map(|(_, event)| event.to_line()).collect()
    }

    /// Insert an event under a fresh id. Returns the id and the event's
    /// display string.
    pub fn add(&mut self, event: Event) -> (u64, String) {
        let id = self.highest_event_id + 1;
        let rendered = event.to_string();
        self.insert_at(id, event);
        self.highest_event_id = id;
        (id, rendered)
    }

    pub fn add_attendance(
        &mut self,
        date: String,
        time: String,
        end_time: Option<String>,
        tag: String,
        description: String,
    ) -> (u64, String) {
        self.add(Event {
            date,
            time,
            kind: EventKind::Attendance { end_time },
            tag,
            description,
        })
    }

    pub fn add_deadline(
        &mut self,
        date: String,
        time: String,
        duration: Option<u64>,
        tag: String,
        description: String,
    ) -> (u64, String) {
        self.add(Event {
            date,
            time,
            kind: EventKind::Deadline { duration },
            tag,
            description,
        })
    }

    pub fn get(&self, id: u64) -> Option<&Event> {
        self.events
            .values()
            .flat_map(|times| times.values())
            .find_map(|ids| ids.get(&id))
    }

    /// Remove an event, pruning now-empty date and time levels.
    pub fn delete(&mut self, id: u64) -> Option<Event> {
        let (date, time) = self.locate(id)?;
        let times = self.events.get_mut(&date)?;
        let ids = times.get_mut(&time)?;
        let event = ids.remove(&id)?;
        if ids.is_empty() {
            times.remove(&time);
            if times.is_empty() {
                self.events.remove(&date);
            }
        }
        Some(event)
    }

    /// Replace an attendance event, keeping the old value for every field
    /// given as `None`. The event is reinserted under a fresh id. Fails, with
    /// the schedule untouched, when the id is unknown or names a deadline.
    pub fn modify_attendance(
        &mut self,
        id: u64,
        date: Option<String>,
        time: Option<String>,
        end_time: Option<String>,
        tag: Option<String>,
        description: Option<String>,
    ) -> std::result::Result<(u64, String), String> {
        let old = self
            .delete(id)
            .ok_or_else(|| format!("no event with id {id} in the schedule"))?;
        let EventKind::Attendance { end_time: old_end } = old.kind.clone() else {
            self.insert_at(id, old);
            return Err(format!("event {id} is not an attendance event"));
        };
        Ok(self.add(Event {
            date: date.unwrap_or(old.date),
            time: time.unwrap_or(old.time),
            kind: EventKind::Attendance {
                end_time: end_time.or(old_end),
            },
            tag: tag.unwrap_or(old.tag),
            description: description.unwrap_or(old.description),
        }))
    }

    /// Deadline counterpart of [`Schedule::modify_attendance`].
    pub fn modify_deadline(
        &mut self,
        id: u64,
        date: Option<String>,
        time: Option<String>,
        duration: Option<u64>,
        tag: Option<String>,
        description: Option<String>,
    ) -> std::result::Result<(u64, String), String> {
        let old = self
            .delete(id)
            .ok_or_else(|| format!("no event with id {id} in the schedule"))?;
        let EventKind::Deadline { duration: old_duration } = old.kind.clone() else {
            self.insert_at(id, old);
            return Err(format!("event {id} is not a deadline event"));
        };
        Ok(self.add(Event {
            date: date.unwrap_or(old.date),
            time: time.unwrap_or(old.time),
            kind: EventKind::Deadline {
                duration: duration.or(old_duration),
            },
            tag: tag.unwrap_or(old.tag),
            description: description.unwrap_or(old.description),
        }))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Event)> {
        self.events
            .values()
            .flat_map(|times| times.values())
            .flat_map(|ids| ids.iter().map(|(id, event)| (*id, event)))
    }

    fn insert_at(&mut self, id: u64, event: Event) {
        self.events
            .entry(event.date.clone())
            .or_default()
            .entry(event.time.clone())
            .or_default()
            .insert(id, event);
    }

    fn locate(&self, id: u64) -> Option<(String, String)> {
        for (date, times) in &self.events {
            for (time, ids) in times {
                if ids.contains_key(&id) {
                    return Some((date.clone(), time.clone()));
                }
            }
        }
        None
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCHEDULE:")?;
        for (date, times) in &self.events {
            write!(f, "\n\n{date}:")?;
            for (time, ids) in times {
                for (id, event) in ids {
                    write!(f, "\n\t\t{time}: {id}: {}", event.summary())?;
                }
            }
        }
        Ok(())
    }
}
