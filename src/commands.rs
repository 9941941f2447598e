use crate::input::{ArgForm, ValueKind};

pub const BLANKS_DEFAULT: u64 = 100;
pub const BLANKS_MAX: u64 = 10000;

/// Every interactive command, reachable by full name or short alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Blanks,
    Print,
    AddAttendance,
    AddDeadline,
    ModifyAttendance,
    ModifyDeadline,
    Delete,
    Save,
    SaveAndPrint,
    Reload,
    Quit,
    QuitWithoutSaving,
    WipeSchedule,
}

impl Command {
    pub fn lookup(word: &str) -> Option<Self> {
        Some(match word {
            "help" => Self::Help,
            "blanks" | "b" => Self::Blanks,
            "print" | "p" => Self::Print,
            "add_attendance" | "aa" => Self::AddAttendance,
            "add_deadline" | "ad" => Self::AddDeadline,
            "modify_attendance" | "ma" => Self::ModifyAttendance,
            "modify_deadline" | "md" => Self::ModifyDeadline,
            "delete" | "d" => Self::Delete,
            "save" | "s" => Self::Save,
            "save_and_print" | "sp" => Self::SaveAndPrint,
            "reload" => Self::Reload,
            "quit" | "q" => Self::Quit,
            "quit_without_saving" => Self::QuitWithoutSaving,
            "wipe_schedule" => Self::WipeSchedule,
            _ => return None,
        })
    }

    /// The argument forms the grammar engine parses this command's tokens
    /// against. Commands that take no arguments have an empty list.
    pub fn forms(&self) -> Vec<ArgForm> {
        match self {
            Self::Blanks => vec![ArgForm::optional(ValueKind::Uint)],
            Self::AddAttendance => vec![
                ArgForm::required(ValueKind::Date),
                ArgForm::required(ValueKind::Time),
                ArgForm::optional(ValueKind::Time),
                ArgForm::required(ValueKind::Str),
                ArgForm::tail(ValueKind::Str),
            ],
            Self::AddDeadline => vec![
                ArgForm::required(ValueKind::Date),
                ArgForm::required(ValueKind::Time),
                ArgForm::optional(ValueKind::Duration),
                ArgForm::required(ValueKind::Str),
                ArgForm::tail(ValueKind::Str),
            ],
            Self::ModifyAttendance => vec![
                ArgForm::required(ValueKind::Uint),
                ArgForm::optional(ValueKind::Date),
                ArgForm::optional(ValueKind::Time),
                ArgForm::optional(ValueKind::Time),
                ArgForm::optional(ValueKind::Str),
                ArgForm::optional_tail(ValueKind::Str),
            ],
            Self::ModifyDeadline => vec![
                ArgForm::required(ValueKind::Uint),
                ArgForm::optional(ValueKind::Date),
                ArgForm::optional(ValueKind::Time),
                ArgForm::optional(ValueKind::Duration),
                ArgForm::optional(ValueKind::Str),
                ArgForm::optional_tail(ValueKind::Str),
            ],
            Self::Delete => vec![ArgForm::tail(ValueKind::Uint)],
            _ => vec![],
        }
    }

    /// One-line usage reminder, printed after a failed parse.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Help => "Command: 'help'",
            Self::Blanks => "Command: 'blanks': (command args: opt:number)",
            Self::Print => "Command: 'print'",
            Self::AddAttendance => {
                "Command: 'add_attendance': (command args: date, time, opt:end time, tag, \
                 end:description)"
            }
            Self::AddDeadline => {
                "Command: 'add_deadline': (command args: date, time, opt:duration, tag, \
                 end:description)"
            }
            Self::ModifyAttendance => {
                "Command: 'modify_attendance': (command args: event id, opt:date, opt:time, \
                 opt:end time, opt:tag, opt&end:description)"
            }
            Self::ModifyDeadline => {
                "Command: 'modify_deadline': (command args: event id, opt:date, opt:time, \
                 opt:duration, opt:tag, opt&end:description)"
            }
            Self::Delete => "Command: 'delete': (command args: end:event ids)",
            Self::Save => "Command: 'save'",
            Self::SaveAndPrint => "Command: 'save_and_print'",
            Self::Reload => "Command: 'reload'",
            Self::Quit => "Command: 'quit'",
            Self::QuitWithoutSaving => "Command: 'quit_without_saving'",
            Self::WipeSchedule => "Command: 'wipe_schedule'",
        }
    }
}

pub fn help_page() -> String {
    format!(
        "
Help Page:

-----
Personal scheduling application

All commands are case and beginning-space and end-space insensitive
'|' will be removed from any user input
Separate command args with ' '
No arg values can include ' ' except for 'end' args which can only be the last arg given \
for a command and can include ' '
Enter '.' for optional ('opt') args to enter no value, '.' is not accepted as a legitimate \
value for optional args,
        alternatively enter nothing to enter no value for all remaining optional args
Type 'help' for help
-----

Commands:
help                            :   print this help page
blanks, b                       :   print blank lines, default: {BLANKS_DEFAULT}, max: \
{BLANKS_MAX} (command args: opt:number)
print, p                        :   print schedule
add_attendance, aa              :   add a new ATTENDANCE event (command args: date, time, \
opt:end time, tag, end:description)
add_deadline, ad                :   add a new DEADLINE event (command args: date, time, \
opt:duration, tag, end:description)
modify_attendance, ma           :   modify an ATTENDANCE event (command args: event id, \
opt:date, opt:time, opt:end time, opt:tag, opt&end:description)
modify_deadline, md             :   modify a DEADLINE event (command args: event id, \
opt:date, opt:time, opt:duration, opt:tag, opt&end:description)
delete, d                       :   delete an event (command args: end:event ids)
save, s                         :   save changes
save_and_print, sp              :   save changes and print new schedule
reload                          :   reload schedule
quit, q                         :   save changes and quit the application
quit_without_saving             :   quit the application without saving changes
wipe_schedule                   :   remove all events from the schedule and save now empty \
schedule
"
    )
}
