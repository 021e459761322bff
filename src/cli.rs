use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_PATH};
use crate::models::{NewDailyRecord, NewHabit};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trackup", about = "TrackUp habit tracker client")]
pub struct Cli {
    #[arg(long, env = "TRACKUP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where the signed-in token is kept between runs.
    #[arg(long, env = "TRACKUP_SESSION_PATH", default_value = DEFAULT_SESSION_PATH)]
    pub session_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, &self.session_path)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        username: String,
        email: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Loads habits, today's records and goals.
    Dashboard {
        /// Write the full HTML page here instead of printing a summary.
        #[arg(long)]
        html: Option<PathBuf>,
    },
    Habit(HabitCommand),
    Goal(GoalCommand),
    Record(RecordCommand),
    Profile {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HabitCommand {
    #[command(subcommand)]
    pub command: HabitSubcommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HabitSubcommand {
    Add(HabitAddArgs),
    Rm { id: i64 },
    /// Lists the habit types `habit add --type` accepts.
    Types,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HabitAddArgs {
    pub name: String,
    #[arg(long)]
    pub frequency: String,
    #[arg(long = "type", value_name = "HABIT_TYPE_ID")]
    pub habit_type_id: i64,
    #[arg(long)]
    pub description: Option<String>,
    /// Defaults to today.
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GoalSubcommand {
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Rm {
        id: i64,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RecordSubcommand {
    Add {
        habit_id: i64,
        status: RecordStatus,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Rm {
        id: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Done,
    Missed,
}

impl RecordStatus {
    pub fn completed(self) -> bool {
        matches!(self, RecordStatus::Done)
    }
}

impl Command {
    /// Commands whose normal outcome is the login page.
    pub fn leads_to_login(&self) -> bool {
        matches!(self, Command::Register { .. } | Command::Logout)
    }
}

impl HabitAddArgs {
    pub fn into_habit(self, today: NaiveDate) -> NewHabit {
        NewHabit {
            name: self.name,
            description: self.description,
            frequency: self.frequency,
            start_date: self.start.unwrap_or(today),
            end_date: self.end,
            habit_type_id: self.habit_type_id,
        }
    }
}

pub fn record(habit_id: i64, status: RecordStatus, date: Option<NaiveDate>, today: NaiveDate) -> NewDailyRecord {
    NewDailyRecord {
        date: date.unwrap_or(today),
        completed: status.completed(),
        habit_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trackup").chain(args.iter().copied())).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn login_takes_username_and_password() {
        let cli = parse(&["login", "ana", "secret"]);
        assert_eq!(
            cli.command,
            Command::Login {
                username: "ana".into(),
                password: "secret".into(),
            }
        );
        assert!(!cli.command.leads_to_login());
    }

    #[test]
    fn flags_override_server_and_session_path() {
        let cli = parse(&[
            "--base-url",
            "https://trackup.example.com/",
            "--session-path",
            "/tmp/s.json",
            "logout",
        ]);
        let config = cli.config();
        assert_eq!(config.base_url, "https://trackup.example.com");
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
        assert!(cli.command.leads_to_login());
    }

    #[test]
    fn record_defaults_to_today() {
        let cli = parse(&["record", "add", "4", "done"]);
        let record = match cli.command {
            Command::Record(RecordCommand {
                command: RecordSubcommand::Add { habit_id, status, date },
            }) => record(habit_id, status, date, today()),
            other => panic!("unexpected command: {other:?}"),
        };
        assert_eq!(
            record,
            NewDailyRecord {
                date: today(),
                completed: true,
                habit_id: 4,
            }
        );
    }

    #[test]
    fn record_accepts_explicit_date() {
        let cli = parse(&["record", "add", "4", "missed", "--date", "2026-10-01"]);
        let record = match cli.command {
            Command::Record(RecordCommand {
                command: RecordSubcommand::Add { habit_id, status, date },
            }) => record(habit_id, status, date, today()),
            other => panic!("unexpected command: {other:?}"),
        };
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert!(!record.completed);
    }

    #[test]
    fn habit_add_needs_type_and_frequency() {
        let cli = parse(&["habit", "add", "Read", "--frequency", "DAILY", "--type", "2"]);
        let habit = match cli.command {
            Command::Habit(HabitCommand {
                command: HabitSubcommand::Add(args),
            }) => args.into_habit(today()),
            other => panic!("unexpected command: {other:?}"),
        };
        assert_eq!(habit.frequency, "DAILY");
        assert_eq!(habit.habit_type_id, 2);
        assert_eq!(habit.description, None);
        assert_eq!(habit.start_date, today());

        assert!(Cli::try_parse_from(["trackup", "habit", "add", "Read", "--frequency", "DAILY"]).is_err());
        assert!(Cli::try_parse_from(["trackup", "habit", "add", "Read", "--type", "2"]).is_err());
    }

    #[test]
    fn habit_types_is_a_subcommand() {
        let cli = parse(&["habit", "types"]);
        assert_eq!(
            cli.command,
            Command::Habit(HabitCommand {
                command: HabitSubcommand::Types,
            })
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(Cli::try_parse_from(["trackup", "goal", "rm", "seven"]).is_err());
        assert!(Cli::try_parse_from(["trackup", "record", "add", "1", "maybe"]).is_err());
        assert!(Cli::try_parse_from(["trackup", "record", "add", "1", "done", "--date", "16/10"]).is_err());
        assert!(Cli::try_parse_from(["trackup"]).is_err());
    }
}
