use crate::errors::ClientError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const HABIT_NAME_CHARS: RangeInclusive<usize> = 3..=100;
const HABIT_DESCRIPTION_MAX: usize = 500;
const HABIT_FREQUENCY_MAX: usize = 50;

/// Checked before a payload leaves the client.
pub trait Validate {
    fn validate(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub habit_type_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub habit_type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewGoal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub habit_id: Option<i64>,
    #[serde(default)]
    pub habit_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyRecord {
    pub date: NaiveDate,
    pub completed: bool,
    pub habit_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Completed vs. logged records for one day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCompletion {
    pub date: NaiveDate,
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
    Root,
}

impl Navigation {
    pub fn href(self) -> &'static str {
        match self {
            Navigation::Login => "/login",
            Navigation::Root => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

impl AlertKind {
    pub fn css_class(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

fn require_text(entity: &'static str, field: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::invalid(entity, format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_length(
    entity: &'static str,
    field: &str,
    value: &str,
    allowed: RangeInclusive<usize>,
) -> Result<(), ClientError> {
    let chars = value.trim().chars().count();
    if !allowed.contains(&chars) {
        return Err(ClientError::invalid(
            entity,
            format!("{field} must be {} to {} characters", allowed.start(), allowed.end()),
        ));
    }
    Ok(())
}

fn require_email(entity: &'static str, email: &str) -> Result<(), ClientError> {
    if !email.contains('@') {
        return Err(ClientError::invalid(entity, "email must contain '@'"));
    }
    Ok(())
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ClientError> {
        require_text("credentials", "username", &self.username)?;
        require_text("credentials", "password", &self.password)
    }
}

impl Validate for Registration {
    fn validate(&self) -> Result<(), ClientError> {
        require_text("registration", "username", &self.username)?;
        require_email("registration", &self.email)?;
        require_text("registration", "password", &self.password)
    }
}

impl Validate for NewHabit {
    fn validate(&self) -> Result<(), ClientError> {
        require_text("habit", "name", &self.name)?;
        require_length("habit", "name", &self.name, HABIT_NAME_CHARS)?;
        if let Some(description) = &self.description {
            require_length("habit", "description", description, 0..=HABIT_DESCRIPTION_MAX)?;
        }
        require_text("habit", "frequency", &self.frequency)?;
        require_length("habit", "frequency", &self.frequency, 0..=HABIT_FREQUENCY_MAX)?;
        if self.habit_type_id <= 0 {
            return Err(ClientError::invalid("habit", "habit type id must be positive"));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ClientError::invalid(
                    "habit",
                    format!("end date {end} is before start date {}", self.start_date),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for NewGoal {
    fn validate(&self) -> Result<(), ClientError> {
        require_text("goal", "name", &self.name)
    }
}

impl Validate for NewDailyRecord {
    fn validate(&self) -> Result<(), ClientError> {
        if self.habit_id <= 0 {
            return Err(ClientError::invalid("record", "habit id must be positive"));
        }
        Ok(())
    }
}

impl Validate for Profile {
    fn validate(&self) -> Result<(), ClientError> {
        require_text("profile", "username", &self.username)?;
        require_email("profile", &self.email)
    }
}
