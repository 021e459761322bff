use crate::app::ApiClient;
use crate::errors::ClientError;
use crate::models::{DailyRecord, Goal, Habit, HabitType, Navigation};
use crate::state::Page;
use tracing::warn;

pub const HABITS_PATH: &str = "/api/habits/habits";
pub const RECORDS_PATH: &str = "/api/daily-records/daily-records";
pub const GOALS_PATH: &str = "/api/goals/goals";
pub const HABIT_TYPES_PATH: &str = "/api/habit-types/habit-types";

pub async fn load_habits(api: &ApiClient) -> Result<Vec<Habit>, ClientError> {
    api.auth_fetch(HABITS_PATH).await
}

pub async fn load_records(api: &ApiClient) -> Result<Vec<DailyRecord>, ClientError> {
    api.auth_fetch(RECORDS_PATH).await
}

pub async fn load_goals(api: &ApiClient) -> Result<Vec<Goal>, ClientError> {
    api.auth_fetch(GOALS_PATH).await
}

/// Types a new habit can be filed under; `NewHabit::habit_type_id` takes one of these ids.
pub async fn load_habit_types(api: &ApiClient) -> Result<Vec<HabitType>, ClientError> {
    api.auth_fetch(HABIT_TYPES_PATH).await
}

/// Populates habits, today's records and goals.
///
/// The three requests run concurrently and land independently: one failing
/// leaves only its own list empty. Without a token nothing is requested.
pub async fn load_dashboard(api: &ApiClient, page: &mut Page) {
    if !api.session().is_signed_in().await {
        page.navigate(Navigation::Login);
        return;
    }

    let (habits, records, goals) = tokio::join!(load_habits(api), load_records(api), load_goals(api));

    if let Some(habits) = settle(page, "habits", habits) {
        page.habits = habits;
    }
    if let Some(records) = settle(page, "records", records) {
        page.set_records(records);
    }
    if let Some(goals) = settle(page, "goals", goals) {
        page.goals = goals;
    }
}

fn settle<T>(page: &mut Page, list: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(items) => Some(items),
        Err(ClientError::Unauthenticated) => {
            page.navigate(Navigation::Login);
            None
        }
        Err(err) => {
            warn!(%list, "failed to load list: {err}");
            None
        }
    }
}
