use crate::app::ApiClient;
use crate::dashboard::{load_goals, load_habits, load_records};
use crate::errors::ClientError;
use crate::models::{
    AlertKind, DailyRecord, Goal, Habit, Navigation, NewDailyRecord, NewGoal, NewHabit, Profile, Validate,
};
use crate::state::Page;
use reqwest::{Method, Response};
use std::future::Future;
use tracing::{info, warn};

/// The list re-fetched after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refreshed {
    Habits(Vec<Habit>),
    Goals(Vec<Goal>),
    Records(Vec<DailyRecord>),
    Profile,
    /// The change went through but re-fetching the list failed; the page
    /// still shows the previous rows.
    Stale,
}

impl Refreshed {
    fn apply(&self, page: &mut Page) {
        match self {
            Refreshed::Habits(habits) => page.habits = habits.clone(),
            Refreshed::Goals(goals) => page.goals = goals.clone(),
            Refreshed::Records(records) => page.set_records(records.clone()),
            Refreshed::Profile | Refreshed::Stale => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Action {
    name: &'static str,
    success: &'static str,
    failure: &'static str,
}

const SAVE_HABIT: Action = Action {
    name: "save_habit",
    success: "Habit saved successfully",
    failure: "Error saving habit",
};
const DELETE_HABIT: Action = Action {
    name: "delete_habit",
    success: "Habit deleted successfully",
    failure: "Error deleting habit",
};
const SAVE_GOAL: Action = Action {
    name: "save_goal",
    success: "Goal saved successfully",
    failure: "Error saving goal",
};
const DELETE_GOAL: Action = Action {
    name: "delete_goal",
    success: "Goal deleted successfully",
    failure: "Error deleting goal",
};
const SAVE_RECORD: Action = Action {
    name: "save_record",
    success: "Record saved successfully",
    failure: "Error saving record",
};
const DELETE_RECORD: Action = Action {
    name: "delete_record",
    success: "Record deleted successfully",
    failure: "Error deleting record",
};
const UPDATE_PROFILE: Action = Action {
    name: "update_profile",
    success: "Profile updated successfully",
    failure: "Error updating profile",
};

pub async fn save_habit(api: &ApiClient, page: &mut Page, habit: &NewHabit) -> Result<Refreshed, ClientError> {
    let change = async {
        habit.validate()?;
        let response = api.send_json(Method::POST, "/api/habits", habit).await?;
        ensure_success(&response, SAVE_HABIT)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Habits(load_habits(api).await?)) };
    run(page, SAVE_HABIT, change, refresh).await
}

pub async fn delete_habit(api: &ApiClient, page: &mut Page, id: i64) -> Result<Refreshed, ClientError> {
    let change = async {
        let response = api.send_empty(Method::DELETE, &format!("/api/habits/{id}")).await?;
        ensure_success(&response, DELETE_HABIT)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Habits(load_habits(api).await?)) };
    run(page, DELETE_HABIT, change, refresh).await
}

pub async fn save_goal(api: &ApiClient, page: &mut Page, goal: &NewGoal) -> Result<Refreshed, ClientError> {
    let change = async {
        goal.validate()?;
        let response = api.send_json(Method::POST, "/api/goals", goal).await?;
        ensure_success(&response, SAVE_GOAL)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Goals(load_goals(api).await?)) };
    run(page, SAVE_GOAL, change, refresh).await
}

pub async fn delete_goal(api: &ApiClient, page: &mut Page, id: i64) -> Result<Refreshed, ClientError> {
    let change = async {
        let response = api.send_empty(Method::DELETE, &format!("/api/goals/{id}")).await?;
        ensure_success(&response, DELETE_GOAL)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Goals(load_goals(api).await?)) };
    run(page, DELETE_GOAL, change, refresh).await
}

pub async fn save_record(api: &ApiClient, page: &mut Page, record: &NewDailyRecord) -> Result<Refreshed, ClientError> {
    let change = async {
        record.validate()?;
        let response = api.send_json(Method::POST, "/api/records", record).await?;
        ensure_success(&response, SAVE_RECORD)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Records(load_records(api).await?)) };
    run(page, SAVE_RECORD, change, refresh).await
}

pub async fn delete_record(api: &ApiClient, page: &mut Page, id: i64) -> Result<Refreshed, ClientError> {
    let change = async {
        let response = api
            .send_empty(Method::DELETE, &format!("/api/daily-records/{id}"))
            .await?;
        ensure_success(&response, DELETE_RECORD)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Records(load_records(api).await?)) };
    run(page, DELETE_RECORD, change, refresh).await
}

/// Unlike the other helpers this leaves the rendered lists untouched.
pub async fn update_profile(api: &ApiClient, page: &mut Page, profile: &Profile) -> Result<Refreshed, ClientError> {
    let change = async {
        profile.validate()?;
        let response = api.send_json(Method::PUT, "/api/profile", profile).await?;
        ensure_success(&response, UPDATE_PROFILE)
    };
    let refresh = async { Ok::<_, ClientError>(Refreshed::Profile) };
    run(page, UPDATE_PROFILE, change, refresh).await
}

fn ensure_success(response: &Response, action: Action) -> Result<(), ClientError> {
    if response.status().is_success() {
        return Ok(());
    }
    warn!(action = action.name, status = %response.status(), "request rejected");
    Err(ClientError::rejected(action.failure))
}

/// Shows the overlay, applies `change`, then re-fetches with `refresh`.
///
/// Once `change` succeeds the action counts as done: a failed refresh is
/// logged and reported as [`Refreshed::Stale`], never as an error.
async fn run<C, R>(page: &mut Page, action: Action, change: C, refresh: R) -> Result<Refreshed, ClientError>
where
    C: Future<Output = Result<(), ClientError>>,
    R: Future<Output = Result<Refreshed, ClientError>>,
{
    page.show_loading();
    if let Err(err) = change.await {
        match &err {
            ClientError::Unauthenticated => page.navigate(Navigation::Login),
            err => {
                warn!(action = action.name, "failed: {err}");
                page.show_alert(AlertKind::Danger, err.to_string());
            }
        }
        page.hide_loading();
        return Err(err);
    }

    info!(action = action.name, "completed");
    page.show_alert(AlertKind::Success, action.success);
    let refreshed = match refresh.await {
        Ok(refreshed) => {
            refreshed.apply(page);
            refreshed
        }
        Err(err) => {
            warn!(action = action.name, "list refresh failed: {err}");
            Refreshed::Stale
        }
    };
    page.hide_loading();
    Ok(refreshed)
}
