use crate::errors::ClientError;
use crate::models::{Alert, AlertKind, DailyRecord, DayCompletion, Goal, Habit, Navigation};
use crate::storage::{clear_token, load_token, persist_token};
use chrono::{Local, NaiveDate};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Bearer token shared by every request-issuing call.
///
/// A session built with [`Session::load`] mirrors its token to a file so a
/// later process picks it up; [`Session::in_memory`] keeps it in memory only.
#[derive(Clone, Default)]
pub struct Session {
    path: Option<PathBuf>,
    token: Arc<Mutex<Option<String>>>,
}

impl Session {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            path: None,
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    pub async fn load(path: PathBuf) -> Self {
        let token = load_token(&path).await;
        Self {
            path: Some(path),
            token: Arc::new(Mutex::new(token)),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.token.lock().await.is_some()
    }

    pub async fn store(&self, token: String) -> Result<(), ClientError> {
        let mut guard = self.token.lock().await;
        if let Some(path) = &self.path {
            persist_token(path, &token).await?;
        }
        *guard = Some(token);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self.token.lock().await;
        if let Some(path) = &self.path {
            clear_token(path).await?;
        }
        *guard = None;
        Ok(())
    }
}

/// What the user currently sees: where they were sent, the alerts shown, the
/// loading overlay and the rendered lists.
#[derive(Debug, Clone)]
pub struct Page {
    pub today: NaiveDate,
    pub location: Option<Navigation>,
    pub form_error: Option<String>,
    pub alerts: Vec<Alert>,
    pub loading: bool,
    pub overlays_removed: usize,
    pub habits: Vec<Habit>,
    pub records: Vec<DailyRecord>,
    pub goals: Vec<Goal>,
    pub week: Vec<DayCompletion>,
}

impl Default for Page {
    fn default() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

impl Page {
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            today,
            location: None,
            form_error: None,
            alerts: Vec::new(),
            loading: false,
            overlays_removed: 0,
            habits: Vec::new(),
            records: Vec::new(),
            goals: Vec::new(),
            week: Vec::new(),
        }
    }

    pub fn navigate(&mut self, target: Navigation) {
        self.location = Some(target);
    }

    pub fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alerts.push(Alert {
            kind,
            message: message.into(),
        });
    }

    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    pub fn hide_loading(&mut self) {
        if self.loading {
            self.loading = false;
            self.overlays_removed += 1;
        }
    }

    /// Keeps today's records and rebuilds the weekly summary from the full list.
    pub fn set_records(&mut self, records: Vec<DailyRecord>) {
        self.week = crate::stats::completion_last_7_days(self.today, &records);
        self.records = records
            .into_iter()
            .filter(|record| record.date == self.today)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, date: NaiveDate, completed: bool) -> DailyRecord {
        DailyRecord {
            id,
            date,
            completed,
            habit_id: Some(1),
            habit_name: Some("Read".into()),
            user_id: None,
        }
    }

    #[test]
    fn overlay_removal_is_counted_once() {
        let mut page = Page::default();
        page.show_loading();
        page.hide_loading();
        page.hide_loading();
        assert!(!page.loading);
        assert_eq!(page.overlays_removed, 1);
    }

    #[test]
    fn set_records_keeps_only_today() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let mut page = Page::for_date(today);
        page.set_records(vec![record(1, today, true), record(2, yesterday, false)]);

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, 1);
        assert_eq!(page.week.len(), 7);
        let last = page.week.last().unwrap();
        assert_eq!((last.completed, last.total), (1, 1));
    }

    #[tokio::test]
    async fn in_memory_session_stores_and_clears() {
        let session = Session::in_memory();
        assert!(!session.is_signed_in().await);

        session.store("tok".into()).await.unwrap();
        assert_eq!(session.token().await.as_deref(), Some("tok"));

        let shared = session.clone();
        shared.clear().await.unwrap();
        assert_eq!(session.token().await, None);
    }
}
