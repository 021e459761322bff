use crate::models::{DailyRecord, DayCompletion};
use chrono::{Duration, NaiveDate};

pub fn completion_last_7_days(today: NaiveDate, records: &[DailyRecord]) -> Vec<DayCompletion> {
    let mut days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let mut completed = 0u32;
        let mut total = 0u32;
        for record in records.iter().filter(|record| record.date == date) {
            total = total.saturating_add(1);
            if record.completed {
                completed = completed.saturating_add(1);
            }
        }
        days.push(DayCompletion {
            date,
            completed,
            total,
        });
    }
    days
}

/// Share of logged records marked completed, `None` when nothing was logged.
pub fn completion_rate(days: &[DayCompletion]) -> Option<f64> {
    let total: u32 = days.iter().map(|day| day.total).sum();
    if total == 0 {
        return None;
    }
    let completed: u32 = days.iter().map(|day| day.completed).sum();
    Some(f64::from(completed) / f64::from(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, completed: bool) -> DailyRecord {
        DailyRecord {
            id: 1,
            date,
            completed,
            habit_id: Some(3),
            habit_name: None,
            user_id: None,
        }
    }

    #[test]
    fn last_7_days_includes_each_day_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let two_days_ago = today - Duration::days(2);
        let records = vec![
            record(two_days_ago, true),
            record(two_days_ago, false),
            record(two_days_ago, true),
        ];

        let days = completion_last_7_days(today, &records);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, today - Duration::days(6));
        assert_eq!(days[6].date, today);

        let point = days
            .iter()
            .find(|day| day.date == two_days_ago)
            .expect("missing day");
        assert_eq!(point.completed, 2);
        assert_eq!(point.total, 3);
    }

    #[test]
    fn records_outside_the_window_are_ignored() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let records = vec![record(today - Duration::days(7), true), record(today + Duration::days(1), true)];
        let days = completion_last_7_days(today, &records);
        assert!(days.iter().all(|day| day.total == 0));
        assert_eq!(completion_rate(&days), None);
    }

    #[test]
    fn completion_rate_covers_the_whole_week() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let records = vec![
            record(today, true),
            record(today - Duration::days(1), false),
            record(today - Duration::days(3), true),
            record(today - Duration::days(3), true),
        ];
        let days = completion_last_7_days(today, &records);
        assert_eq!(completion_rate(&days), Some(0.75));
    }
}
