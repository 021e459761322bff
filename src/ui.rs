use crate::models::{Alert, DailyRecord, DayCompletion, Goal, Habit};
use crate::state::Page;
use crate::stats::completion_rate;
use std::fmt::Write;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn habit_item(habit: &Habit) -> String {
    let mut item = format!(
        r#"<li class="list-group-item" data-id="{}"><strong>{}</strong>"#,
        habit.id,
        escape_html(&habit.name)
    );
    if let Some(frequency) = &habit.frequency {
        let _ = write!(item, r#" <span class="badge">{}</span>"#, escape_html(frequency));
    }
    if let Some(description) = &habit.description {
        let _ = write!(item, "<p>{}</p>", escape_html(description));
    }
    item.push_str("</li>");
    item
}

pub fn goal_item(goal: &Goal) -> String {
    let description = goal
        .description
        .as_deref()
        .map(|text| format!("<p>{}</p>", escape_html(text)))
        .unwrap_or_default();
    format!(
        r#"<li class="list-group-item" data-id="{}"><strong>{}</strong>{}</li>"#,
        goal.id,
        escape_html(&goal.name),
        description
    )
}

pub fn record_row(record: &DailyRecord) -> String {
    let habit = record
        .habit_name
        .clone()
        .or_else(|| record.habit_id.map(|id| format!("#{id}")))
        .unwrap_or_default();
    let status = if record.completed { "Completed" } else { "Pending" };
    format!(
        r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        record.id,
        record.date,
        escape_html(&habit),
        status
    )
}

pub fn alert_box(alert: &Alert) -> String {
    format!(
        r#"<div class="alert alert-{} alert-dismissible fade show">{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
        alert.kind.css_class(),
        escape_html(&alert.message)
    )
}

fn week_row(day: &DayCompletion) -> String {
    format!(
        "<tr><td>{}</td><td>{}/{}</td></tr>",
        day.date, day.completed, day.total
    )
}

fn join<T>(items: &[T], render: fn(&T) -> String) -> String {
    items.iter().map(render).collect::<Vec<_>>().join("\n")
}

pub fn render_page(page: &Page) -> String {
    let overlay = if page.loading {
        r#"<div class="loading-overlay"><div class="spinner" role="status">Loading...</div></div>"#
    } else {
        ""
    };
    fill_template(PAGE_HTML, |key| match key {
        "DATE" => Some(page.today.to_string()),
        "ALERTS" => Some(join(&page.alerts, alert_box)),
        "HABITS" => Some(join(&page.habits, habit_item)),
        "RECORDS" => Some(join(&page.records, record_row)),
        "GOALS" => Some(join(&page.goals, goal_item)),
        "WEEK" => Some(join(&page.week, week_row)),
        "OVERLAY" => Some(overlay.to_string()),
        _ => None,
    })
}

/// Replaces each `{{KEY}}` in `template` in one left-to-right pass.
/// Substituted text is never scanned again; unknown keys stay as written.
fn fill_template(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = &after[..close];
                match value(key) {
                    Some(text) => out.push_str(&text),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Plain-text rendering for terminals.
pub fn render_summary(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TrackUp - {}", page.today);

    let _ = writeln!(out, "\nHabits ({})", page.habits.len());
    for habit in &page.habits {
        let frequency = habit.frequency.as_deref().unwrap_or("-");
        let _ = writeln!(out, "  [{}] {} ({frequency})", habit.id, habit.name);
    }

    let _ = writeln!(out, "\nToday's records ({})", page.records.len());
    for record in &page.records {
        let mark = if record.completed { "x" } else { " " };
        let habit = record.habit_name.as_deref().unwrap_or("?");
        let _ = writeln!(out, "  [{mark}] {habit} (record {})", record.id);
    }

    let _ = writeln!(out, "\nGoals ({})", page.goals.len());
    for goal in &page.goals {
        let _ = writeln!(out, "  [{}] {}", goal.id, goal.name);
    }

    if let Some(rate) = completion_rate(&page.week) {
        let _ = writeln!(out, "\nLast 7 days: {:.0}% completed", rate * 100.0);
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>TrackUp</title>
</head>
<body>
  <div class="container">
    {{ALERTS}}
    <h1>TrackUp <small>{{DATE}}</small></h1>

    <section>
      <h2>Habits</h2>
      <ul id="habits-list" class="list-group">
{{HABITS}}
      </ul>
    </section>

    <section>
      <h2>Today</h2>
      <table id="records-table">
        <thead><tr><th>Date</th><th>Habit</th><th>Status</th></tr></thead>
        <tbody>
{{RECORDS}}
        </tbody>
      </table>
    </section>

    <section>
      <h2>Goals</h2>
      <ul id="goals-list" class="list-group">
{{GOALS}}
      </ul>
    </section>

    <section>
      <h2>Last 7 days</h2>
      <table id="week-table">
        <tbody>
{{WEEK}}
        </tbody>
      </table>
    </section>
  </div>
  {{OVERLAY}}
</body>
</html>
"#;
