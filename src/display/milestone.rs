//! Milestone overdue determination, deadline messages and ordering.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{BadgeColor, Locale};
use crate::models::{Milestone, MilestoneStatus};

const DAY_MS: i64 = 86_400_000;

/// How far ahead the dashboard looks for upcoming milestones.
const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Maximum number of entries in a dashboard "upcoming" list.
pub const UPCOMING_LIMIT: usize = 5;

/// A milestone is overdue when its deadline has passed and it is not completed.
///
/// The stored `overdue` status plays no part here.
pub fn is_overdue(status: MilestoneStatus, deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deadline < now && status != MilestoneStatus::Completed
}

/// Whole days until the deadline, rounded up.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (deadline - now).num_milliseconds();
    let days = diff.div_euclid(DAY_MS);
    if diff.rem_euclid(DAY_MS) == 0 {
        days
    } else {
        days + 1
    }
}

/// "N days remaining", "N days overdue" or "due today".
pub fn days_message(deadline: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let days = days_until(deadline, now);
    match locale {
        Locale::Cs => {
            if days > 0 {
                format!("{} {} zbývá", days, czech_days(days))
            } else if days < 0 {
                format!("{} {} po termínu", -days, czech_days(-days))
            } else {
                "Dnes je termín".to_string()
            }
        }
        Locale::En => {
            let unit = |n: i64| if n == 1 { "day" } else { "days" };
            if days > 0 {
                format!("{} {} remaining", days, unit(days))
            } else if days < 0 {
                format!("{} {} overdue", -days, unit(-days))
            } else {
                "Due today".to_string()
            }
        }
    }
}

fn czech_days(n: i64) -> &'static str {
    match n {
        1 => "den",
        2..=4 => "dny",
        _ => "dní",
    }
}

/// Badge color for a stored milestone status.
pub fn milestone_status_color(status: MilestoneStatus) -> BadgeColor {
    match status {
        MilestoneStatus::NotStarted => BadgeColor::Gray,
        MilestoneStatus::InProgress => BadgeColor::Blue,
        MilestoneStatus::Completed => BadgeColor::Green,
        MilestoneStatus::Overdue => BadgeColor::Red,
        MilestoneStatus::Unknown => BadgeColor::Gray,
    }
}

/// Local label of a milestone status.
pub fn milestone_status_label(status: MilestoneStatus, locale: Locale) -> &'static str {
    match (locale, status) {
        (Locale::Cs, MilestoneStatus::NotStarted) => "Nezahájeno",
        (Locale::Cs, MilestoneStatus::InProgress) => "Rozpracováno",
        (Locale::Cs, MilestoneStatus::Completed) => "Dokončeno",
        (Locale::Cs, MilestoneStatus::Overdue) => "Po termínu",
        (Locale::Cs, MilestoneStatus::Unknown) => "Neznámý stav",
        (Locale::En, MilestoneStatus::NotStarted) => "Not started",
        (Locale::En, MilestoneStatus::InProgress) => "In progress",
        (Locale::En, MilestoneStatus::Completed) => "Completed",
        (Locale::En, MilestoneStatus::Overdue) => "Overdue",
        (Locale::En, MilestoneStatus::Unknown) => "Unknown",
    }
}

/// Reconciled display state of one milestone.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MilestoneDisplay {
    pub overdue: bool,
    pub status: MilestoneStatus,
    pub label: String,
    pub color: BadgeColor,
    pub days_message: String,
    pub completion: i64,
}

/// Reconcile the stored status with the derived overdue check.
///
/// The derived check always wins. A stored `overdue` whose deadline has
/// since moved into the future falls back to `in_progress` or `not_started`
/// depending on completion.
pub fn milestone_display(milestone: &Milestone, now: DateTime<Utc>, locale: Locale) -> MilestoneDisplay {
    let overdue = is_overdue(milestone.status, milestone.deadline, now);
    let completion = milestone.completion_or_zero();

    let (status, label) = if overdue {
        (
            MilestoneStatus::Overdue,
            milestone_status_label(MilestoneStatus::Overdue, locale).to_string(),
        )
    } else if milestone.status == MilestoneStatus::Overdue {
        let fallback = if completion > 0 {
            MilestoneStatus::InProgress
        } else {
            MilestoneStatus::NotStarted
        };
        (fallback, milestone_status_label(fallback, locale).to_string())
    } else if milestone.status_display.is_empty() {
        (
            milestone.status,
            milestone_status_label(milestone.status, locale).to_string(),
        )
    } else {
        (milestone.status, milestone.status_display.clone())
    };

    MilestoneDisplay {
        overdue,
        status,
        label,
        color: milestone_status_color(status),
        days_message: days_message(milestone.deadline, now, locale),
        completion,
    }
}

/// Ordering bucket for the milestone dashboard: overdue first, completed last.
fn priority(milestone: &Milestone, now: DateTime<Utc>) -> u8 {
    if milestone.status == MilestoneStatus::Overdue
        || is_overdue(milestone.status, milestone.deadline, now)
    {
        return 0;
    }
    match milestone.status {
        MilestoneStatus::InProgress => 1,
        MilestoneStatus::NotStarted => 2,
        _ => 3,
    }
}

/// Sort by priority bucket, then by earlier deadline.
pub fn sort_milestones(milestones: &mut [Milestone], now: DateTime<Utc>) {
    milestones.sort_by(|a, b| {
        priority(a, now)
            .cmp(&priority(b, now))
            .then(a.deadline.cmp(&b.deadline))
    });
}

/// Per-status counts shown above the milestone list.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MilestoneSummary {
    pub overdue: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn summarize_milestones(milestones: &[Milestone], now: DateTime<Utc>) -> MilestoneSummary {
    let mut summary = MilestoneSummary::default();
    for milestone in milestones {
        let overdue = is_overdue(milestone.status, milestone.deadline, now);
        match milestone.status {
            MilestoneStatus::Completed => summary.completed += 1,
            _ if overdue => summary.overdue += 1,
            MilestoneStatus::NotStarted => summary.not_started += 1,
            MilestoneStatus::InProgress => summary.in_progress += 1,
            _ => {}
        }
    }
    summary
}

/// Unfinished milestones due within the next 30 days, soonest first.
pub fn upcoming_milestones(milestones: &[Milestone], now: DateTime<Utc>) -> Vec<Milestone> {
    let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut upcoming: Vec<Milestone> = milestones
        .iter()
        .filter(|m| {
            m.deadline >= now && m.deadline <= horizon && m.status != MilestoneStatus::Completed
        })
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.deadline.cmp(&b.deadline));
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// The completion value to send, or `None` when it equals the persisted one.
pub fn pending_completion(persisted: Option<i64>, requested: i64) -> Option<i64> {
    if requested == persisted.unwrap_or(0) {
        None
    } else {
        Some(requested)
    }
}
