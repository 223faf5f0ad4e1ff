//! Consultation date filtering and grouping.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Consultation;

/// Date filter of the consultation dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    Upcoming,
    Past,
    All,
}

/// Start of the UTC calendar day containing `now`.
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

/// Keep consultations matching the filter. Today's meetings match both
/// `Upcoming` and `Past`; days are UTC.
pub fn filter_consultations(
    consultations: &[Consultation],
    filter: DateFilter,
    now: DateTime<Utc>,
) -> Vec<Consultation> {
    let today = start_of_day(now);
    let tomorrow = today + Duration::days(1);
    consultations
        .iter()
        .filter(|c| match filter {
            DateFilter::Upcoming => c.consultation_date > today,
            DateFilter::Past => c.consultation_date < tomorrow,
            DateFilter::All => true,
        })
        .cloned()
        .collect()
}

/// Consultations held on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub consultations: Vec<Consultation>,
}

/// Group by calendar day. Days ascend, except for `Past` where the most
/// recent day comes first; meetings inside a day are always in time order.
pub fn group_by_date(consultations: &[Consultation], filter: DateFilter) -> Vec<DateGroup> {
    let mut sorted = consultations.to_vec();
    sorted.sort_by_key(|c| c.consultation_date);

    let mut groups: Vec<DateGroup> = Vec::new();
    for consultation in sorted {
        let date = consultation.consultation_date.date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.consultations.push(consultation),
            _ => groups.push(DateGroup {
                date,
                consultations: vec![consultation],
            }),
        }
    }
    if filter == DateFilter::Past {
        groups.reverse();
    }
    groups
}

/// Next consultations from now on, soonest first.
pub fn upcoming_consultations(
    consultations: &[Consultation],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Consultation> {
    let mut upcoming: Vec<Consultation> = consultations
        .iter()
        .filter(|c| c.consultation_date >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|c| c.consultation_date);
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn consultation(id: i64, date: DateTime<Utc>) -> Consultation {
        Consultation {
            id,
            project: 1,
            teacher: 20,
            teacher_name: String::new(),
            notes: None,
            consultation_date: date,
            created_at: None,
        }
    }

    fn ids(list: &[Consultation]) -> Vec<i64> {
        list.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_filter_includes_today_on_both_sides() {
        let now = at(10, 12);
        let list = vec![
            consultation(1, at(9, 15)),
            consultation(2, at(10, 8)),
            consultation(3, at(10, 16)),
            consultation(4, at(11, 9)),
        ];
        assert_eq!(ids(&filter_consultations(&list, DateFilter::Upcoming, now)), vec![2, 3, 4]);
        assert_eq!(ids(&filter_consultations(&list, DateFilter::Past, now)), vec![1, 2, 3]);
        assert_eq!(filter_consultations(&list, DateFilter::All, now).len(), 4);
    }

    #[test]
    fn test_group_by_date_direction() {
        let list = vec![
            consultation(1, at(12, 9)),
            consultation(2, at(10, 14)),
            consultation(3, at(10, 9)),
        ];
        let ascending = group_by_date(&list, DateFilter::Upcoming);
        assert_eq!(ascending.len(), 2);
        assert_eq!(ascending[0].date, at(10, 0).date_naive());
        assert_eq!(ids(&ascending[0].consultations), vec![3, 2]);

        let descending = group_by_date(&list, DateFilter::Past);
        assert_eq!(descending[0].date, at(12, 0).date_naive());
        assert_eq!(ids(&descending[1].consultations), vec![3, 2]);
    }

    #[test]
    fn test_upcoming_consultations() {
        let now = at(10, 12);
        let list = vec![
            consultation(1, at(10, 8)),
            consultation(2, at(14, 8)),
            consultation(3, at(11, 8)),
            consultation(4, at(20, 8)),
        ];
        assert_eq!(ids(&upcoming_consultations(&list, now, 2)), vec![3, 2]);
    }
}
