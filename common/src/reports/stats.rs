use crate::filters::EXPIRY_WINDOW_DAYS;
use crate::model::chemical::Chemical;
use crate::model::notification::DashboardStats;
use crate::model::waste::{Waste, WasteStatus};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

/// Records created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// `Jan 2024` style label.
    pub name: String,
    pub chemicals: usize,
    pub waste: usize,
}

pub fn dashboard_stats(chemicals: &[Chemical], waste: &[Waste], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_waste: waste.len(),
        total_chemicals: chemicals.len(),
        expiring_chemicals: chemicals
            .iter()
            .filter(|c| c.expires_within(today, EXPIRY_WINDOW_DAYS))
            .count(),
        pending_waste: waste
            .iter()
            .filter(|w| w.status == WasteStatus::Pending)
            .count(),
    }
}

/// Number of records per category, sorted by category name.
pub fn category_counts<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for category in categories {
        *counts.entry(category).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, value)| CategoryCount {
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Waste per status in workflow order, with capitalised labels. Statuses
/// without any record are left out.
pub fn status_counts(waste: &[Waste]) -> Vec<CategoryCount> {
    WasteStatus::ALL
        .into_iter()
        .map(|status| (status, waste.iter().filter(|w| w.status == status).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(status, value)| CategoryCount {
            name: capitalize(status.as_str()),
            value,
        })
        .collect()
}

/// Creation counts per month, oldest month first. Records without a
/// creation time are not counted.
pub fn monthly_activity(chemicals: &[Chemical], waste: &[Waste]) -> Vec<MonthlyActivity> {
    let mut months: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for created in chemicals.iter().filter_map(|c| c.created_at) {
        months.entry(month_key(created)).or_default().0 += 1;
    }
    for created in waste.iter().filter_map(|w| w.created_at) {
        months.entry(month_key(created)).or_default().1 += 1;
    }
    months
        .into_iter()
        .filter_map(|((year, month), (chemicals, waste))| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyActivity {
                name: first.format("%b %Y").to_string(),
                chemicals,
                waste,
            })
        })
        .collect()
}

fn month_key(created: DateTime<Utc>) -> (i32, u32) {
    (created.year(), created.month())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chemicals() -> Vec<Chemical> {
        serde_json::from_str(
            r#"[
                {"id":"1","name":"HCl","category":"Acid","quantity":1,"expiration_date":"2024-06-20","created_at":"2024-01-15T10:00:00Z"},
                {"id":"2","name":"NaOH","category":"Base","quantity":1,"created_at":"2023-12-31T23:00:00Z"},
                {"id":"3","name":"H2SO4","category":"Acid","quantity":1,"expiration_date":"2024-09-01"}
            ]"#,
        )
        .unwrap()
    }

    fn waste() -> Vec<Waste> {
        serde_json::from_str(
            r#"[
                {"id":"w1","name":"Paper","category":"Recyclable","quantity":1,"status":"pending","created_at":"2024-01-02T08:00:00Z"},
                {"id":"w2","name":"Glass","category":"Recyclable","quantity":1,"status":"disposed"},
                {"id":"w3","name":"Cells","category":"Electronic","quantity":1,"status":"pending"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn dashboard_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            dashboard_stats(&chemicals(), &waste(), today),
            DashboardStats {
                total_waste: 3,
                total_chemicals: 3,
                expiring_chemicals: 1,
                pending_waste: 2,
            }
        );
    }

    #[test]
    fn categories_and_statuses_are_counted() {
        let chemicals = chemicals();
        let counts = category_counts(chemicals.iter().map(|c| c.category.as_str()));
        assert_eq!(
            counts,
            vec![
                CategoryCount { name: "Acid".into(), value: 2 },
                CategoryCount { name: "Base".into(), value: 1 },
            ]
        );
        assert_eq!(
            status_counts(&waste()),
            vec![
                CategoryCount { name: "Pending".into(), value: 2 },
                CategoryCount { name: "Disposed".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn months_are_chronological() {
        let months = monthly_activity(&chemicals(), &waste());
        assert_eq!(
            months,
            vec![
                MonthlyActivity { name: "Dec 2023".into(), chemicals: 1, waste: 0 },
                MonthlyActivity { name: "Jan 2024".into(), chemicals: 1, waste: 1 },
            ]
        );
    }
}
