use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entries requested per page of `GET /api/activity-log`.
pub const ACTIVITY_LOG_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
}

/// One line of the audit trail, newest first as returned by the data API.
///
/// `action` is a verb followed by the record kind, e.g. `Created Waste`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub action: String,
    #[serde(default)]
    pub details: ActivityDetails,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Created,
    Updated,
    Deleted,
    Other,
}

impl ActivityEntry {
    pub fn kind(&self) -> ActivityKind {
        match self.action.split_whitespace().next() {
            Some("Created") => ActivityKind::Created,
            Some("Updated") => ActivityKind::Updated,
            Some("Deleted") => ActivityKind::Deleted,
            _ => ActivityKind::Other,
        }
    }

    /// `someone@lab.org created waste Paper.`; entries without a user are
    /// attributed to `System`.
    pub fn summary(&self) -> String {
        let actor = self.user_email.as_deref().unwrap_or("System");
        let action = self.action.to_lowercase();
        match self.details.name.as_deref() {
            Some(name) => format!("{} {} {}.", actor, action, name),
            None => format!("{} {}.", actor, action),
        }
    }

    /// Coarse age of the entry relative to `now`, e.g. `3 hours ago`.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        match self.created_at {
            Some(at) => relative_age(now.signed_duration_since(at).num_seconds()),
            None => String::new(),
        }
    }
}

fn relative_age(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (amount, unit) = match seconds {
        0..=59 => return "just now".to_string(),
        60..=3_599 => (seconds / 60, "minute"),
        3_600..=86_399 => (seconds / 3_600, "hour"),
        86_400..=2_591_999 => (seconds / 86_400, "day"),
        2_592_000..=31_535_999 => (seconds / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{} {}{} ago", amount, unit, plural)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "super::id_string")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(id)| id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(json: &str) -> ActivityEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn entry_reads_the_log_row() {
        let log = entry(
            r#"{"id":7,"user_email":"ana@lab.org","action":"Created Waste","details":{"name":"Paper","id":12},"created_at":"2024-06-01T10:00:00Z"}"#,
        );
        assert_eq!(log.id, "7");
        assert_eq!(log.details.id.as_deref(), Some("12"));
        assert_eq!(log.kind(), ActivityKind::Created);
        assert_eq!(log.summary(), "ana@lab.org created waste Paper.");
    }

    #[test]
    fn entry_without_user_or_details_is_from_system() {
        let log = entry(r#"{"id":"a1","action":"Maintenance"}"#);
        assert_eq!(log.kind(), ActivityKind::Other);
        assert_eq!(log.summary(), "System maintenance.");
        assert_eq!(log.age(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()), "");
    }

    #[test]
    fn age_is_coarse_and_pluralized() {
        let log = entry(r#"{"id":"a1","action":"Deleted Chemical","created_at":"2024-06-01T10:00:00Z"}"#);
        let at = |h, m| Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap();
        assert_eq!(log.age(at(10, 0)), "just now");
        assert_eq!(log.age(at(10, 1)), "1 minute ago");
        assert_eq!(log.age(at(13, 30)), "3 hours ago");
        assert_eq!(
            log.age(Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()),
            "2 days ago"
        );
        assert_eq!(log.age(at(9, 0)), "just now");
    }
}
