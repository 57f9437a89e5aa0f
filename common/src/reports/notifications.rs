use crate::filters::EXPIRY_WINDOW_DAYS;
use crate::model::chemical::Chemical;
use crate::model::notification::{Notification, NotificationKind};
use crate::model::waste::{Waste, WasteStatus};
use chrono::NaiveDate;

/// Builds the notification list: expiring chemicals, then chemicals at or
/// below their reorder level, then waste awaiting collection.
///
/// A chemical that is both expiring and low on stock yields two entries.
pub fn notifications(chemicals: &[Chemical], waste: &[Waste], today: NaiveDate) -> Vec<Notification> {
    let expiring = chemicals
        .iter()
        .filter(|c| c.expires_within(today, EXPIRY_WINDOW_DAYS))
        .map(|c| Notification {
            id: format!("exp-{}", c.id),
            kind: NotificationKind::Expiring,
            message: format!("'{}' is expiring soon.", c.name),
            link: format!("/chemicals?search={}", c.name),
        });

    let low_stock = chemicals
        .iter()
        .filter(|c| c.is_low_on_stock())
        .map(|c| Notification {
            id: format!("low-{}", c.id),
            kind: NotificationKind::LowStock,
            message: format!("'{}' is low on stock.", c.name),
            link: format!("/chemicals?search={}", c.name),
        });

    let pending = waste
        .iter()
        .filter(|w| w.status == WasteStatus::Pending)
        .map(|w| Notification {
            id: format!("pending-{}", w.id),
            kind: NotificationKind::PendingWaste,
            message: format!("'{}' is pending collection.", w.name),
            link: format!("/waste?search={}", w.name),
        });

    expiring.chain(low_stock).chain(pending).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn notifications_cover_each_kind_in_order() {
        let chemicals: Vec<Chemical> = serde_json::from_str(
            r#"[
                {"id":"1","name":"Ethanol","category":"Solvent","quantity":2,"reorder_level":5,"expiration_date":"2024-06-10"},
                {"id":"2","name":"Acetone","category":"Solvent","quantity":9,"reorder_level":5,"expiration_date":"2025-01-01"}
            ]"#,
        )
        .unwrap();
        let waste: Vec<Waste> = serde_json::from_str(
            r#"[
                {"id":"w1","name":"Batteries","category":"Electronic","quantity":1,"status":"pending"},
                {"id":"w2","name":"Paper","category":"Recyclable","quantity":1,"status":"collected"}
            ]"#,
        )
        .unwrap();

        let list = notifications(&chemicals, &waste, today());
        let ids: Vec<_> = list.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["exp-1", "low-1", "pending-w1"]);
        assert_eq!(list[0].message, "'Ethanol' is expiring soon.");
        assert_eq!(list[1].kind, NotificationKind::LowStock);
        assert_eq!(list[2].message, "'Batteries' is pending collection.");
        assert_eq!(list[2].link, "/waste?search=Batteries");
    }

    #[test]
    fn notification_serializes_kind_as_type() {
        let n = Notification {
            id: "low-3".into(),
            kind: NotificationKind::LowStock,
            message: "'X' is low on stock.".into(),
            link: "/chemicals?search=X".into(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "low_stock");
    }
}
