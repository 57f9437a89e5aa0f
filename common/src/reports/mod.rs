//! Derived views over the current record lists: notifications, dashboard
//! statistics and CSV exports.
//!
//! Everything here is computed from lists already fetched by the caller and a
//! caller-supplied `today`, so results do not depend on the host clock.

pub mod export;
pub mod notifications;
pub mod stats;

pub use export::{export_csv, report_file_name, DateRange, Exportable, ExportError};
pub use notifications::notifications;
pub use stats::{
    category_counts, dashboard_stats, monthly_activity, status_counts, CategoryCount,
    MonthlyActivity,
};
