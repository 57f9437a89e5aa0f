//! Shared model and client-side pipelines for the inventory dashboard.
//!
//! Everything in this crate is free of browser and server dependencies so the
//! same logic runs inside the yew frontend, inside the actix host, and under
//! `cargo test`.
//!
//! - `model`: records, typed forms, identity tokens, permission snapshots.
//! - `import`: CSV bulk-import parsing, row validation and the importer session.
//! - `identity`: QR payload codec, label rendering and the scanner state machine.
//! - `auth`: the session object and the permission predicate.
//! - `filters`: record list filtering, including scanned identities.
//! - `reports`: notifications, dashboard statistics and CSV export.
//! - `requests`: payloads exchanged between the frontend and the host.

pub mod auth;
pub mod filters;
pub mod identity;
pub mod import;
pub mod model;
pub mod reports;
pub mod requests;
