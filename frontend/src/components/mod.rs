pub mod activity;
pub mod dashboard;
pub mod importer;
pub mod inventory;
pub mod qr;
pub mod record_form;
pub mod users;
