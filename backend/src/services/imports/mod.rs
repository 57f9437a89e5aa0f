//! Validates CSV bulk-import files before they are sent to the data API.
//!
//! The import dialog validates files in the browser as well; this endpoint lets
//! scripts and the dialog's drag-and-drop fallback check a file with exactly
//! the same rules and the required columns configured on the host.
//!
//! The provided routes are:
//! - `POST /api/imports/{entity}/preview`: Handles multipart/form-data uploads with a single
//!   `file` field. `entity` is `chemicals` or `waste`. The response is an `ImportPreview`
//!   with the total row count, the first rows, the first validation errors and the number
//!   of errors left out. Nothing is stored.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod preview;

const API_PATH: &str = "/api/imports";

/// Configures and returns the Actix scope for import routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{entity}/preview", post().to(preview::process))
}
