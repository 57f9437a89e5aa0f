//! # Label Service Module
//!
//! Serves printable QR labels for inventory records under `/api/labels`.
//!
//! ## Sub-modules:
//! - `png`: Renders the identity payload of one record as a PNG image.

mod png;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all label endpoints.
const API_PATH: &str = "/api/labels";

/// Configures and returns the Actix `Scope` for label routes.
///
/// # Registered Routes:
///
/// *   **`GET /{item_type}/{id}?name=...`**:
///     - **Handler**: `png::process`
///     - **Description**: Encodes `{"id", "type", "name"}` into a QR code and returns it
///       as `image/png`. `item_type` is `chemical` or `waste` (the plural collection name
///       is accepted too). Any other type is answered with `400 Bad Request`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{item_type}/{id}", get().to(png::process))
}
