//! # QR Label Rendering
//!
//! Backend side of the "Show QR code" action. The frontend renders the same
//! payload as SVG for display; this endpoint produces a raster image suitable
//! for label printers and for downloading.

use crate::config::Config;
use actix_web::{web, HttpResponse, Responder};
use common::identity::{qr_code, RenderError};
use common::model::identity::{IdentityToken, ItemType, UnknownItemType};
use common::requests::{ErrorResponse, LabelQuery};
use image::{ImageFormat, Luma};
use log::{error, info};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error(transparent)]
    UnknownType(#[from] UnknownItemType),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Could not encode the label image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Actix web handler for `GET /api/labels/{item_type}/{id}`.
///
/// # Returns
/// - `200 OK` with the PNG image.
/// - `400 Bad Request` for an unknown item type or a payload too large for a QR code.
/// - `500 Internal Server Error` if the image cannot be encoded.
pub async fn process(
    path: web::Path<(String, String)>,
    query: web::Query<LabelQuery>,
    config: web::Data<Config>,
) -> impl Responder {
    let (item_type, id) = path.into_inner();
    match render_label(&item_type, &id, &query.name, config.labels.module_size) {
        Ok(png) => HttpResponse::Ok().content_type("image/png").body(png),
        Err(e @ LabelError::Encode(_)) => {
            error!("Label for {} '{}' failed: {}", item_type, id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    }
}

/// Builds the identity token for the record and renders it as PNG bytes.
pub fn render_label(
    item_type: &str,
    id: &str,
    name: &str,
    module_size: u32,
) -> Result<Vec<u8>, LabelError> {
    let item_type: ItemType = item_type.parse()?;
    let token = IdentityToken::new(id, item_type, name);

    let image = qr_code(&token)?
        .render::<Luma<u8>>()
        .module_dimensions(module_size, module_size)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    info!("Rendered {} label for '{}' ({} bytes)", token.item_type, token.id, png.len());
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::App;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn label_is_a_png() {
        let png = render_label("chemical", "c1", "Acetone", 4).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = render_label("reagent", "c1", "", 4).unwrap_err();
        assert!(matches!(err, LabelError::UnknownType(_)));
        assert_eq!(err.to_string(), "unknown item type 'reagent'");
    }

    #[actix_web::test]
    async fn endpoint_serves_png_and_rejects_unknown_types() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(Config::default()))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/labels/waste/w-1?name=Used%20solvent")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "image/png"
        );
        let body = actix_test::read_body(resp).await;
        assert_eq!(body[..8], PNG_SIGNATURE);

        let req = actix_test::TestRequest::get()
            .uri("/api/labels/reagent/r-1")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
