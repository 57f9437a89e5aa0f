use super::encode;
use crate::model::identity::IdentityToken;
use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

/// Pixel size of one QR module in rendered labels.
pub const QR_MODULE_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not build a QR code for this item: {0}")]
pub struct RenderError(#[from] pub QrError);

/// Builds the QR symbol carrying `token`'s payload.
pub fn qr_code(token: &IdentityToken) -> Result<QrCode, RenderError> {
    Ok(QrCode::with_error_correction_level(encode(token), EcLevel::M)?)
}

/// Renders the label as a standalone SVG document.
pub fn render_svg(token: &IdentityToken, module_size: u32) -> Result<String, RenderError> {
    let code = qr_code(token)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .module_dimensions(module_size, module_size)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identity::ItemType;

    #[test]
    fn svg_is_a_complete_document() {
        let token = IdentityToken::new("c1", ItemType::Chemical, "Acetone");
        let svg = render_svg(&token, QR_MODULE_SIZE).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn larger_modules_make_larger_images() {
        let token = IdentityToken::new("c1", ItemType::Chemical, "Acetone");
        let small = qr_code(&token).unwrap().width();
        assert!(small >= 21);
        let a = render_svg(&token, 2).unwrap();
        let b = render_svg(&token, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn oversized_payload_is_an_error() {
        let token = IdentityToken::new("c1", ItemType::Chemical, "x".repeat(5000));
        assert!(render_svg(&token, QR_MODULE_SIZE).is_err());
    }
}
