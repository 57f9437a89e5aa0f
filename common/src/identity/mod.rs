//! QR identity labels: payload codec, SVG rendering and the scanner.

mod codec;
mod render;
mod scanner;

pub use codec::{decode, encode, DecodeError, ScannedIdentity, TypeMismatch};
pub use render::{qr_code, render_svg, RenderError, QR_MODULE_SIZE};
pub use scanner::{ScanOutcome, Scanner, ScannerState};
