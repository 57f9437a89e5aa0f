//! QR label display and scanning.

mod code_modal;
mod scanner;

pub use code_modal::{QrCodeModal, QrCodeModalProps};
pub use scanner::{QrScanner, QrScannerProps};

const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.5);z-index:9999;display:flex;align-items:center;justify-content:center;";
