//! Scanner dialog for QR labels.
//!
//! Handheld scanners act as keyboards: they type the decoded payload into the
//! focused input and finish with Enter. Each submitted payload goes through
//! the `common::identity::Scanner` state machine; only an accepted label
//! leaves the dialog, every other outcome is reported and scanning continues.

use common::identity::{ScanOutcome, Scanner};
use common::model::identity::{IdentityToken, ItemType};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::helpers::{show_error_toast, show_toast};

#[derive(Properties, PartialEq, Clone)]
pub struct QrScannerProps {
    /// Records the surrounding list holds; labels of other kinds are rejected.
    pub expected: ItemType,
    pub on_scan: Callback<IdentityToken>,
    pub on_close: Callback<()>,
}

pub enum Msg {
    Input(String),
    Submit,
    Close,
}

pub struct QrScanner {
    scanner: Scanner,
    payload: String,
    input_ref: NodeRef,
}

impl Component for QrScanner {
    type Message = Msg;
    type Properties = QrScannerProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut scanner = Scanner::new(ctx.props().expected);
        scanner.open();
        Self {
            scanner,
            payload: String::new(),
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(text) => {
                self.payload = text;
                true
            }
            Msg::Submit => {
                let payload = std::mem::take(&mut self.payload);
                let outcome = self.scanner.handle_payload(&payload);
                if let Some(message) = outcome.message() {
                    if outcome.is_error() {
                        show_error_toast(&message);
                    } else {
                        show_toast(&message);
                    }
                }
                if let ScanOutcome::Accepted(token) = outcome {
                    ctx.props().on_scan.emit(token);
                    ctx.props().on_close.emit(());
                }
                true
            }
            Msg::Close => {
                self.scanner.close();
                ctx.props().on_close.emit(());
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().expected != old_props.expected {
            self.scanner = Scanner::new(ctx.props().expected);
            self.scanner.open();
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
            input.focus().ok();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let oninput = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(input.value())
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then(|| {
                e.prevent_default();
                Msg::Submit
            })
        });

        html! {
            <div class="dialog-overlay" style={super::OVERLAY_STYLE}>
                <div class="dialog scanner-dialog">
                    <div class="dialog-header">
                        <h3>{format!("Scan {} QR Code", ctx.props().expected)}</h3>
                        <button class="icon-btn" title="Close" onclick={link.callback(|_| Msg::Close)}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    <p class="hint">{"Point the scanner at a label. The scan is read automatically."}</p>
                    <input
                        ref={self.input_ref.clone()}
                        type="text"
                        class="scanner-input"
                        autocomplete="off"
                        value={self.payload.clone()}
                        {oninput}
                        {onkeydown}
                    />
                </div>
            </div>
        }
    }
}
