use common::identity::{render_svg, QR_MODULE_SIZE};
use common::model::identity::IdentityToken;
use yew::prelude::*;

use crate::helpers::show_error_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct QrCodeModalProps {
    pub token: IdentityToken,
    pub on_close: Callback<()>,
}

/// Shows the QR label of one record, with print and PNG download actions.
pub struct QrCodeModal {
    svg: Option<AttrValue>,
}

impl QrCodeModal {
    fn render(token: &IdentityToken) -> Option<AttrValue> {
        match render_svg(token, QR_MODULE_SIZE) {
            Ok(svg) => Some(AttrValue::from(svg)),
            Err(e) => {
                gloo_console::error!(format!("QR rendering failed for {}: {}", token.id, e));
                show_error_toast(&e.to_string());
                None
            }
        }
    }

    fn png_url(token: &IdentityToken) -> String {
        let name: String = js_sys::encode_uri_component(&token.name).into();
        let id: String = js_sys::encode_uri_component(&token.id).into();
        format!("/api/labels/{}/{}?name={}", token.item_type, id, name)
    }
}

impl Component for QrCodeModal {
    type Message = ();
    type Properties = QrCodeModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            svg: Self::render(&ctx.props().token),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().token != old_props.token {
            self.svg = Self::render(&ctx.props().token);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let token = &ctx.props().token;
        let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());
        let on_print = Callback::from(|_: MouseEvent| {
            if let Some(window) = web_sys::window() {
                window.print().ok();
            }
        });

        html! {
            <div class="dialog-overlay" style={super::OVERLAY_STYLE}>
                <div class="dialog qr-dialog printable-area">
                    <div class="dialog-header no-print">
                        <h3>{"Item QR Code"}</h3>
                        <button class="icon-btn" title="Close" onclick={on_close.clone()}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    <div class="qr-code">
                        {
                            match &self.svg {
                                Some(svg) => Html::from_html_unchecked(svg.clone()),
                                None => html! { <p>{"QR code unavailable."}</p> },
                            }
                        }
                    </div>
                    <p class="qr-name">{token.name.clone()}</p>
                    <p class="qr-id">{format!("{} #{}", token.item_type, token.id)}</p>
                    <div class="dialog-footer no-print">
                        <a class="text-btn" href={Self::png_url(token)} download="label.png">{"Download PNG"}</a>
                        <button class="text-btn" onclick={on_close}>{"Close"}</button>
                        <button class="primary-btn" onclick={on_print}>{"Print"}</button>
                    </div>
                </div>
            </div>
        }
    }
}
