use common::model::identity::ItemType;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast};

use super::messages::Msg;
use super::state::RecordFormDialog;

pub(super) fn noun(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Chemical => "Chemical",
        ItemType::Waste => "Waste",
    }
}

pub fn update(component: &mut RecordFormDialog, ctx: &Context<RecordFormDialog>, msg: Msg) -> bool {
    match msg {
        Msg::SetField { field, value } => {
            component.form.set(field, value);
            true
        }
        Msg::Save => {
            if component.saving {
                return false;
            }
            let payload = match component.form.validate() {
                Ok(payload) => payload,
                Err(errors) => {
                    component.errors = errors;
                    show_error_toast("Please fix the highlighted fields.");
                    return true;
                }
            };
            component.errors = Default::default();
            component.saving = true;

            let props = ctx.props();
            let token = props.access_token.to_string();
            let item_type = component.form.item_type();
            let record_id = props.record_id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match record_id {
                    Some(id) => api::update_item(&token, item_type, &id, &payload).await,
                    None => api::create_item(&token, item_type, &payload).await,
                };
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(result) => {
            component.saving = false;
            let item_type = component.form.item_type();
            match result {
                Ok(()) => {
                    let verb = if ctx.props().record_id.is_some() { "updated" } else { "created" };
                    show_toast(&format!("{} {} successfully", noun(item_type), verb));
                    ctx.props().on_saved.emit(());
                    ctx.props().on_close.emit(());
                }
                Err(e) => {
                    gloo_console::error!(format!("Saving {} failed: {}", item_type, e));
                    show_error_toast(&format!("Error saving {}", item_type));
                }
            }
            true
        }
        Msg::Close => {
            if component.saving {
                return false;
            }
            ctx.props().on_close.emit(());
            false
        }
    }
}
