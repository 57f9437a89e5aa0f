use common::model::record_form::{FieldKind, FormField};
use common::model::waste::WasteStatus;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::RecordFormDialog;
use super::update::noun;

const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.5);z-index:9999;display:flex;align-items:center;justify-content:center;";

pub fn view(component: &RecordFormDialog, ctx: &Context<RecordFormDialog>) -> Html {
    let link = ctx.link();
    let editing = ctx.props().record_id.is_some();
    let item_type = noun(component.form.item_type());
    let title = format!("{} {}", if editing { "Edit" } else { "Add" }, item_type);
    let submit_label = if component.saving {
        "Saving...".to_string()
    } else if editing {
        format!("Update {}", item_type)
    } else {
        format!("Create {}", item_type)
    };
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Save
    });

    html! {
        <div class="dialog-overlay" style={OVERLAY_STYLE}>
            <form class="dialog record-dialog" {onsubmit}>
                <div class="dialog-header">
                    <h3>{title}</h3>
                    <button type="button" class="icon-btn" title="Close" onclick={link.callback(|_| Msg::Close)}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                <div class="form-grid">
                    { for component.form.fields().iter().map(|field| build_field(component, link, field)) }
                </div>
                <div class="dialog-footer">
                    <button
                        type="button"
                        class="text-btn"
                        disabled={component.saving}
                        onclick={link.callback(|_| Msg::Close)}
                    >
                        {"Cancel"}
                    </button>
                    <button type="submit" class="primary-btn" disabled={component.saving}>
                        {submit_label}
                    </button>
                </div>
            </form>
        </div>
    }
}

fn build_field(component: &RecordFormDialog, link: &Scope<RecordFormDialog>, field: &FormField) -> Html {
    let name = field.name;
    let value = component.form.value(name).to_string();
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };
    let error = component.errors.get(name).map(str::to_string);

    let control = match field.kind {
        FieldKind::Category | FieldKind::Status => {
            let onchange = link.callback(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                Msg::SetField { field: name, value: select.value() }
            });
            let options: Vec<&'static str> = if field.kind == FieldKind::Status {
                WasteStatus::ALL.iter().map(|s| s.as_str()).collect()
            } else {
                component.form.categories().to_vec()
            };
            html! {
                <select {onchange}>
                    <option value="" selected={value.is_empty()}>{"Select..."}</option>
                    { for options.into_iter().map(|option| html! {
                        <option value={option} selected={value == option}>{option}</option>
                    }) }
                </select>
            }
        }
        kind => {
            let input_type = match kind {
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                FieldKind::Url => "url",
                _ => "text",
            };
            let oninput = link.callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::SetField { field: name, value: input.value() }
            });
            html! {
                <input type={input_type} step={(kind == FieldKind::Number).then_some("any")} {value} {oninput} />
            }
        }
    };

    html! {
        <label class="form-field">
            <span>{label}</span>
            { control }
            if let Some(error) = error {
                <span class="field-error">{error}</span>
            }
        </label>
    }
}
