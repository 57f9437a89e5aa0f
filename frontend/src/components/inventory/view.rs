use common::model::chemical::{Chemical, CHEMICAL_CATEGORIES};
use common::model::identity::{IdentityToken, ItemType};
use common::model::profile::Action;
use common::model::waste::{Waste, WasteStatus, WASTE_CATEGORIES};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::{InventoryList, Msg};
use crate::components::importer::CsvImporter;
use crate::components::qr::{QrCodeModal, QrScanner};
use crate::components::record_form::RecordFormDialog;

pub fn view(component: &InventoryList, ctx: &Context<InventoryList>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let item_type = props.item_type;

    if !component.session.is_signed_in() {
        return html! { <p class="hint">{"Sign in to see the inventory."}</p> };
    }

    html! {
        <div class="inventory">
            { build_toolbar(component, link, item_type) }
            { build_filters(component, link, item_type) }
            if component.loading {
                <p class="hint">{"Loading..."}</p>
            }
            {
                match item_type {
                    ItemType::Chemical => build_chemical_table(component, link),
                    ItemType::Waste => build_waste_table(component, link),
                }
            }
            if component.show_importer {
                <CsvImporter
                    {item_type}
                    required_fields={props.required_fields.clone()}
                    access_token={AttrValue::from(component.session.access_token().unwrap_or_default().to_string())}
                    on_close={link.callback(|_| Msg::CloseImporter)}
                    on_imported={link.callback(Msg::Imported)}
                />
            }
            if component.show_scanner {
                <QrScanner
                    expected={item_type}
                    on_scan={link.callback(Msg::Scanned)}
                    on_close={link.callback(|_| Msg::CloseScanner)}
                />
            }
            if let Some((record_id, form)) = component.form.clone() {
                <RecordFormDialog
                    {form}
                    {record_id}
                    access_token={AttrValue::from(component.session.access_token().unwrap_or_default().to_string())}
                    on_close={link.callback(|_| Msg::CloseForm)}
                    on_saved={link.callback(|_| Msg::Load)}
                />
            }
            if let Some(token) = component.qr_token.clone() {
                <QrCodeModal {token} on_close={link.callback(|_| Msg::CloseQr)} />
            }
        </div>
    }
}

fn build_toolbar(component: &InventoryList, link: &Scope<InventoryList>, item_type: ItemType) -> Html {
    let title = match item_type {
        ItemType::Chemical => "Chemical Inventory",
        ItemType::Waste => "Waste Records",
    };
    html! {
        <div class="toolbar">
            <h2>{title}</h2>
            <button class="text-btn" onclick={link.callback(|_| Msg::OpenScanner)}>
                <i class="material-icons">{"qr_code_scanner"}</i>{"Scan QR"}
            </button>
            if component.can(item_type, Action::Create) {
                <button class="text-btn" onclick={link.callback(|_| Msg::OpenImporter)}>
                    <i class="material-icons">{"upload_file"}</i>{"Import CSV"}
                </button>
                <button class="primary-btn" onclick={link.callback(|_| Msg::OpenCreate)}>
                    <i class="material-icons">{"add"}</i>{"Add"}
                </button>
            }
        </div>
    }
}

fn build_filters(component: &InventoryList, link: &Scope<InventoryList>, item_type: ItemType) -> Html {
    let filter = &component.filter;
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetSearch(input.value())
    });
    let on_category = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetCategory(select.value())
    });
    let categories: &[&str] = match item_type {
        ItemType::Chemical => &CHEMICAL_CATEGORIES,
        ItemType::Waste => &WASTE_CATEGORIES,
    };
    let selected = filter.category.clone().unwrap_or_default();

    html! {
        <div class="filters">
            <input
                type="search"
                placeholder="Search by name"
                value={filter.search.clone()}
                {oninput}
            />
            <select onchange={on_category}>
                <option value="" selected={selected.is_empty()}>{"All categories"}</option>
                { for categories.iter().map(|c| html! {
                    <option value={*c} selected={selected == *c}>{*c}</option>
                }) }
            </select>
            {
                match item_type {
                    ItemType::Chemical => html! {
                        <label>
                            <input
                                type="checkbox"
                                checked={filter.expiring_soon}
                                onchange={link.callback(|_| Msg::ToggleExpiring)}
                            />
                            {"Expiring soon"}
                        </label>
                    },
                    ItemType::Waste => build_status_select(component, link),
                }
            }
            if !filter.is_empty() {
                <button class="text-btn" onclick={link.callback(|_| Msg::ClearFilters)}>
                    {"Clear filters"}
                </button>
            }
        </div>
    }
}

fn build_status_select(component: &InventoryList, link: &Scope<InventoryList>) -> Html {
    let onchange = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetStatus(select.value())
    });
    let current = component.filter.status;
    html! {
        <select {onchange}>
            <option value="" selected={current.is_none()}>{"All statuses"}</option>
            { for WasteStatus::ALL.iter().map(|status| html! {
                <option value={status.as_str()} selected={current == Some(*status)}>
                    {status.as_str()}
                </option>
            }) }
        </select>
    }
}

fn row_actions(
    component: &InventoryList,
    link: &Scope<InventoryList>,
    item_type: ItemType,
    token: IdentityToken,
) -> Html {
    let id = token.id.clone();
    let edit_id = token.id.clone();
    html! {
        <td class="actions">
            <button class="icon-btn" title="Show QR code" onclick={link.callback(move |_| Msg::ShowQr(token.clone()))}>
                <i class="material-icons">{"qr_code"}</i>
            </button>
            if component.can(item_type, Action::Update) {
                <button class="icon-btn" title="Edit" onclick={link.callback(move |_| Msg::OpenEdit(edit_id.clone()))}>
                    <i class="material-icons">{"edit"}</i>
                </button>
            }
            if component.can(item_type, Action::Delete) {
                <button class="icon-btn" title="Delete" onclick={link.callback(move |_| Msg::Delete(id.clone()))}>
                    <i class="material-icons">{"delete"}</i>
                </button>
            }
        </td>
    }
}

fn build_chemical_table(component: &InventoryList, link: &Scope<InventoryList>) -> Html {
    let visible: Vec<&Chemical> = component
        .chemicals
        .iter()
        .filter(|c| component.filter.matches_chemical(c, component.today))
        .collect();
    if visible.is_empty() {
        return html! { <p class="hint">{"No chemicals found."}</p> };
    }
    html! {
        <table>
            <thead>
                <tr>
                    <th>{"Name"}</th><th>{"Category"}</th><th>{"Quantity"}</th>
                    <th>{"Expires"}</th><th>{"Location"}</th><th></th>
                </tr>
            </thead>
            <tbody>
                { for visible.into_iter().map(|c| {
                    let class = if c.is_low_on_stock() { "low-stock" } else { "" };
                    html! {
                        <tr {class}>
                            <td>{c.name.clone()}</td>
                            <td>{c.category.clone()}</td>
                            <td>{c.quantity}</td>
                            <td>{c.expiration_date.map(|d| d.to_string()).unwrap_or_default()}</td>
                            <td>{c.location.clone().unwrap_or_default()}</td>
                            { row_actions(component, link, ItemType::Chemical, c.identity()) }
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}

fn build_waste_table(component: &InventoryList, link: &Scope<InventoryList>) -> Html {
    let visible: Vec<&Waste> = component
        .waste
        .iter()
        .filter(|w| component.filter.matches_waste(w))
        .collect();
    if visible.is_empty() {
        return html! { <p class="hint">{"No waste records found."}</p> };
    }
    html! {
        <table>
            <thead>
                <tr>
                    <th>{"Name"}</th><th>{"Category"}</th><th>{"Quantity"}</th>
                    <th>{"Collection"}</th><th>{"Status"}</th><th></th>
                </tr>
            </thead>
            <tbody>
                { for visible.into_iter().map(|w| html! {
                    <tr>
                        <td>{w.name.clone()}</td>
                        <td>{w.category.clone()}</td>
                        <td>{w.quantity}</td>
                        <td>{w.collection_date.map(|d| d.to_string()).unwrap_or_default()}</td>
                        <td>{w.status.as_str()}</td>
                        { row_actions(component, link, ItemType::Waste, w.identity()) }
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
