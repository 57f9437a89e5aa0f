//! Dashboard page: headline counters, notifications, breakdowns and CSV
//! report export.
//!
//! Everything shown is computed in the browser from the two record lists.

use chrono::NaiveDate;
use common::auth::Session;
use common::filters::ListFilter;
use common::model::chemical::Chemical;
use common::model::identity::ItemType;
use common::model::notification::{Notification, NotificationKind};
use common::model::waste::Waste;
use common::reports::{
    category_counts, dashboard_stats, export_csv, monthly_activity, notifications,
    report_file_name, status_counts, CategoryCount, DateRange,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::context::ContextHandle;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{csv_data_url, show_error_toast, show_toast, today};

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardProps {
    /// Opens a list filtered by name; emitted by notification entries.
    pub on_navigate: Callback<(ItemType, String)>,
}

pub enum Msg {
    SessionChanged(Session),
    Load,
    Loaded {
        chemicals: Result<Vec<Chemical>, String>,
        waste: Result<Vec<Waste>, String>,
    },
    SetFrom(String),
    SetTo(String),
    Export(ItemType),
    Open(Notification),
}

pub struct Dashboard {
    session: Session,
    _session_handle: Option<ContextHandle<Session>>,
    chemicals: Vec<Chemical>,
    waste: Vec<Waste>,
    range: DateRange,
    today: NaiveDate,
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Starts a browser download of `csv` named `file_name`.
fn download(csv: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let body = document.body().ok_or("no body")?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "could not create link")?;
    anchor
        .set_attribute("href", &csv_data_url(csv))
        .and_then(|_| anchor.set_attribute("download", file_name))
        .map_err(|_| "could not set link target")?;
    let anchor: HtmlElement = anchor.unchecked_into();
    body.append_child(&anchor)
        .map_err(|_| "could not attach link")?;
    anchor.click();
    body.remove_child(&anchor).ok();
    Ok(())
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (session, handle) = match ctx
            .link()
            .context::<Session>(ctx.link().callback(Msg::SessionChanged))
        {
            Some((session, handle)) => (session, Some(handle)),
            None => (Session::anonymous(), None),
        };
        ctx.link().send_message(Msg::Load);
        Self {
            session,
            _session_handle: handle,
            chemicals: Vec::new(),
            waste: Vec::new(),
            range: DateRange::default(),
            today: today(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChanged(session) => {
                self.session = session;
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::Load => {
                let Some(token) = self.session.access_token().map(str::to_string) else {
                    self.chemicals.clear();
                    self.waste.clear();
                    return true;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let filter = ListFilter::default();
                    let chemicals = api::list_chemicals(&token, &filter).await;
                    let waste = api::list_waste(&token, &filter).await;
                    link.send_message(Msg::Loaded { chemicals, waste });
                });
                false
            }
            Msg::Loaded { chemicals, waste } => {
                match chemicals {
                    Ok(chemicals) => self.chemicals = chemicals,
                    Err(e) => gloo_console::error!(format!("Failed to fetch chemicals: {}", e)),
                }
                match waste {
                    Ok(waste) => self.waste = waste,
                    Err(e) => gloo_console::error!(format!("Failed to fetch waste: {}", e)),
                }
                true
            }
            Msg::SetFrom(value) => {
                self.range.from = parse_day(&value);
                false
            }
            Msg::SetTo(value) => {
                self.range.to = parse_day(&value);
                false
            }
            Msg::Export(item_type) => {
                let csv = match item_type {
                    ItemType::Chemical => export_csv(&self.chemicals, self.range),
                    ItemType::Waste => export_csv(&self.waste, self.range),
                };
                let result = csv
                    .map_err(|e| e.to_string())
                    .and_then(|csv| download(&csv, &report_file_name(item_type)));
                match result {
                    Ok(()) => show_toast("Report generated successfully."),
                    Err(message) => show_error_toast(&message),
                }
                false
            }
            Msg::Open(notification) => {
                if let Some(target) = notification.target() {
                    ctx.props().on_navigate.emit(target);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !self.session.is_signed_in() {
            return html! { <p class="hint">{"Sign in to see the dashboard."}</p> };
        }
        let link = ctx.link();
        let stats = dashboard_stats(&self.chemicals, &self.waste, self.today);
        let alerts = notifications(&self.chemicals, &self.waste, self.today);

        html! {
            <div class="dashboard">
                <div class="stat-cards">
                    { stat_card("Total Waste", stats.total_waste) }
                    { stat_card("Total Chemicals", stats.total_chemicals) }
                    { stat_card("Expiring Soon", stats.expiring_chemicals) }
                    { stat_card("Pending Collection", stats.pending_waste) }
                </div>
                { self.build_notifications(link, alerts) }
                <div class="breakdowns">
                    { breakdown("Chemicals by Category", category_counts(self.chemicals.iter().map(|c| c.category.as_str()))) }
                    { breakdown("Waste by Category", category_counts(self.waste.iter().map(|w| w.category.as_str()))) }
                    { breakdown("Waste by Status", status_counts(&self.waste)) }
                </div>
                { self.build_activity() }
                { self.build_reports(link) }
            </div>
        }
    }
}

fn stat_card(label: &str, value: usize) -> Html {
    html! {
        <div class="stat-card">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label.to_string()}</span>
        </div>
    }
}

fn breakdown(title: &str, counts: Vec<CategoryCount>) -> Html {
    html! {
        <div class="breakdown">
            <h4>{title.to_string()}</h4>
            if counts.is_empty() {
                <p class="hint">{"No data yet."}</p>
            } else {
                <ul>
                    { for counts.into_iter().map(|c| html! {
                        <li><span>{c.name}</span><span class="count">{c.value}</span></li>
                    }) }
                </ul>
            }
        </div>
    }
}

impl Dashboard {
    fn build_notifications(&self, link: &Scope<Self>, alerts: Vec<Notification>) -> Html {
        html! {
            <div class="notifications">
                <h3>{format!("Notifications ({})", alerts.len())}</h3>
                if alerts.is_empty() {
                    <p class="hint">{"No new notifications."}</p>
                } else {
                    <ul>
                        { for alerts.into_iter().map(|n| {
                            let icon = match n.kind {
                                NotificationKind::Expiring => "schedule",
                                NotificationKind::LowStock => "inventory_2",
                                NotificationKind::PendingWaste => "local_shipping",
                            };
                            let message = n.message.clone();
                            html! {
                                <li key={n.id.clone()} onclick={link.callback(move |_| Msg::Open(n.clone()))}>
                                    <i class="material-icons">{icon}</i>
                                    <span>{message}</span>
                                </li>
                            }
                        }) }
                    </ul>
                }
            </div>
        }
    }

    fn build_activity(&self) -> Html {
        let months = monthly_activity(&self.chemicals, &self.waste);
        html! {
            <div class="activity">
                <h4>{"Monthly Activity"}</h4>
                <table>
                    <thead>
                        <tr><th>{"Month"}</th><th>{"Chemicals"}</th><th>{"Waste"}</th></tr>
                    </thead>
                    <tbody>
                        { for months.into_iter().map(|m| html! {
                            <tr><td>{m.name}</td><td>{m.chemicals}</td><td>{m.waste}</td></tr>
                        }) }
                    </tbody>
                </table>
            </div>
        }
    }

    fn build_reports(&self, link: &Scope<Self>) -> Html {
        let on_from = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetFrom(input.value())
        });
        let on_to = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetTo(input.value())
        });
        html! {
            <div class="reports">
                <h3>{"Reports"}</h3>
                <label>{"From"}<input type="date" onchange={on_from} /></label>
                <label>{"To"}<input type="date" onchange={on_to} /></label>
                <button class="primary-btn" onclick={link.callback(|_| Msg::Export(ItemType::Chemical))}>
                    {"Export Chemicals"}
                </button>
                <button class="primary-btn" onclick={link.callback(|_| Msg::Export(ItemType::Waste))}>
                    {"Export Waste"}
                </button>
            </div>
        }
    }
}
