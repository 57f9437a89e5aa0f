use common::auth::Session;
use common::model::chemical::CHEMICAL_REQUIRED_FIELDS;
use common::model::identity::ItemType;
use common::model::profile::{capabilities, UserProfile};
use common::model::waste::WASTE_REQUIRED_FIELDS;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::activity::ActivityLog;
use crate::components::dashboard::Dashboard;
use crate::components::inventory::InventoryList;
use crate::components::users::UserManagement;

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Dashboard,
    List {
        item_type: ItemType,
        search: Option<String>,
    },
    Activity,
    Users,
}

pub enum Msg {
    ProfileLoaded(Result<UserProfile, String>),
    Navigate(Page),
    SignOut,
}

/// Root component. Owns the session and hands it to every page through a
/// context provider.
pub struct App {
    session: Session,
    page: Page,
}

fn required_fields(item_type: ItemType) -> Vec<String> {
    let fields: &[&str] = match item_type {
        ItemType::Chemical => &CHEMICAL_REQUIRED_FIELDS,
        ItemType::Waste => &WASTE_REQUIRED_FIELDS,
    };
    fields.iter().map(|f| f.to_string()).collect()
}

fn list_label(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Chemical => "Chemicals",
        ItemType::Waste => "Waste",
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let session = match api::stored_user() {
            Some(user) => {
                let token = user.access_token.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::ProfileLoaded(api::fetch_profile(&token).await));
                });
                let mut session = Session::pending();
                session.on_auth_state_change(Some(user));
                session
            }
            None => Session::anonymous(),
        };
        Self {
            session,
            page: Page::Dashboard,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ProfileLoaded(result) => {
                let profile = match result {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        gloo_console::warn!(format!("Failed to fetch user profile: {}", e));
                        None
                    }
                };
                // The user may have signed out while the profile was in flight.
                let Some(user) = self.session.user().cloned() else {
                    return false;
                };
                self.session = Session::establish(user, profile);
                true
            }
            Msg::Navigate(page) => {
                self.page = page;
                true
            }
            Msg::SignOut => {
                api::clear_stored_user();
                self.session.sign_out();
                self.page = Page::Dashboard;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab = |label: &str, page: Page| {
            let active = match (&self.page, &page) {
                (Page::Dashboard, Page::Dashboard) => true,
                (Page::List { item_type: a, .. }, Page::List { item_type: b, .. }) => a == b,
                (Page::Activity, Page::Activity) | (Page::Users, Page::Users) => true,
                _ => false,
            };
            html! {
                <button
                    class={classes!("tab", active.then_some("active"))}
                    onclick={link.callback(move |_| Msg::Navigate(page.clone()))}
                >
                    {label.to_string()}
                </button>
            }
        };

        html! {
            <ContextProvider<Session> context={self.session.clone()}>
                <header class="app-header">
                    <h1>{"Waste & Chemical Dashboard"}</h1>
                    <nav>
                        { tab("Dashboard", Page::Dashboard) }
                        { for ItemType::ALL.into_iter().map(|item_type| {
                            tab(list_label(item_type), Page::List { item_type, search: None })
                        }) }
                        if self.session.is_signed_in() {
                            { tab("Activity", Page::Activity) }
                        }
                        if self.session.can(capabilities::USERS_MANAGE) {
                            { tab("Users", Page::Users) }
                        }
                    </nav>
                    { self.build_account(link) }
                </header>
                <main>
                    {
                        match &self.page {
                            Page::Dashboard => html! {
                                <Dashboard on_navigate={link.callback(|(item_type, search): (ItemType, String)| {
                                    Msg::Navigate(Page::List { item_type, search: Some(search) })
                                })} />
                            },
                            Page::List { item_type, search } => html! {
                                <InventoryList
                                    item_type={*item_type}
                                    required_fields={required_fields(*item_type)}
                                    search={search.clone()}
                                />
                            },
                            Page::Activity => html! { <ActivityLog /> },
                            Page::Users => html! { <UserManagement /> },
                        }
                    }
                </main>
            </ContextProvider<Session>>
        }
    }
}

impl App {
    fn build_account(&self, link: &yew::html::Scope<Self>) -> Html {
        if self.session.is_loading() {
            return html! { <span class="hint">{"Loading..."}</span> };
        }
        match self.session.user() {
            Some(user) => {
                let role = self
                    .session
                    .profile()
                    .and_then(|p| p.role.clone())
                    .unwrap_or_default();
                html! {
                    <div class="account">
                        <span>{user.email.clone().unwrap_or_else(|| user.id.clone())}</span>
                        if !role.is_empty() {
                            <span class="role">{role}</span>
                        }
                        <button class="text-btn" onclick={link.callback(|_| Msg::SignOut)}>
                            {"Sign out"}
                        </button>
                    </div>
                }
            }
            None => html! { <span class="hint">{"Not signed in"}</span> },
        }
    }
}
