//! Chemical and waste record lists.
//!
//! One component serves both lists; `item_type` picks the collection. The
//! session comes from the application context and gates the create, import
//! and delete actions.

use chrono::NaiveDate;
use common::auth::Session;
use common::filters::ListFilter;
use common::model::chemical::Chemical;
use common::model::identity::{IdentityToken, ItemType};
use common::model::profile::Action;
use common::model::record_form::RecordForm;
use common::model::waste::Waste;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast, today};

mod view;

#[derive(Properties, PartialEq, Clone)]
pub struct InventoryListProps {
    pub item_type: ItemType,

    /// Columns an imported CSV must fill for this list.
    pub required_fields: Vec<String>,

    /// Initial search text, e.g. from a notification link.
    #[prop_or_default]
    pub search: Option<String>,
}

pub enum Msg {
    SessionChanged(Session),
    Load,
    ChemicalsLoaded(Result<Vec<Chemical>, String>),
    WasteLoaded(Result<Vec<Waste>, String>),
    SetSearch(String),
    SetCategory(String),
    SetStatus(String),
    ToggleExpiring,
    ClearFilters,
    OpenCreate,
    OpenEdit(String),
    CloseForm,
    OpenImporter,
    CloseImporter,
    Imported(usize),
    OpenScanner,
    CloseScanner,
    Scanned(IdentityToken),
    ShowQr(IdentityToken),
    CloseQr,
    Delete(String),
    Deleted(Result<(), String>),
}

pub struct InventoryList {
    pub session: Session,
    _session_handle: Option<ContextHandle<Session>>,
    pub filter: ListFilter,
    pub chemicals: Vec<Chemical>,
    pub waste: Vec<Waste>,
    pub loading: bool,
    pub show_importer: bool,
    pub show_scanner: bool,
    pub qr_token: Option<IdentityToken>,
    /// Open create/edit dialog: id of the edited record (if any) and its form.
    pub form: Option<(Option<String>, RecordForm)>,
    pub today: NaiveDate,
}

impl InventoryList {
    pub fn can(&self, item_type: ItemType, action: Action) -> bool {
        self.session.can_act(item_type, action)
    }

    fn token(&self) -> Option<String> {
        self.session.access_token().map(str::to_string)
    }
}

impl Component for InventoryList {
    type Message = Msg;
    type Properties = InventoryListProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (session, handle) = match ctx
            .link()
            .context::<Session>(ctx.link().callback(Msg::SessionChanged))
        {
            Some((session, handle)) => (session, Some(handle)),
            None => (Session::anonymous(), None),
        };
        let filter = ListFilter {
            search: ctx.props().search.clone().unwrap_or_default(),
            ..ListFilter::default()
        };
        ctx.link().send_message(Msg::Load);

        Self {
            session,
            _session_handle: handle,
            filter,
            chemicals: Vec::new(),
            waste: Vec::new(),
            loading: false,
            show_importer: false,
            show_scanner: false,
            qr_token: None,
            form: None,
            today: today(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().item_type != old_props.item_type || ctx.props().search != old_props.search {
            self.filter = ListFilter {
                search: ctx.props().search.clone().unwrap_or_default(),
                ..ListFilter::default()
            };
            self.show_importer = false;
            self.show_scanner = false;
            self.qr_token = None;
            self.form = None;
            ctx.link().send_message(Msg::Load);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let item_type = ctx.props().item_type;
        match msg {
            Msg::SessionChanged(session) => {
                self.session = session;
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::Load => {
                let Some(token) = self.token() else {
                    self.chemicals.clear();
                    self.waste.clear();
                    return true;
                };
                self.loading = true;
                let filter = self.filter.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match item_type {
                        ItemType::Chemical => link.send_message(Msg::ChemicalsLoaded(
                            api::list_chemicals(&token, &filter).await,
                        )),
                        ItemType::Waste => link.send_message(Msg::WasteLoaded(
                            api::list_waste(&token, &filter).await,
                        )),
                    }
                });
                true
            }
            Msg::ChemicalsLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(chemicals) => self.chemicals = chemicals,
                    Err(e) => {
                        gloo_console::error!(format!("Failed to fetch chemicals: {}", e));
                        show_error_toast("Failed to fetch chemicals.");
                    }
                }
                true
            }
            Msg::WasteLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(waste) => self.waste = waste,
                    Err(e) => {
                        gloo_console::error!(format!("Failed to fetch waste: {}", e));
                        show_error_toast("Failed to fetch waste records.");
                    }
                }
                true
            }
            Msg::SetSearch(search) => {
                self.filter.search = search;
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::SetCategory(category) => {
                self.filter.category = (!category.is_empty()).then_some(category);
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::SetStatus(status) => {
                self.filter.status = status.parse().ok();
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::ToggleExpiring => {
                self.filter.expiring_soon = !self.filter.expiring_soon;
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::ClearFilters => {
                self.filter.clear();
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::OpenCreate => {
                if !self.can(item_type, Action::Create) {
                    return false;
                }
                self.form = Some((None, RecordForm::blank(item_type)));
                true
            }
            Msg::OpenEdit(id) => {
                if !self.can(item_type, Action::Update) {
                    return false;
                }
                let form = match item_type {
                    ItemType::Chemical => self
                        .chemicals
                        .iter()
                        .find(|c| c.id == id)
                        .map(RecordForm::for_chemical),
                    ItemType::Waste => self.waste.iter().find(|w| w.id == id).map(RecordForm::for_waste),
                };
                self.form = form.map(|form| (Some(id), form));
                true
            }
            Msg::CloseForm => {
                self.form = None;
                true
            }
            Msg::OpenImporter => {
                if !self.can(item_type, Action::Create) {
                    return false;
                }
                self.show_importer = true;
                true
            }
            Msg::CloseImporter => {
                self.show_importer = false;
                true
            }
            Msg::Imported(_) => {
                ctx.link().send_message(Msg::Load);
                false
            }
            Msg::OpenScanner => {
                self.show_scanner = true;
                true
            }
            Msg::CloseScanner => {
                self.show_scanner = false;
                true
            }
            Msg::Scanned(token) => {
                self.filter.apply_identity(&token);
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::ShowQr(token) => {
                self.qr_token = Some(token);
                true
            }
            Msg::CloseQr => {
                self.qr_token = None;
                true
            }
            Msg::Delete(id) => {
                let Some(token) = self.token() else {
                    return false;
                };
                if !self.can(item_type, Action::Delete) {
                    return false;
                }
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::delete_item(&token, item_type, &id).await;
                    link.send_message(Msg::Deleted(result));
                });
                false
            }
            Msg::Deleted(result) => {
                match result {
                    Ok(()) => {
                        show_toast("Item deleted successfully.");
                        ctx.link().send_message(Msg::Load);
                    }
                    Err(e) => {
                        gloo_console::error!(format!("Delete failed: {}", e));
                        show_error_toast("Failed to delete item.");
                    }
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
