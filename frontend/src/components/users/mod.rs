//! User administration: assigns a role to each account.
//!
//! Only shown to sessions holding `users:manage`; the data API enforces the
//! same capability on every request.

use common::auth::Session;
use common::model::admin::{assign_role, ManagedUser, Role};
use common::model::profile::capabilities;
use web_sys::HtmlSelectElement;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast};

pub enum Msg {
    SessionChanged(Session),
    Load,
    Loaded {
        users: Result<Vec<ManagedUser>, String>,
        roles: Result<Vec<Role>, String>,
    },
    ChangeRole { user_id: String, role_id: String },
    RoleChanged {
        user_id: String,
        role_id: String,
        result: Result<(), String>,
    },
}

pub struct UserManagement {
    session: Session,
    _session_handle: Option<ContextHandle<Session>>,
    users: Vec<ManagedUser>,
    roles: Vec<Role>,
    loading: bool,
}

impl UserManagement {
    fn allowed(&self) -> bool {
        self.session.can(capabilities::USERS_MANAGE)
    }
}

impl Component for UserManagement {
    type Message = Msg;
    type Properties = ();

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
            users: Vec::new(),
            roles: Vec::new(),
            loading: false,
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
                    return false;
                };
                if !self.allowed() {
                    self.users.clear();
                    return true;
                }
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let users = api::list_users(&token).await;
                    let roles = api::list_roles(&token).await;
                    link.send_message(Msg::Loaded { users, roles });
                });
                true
            }
            Msg::Loaded { users, roles } => {
                self.loading = false;
                match (users, roles) {
                    (Ok(users), Ok(roles)) => {
                        self.users = users;
                        self.roles = roles;
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        gloo_console::error!(format!("Failed to fetch user data: {}", e));
                        show_error_toast("Failed to fetch user data.");
                    }
                }
                true
            }
            Msg::ChangeRole { user_id, role_id } => {
                let Some(token) = self.session.access_token().map(str::to_string) else {
                    return false;
                };
                if !self.allowed() || role_id.is_empty() {
                    return false;
                }
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::update_user_role(&token, &user_id, &role_id).await;
                    link.send_message(Msg::RoleChanged {
                        user_id,
                        role_id,
                        result,
                    });
                });
                false
            }
            Msg::RoleChanged {
                user_id,
                role_id,
                result,
            } => match result {
                Ok(()) => {
                    assign_role(&mut self.users, &self.roles, &user_id, &role_id);
                    show_toast("User role updated successfully!");
                    true
                }
                Err(e) => {
                    gloo_console::error!(format!("Failed to update role: {}", e));
                    show_error_toast("Failed to update role.");
                    // Re-render so the select snaps back to the stored role.
                    true
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !self.allowed() {
            return html! { <p class="hint">{"You do not have permission to manage users."}</p> };
        }
        html! {
            <div class="user-management">
                <h2>{"User Management"}</h2>
                if self.loading {
                    <p class="hint">{"Loading..."}</p>
                } else {
                    <table>
                        <thead>
                            <tr><th>{"Email"}</th><th>{"User ID"}</th><th>{"Role"}</th></tr>
                        </thead>
                        <tbody>
                            { for self.users.iter().map(|user| self.build_row(ctx, user)) }
                        </tbody>
                    </table>
                }
            </div>
        }
    }
}

impl UserManagement {
    fn build_row(&self, ctx: &Context<Self>, user: &ManagedUser) -> Html {
        let user_id = user.id.clone();
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::ChangeRole {
                user_id: user_id.clone(),
                role_id: select.value(),
            }
        });
        let current = user.role_id().unwrap_or_default();
        html! {
            <tr key={user.id.clone()}>
                <td>{user.email.clone().unwrap_or_default()}</td>
                <td title={user.id.clone()}>{user.short_id()}</td>
                <td>
                    <select {onchange}>
                        <option value="" selected={current.is_empty()} disabled=true>{"No role"}</option>
                        { for self.roles.iter().map(|role| html! {
                            <option value={role.id.clone()} selected={role.id == current}>
                                {role.name.clone()}
                            </option>
                        }) }
                    </select>
                </td>
            </tr>
        }
    }
}
