//! Read-only audit trail of recent create, update and delete actions.

use common::auth::Session;
use common::model::activity::{ActivityEntry, ActivityKind};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{now, show_error_toast};

pub enum Msg {
    SessionChanged(Session),
    Load,
    Loaded(Result<Vec<ActivityEntry>, String>),
}

pub struct ActivityLog {
    session: Session,
    _session_handle: Option<ContextHandle<Session>>,
    entries: Vec<ActivityEntry>,
    loading: bool,
}

impl Component for ActivityLog {
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
            entries: Vec::new(),
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
                    self.entries.clear();
                    return true;
                };
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(api::list_activity(&token).await));
                });
                true
            }
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(entries) => self.entries = entries,
                    Err(e) => {
                        gloo_console::error!(format!("Failed to fetch activity log: {}", e));
                        show_error_toast("Failed to fetch activity log.");
                    }
                }
                true
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if !self.session.is_signed_in() {
            return html! { <p class="hint">{"Sign in to see the activity log."}</p> };
        }
        let now = now();
        html! {
            <div class="activity-log">
                <h2>{"Activity Log"}</h2>
                <p class="subtitle">{"A trail of all recent actions performed in the system."}</p>
                if self.loading {
                    <p class="hint">{"Loading..."}</p>
                } else if self.entries.is_empty() {
                    <p class="hint">{"No activity recorded yet."}</p>
                } else {
                    <ul>
                        { for self.entries.iter().map(|entry| html! {
                            <li key={entry.id.clone()}>
                                <i class="material-icons">{icon(entry.kind())}</i>
                                <span>{entry.summary()}</span>
                                <span class="age">{entry.age(now)}</span>
                            </li>
                        }) }
                    </ul>
                }
            </div>
        }
    }
}

fn icon(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Created => "add_circle",
        ActivityKind::Updated => "edit",
        ActivityKind::Deleted => "delete",
        ActivityKind::Other => "history",
    }
}
