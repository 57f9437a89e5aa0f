//! Create and edit dialog for a single chemical or waste record.
//!
//! The dialog edits a `RecordForm`, shows the per-field messages of the last
//! failed validation and sends the validated payload with `POST` (new
//! record) or `PUT` (existing record).

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::RecordFormProps;
pub use state::RecordFormDialog;

impl Component for RecordFormDialog {
    type Message = Msg;
    type Properties = RecordFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        RecordFormDialog::new(ctx.props().form.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().form != old_props.form || ctx.props().record_id != old_props.record_id {
            *self = RecordFormDialog::new(ctx.props().form.clone());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
