//! Bulk import dialog: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic and view rendering.
//!
//! The dialog reads a CSV file in the browser, validates it with
//! `common::import`, previews the result and, once the file is clean, hands
//! the whole batch to `api::bulk_create` in one call.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CsvImporterProps;
pub use state::CsvImporter;

impl Component for CsvImporter {
    type Message = Msg;
    type Properties = CsvImporterProps;

    fn create(ctx: &Context<Self>) -> Self {
        CsvImporter::new(&ctx.props().required_fields)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().required_fields != old_props.required_fields
            || ctx.props().item_type != old_props.item_type
        {
            *self = CsvImporter::new(&ctx.props().required_fields);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
