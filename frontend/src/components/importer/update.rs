//! Update function for the CSV import dialog.
//!
//! Elm-style: receives the current state, the `Context` and a `Msg`, mutates
//! the state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Reading the selected file asynchronously and loading it into the session.
//! - Refusing to import while validation errors remain or a submission runs.
//! - Keeping the unsaved rows after a failed import so the user can retry.

use common::import::ImportError;
use gloo_file::futures::read_as_bytes;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast};

use super::messages::Msg;
use super::state::CsvImporter;

pub fn update(component: &mut CsvImporter, ctx: &Context<CsvImporter>, msg: Msg) -> bool {
    match msg {
        Msg::FileSelected(file) => {
            let name = file.name();
            let link = ctx.link().clone();
            spawn_local(async move {
                let file = gloo_file::File::from(file);
                match read_as_bytes(&file).await {
                    Ok(bytes) => link.send_message(Msg::FileRead { name, bytes }),
                    Err(e) => link.send_message(Msg::FileReadFailed(e.to_string())),
                }
            });
            false
        }
        Msg::FileRead { name, bytes } => {
            if let Err(e) = component.session.load(&name, bytes.as_slice()) {
                gloo_console::error!(format!("Failed to parse {}: {}", name, e));
                show_error_toast(&e.to_string());
            }
            true
        }
        Msg::FileReadFailed(reason) => {
            gloo_console::error!(format!("Failed to read file: {}", reason));
            component.session.reset();
            show_error_toast("Could not read the selected file.");
            true
        }
        Msg::ChangeFile => {
            component.session.reset();
            true
        }
        Msg::Import => {
            let batch = match component.session.begin_submission() {
                Ok(batch) => batch,
                Err(e) => {
                    show_error_toast(&e.to_string());
                    return false;
                }
            };
            show_toast("Importing data...");

            let props = ctx.props();
            let token = props.access_token.to_string();
            let item_type = props.item_type;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::bulk_create(token, item_type, batch).await;
                link.send_message(Msg::ImportFinished(result));
            });
            true
        }
        Msg::ImportFinished(result) => {
            match component.session.finish_submission(result) {
                Ok(imported) => {
                    show_toast(&format!("{} items imported successfully!", imported));
                    ctx.props().on_imported.emit(imported);
                    ctx.props().on_close.emit(());
                }
                Err(e @ ImportError::PartiallySubmitted { created, .. }) => {
                    gloo_console::error!(format!("Import error: {}", e));
                    show_error_toast(&e.to_string());
                    ctx.props().on_imported.emit(created);
                }
                Err(e) => {
                    gloo_console::error!(format!("Import error: {}", e));
                    show_error_toast("Import failed. Please check the console for details.");
                }
            }
            true
        }
        Msg::Close => {
            if component.session.is_in_flight() {
                return false;
            }
            component.session.reset();
            ctx.props().on_close.emit(());
            false
        }
    }
}
