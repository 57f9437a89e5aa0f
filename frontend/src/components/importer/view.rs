//! View rendering for the CSV import dialog.
//!
//! Before a file is chosen the dialog shows a file picker and the required
//! columns. Afterwards it shows the file name, the first validation errors and
//! a preview table of the first rows.

use common::model::import::{ImportRow, ValidationError};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::CsvImporter;

const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.5);z-index:9999;display:flex;align-items:center;justify-content:center;";

pub fn view(component: &CsvImporter, ctx: &Context<CsvImporter>) -> Html {
    let link = ctx.link();
    let session = &component.session;

    html! {
        <div class="dialog-overlay" style={OVERLAY_STYLE}>
            <div class="dialog importer-dialog">
                <div class="dialog-header">
                    <h3>{"Bulk Import from CSV"}</h3>
                    <button class="icon-btn" title="Close" onclick={link.callback(|_| Msg::Close)}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                {
                    if session.is_loaded() {
                        build_loaded(component, link)
                    } else {
                        build_file_picker(ctx)
                    }
                }
                { build_footer(component, link) }
            </div>
        </div>
    }
}

fn build_file_picker(ctx: &Context<CsvImporter>) -> Html {
    let link = ctx.link();
    let onchange = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        input.set_value("");
        file.map(Msg::FileSelected)
    });

    html! {
        <label class="drop-zone">
            <i class="material-icons">{"upload_file"}</i>
            <p>{"Click to select a CSV file"}</p>
            <p class="hint">
                {format!("Required columns: {}", ctx.props().required_fields.join(", "))}
            </p>
            <input
                type="file"
                accept=".csv,text/csv"
                style="display:none;"
                {onchange}
            />
        </label>
    }
}

fn build_loaded(component: &CsvImporter, link: &Scope<CsvImporter>) -> Html {
    let session = &component.session;
    html! {
        <div>
            <div class="file-row">
                <i class="material-icons">{"description"}</i>
                <span>{session.file_name().unwrap_or_default()}</span>
                <button
                    class="text-btn"
                    disabled={session.is_in_flight()}
                    onclick={link.callback(|_| Msg::ChangeFile)}
                >
                    {"Change File"}
                </button>
            </div>
            { build_errors(session.preview_errors(), session.hidden_error_count()) }
            { build_preview(&session.columns(), session.preview_rows(), session.rows().len()) }
        </div>
    }
}

fn build_errors(errors: &[ValidationError], hidden: usize) -> Html {
    if errors.is_empty() {
        return html! {};
    }
    html! {
        <div class="validation-errors">
            <h4>{"Validation Errors"}</h4>
            <ul>
                { for errors.iter().map(|e| html! { <li>{e.message.clone()}</li> }) }
                if hidden > 0 {
                    <li>{format!("...and {} more errors.", hidden)}</li>
                }
            </ul>
        </div>
    }
}

fn build_preview(columns: &[String], rows: &[ImportRow], total: usize) -> Html {
    if rows.is_empty() {
        return html! { <p class="hint">{"The file has no data rows."}</p> };
    }
    html! {
        <div class="preview">
            <h4>{format!("Data Preview (first {} of {} rows)", rows.len(), total)}</h4>
            <table>
                <thead>
                    <tr>{ for columns.iter().map(|c| html! { <th>{c.clone()}</th> }) }</tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|row| html! {
                        <tr>
                            { for columns.iter().map(|c| html! {
                                <td>{row.text(c).unwrap_or_default()}</td>
                            }) }
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn build_footer(component: &CsvImporter, link: &Scope<CsvImporter>) -> Html {
    let session = &component.session;
    let label = if session.is_in_flight() {
        "Importing...".to_string()
    } else {
        format!("Import {} Items", session.rows().len())
    };

    html! {
        <div class="dialog-footer">
            <button
                class="text-btn"
                disabled={session.is_in_flight()}
                onclick={link.callback(|_| Msg::Close)}
            >
                {"Cancel"}
            </button>
            <button
                class="primary-btn"
                disabled={!session.can_submit()}
                onclick={link.callback(|_| Msg::Import)}
            >
                {label}
            </button>
        </div>
    }
}
