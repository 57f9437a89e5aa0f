//! Client for the hosted data API.
//!
//! Every call carries the session's bearer token. Failures are reported as the
//! message to show the user: the API's `detail` when it sends one, otherwise
//! the transport error.

use crate::helpers::{remove_stored_item, stored_item};
use common::auth::SessionUser;
use common::filters::ListFilter;
use common::import::SubmitFailure;
use common::model::activity::{ActivityEntry, ACTIVITY_LOG_LIMIT};
use common::model::admin::{ManagedUser, Role, RoleUpdate};
use common::model::chemical::{Chemical, ChemicalInput};
use common::model::identity::ItemType;
use common::model::import::ImportRow;
use common::model::profile::UserProfile;
use common::model::record_form::RecordPayload;
use common::model::waste::{Waste, WasteInput};
use common::requests::ErrorResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// `localStorage` key holding the signed-in user written by the auth service.
const SESSION_KEY: &str = "dashboard.session";

pub fn stored_user() -> Option<SessionUser> {
    let raw = stored_item(SESSION_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            gloo_console::warn!(format!("Ignoring stored session: {}", e));
            None
        }
    }
}

pub fn clear_stored_user() {
    remove_stored_item(SESSION_KEY);
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(body.detail),
        Err(_) => Err(format!("Request failed with status {}", status)),
    }
}

async fn get_json<T: DeserializeOwned>(
    token: &str,
    path: &str,
    query: Vec<(&'static str, String)>,
) -> Result<T, String> {
    let response = authorized(Request::get(path), token)
        .query(query)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_json<B: Serialize>(token: &str, path: &str, body: &B) -> Result<(), String> {
    let request = authorized(Request::post(path), token)
        .json(body)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    check(response).await.map(|_| ())
}

async fn put_json<B: Serialize>(token: &str, path: &str, body: &B) -> Result<(), String> {
    let request = authorized(Request::put(path), token)
        .json(body)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    check(response).await.map(|_| ())
}

pub async fn fetch_profile(token: &str) -> Result<UserProfile, String> {
    get_json(token, "/api/user/profile", Vec::new()).await
}

pub async fn list_chemicals(token: &str, filter: &ListFilter) -> Result<Vec<Chemical>, String> {
    get_json(token, "/api/chemicals", filter.query_pairs()).await
}

pub async fn list_waste(token: &str, filter: &ListFilter) -> Result<Vec<Waste>, String> {
    get_json(token, "/api/waste", filter.query_pairs()).await
}

pub async fn delete_item(token: &str, item_type: ItemType, id: &str) -> Result<(), String> {
    let path = format!("/api/{}/{}", item_type.collection(), id);
    let response = authorized(Request::delete(&path), token)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check(response).await.map(|_| ())
}

pub async fn create_item(token: &str, item_type: ItemType, payload: &RecordPayload) -> Result<(), String> {
    post_json(token, &format!("/api/{}", item_type.collection()), payload).await
}

pub async fn update_item(
    token: &str,
    item_type: ItemType,
    id: &str,
    payload: &RecordPayload,
) -> Result<(), String> {
    put_json(token, &format!("/api/{}/{}", item_type.collection(), id), payload).await
}

pub async fn list_activity(token: &str) -> Result<Vec<ActivityEntry>, String> {
    let query = vec![("limit", ACTIVITY_LOG_LIMIT.to_string())];
    get_json(token, "/api/activity-log", query).await
}

pub async fn list_users(token: &str) -> Result<Vec<ManagedUser>, String> {
    get_json(token, "/api/admin/users", Vec::new()).await
}

pub async fn list_roles(token: &str) -> Result<Vec<Role>, String> {
    get_json(token, "/api/admin/roles", Vec::new()).await
}

pub async fn update_user_role(token: &str, user_id: &str, role_id: &str) -> Result<(), String> {
    let body = RoleUpdate {
        role_id: role_id.to_string(),
    };
    put_json(token, &format!("/api/admin/users/{}", user_id), &body).await
}

/// Creates one record per imported row.
///
/// Every row is converted to a typed payload before the first request, so a
/// row the forms would reject stops the import before anything is created.
/// A failing request reports how many rows were already stored.
pub async fn bulk_create(
    token: String,
    item_type: ItemType,
    rows: Vec<ImportRow>,
) -> Result<(), SubmitFailure> {
    let path = format!("/api/{}", item_type.collection());
    let payloads = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let payload = match item_type {
                ItemType::Chemical => ChemicalInput::from_import_row(row)
                    .validate()
                    .map(RecordPayload::Chemical),
                ItemType::Waste => WasteInput::from_import_row(row)
                    .validate()
                    .map(RecordPayload::Waste),
            };
            payload.map_err(|e| SubmitFailure::new(format!("Row {}: {}", idx + 2, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (created, payload) in payloads.iter().enumerate() {
        post_json(&token, &path, payload)
            .await
            .map_err(|reason| SubmitFailure::after(created, reason))?;
    }
    Ok(())
}
