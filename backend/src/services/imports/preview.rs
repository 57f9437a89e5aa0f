use crate::config::Config;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::import::{ImportError, ImportSession};
use common::model::identity::{ItemType, UnknownItemType};
use common::requests::{ErrorResponse, ImportPreview};
use futures_util::StreamExt;
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    UnknownEntity(#[from] UnknownItemType),
    #[error("The file must end with .csv")]
    NotCsv,
    #[error("Missing file")]
    MissingFile,
    #[error("The file exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl From<actix_multipart::MultipartError> for PreviewError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        PreviewError::Upload(err.to_string())
    }
}

/// HTTP handler wrapper that converts the preview result to an `HttpResponse`.
///
/// - On success: returns `200 OK` with the `ImportPreview` as JSON.
/// - On failure: returns `400 Bad Request` with `{"detail": ...}`.
pub async fn process(
    entity: web::Path<String>,
    payload: Multipart,
    config: web::Data<Config>,
) -> impl Responder {
    match preview_upload(&entity, payload, &config).await {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => {
            warn!("Import preview for {} rejected: {}", entity, e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Reads the `file` part of the upload and validates it for `entity`.
pub async fn preview_upload(
    entity: &str,
    mut payload: Multipart,
    config: &Config,
) -> Result<ImportPreview, PreviewError> {
    let item_type: ItemType = entity.parse()?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(PreviewError::NotCsv);
        }

        let limit = config.imports.max_upload_bytes;
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > limit {
                return Err(PreviewError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }
        upload = Some((filename, bytes));
    }

    let (filename, bytes) = upload.ok_or(PreviewError::MissingFile)?;
    let mut session = ImportSession::new(config.imports.required_fields(item_type).iter().cloned())
        .with_config(config.imports.limits());
    session.load(&filename, bytes.as_slice())?;

    info!(
        "Previewed {} for {}: {} row(s), {} error(s)",
        filename,
        item_type.collection(),
        session.rows().len(),
        session.errors().len()
    );
    Ok(ImportPreview::from_session(&session))
}
