use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rocket::State;
use rocket::form::{Errors, Form, FromForm};
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, put};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::api::{AppError, AppResult};
use crate::common::MAX_CODE_ATTEMPTS;
use crate::config::ShareConfig;
use crate::registry::{ShareCode, ShareEntry, ShareRegistry};
use crate::utils::{original_filename, stored_file_path};

#[derive(FromForm, Debug)]
pub struct UploadForm<'r> {
    /// Missing or unparsable parts come through as `None`.
    #[field(name = "file")]
    pub file: Option<TempFile<'r>>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub share_code: ShareCode,
}

fn get_filename(file: &TempFile<'_>) -> Option<String> {
    // `TempFile::name` strips the extension, so go to the raw name and clean it here.
    file.raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
        .and_then(original_filename)
}

#[post("/upload", data = "<form>")]
pub async fn upload(
    registry: &State<ShareRegistry>,
    config: &State<ShareConfig>,
    form: Result<Form<UploadForm<'_>>, Errors<'_>>,
) -> AppResult<Json<UploadResponse>> {
    let start_time = Instant::now();
    let file = match form {
        Ok(form) => form.into_inner().file,
        Err(errors) => {
            warn!("Failed to parse upload form: {}", errors);
            return Err(AppError::bad_request("Could not parse form"));
        }
    };
    let file = file.ok_or_else(|| AppError::bad_request("Invalid file"))?;
    let filename = get_filename(&file).ok_or_else(|| AppError::bad_request("Invalid file"))?;

    let path = stored_file_path(&config.upload_dir, Uuid::new_v4(), &filename);
    let size = save_file(&file, &path).await?;

    let entry = ShareEntry::new(path, filename, size);
    let share_code = register(registry, entry.clone())
        .map_err(|error| AppError::internal(error.context("Could not generate code")))?;

    info!(duration = &*format!("{:?}", start_time.elapsed());
        "File uploaded: {} (Code: {}, {} bytes)",
        entry.original_filename,
        share_code,
        entry.size,
    );

    Ok(Json(UploadResponse { share_code }))
}

/// Copy the upload into a freshly created file at `path`, returning the byte count.
async fn save_file(file: &TempFile<'_>, path: &Path) -> AppResult<u64> {
    let mut destination = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))
        .map_err(|error| AppError::internal(error.context("Could not create temp file")))?;

    match copy_into(file, &mut destination).await {
        Ok(size) => Ok(size),
        Err(error) => {
            drop(destination);
            remove_partial(path.to_path_buf()).await;
            Err(AppError::internal(error.context("Could not save file")))
        }
    }
}

async fn copy_into(file: &TempFile<'_>, destination: &mut fs::File) -> Result<u64> {
    let source = file.open().await.context("Failed to open uploaded part")?;
    tokio::pin!(source);
    let size = tokio::io::copy_buf(&mut source, destination)
        .await
        .context("Failed to copy uploaded bytes")?;
    destination.flush().await.context("Failed to flush stored file")?;
    Ok(size)
}

async fn remove_partial(path: PathBuf) {
    if let Err(error) = fs::remove_file(&path).await {
        warn!("Failed to remove partial upload {}: {}", path.display(), error);
    }
}

/// Draw codes until one is free. Randomness is drawn outside the registry lock.
fn register(registry: &ShareRegistry, mut entry: ShareEntry) -> Result<ShareCode> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = ShareCode::generate()?;
        match registry.try_insert(code.as_str(), entry) {
            Ok(()) => return Ok(code),
            Err(rejected) => {
                warn!("Share code {} already taken, drawing another", code);
                entry = rejected;
            }
        }
    }
    Err(anyhow!(
        "No free share code after {} attempts",
        MAX_CODE_ATTEMPTS
    ))
}

/// Non-form bodies are forwarded by the `Form` guard and end up here.
#[post("/upload", rank = 2)]
pub fn upload_unparsable() -> AppError {
    AppError::bad_request("Could not parse form")
}

// HEAD is answered through the GET route.
#[get("/upload")]
pub fn upload_get() -> AppError {
    AppError::method_not_allowed()
}

#[put("/upload")]
pub fn upload_put() -> AppError {
    AppError::method_not_allowed()
}

#[delete("/upload")]
pub fn upload_delete() -> AppError {
    AppError::method_not_allowed()
}

#[patch("/upload")]
pub fn upload_patch() -> AppError {
    AppError::method_not_allowed()
}

pub fn generate_upload_routes() -> Vec<rocket::Route> {
    routes![
        upload,
        upload_unparsable,
        upload_get,
        upload_put,
        upload_delete,
        upload_patch
    ]
}
