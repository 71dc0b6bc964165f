use log::info;
use rocket::State;
use rocket::fs::NamedFile;
use rocket::get;
use rocket::http::ContentType;
use rocket::http::uri::Segments;
use rocket::http::uri::fmt::Path;
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::ErrorKind;
use std::time::Instant;

use crate::api::{AppError, AppResult};
use crate::registry::ShareRegistry;

/// Stored bytes sent as a browser download under their original filename.
pub struct Attachment {
    file: NamedFile,
    filename: String,
}

impl<'r> Responder<'r, 'static> for Attachment {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        Response::build_from(self.file.respond_to(req)?)
            .header(ContentType::Binary)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename={}", self.filename),
            )
            .ok()
    }
}

/// The last path segment is the share code, so `/download` and `/download/` land here
/// too and are rejected as missing a code. Raw `Segments` never fail to parse, so
/// codes such as `.abc` still reach the lookup.
#[get("/download/<segments..>")]
pub async fn download(
    registry: &State<ShareRegistry>,
    segments: Segments<'_, Path>,
) -> AppResult<Attachment> {
    let start_time = Instant::now();
    let code = segments
        .filter(|segment| !segment.is_empty())
        .last()
        .ok_or_else(|| AppError::bad_request("Share code missing"))?;

    let entry = registry
        .get(code)
        .ok_or_else(|| AppError::not_found("File not found. The share code may be invalid."))?;

    let file = NamedFile::open(&entry.path)
        .await
        .map_err(|error| match error.kind() {
            ErrorKind::NotFound => AppError::not_found("File not found"),
            _ => AppError::internal(
                anyhow::Error::from(error)
                    .context(format!("Failed to open {}", entry.path.display()))
                    .context("Could not read file"),
            ),
        })?;

    info!(duration = &*format!("{:?}", start_time.elapsed());
        "File requested: {} (Code: {})",
        entry.path.display(),
        code,
    );

    Ok(Attachment {
        file,
        filename: entry.original_filename,
    })
}

pub fn generate_download_routes() -> Vec<rocket::Route> {
    routes![download]
}
