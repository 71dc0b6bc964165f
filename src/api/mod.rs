pub mod fairings;
pub mod handlers;

use log::{error, warn};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;

/// Error returned from a route. The client sees the status and the outermost
/// message as plain text; the full context chain only goes to the log.
#[derive(Debug)]
pub struct AppError {
    pub status: Status,
    pub error: anyhow::Error,
}

impl AppError {
    pub fn new(status: Status, error: impl Into<anyhow::Error>) -> Self {
        AppError {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(Status::BadRequest, anyhow::Error::msg(message))
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(Status::NotFound, anyhow::Error::msg(message))
    }

    pub fn method_not_allowed() -> Self {
        Self::new(Status::MethodNotAllowed, anyhow::Error::msg("Method not allowed"))
    }

    pub fn internal(error: impl Into<anyhow::Error>) -> Self {
        Self::new(Status::InternalServerError, error)
    }
}

#[rocket::async_trait]
impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let body = self.error.to_string();

        if self.status.class().is_server_error() {
            error!("{} {} failed: {:?}", req.method(), req.uri(), self.error);
        } else {
            warn!("{} {} rejected: {}", req.method(), req.uri(), body);
        }

        Response::build()
            .status(self.status)
            .header(ContentType::Plain)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl<E> From<E> for AppError
where
    anyhow::Error: From<E>,
{
    fn from(err: E) -> Self {
        AppError {
            status: Status::InternalServerError,
            error: anyhow::Error::from(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
