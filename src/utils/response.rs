use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};

use crate::models::error::CatalogError;

/// JSON body sent with every API error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl<'r> Responder<'r, 'static> for CatalogError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = if self.is_not_found() {
            Status::NotFound
        } else {
            log::error!("{} failed: {}", request.uri(), self);
            Status::InternalServerError
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).respond_to(request)
    }
}
