//! HTTP service that validates and scores robot satisfaction submissions.

pub mod error;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod settings;
pub mod upload;

use actix_cors::Cors;
use actix_web::http::header;

use crate::settings::{AllowedOrigins, Settings};

/// CORS policy for the API and the page. Any origin is allowed unless
/// `CORS_ALLOWED_ORIGINS` narrows it down.
pub fn cors(settings: &Settings) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    match &settings.allowed_origins {
        AllowedOrigins::Any => cors.allow_any_origin().send_wildcard(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
