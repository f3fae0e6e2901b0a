use actix_files::NamedFile;
use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;
use serde_json::json;

use crate::settings::Settings;

/// Fallback page compiled into the binary.
const EMBEDDED_INDEX: &str = include_str!("../../public/index.html");

pub async fn index(req: HttpRequest, settings: web::Data<Settings>) -> HttpResponse {
    let path = settings.public_folder.join("index.html");
    match NamedFile::open_async(&path).await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            debug!("{} unavailable ({}), serving embedded page", path.display(), e);
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(EMBEDDED_INDEX)
        }
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
