mod check;
mod index;

pub use check::check;
pub use index::{health, index};

use actix_web::web;

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/check").route(web::post().to(check)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(
            web::resource("/")
                .route(web::get().to(index))
                // Serverless platforms forward the function route as "/".
                .route(web::post().to(check)),
        );
}
