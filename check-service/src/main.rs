use actix_web::middleware::{self, Compress};
use actix_web::{web, App, HttpServer};
use check_service::{cors, routes, settings};
use log::info;

fn init() {
    // Initialise logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    init();
    let settings = settings::current().map_err(std::io::Error::other)?;

    info!(
        "Starting check service at http://{}:{} ({:?}, uploads limited to {})",
        settings.host, settings.port, settings.deploy_target, settings.upload_limit
    );
    let data = web::Data::new(settings.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(cors(settings))
            // enable logger - always register actix-web Logger middleware last
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(routes::register)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
