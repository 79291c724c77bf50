use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use pushkind_catalog::domain::clock::{Clock, SystemClock};
use pushkind_catalog::models::config::ServerConfig;
use pushkind_catalog::repository::InMemoryRepository;
use pushkind_catalog::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let repo = InMemoryRepository::new(server_config.store_limits());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let clock = web::Data::from(clock);
    let bind_address = server_config.bind_address();

    log::info!(
        "Starting catalog on {}:{} (max {} products, {} images per gallery)",
        bind_address.0,
        bind_address.1,
        server_config.max_products,
        server_config.max_gallery_images
    );

    let repo = web::Data::new(repo);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(server_config.clone())
            .app_data(clock.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
