mod api;
mod config;
mod registry;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use config::Config;
use registry::Registry;

/// Construct the registry for this deployment, owned by the configured identity.
fn bootstrap(cfg: &Config) -> Registry {
    let owner = match &cfg.owner_address {
        Some(address) => address.clone(),
        None => {
            let kp = wallet::generate_keypair();
            warn!(
                "OWNER_ADDRESS not set; generated dev owner {} (private key {})",
                kp.address, kp.private_key
            );
            kp.address
        }
    };

    let mut registry = Registry::new(owner.clone());
    if cfg.initial_rate != 0 {
        registry
            .set_rate(&owner, cfg.initial_rate)
            .expect("owner may set rate");
    }
    registry
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let registry = bootstrap(&cfg);
    info!(
        "registry owner={} rate={} at http://{}:{}",
        registry.owner(),
        registry.rate(),
        cfg.host,
        cfg.port
    );

    let state = web::Data::new(AppState::new(registry));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
