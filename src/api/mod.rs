pub mod auth;
mod health;
pub mod models;
mod registry;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(registry::get_owner)
            .service(registry::get_rate)
            .service(registry::set_rate)
            .service(registry::get_holders)
            .service(registry::set_holders)
            .service(registry::get_liquidity)
            .service(registry::set_liquidity)
            .service(registry::get_reward_wallet)
            .service(registry::set_reward_wallet)
            .service(registry::get_registry)
            .service(wallet::create_wallet),
    );
}
