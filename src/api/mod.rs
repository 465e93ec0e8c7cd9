mod blocks;
mod faucet;
mod health;
pub mod models;
mod stats;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(blocks::get_blocks)
            .service(blocks::get_candles)
            .service(blocks::get_log)
            .service(tx::get_ledger)
            .service(tx::post_transaction)
            .service(faucet::get_faucet)
            .service(faucet::post_drip)
            .service(wallet::get_wallet)
            .service(wallet::create_wallet)
            .service(wallet::link_wallet)
            .service(wallet::copy_address)
            .service(stats::get_network_stats)
            .service(stats::get_market_stats),
    );
}
