mod api;
mod blockchain;
mod clock;
mod config;
mod console;
mod engine;
mod faucet;
mod ledger;
mod market;
mod random;
mod stats;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};

use api::AppState;
use config::AppConfig;
use engine::{Engine, Scheduler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };
    let (host, port) = (config.host.clone(), config.port);

    let engine = engine::shared(Engine::from_config(config.engine));
    let scheduler = Scheduler::start(engine);
    let state = web::Data::new(AppState::new(scheduler));

    info!("🔭 Starting ledger observatory at http://{host}:{port}");

    let result = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes)
        }
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    state.scheduler.shutdown();
    result
}
