use actix_web::{HttpResponse, Responder, get, web};

use super::models::AppState;

/// Network summary, recomputed from the current stores.
#[get("/stats/network/")]
pub async fn get_network_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.engine().network_stats())
}

/// Market summary over the current candle window.
#[get("/stats/market/")]
pub async fn get_market_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.engine().market_stats())
}
