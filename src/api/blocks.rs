use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BlocksResponse, CandlesResponse, LogResponse};

/// Current block window, newest first.
#[get("/blocks/")]
pub async fn get_blocks(state: web::Data<AppState>) -> impl Responder {
    let blocks = state.engine().blocks();
    HttpResponse::Ok().json(BlocksResponse {
        length: blocks.len(),
        blocks,
    })
}

/// Current candle window in chronological order.
#[get("/candles/")]
pub async fn get_candles(state: web::Data<AppState>) -> impl Responder {
    let candles = state.engine().candles();
    HttpResponse::Ok().json(CandlesResponse {
        length: candles.len(),
        candles,
    })
}

#[get("/log/")]
pub async fn get_log(state: web::Data<AppState>) -> impl Responder {
    let entries = state.engine().command_log();
    HttpResponse::Ok().json(LogResponse { entries })
}
