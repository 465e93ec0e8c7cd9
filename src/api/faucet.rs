use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, DripResponse, FaucetHistoryResponse, rejection};
use crate::faucet::FaucetError;

/// Request a drip. A request made while another drip is pending is
/// acknowledged but ignored.
#[post("/faucet/drip/")]
pub async fn post_drip(state: web::Data<AppState>) -> impl Responder {
    match state.scheduler.request_faucet_drip() {
        Ok(record) => HttpResponse::Accepted().json(DripResponse {
            accepted: true,
            ignored: false,
            record: Some(record),
        }),
        Err(FaucetError::Pending) => {
            debug!("POST /faucet/drip/ - ignored, drip already pending");
            HttpResponse::Accepted().json(DripResponse {
                accepted: false,
                ignored: true,
                record: None,
            })
        }
        Err(err) => rejection(err),
    }
}

#[get("/faucet/")]
pub async fn get_faucet(state: web::Data<AppState>) -> impl Responder {
    let engine = state.engine();
    HttpResponse::Ok().json(FaucetHistoryResponse {
        in_flight: engine.faucet_in_flight(),
        history: engine.faucet_history(),
    })
}
