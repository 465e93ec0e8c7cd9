use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{
    AppState, LedgerQuery, LedgerResponse, TransferRequest, TransferResponse, rejection,
};

/// Ledger newest first, optionally filtered by an address on either side.
#[get("/ledger/")]
pub async fn get_ledger(state: web::Data<AppState>, query: web::Query<LedgerQuery>) -> impl Responder {
    let address = query
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());
    let entries = state.engine().ledger(address);
    HttpResponse::Ok().json(LedgerResponse {
        size: entries.len(),
        entries,
    })
}

/// Submit a wallet transfer.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<TransferRequest>,
) -> impl Responder {
    let amount = body.amount.as_text();
    debug!("POST /tx/ - recipient={:?} amount={:?}", body.recipient, amount);

    let mut engine = state.engine();
    match engine.submit_transfer(&body.recipient, &amount, body.memo.as_deref().unwrap_or_default()) {
        Ok(entry) => HttpResponse::Ok().json(TransferResponse {
            entry,
            balance: engine.wallet().balance(),
        }),
        Err(err) => rejection(err),
    }
}
