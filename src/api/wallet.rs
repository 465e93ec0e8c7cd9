use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{
    AppState, CopyRequest, CopyResponse, LinkRequest, WalletResponse, rejection,
};

#[get("/wallet/")]
pub async fn get_wallet(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(WalletResponse {
        wallet: state.engine().wallet(),
    })
}

/// Replace the wallet with a freshly generated one.
#[post("/wallet/new/")]
pub async fn create_wallet(state: web::Data<AppState>) -> impl Responder {
    let wallet = state.engine().generate_wallet();
    HttpResponse::Ok().json(WalletResponse { wallet })
}

/// Adopt an address handed over by an external signing extension.
#[post("/wallet/link/")]
pub async fn link_wallet(
    state: web::Data<AppState>,
    body: web::Json<LinkRequest>,
) -> impl Responder {
    match state.engine().link_external_wallet(body.address.as_deref()) {
        Ok(wallet) => HttpResponse::Ok().json(WalletResponse { wallet }),
        Err(err) => rejection(err),
    }
}

/// Clipboard hand-off: echoes the address back, no state change.
#[post("/wallet/copy/")]
pub async fn copy_address(body: web::Json<CopyRequest>) -> impl Responder {
    info!("WALLET - address copied: {}", body.address);
    HttpResponse::Ok().json(CopyResponse {
        copied: body.into_inner().address,
    })
}
