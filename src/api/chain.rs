use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse};

/// Full snapshot of the chain, in the wire shape peers consume during
/// conflict resolution.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        chain: &ledger.chain,
    };
    HttpResponse::Ok().json(resp)
}
