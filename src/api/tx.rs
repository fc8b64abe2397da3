use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info};

use super::models::{AppState, NewTxRequest, NewTxResponse};
use crate::transaction::Transaction;

/// Submit a transaction into the pending pool.
///
/// Validation is shape-only: serde already rejected missing or mistyped
/// fields, and any sender/recipient string is acceptable, including the
/// reserved reward sender "0".
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = body.into_inner();
    debug!(
        "POST /transactions/ - received: {} -> {} ({})",
        req.sender, req.recipient, req.amount
    );

    let tx = Transaction::new(req.sender, req.recipient, req.amount);
    let block = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(tx)
    };

    info!("POST /transactions/ - accepted, will be sealed in block {block}");
    HttpResponse::Ok().json(NewTxResponse {
        message: format!("Transaction will be added to Block {block}"),
        block,
    })
}
