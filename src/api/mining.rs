use actix_web::{HttpResponse, Responder, get, web};
use log::info;

use super::models::AppState;

/// Forge a new block: run the proof search against the current tip, mint
/// the reward to this node, and seal everything pending.
///
/// The search runs synchronously under the ledger lock and blocks this
/// worker until a proof is found.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let block = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.mine(&state.node_id).clone()
    };

    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );
    HttpResponse::Ok().json(block)
}
