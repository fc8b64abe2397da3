use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(StatsResponse {
        height: ledger.len(),
        difficulty: ledger.difficulty(),
        pending_transactions: ledger.pending.len(),
        peers: ledger.peers.len(),
    })
}
