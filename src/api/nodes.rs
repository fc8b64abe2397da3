use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::consensus;

/// Register peer nodes for conflict resolution. Addresses are normalized
/// to host:port; an unparseable address fails the whole request.
#[post("/nodes/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("nodes list must not be empty");
    }

    let mut normalized = Vec::with_capacity(body.nodes.len());
    for address in &body.nodes {
        match consensus::normalize_peer(address) {
            Some(peer) => normalized.push(peer),
            None => {
                warn!("POST /nodes/ - rejected: invalid address {address:?}");
                return HttpResponse::BadRequest().body(format!("invalid node address: {address}"));
            }
        }
    }

    let (registered, total_peers) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let registered = normalized
            .into_iter()
            .filter(|peer| ledger.register_peer(peer.clone()))
            .count();
        (registered, ledger.peers.len())
    };

    info!("POST /nodes/ - {registered} new peer(s), {total_peers} total");
    HttpResponse::Created().json(RegisterNodesResponse {
        message: format!("{registered} nodes have been added"),
        total_peers,
    })
}

/// Run conflict resolution against the registered peers, adopting the
/// longest valid chain seen if it beats the local one.
#[get("/nodes/resolve/")]
pub async fn resolve_chain(state: web::Data<AppState>) -> impl Responder {
    let replaced = consensus::resolve_conflicts(&state).await;

    let length = state.ledger.lock().expect("mutex poisoned").len();
    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };

    HttpResponse::Ok().json(ResolveResponse {
        replaced,
        message,
        length,
    })
}
