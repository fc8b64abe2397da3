use log::{debug, info, warn};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::api::AppState;
use crate::ledger::{Block, Ledger};

/// How long a single peer fetch may take before it is skipped.
pub const PEER_TIMEOUT_SECS: u64 = 5;

/// A peer's self-reported view of its chain, as served by `/api/v1/chain/`.
/// The length is taken at face value; only the chain itself is re-validated.
#[derive(Debug, Deserialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Normalize a peer address to `host:port`. Accepts bare `host:port` as
/// well as full URLs; returns None for anything unparseable.
pub fn normalize_peer(address: &str) -> Option<String> {
    let url = if address.contains("://") {
        Url::parse(address).ok()?
    } else {
        Url::parse(&format!("http://{address}")).ok()?
    };

    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{host}:{port}"))
}

/// Fetch a peer's chain. Any failure (unreachable host, non-success
/// status, undecodable body) yields None so the caller can skip the peer.
async fn fetch_chain(client: &Client, peer: &str) -> Option<ChainSnapshot> {
    let url = format!("http://{peer}/api/v1/chain/");
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("CONSENSUS - peer {peer} unreachable, skipping: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!(
            "CONSENSUS - peer {peer} answered {}, skipping",
            response.status()
        );
        return None;
    }

    match response.json::<ChainSnapshot>().await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("CONSENSUS - peer {peer} sent an undecodable chain, skipping: {e}");
            None
        }
    }
}

/// Apply the longest-valid-chain rule: starting from the local length,
/// keep the candidate with the greatest reported length that survives
/// validation. Strictly greater only, so ties favor the local chain.
fn select_longest(
    ledger: &Ledger,
    local_len: usize,
    snapshots: impl IntoIterator<Item = ChainSnapshot>,
) -> Option<Vec<Block>> {
    let mut max_len = local_len;
    let mut best = None;

    for snapshot in snapshots {
        if snapshot.length > max_len && ledger.is_valid_chain(&snapshot.chain) {
            max_len = snapshot.length;
            best = Some(snapshot.chain);
        }
    }

    best
}

/// Query every registered peer and adopt the longest valid chain seen,
/// if any beats the local one. Returns whether a replacement happened.
///
/// Peer fetches run with the ledger lock released; only the final swap
/// takes it, so a reader observes either the whole old chain or the whole
/// new one.
pub async fn resolve_conflicts(state: &AppState) -> bool {
    let (peers, local_len) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let peers: Vec<String> = ledger.peers.iter().cloned().collect();
        (peers, ledger.len())
    };

    debug!(
        "CONSENSUS - resolving against {} peer(s), local length {}",
        peers.len(),
        local_len
    );

    let mut snapshots = Vec::with_capacity(peers.len());
    for peer in &peers {
        if let Some(snapshot) = fetch_chain(&state.http, peer).await {
            debug!("CONSENSUS - peer {peer} reports length {}", snapshot.length);
            snapshots.push(snapshot);
        }
    }

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match select_longest(&ledger, local_len, snapshots) {
        Some(chain) => {
            info!(
                "CONSENSUS - chain replaced ({} -> {} blocks)",
                local_len,
                chain.len()
            );
            ledger.replace_chain(chain);
            true
        }
        None => {
            debug!("CONSENSUS - local chain is authoritative");
            false
        }
    }
}
