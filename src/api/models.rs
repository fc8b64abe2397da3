use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::consensus::PEER_TIMEOUT_SECS;
use crate::ledger::{DEFAULT_DIFFICULTY, Ledger};

/// Shared application state: the node's ledger behind a mutex, its
/// process-wide identity, and the HTTP client used to query peers.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub node_id: String,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn with_difficulty(difficulty: u32) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(difficulty)),
            node_id: Uuid::new_v4().simple().to_string(),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(PEER_TIMEOUT_SECS))
                .build()
                .expect("build http client"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_difficulty(DEFAULT_DIFFICULTY)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [crate::ledger::Block],
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub block: u64,
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_peers: usize,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub replaced: bool,
    pub message: &'static str,
    pub length: usize,
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub difficulty: u32,
    pub pending_transactions: usize,
    pub peers: usize,
}
