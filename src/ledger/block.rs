use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the ledger, sealing a batch of transactions.
///
/// Field declaration order IS the canonical encoding order: `hash()`
/// serializes the struct as-is, and every node must agree on the digest
/// of the same content. Do not reorder fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block. Its previous-link is the placeholder
    /// `"1"`, not a digest, and its proof is a fixed seed value.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: Utc::now().timestamp(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Forge a block sealing `transactions` with an already-found proof.
    pub fn forge(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 digest of the block's canonical JSON encoding, hex-encoded.
    /// Pure function of the block's content.
    pub fn hash(&self) -> String {
        let encoded = serde_json::to_vec(self).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_has_placeholder_linkage() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert!(b.transactions.is_empty());
        assert_eq!(b.proof, 100);
        assert_eq!(b.previous_hash, "1");
    }

    #[test]
    fn hash_is_stable_for_same_content() {
        let b = Block::forge(
            2,
            vec![Transaction::new("alice".into(), "bob".into(), 5)],
            42,
            "prev".into(),
        );
        assert_eq!(b.hash(), b.hash());
        assert_eq!(b.hash().len(), 64); // hex of 256 bits
    }

    #[test]
    fn hash_changes_when_content_is_tampered() {
        let mut b = Block::forge(2, Vec::new(), 42, "prev".into());
        let before = b.hash();

        b.transactions
            .push(Transaction::new("mallory".into(), "eve".into(), 1_000));
        assert_ne!(before, b.hash());

        let mut c = b.clone();
        c.proof += 1;
        assert_ne!(b.hash(), c.hash());
    }
}
