use std::collections::HashSet;
use std::mem;

use super::{Block, pow};
use crate::transaction::Transaction;

/// In-memory ledger: the hash-linked chain, the pool of transactions
/// waiting to be sealed, and the peers consulted during conflict
/// resolution. One instance per node process; state is not persisted.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pub pending: Vec<Transaction>,
    pub peers: HashSet<String>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a new ledger seeded with its genesis block.
    pub fn new(difficulty: u32) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            peers: HashSet::new(),
            difficulty,
        };
        ledger.chain.push(Block::genesis());
        ledger
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Accept a transaction into the pending pool and return the index of
    /// the block that will eventually seal it.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Run the proof search against the current tip, mint the reward to
    /// `node_id`, and append a block sealing everything pending.
    ///
    /// The pool is drained in the same borrow that appends the block, so
    /// a sealed transaction can never linger in the pool and a submission
    /// racing this call lands in the next block.
    pub fn mine(&mut self, node_id: &str) -> &Block {
        let last = self.last_block();
        let proof = pow::find_proof(last.proof, self.difficulty);
        let previous_hash = last.hash();

        self.pending.push(Transaction::reward(node_id));

        let block = Block::forge(
            self.chain.len() as u64 + 1,
            mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Check a candidate chain: every block must link to its predecessor's
    /// digest and carry a proof valid against the predecessor's proof.
    ///
    /// Nothing else is checked; in particular index contiguity and
    /// transaction shape are out of scope for this validator.
    pub fn is_valid_chain(&self, candidate: &[Block]) -> bool {
        for pair in candidate.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);

            if curr.previous_hash != prev.hash() {
                return false;
            }

            if !pow::valid_proof(prev.proof, curr.proof, self.difficulty) {
                return false;
            }
        }
        true
    }

    /// Wholesale chain replacement, used only by conflict resolution once
    /// a longer valid candidate has been picked.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    /// Record a peer location. Returns true when it was not known before.
    pub fn register_peer(&mut self, peer: String) -> bool {
        self.peers.insert(peer)
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::transaction::Transaction;

    // Difficulty 1 keeps proof searches near-instant in tests; the
    // predicate itself is difficulty-parametric.
    fn test_ledger() -> Ledger {
        Ledger::new(1)
    }

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let ledger = test_ledger();
        assert_eq!(ledger.len(), 1);

        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.proof, 100);
        assert_eq!(genesis.previous_hash, "1");
    }

    #[test]
    fn submission_reports_the_sealing_block_index() {
        let mut ledger = test_ledger();
        let index = ledger.submit_transaction(Transaction::new("alice".into(), "bob".into(), 5));
        assert_eq!(index, 2);

        // Still pending until a block is mined.
        assert_eq!(ledger.pending.len(), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn mining_seals_pending_plus_exactly_one_reward() {
        let mut ledger = test_ledger();
        ledger.submit_transaction(Transaction::new("alice".into(), "bob".into(), 5));

        let block = ledger.mine("node-1").clone();
        assert_eq!(block.index, 2);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.pending.is_empty());

        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].sender, "alice");
        assert_eq!(block.transactions[0].recipient, "bob");
        assert_eq!(block.transactions[0].amount, 5);

        let rewards: Vec<_> = block
            .transactions
            .iter()
            .filter(|tx| tx.is_reward())
            .collect();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].recipient, "node-1");
    }

    #[test]
    fn mined_blocks_link_to_their_predecessor() {
        let mut ledger = test_ledger();
        ledger.mine("node-1");
        ledger.mine("node-1");

        assert_eq!(ledger.chain[1].previous_hash, ledger.chain[0].hash());
        assert_eq!(ledger.chain[2].previous_hash, ledger.chain[1].hash());
    }

    #[test]
    fn chains_built_by_mining_always_validate() {
        let mut ledger = test_ledger();
        for _ in 0..3 {
            ledger.mine("node-1");
        }
        assert!(ledger.is_valid_chain(&ledger.chain));
    }

    #[test]
    fn single_block_chain_is_trivially_valid() {
        let ledger = test_ledger();
        assert!(ledger.is_valid_chain(&ledger.chain));
        assert!(ledger.is_valid_chain(&[]));
    }

    #[test]
    fn tampered_proof_is_rejected() {
        let mut ledger = test_ledger();
        ledger.mine("node-1");

        let mut forged = ledger.chain.clone();
        forged[1].proof += 1;
        assert!(!ledger.is_valid_chain(&forged));
    }

    #[test]
    fn broken_linkage_is_rejected() {
        let mut ledger = test_ledger();
        ledger.submit_transaction(Transaction::new("alice".into(), "bob".into(), 5));
        ledger.mine("node-1");
        ledger.mine("node-1");

        let mut forged = ledger.chain.clone();
        // Rewriting a sealed block invalidates the link stored in its
        // successor.
        forged[1].transactions[0].amount = 500;
        assert!(!ledger.is_valid_chain(&forged));
    }
}
