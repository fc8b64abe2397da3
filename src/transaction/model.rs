use serde::{Deserialize, Serialize};

use crate::ledger::{MINING_REWARD, REWARD_SENDER};

/// A transfer of `amount` units from `sender` to `recipient`.
///
/// Identifiers are opaque strings with no ownership proof attached.
/// The sender `"0"` is reserved for system-minted reward transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: String, recipient: String, amount: u64) -> Self {
        Self {
            sender,
            recipient,
            amount,
        }
    }

    /// Build the reward transfer minted to the node that forges a block.
    pub fn reward(recipient: &str) -> Self {
        Self {
            sender: REWARD_SENDER.to_string(),
            recipient: recipient.to_string(),
            amount: MINING_REWARD,
        }
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}
