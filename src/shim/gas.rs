// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

/// Gas charged for including a message on chain.
pub const ON_CHAIN_MESSAGE_BASE: u64 = 38_863;
/// Gas charged per serialized byte of an on-chain message.
pub const ON_CHAIN_MESSAGE_PER_BYTE: u64 = 1_300;

/// Provides prices for the on-chain storage of messages.
///
/// Gas cost charged to the originator of an on-chain message (regardless of
/// whether it succeeds or fails in application) is given by:
///   `OnChainMessageBase + len(serialized message) * OnChainMessagePerByte`
/// This is the floor a message's gas limit must cover to be includable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub on_chain_message_base: u64,
    pub on_chain_message_per_byte: u64,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            on_chain_message_base: ON_CHAIN_MESSAGE_BASE,
            on_chain_message_per_byte: ON_CHAIN_MESSAGE_PER_BYTE,
        }
    }
}

impl PriceList {
    /// Returns the gas required for storing a message of a given size in the chain.
    #[inline]
    pub fn on_chain_message(&self, msg_size: usize) -> u64 {
        let msg_size = u64::try_from(msg_size).unwrap_or(u64::MAX);
        self.on_chain_message_base
            .saturating_add(self.on_chain_message_per_byte.saturating_mul(msg_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_chain_message_cost() {
        let pl = PriceList::default();
        assert_eq!(pl.on_chain_message(0), ON_CHAIN_MESSAGE_BASE);
        assert_eq!(
            pl.on_chain_message(100),
            ON_CHAIN_MESSAGE_BASE + 100 * ON_CHAIN_MESSAGE_PER_BYTE
        );
        assert_eq!(pl.on_chain_message(usize::MAX), u64::MAX);
    }
}
