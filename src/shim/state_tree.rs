// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::shim::econ::TokenAmount;

/// The part of an actor's on-chain state the message pool depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorState {
    /// Token balance of the actor
    pub balance: TokenAmount,
    /// Sequence of the next message the actor may send
    pub sequence: u64,
}

impl ActorState {
    pub fn new(balance: TokenAmount, sequence: u64) -> Self {
        Self { balance, sequence }
    }
}
