// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::blocks::Tipset;
use crate::message_pool::errors::Error;
use crate::shim::{address::Address, econ::TokenAmount, state_tree::ActorState};

/// Provider Trait. This trait will be used by the message pool to read the
/// chain state it needs to build message chains. Lookups are scoped to a
/// tipset and never mutate state.
pub trait Provider {
    /// Return state actor for given address given the tipset that the a temp
    /// `StateTree` will be rooted at. Return `ActorState` or Error depending on
    /// whether or not `ActorState` is found
    fn get_actor_after(&self, addr: &Address, ts: &Tipset) -> Result<ActorState, Error>;

    /// Balance of the actor at the given tipset.
    fn state_balance(&self, addr: &Address, ts: &Tipset) -> Result<TokenAmount, Error> {
        Ok(self.get_actor_after(addr, ts)?.balance)
    }

    /// Next sequence the chain expects from the actor at the given tipset.
    fn state_sequence(&self, addr: &Address, ts: &Tipset) -> Result<u64, Error> {
        Ok(self.get_actor_after(addr, ts)?.sequence)
    }
}
