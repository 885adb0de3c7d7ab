// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Contains the implementation of an in-memory [`Provider`] for replaying
//! chain construction without a node.

use ahash::{HashMap, HashSet};
use parking_lot::RwLock;

use crate::blocks::{Tipset, TipsetKey};
use crate::message_pool::{errors::Error, provider::Provider};
use crate::shim::{address::Address, econ::TokenAmount, state_tree::ActorState};

/// Balance of any actor without an explicitly set one.
pub const DEFAULT_TEST_BALANCE: u64 = 10_000_000_000;

/// Struct used for creating a provider when writing tests involving message
/// pool
#[derive(Default)]
pub struct TestApi {
    inner: RwLock<TestApiInner>,
}

#[derive(Default)]
struct TestApiInner {
    state_sequence: HashMap<Address, u64>,
    balances: HashMap<Address, TokenAmount>,
    pruned: HashSet<TipsetKey>,
}

impl TestApi {
    /// Set the state sequence for an Address for `TestApi`
    pub fn set_state_sequence(&self, addr: &Address, sequence: u64) {
        self.inner.write().state_sequence.insert(*addr, sequence);
    }

    /// Set the state balance for an Address for `TestApi`
    pub fn set_state_balance_raw(&self, addr: &Address, bal: TokenAmount) {
        self.inner.write().balances.insert(*addr, bal);
    }

    /// Makes every state lookup at the given tipset fail, as if its state
    /// had been garbage collected.
    pub fn prune_tipset(&self, ts: &Tipset) {
        self.inner.write().pruned.insert(ts.key().clone());
    }
}

impl Provider for TestApi {
    fn get_actor_after(&self, addr: &Address, ts: &Tipset) -> Result<ActorState, Error> {
        let inner = self.inner.read();
        if inner.pruned.contains(ts.key()) {
            return Err(Error::StateUnavailable(format!(
                "state of tipset {} at epoch {} has been pruned",
                ts.key(),
                ts.epoch()
            )));
        }
        let balance = match inner.balances.get(addr) {
            Some(b) => b.clone(),
            None => TokenAmount::from_atto(DEFAULT_TEST_BALANCE),
        };
        let sequence = inner.state_sequence.get(addr).copied().unwrap_or_default();
        Ok(ActorState::new(balance, sequence))
    }
}
