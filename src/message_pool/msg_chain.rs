// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::cmp::Ordering;
use std::ops::Index;

use ahash::HashMap;
use itertools::Itertools as _;
use num_traits::Zero;
use tracing::{debug, warn};

use crate::blocks::Tipset;
use crate::message::{Message, SignedMessage};
use crate::shim::{address::Address, econ::TokenAmount, gas::PriceList};

use super::{
    config::MpoolConfig,
    errors::Error,
    provider::Provider,
    utils::{get_gas_perf, get_gas_reward},
};

/// A run of messages with consecutive sequences from a single sender, with
/// aggregate metrics over its members.
#[derive(Clone, Debug)]
pub struct MsgChainNode {
    msgs: Vec<SignedMessage>,
    gas_reward: TokenAmount,
    gas_limit: u64,
    gas_perf: f64,
    valid: bool,
}

impl MsgChainNode {
    fn new(msg: SignedMessage, block_gas_limit: u64) -> Self {
        let gas_reward = get_gas_reward(&msg);
        let gas_limit = msg.gas_limit();
        Self {
            gas_perf: get_gas_perf(&gas_reward, gas_limit, block_gas_limit),
            msgs: vec![msg],
            gas_reward,
            gas_limit,
            valid: true,
        }
    }

    pub fn msgs(&self) -> &[SignedMessage] {
        &self.msgs
    }

    /// Sum of `gas_price * gas_limit` over all members.
    pub fn gas_reward(&self) -> &TokenAmount {
        &self.gas_reward
    }

    /// Sum of the gas limits of all members.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_perf(&self) -> f64 {
        self.gas_perf
    }

    /// Whether the chain still has members after trimming.
    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn first_sequence(&self) -> Option<u64> {
        self.msgs.first().map(|m| m.sequence())
    }

    pub fn last_sequence(&self) -> Option<u64> {
        self.msgs.last().map(|m| m.sequence())
    }

    /// Funds the sender needs to cover every member of the chain.
    pub fn required_funds(&self) -> TokenAmount {
        self.msgs
            .iter()
            .fold(TokenAmount::zero(), |acc, m| acc + m.required_funds())
    }

    /// Orders chains by how attractive they are to a block producer. A chain
    /// comparing `Greater` should be picked first.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.gas_perf
            .total_cmp(&other.gas_perf)
            .then_with(|| self.gas_reward.cmp(&other.gas_reward))
    }

    /// Appends the members of the following chain.
    fn merge(&mut self, next: MsgChainNode, block_gas_limit: u64) {
        debug_assert_eq!(
            self.last_sequence().and_then(|s| s.checked_add(1)),
            next.first_sequence(),
            "merged chains must be adjacent"
        );
        self.msgs.extend(next.msgs);
        self.gas_reward += next.gas_reward;
        self.gas_limit = self.gas_limit.saturating_add(next.gas_limit);
        self.gas_perf = get_gas_perf(&self.gas_reward, self.gas_limit, block_gas_limit);
    }

    /// Drops members from the tail until the chain fits in `gas_limit`.
    fn trim(&mut self, gas_limit: u64, block_gas_limit: u64) {
        while self.gas_limit > gas_limit {
            let Some(m) = self.msgs.pop() else {
                break;
            };
            self.gas_reward -= &get_gas_reward(&m);
            self.gas_limit = self.gas_limit.saturating_sub(m.gas_limit());
        }
        if self.msgs.is_empty() {
            self.valid = false;
            self.gas_limit = 0;
            self.gas_reward = TokenAmount::zero();
            self.gas_perf = 0.0;
        } else {
            self.gas_perf = get_gas_perf(&self.gas_reward, self.gas_limit, block_gas_limit);
        }
    }

    fn should_merge_into(&self, prev: &MsgChainNode, merge_equal_gas_perf: bool) -> bool {
        if merge_equal_gas_perf {
            prev.gas_perf <= self.gas_perf
        } else {
            prev.gas_perf < self.gas_perf
        }
    }
}

/// Chains of a single sender, ordered by sequence. A chain can only be
/// included in a block after all chains before it.
#[derive(Clone, Debug, Default)]
pub struct MsgChains {
    actor: Address,
    chains: Vec<MsgChainNode>,
}

impl MsgChains {
    pub fn new(actor: Address) -> Self {
        Self {
            actor,
            chains: Vec::new(),
        }
    }

    pub fn actor(&self) -> Address {
        self.actor
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn first(&self) -> Option<&MsgChainNode> {
        self.chains.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MsgChainNode> {
        self.chains.iter()
    }

    /// The chain preceding chain `i`.
    pub fn prev(&self, i: usize) -> Option<&MsgChainNode> {
        i.checked_sub(1).and_then(|i| self.chains.get(i))
    }

    /// The chain following chain `i`.
    pub fn next(&self, i: usize) -> Option<&MsgChainNode> {
        i.checked_add(1).and_then(|i| self.chains.get(i))
    }

    /// The chain that becomes eligible once the first `selected` chains of
    /// this sender have been included.
    pub fn next_selectable(&self, selected: usize) -> Option<&MsgChainNode> {
        self.chains.get(selected)
    }

    /// All messages of all chains, in sequence order.
    pub fn msgs(&self) -> impl Iterator<Item = &SignedMessage> {
        self.chains.iter().flat_map(|c| c.msgs.iter())
    }

    pub fn gas_limit(&self) -> u64 {
        self.chains
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.gas_limit))
    }

    /// Ranks senders by their leading chain, best first.
    pub(in crate::message_pool) fn cmp_leading(&self, other: &Self) -> Ordering {
        match (self.first(), other.first()) {
            (Some(a), Some(b)) => b.compare(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.actor.cmp(&other.actor))
    }
}

impl Index<usize> for MsgChains {
    type Output = MsgChainNode;

    fn index(&self, i: usize) -> &Self::Output {
        &self.chains[i]
    }
}

impl<'a> IntoIterator for &'a MsgChains {
    type Item = &'a MsgChainNode;
    type IntoIter = std::slice::Iter<'a, MsgChainNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}

/// Builds the chains of pending messages from `actor` that can be included on
/// top of `ts`.
///
/// Only the run of consecutive sequences starting at the actor's state
/// sequence is considered. That run is cut at the first message with too
/// little gas to be included and at the first message the actor can no longer
/// pay for. The remaining messages are grouped so that gas performance
/// decreases from one chain to the next, and finally cut to what fits in a
/// block.
pub fn create_message_chains<T>(
    api: &T,
    actor: &Address,
    mset: &HashMap<u64, SignedMessage>,
    ts: &Tipset,
    config: &MpoolConfig,
) -> Result<MsgChains, Error>
where
    T: Provider,
{
    debug_assert!(
        mset.values().all(|m| m.from() == *actor),
        "message set of {actor} contains messages of other senders"
    );

    let mut chains = MsgChains::new(*actor);
    // collect all messages and sort
    let msgs: Vec<&SignedMessage> = mset.values().sorted_by_key(|m| m.sequence()).collect();
    let Some(lowest) = msgs.first().map(|m| m.sequence()) else {
        return Ok(chains);
    };

    let a = api.get_actor_after(actor, ts)?;
    match lowest.cmp(&a.sequence) {
        Ordering::Equal => {}
        Ordering::Less => {
            warn!(
                "encountered message from actor {} with nonce {} less than the current nonce {}",
                actor, lowest, a.sequence
            );
            return Ok(chains);
        }
        Ordering::Greater => {
            debug!(
                "messages from actor {} start at nonce {} but the current nonce is {}",
                actor, lowest, a.sequence
            );
            return Ok(chains);
        }
    }

    let msgs = sequential_prefix(actor, msgs);
    let msgs = trim_under_gassed(actor, msgs, &config.price_list())?;
    let msgs = trim_to_balance(actor, msgs, &a.balance);

    let mut nodes = merge_by_gas_perf(msgs, config);
    trim_to_block_gas_limit(actor, &mut nodes, config.block_gas_limit);
    chains.chains = nodes;
    Ok(chains)
}

/// Keeps the messages up to the first gap in sequences.
fn sequential_prefix<'a>(
    actor: &Address,
    mut msgs: Vec<&'a SignedMessage>,
) -> Vec<&'a SignedMessage> {
    let run = 1 + msgs
        .iter()
        .tuple_windows()
        .take_while(|(a, b)| a.sequence().checked_add(1) == Some(b.sequence()))
        .count();
    if run < msgs.len() {
        debug!(
            "dropping {} messages from actor {} after a nonce gap",
            msgs.len() - run,
            actor
        );
        msgs.truncate(run);
    }
    msgs
}

/// Keeps the messages before the first one whose gas limit doesn't cover its
/// on-chain cost.
fn trim_under_gassed<'a>(
    actor: &Address,
    mut msgs: Vec<&'a SignedMessage>,
    price_list: &PriceList,
) -> Result<Vec<&'a SignedMessage>, Error> {
    let mut valid = msgs.len();
    for (i, m) in msgs.iter().enumerate() {
        let min_gas = price_list.on_chain_message(m.chain_length()?);
        if m.gas_limit() < min_gas {
            debug!(
                "message from actor {} with nonce {} has gas limit {} below the minimum {}",
                actor,
                m.sequence(),
                m.gas_limit(),
                min_gas
            );
            valid = i;
            break;
        }
    }
    msgs.truncate(valid);
    Ok(msgs)
}

/// Keeps the messages the actor can pay for, in sequence order.
fn trim_to_balance<'a>(
    actor: &Address,
    mut msgs: Vec<&'a SignedMessage>,
    balance: &TokenAmount,
) -> Vec<&'a SignedMessage> {
    let mut required = TokenAmount::zero();
    let affordable = msgs
        .iter()
        .position(|m| {
            required += m.required_funds();
            required > *balance
        })
        .unwrap_or(msgs.len());
    if affordable < msgs.len() {
        debug!(
            "actor {} with balance {} can only afford {} of {} messages",
            actor,
            balance,
            affordable,
            msgs.len()
        );
        msgs.truncate(affordable);
    }
    msgs
}

/// Groups messages into chains with decreasing gas performance. A chain that
/// performs better than the one before it is merged into it, as it can only be
/// included after its predecessor anyway.
fn merge_by_gas_perf(msgs: Vec<&SignedMessage>, config: &MpoolConfig) -> Vec<MsgChainNode> {
    let mut chains: Vec<MsgChainNode> = Vec::with_capacity(msgs.len());
    for m in msgs {
        let mut node = MsgChainNode::new(m.clone(), config.block_gas_limit);
        while let Some(mut prev) =
            chains.pop_if(|prev| node.should_merge_into(prev, config.merge_equal_gas_perf))
        {
            prev.merge(node, config.block_gas_limit);
            node = prev;
        }
        chains.push(node);
    }
    chains
}

/// Drops whatever doesn't fit in a block. The first chain that overflows is
/// trimmed from its tail, all chains after it are dropped.
fn trim_to_block_gas_limit(actor: &Address, chains: &mut Vec<MsgChainNode>, block_gas_limit: u64) {
    let mut gas_left = block_gas_limit;
    let Some(edge) = chains.iter().position(|c| {
        let fits = c.gas_limit <= gas_left;
        if fits {
            gas_left -= c.gas_limit;
        }
        !fits
    }) else {
        return;
    };

    let mut keep = edge;
    if let Some(chain) = chains.get_mut(edge) {
        chain.trim(gas_left, block_gas_limit);
        if chain.valid {
            keep += 1;
        }
    }
    debug!(
        "dropping {} of {} chains from actor {} exceeding the block gas limit",
        chains.len() - keep,
        chains.len(),
        actor
    );
    chains.truncate(keep);
}
