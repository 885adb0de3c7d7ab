// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

// Pending message bookkeeping for the message pool. Messages are grouped per
// sender and keyed by sequence; chain construction reads these sets but never
// mutates them.

use ahash::{HashMap, HashMapExt};
use tracing::debug;

use crate::blocks::Tipset;
use crate::message::{Message, SignedMessage};
use crate::shim::{address::Address, econ::TokenAmount};

use crate::message_pool::{
    errors::Error,
    msgpool::{RBF_DENOM, RBF_NUM},
    provider::Provider,
};

/// Simple structure that contains a hash-map of messages where k: a message
/// sequence, v: the message with that sequence.
#[derive(Clone, Default, Debug)]
pub struct MsgSet {
    pub(in crate::message_pool) msgs: HashMap<u64, SignedMessage>,
    next_sequence: u64,
}

impl MsgSet {
    /// Generate a new `MsgSet` with an empty hash-map and setting the sequence
    /// specifically.
    pub fn new(sequence: u64) -> Self {
        MsgSet {
            msgs: HashMap::new(),
            next_sequence: sequence,
        }
    }

    /// Add a signed message to the `MsgSet`. Increase `next_sequence` if the
    /// message has a sequence greater than any existing message sequence.
    ///
    /// A message with the same sequence as a pending one replaces it only if
    /// its gas price is high enough to pay the replace-by-fee premium.
    pub fn add(&mut self, m: SignedMessage) -> Result<(), Error> {
        if let Some(exms) = self.msgs.get(&m.sequence()) {
            if m.cid()? == exms.cid()? {
                return Err(Error::DuplicateSequence);
            }
            let min_price = replace_by_fee_min_price(&exms.gas_price());
            if m.gas_price() <= min_price {
                debug!(
                    "rejecting replacement of sequence {}: gas price {} is not above {min_price}",
                    m.sequence(),
                    m.gas_price()
                );
                return Err(Error::GasPriceTooLow);
            }
        }

        if self.msgs.is_empty() || m.sequence() >= self.next_sequence {
            self.next_sequence = m.sequence().saturating_add(1);
        }
        self.msgs.insert(m.sequence(), m);
        Ok(())
    }

    /// Removes message with the given sequence. If applied, update the set's
    /// next sequence.
    pub fn rm(&mut self, sequence: u64, applied: bool) {
        if self.msgs.remove(&sequence).is_none() {
            if applied && sequence >= self.next_sequence {
                self.next_sequence = sequence.saturating_add(1);
                while self.msgs.contains_key(&self.next_sequence) {
                    self.next_sequence += 1;
                }
            }
            return;
        }

        if applied {
            // an applied message can't fill a gap
            if sequence >= self.next_sequence {
                self.next_sequence = sequence.saturating_add(1);
            }
            return;
        }
        // a pruned message rewinds the sequence if it opens a gap
        if sequence < self.next_sequence {
            self.next_sequence = sequence;
        }
    }

    /// Pending messages keyed by sequence.
    pub fn msgs(&self) -> &HashMap<u64, SignedMessage> {
        &self.msgs
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }
}

/// The lowest gas price a replacement message must exceed.
fn replace_by_fee_min_price(price: &TokenAmount) -> TokenAmount {
    price + &(price * RBF_NUM).div_floor(RBF_DENOM) + TokenAmount::from_atto(1u8)
}

/// Inserts a message into the pending set of its sender. A sender seen for
/// the first time starts at its state sequence at the given tipset; messages
/// below that sequence have already been applied and are rejected.
pub fn add_pending<T>(
    api: &T,
    pending: &mut HashMap<Address, MsgSet>,
    ts: &Tipset,
    m: SignedMessage,
) -> Result<(), Error>
where
    T: Provider,
{
    let from = m.from();
    let state_sequence = api.state_sequence(&from, ts)?;
    if m.sequence() < state_sequence {
        return Err(Error::SequenceTooLow);
    }
    match pending.get_mut(&from) {
        Some(mset) => mset.add(m),
        None => {
            let mut mset = MsgSet::new(state_sequence);
            mset.add(m)?;
            pending.insert(from, mset);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message_pool::msgpool::test_provider::TestApi;
    use crate::shim::message::Message as ShimMessage;

    fn create_smsg(sequence: u64, gas_price: u64) -> SignedMessage {
        let message = ShimMessage {
            from: Address::new_secp256k1(1),
            to: Address::new_id(1001),
            sequence,
            gas_limit: 6955002,
            gas_price: TokenAmount::from_atto(gas_price),
            ..ShimMessage::default()
        };
        SignedMessage::mock_secp_signed_message(message)
    }

    #[test]
    fn add_tracks_next_sequence() {
        let mut mset = MsgSet::new(0);
        mset.add(create_smsg(0, 100)).unwrap();
        mset.add(create_smsg(1, 100)).unwrap();
        mset.add(create_smsg(5, 100)).unwrap();
        assert_eq!(mset.next_sequence(), 6);
        assert_eq!(mset.len(), 3);
    }

    #[test]
    fn identical_message_is_a_duplicate() {
        let mut mset = MsgSet::new(0);
        mset.add(create_smsg(0, 100)).unwrap();
        assert_eq!(mset.add(create_smsg(0, 100)), Err(Error::DuplicateSequence));
    }

    #[test]
    fn replace_by_fee_needs_a_premium() {
        let mut mset = MsgSet::new(0);
        mset.add(create_smsg(0, 100)).unwrap();
        // 100 + 100 * 64 / 256 + 1 = 126
        assert_eq!(mset.add(create_smsg(0, 126)), Err(Error::GasPriceTooLow));
        mset.add(create_smsg(0, 127)).unwrap();
        assert_eq!(
            mset.msgs()[&0].gas_price(),
            TokenAmount::from_atto(127),
            "replacement should be stored"
        );
        assert_eq!(mset.len(), 1);
    }

    #[test]
    fn rm_adjusts_next_sequence() {
        let mut mset = MsgSet::new(0);
        for i in 0..3 {
            mset.add(create_smsg(i, 100)).unwrap();
        }
        // pruned message rewinds
        mset.rm(1, false);
        assert_eq!(mset.next_sequence(), 1);

        // applied message at the end moves forward over pending ones
        let mut mset = MsgSet::new(0);
        for i in 0..4 {
            mset.add(create_smsg(i, 100)).unwrap();
        }
        mset.rm(2, false);
        assert_eq!(mset.next_sequence(), 2);
        mset.rm(2, true);
        assert_eq!(mset.next_sequence(), 4);
    }

    #[test]
    fn add_pending_starts_at_state_sequence() {
        let api = TestApi::default();
        let ts = Tipset::mock(1, 1).unwrap();
        let sender = Address::new_secp256k1(1);
        api.set_state_sequence(&sender, 2);

        let mut pending = HashMap::new();
        assert_eq!(
            add_pending(&api, &mut pending, &ts, create_smsg(1, 100)),
            Err(Error::SequenceTooLow)
        );
        add_pending(&api, &mut pending, &ts, create_smsg(2, 100)).unwrap();
        add_pending(&api, &mut pending, &ts, create_smsg(3, 100)).unwrap();
        assert_eq!(pending[&sender].len(), 2);
        assert_eq!(pending[&sender].next_sequence(), 4);
    }
}
