// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub(in crate::message_pool) mod msg_pool;
pub(in crate::message_pool) mod provider;
pub mod test_provider;
pub(in crate::message_pool) mod utils;

use ahash::HashMap;
use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};
use tracing::debug;

use crate::blocks::Tipset;
use crate::message_pool::{
    config::MpoolConfig,
    errors::Error,
    msg_chain::{MsgChains, create_message_chains},
    msg_pool::MsgSet,
    provider::Provider,
};
use crate::shim::address::Address;

const REPLACE_BY_FEE_RATIO: f32 = 1.25;
pub(in crate::message_pool) const RBF_NUM: u64 = ((REPLACE_BY_FEE_RATIO - 1f32) * 256f32) as u64;
pub(in crate::message_pool) const RBF_DENOM: u64 = 256;

/// Builds the chains of every pending sender on top of `ts`. Senders are
/// processed in parallel and returned best leading chain first; senders
/// without any includable message are left out.
pub fn create_pending_chains<T>(
    api: &T,
    pending: &HashMap<Address, MsgSet>,
    ts: &Tipset,
    config: &MpoolConfig,
) -> Result<Vec<MsgChains>, Error>
where
    T: Provider + Sync,
{
    let mut chains = pending
        .par_iter()
        .map(|(actor, mset)| create_message_chains(api, actor, mset.msgs(), ts, config))
        .filter(|res| res.as_ref().map_or(true, |chains| !chains.is_empty()))
        .collect::<Result<Vec<_>, _>>()?;
    chains.sort_by(|a, b| a.cmp_leading(b));
    debug!(
        "created chains for {} of {} pending actors at epoch {}",
        chains.len(),
        pending.len(),
        ts.epoch()
    );
    Ok(chains)
}

#[cfg(test)]
mod tests {
    use super::test_provider::TestApi;
    use super::*;
    use crate::message::SignedMessage;
    use crate::shim::{econ::TokenAmount, message::Message};
    use ahash::HashMapExt as _;

    const TEST_GAS_LIMIT: u64 = 6955002;

    fn create_smsg(from: Address, sequence: u64, gas_price: u64) -> SignedMessage {
        let message = Message {
            from,
            to: Address::new_id(1001),
            sequence,
            gas_limit: TEST_GAS_LIMIT,
            gas_price: TokenAmount::from_atto(gas_price),
            ..Message::default()
        };
        SignedMessage::mock_secp_signed_message(message)
    }

    fn pending_of(api: &TestApi, senders: &[(Address, u64)]) -> HashMap<Address, MsgSet> {
        let mut pending = HashMap::new();
        for (from, gas_price) in senders {
            api.set_state_balance_raw(from, TokenAmount::from_whole(1));
            let mut mset = MsgSet::new(0);
            for i in 0..3 {
                mset.add(create_smsg(*from, i, *gas_price)).unwrap();
            }
            pending.insert(*from, mset);
        }
        pending
    }

    #[test]
    fn pending_chains_are_ranked_by_leading_chain() {
        let api = TestApi::default();
        let (a1, a2, a3) = (
            Address::new_secp256k1(1),
            Address::new_secp256k1(2),
            Address::new_secp256k1(3),
        );
        let pending = pending_of(&api, &[(a1, 1), (a2, 3), (a3, 2)]);
        let ts = Tipset::mock(1, 1).unwrap();

        let chains = create_pending_chains(&api, &pending, &ts, &MpoolConfig::default()).unwrap();
        let actors = chains.iter().map(|c| c.actor()).collect::<Vec<_>>();
        assert_eq!(actors, vec![a2, a3, a1]);
        for c in &chains {
            assert_eq!(c.msgs().count(), 3);
        }
    }

    #[test]
    fn senders_without_chains_are_dropped() {
        let api = TestApi::default();
        let (a1, a2) = (Address::new_secp256k1(1), Address::new_secp256k1(2));
        let pending = pending_of(&api, &[(a1, 1), (a2, 1)]);
        // all of a2's messages were already applied
        api.set_state_sequence(&a2, 3);
        let ts = Tipset::mock(1, 1).unwrap();

        let chains = create_pending_chains(&api, &pending, &ts, &MpoolConfig::default()).unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].actor(), a1);
    }

    #[test]
    fn provider_failure_fails_the_batch() {
        let api = TestApi::default();
        let pending = pending_of(&api, &[(Address::new_secp256k1(1), 1)]);
        let ts = Tipset::mock(1, 1).unwrap();
        api.prune_tipset(&ts);

        let res = create_pending_chains(&api, &pending, &ts, &MpoolConfig::default());
        assert!(matches!(res, Err(Error::StateUnavailable(_))));
    }

    #[test]
    fn rbf_ratio() {
        assert_eq!(RBF_NUM, 64);
    }
}
