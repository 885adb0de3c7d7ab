// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::message::{Message as _, SignedMessage};
use crate::shim::econ::TokenAmount;

/// Gets the gas reward for the given message, assuming it consumes its full
/// gas limit.
pub(in crate::message_pool) fn get_gas_reward(msg: &SignedMessage) -> TokenAmount {
    msg.gas_price() * msg.gas_limit()
}

/// Gas reward per unit of gas limit, scaled by the block gas limit.
pub(in crate::message_pool) fn get_gas_perf(
    gas_reward: &TokenAmount,
    gas_limit: u64,
    block_gas_limit: u64,
) -> f64 {
    if gas_limit == 0 {
        return 0.0;
    }
    let a = BigRational::new(gas_reward.atto() * block_gas_limit, gas_limit.into());
    a.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::econ::BLOCK_GAS_LIMIT;

    #[test]
    fn gas_perf_is_price_scaled_by_block_limit() {
        let reward = TokenAmount::from_atto(3 * 1_000);
        assert_eq!(
            get_gas_perf(&reward, 1_000, BLOCK_GAS_LIMIT),
            3.0 * BLOCK_GAS_LIMIT as f64
        );
        assert_eq!(get_gas_perf(&reward, 0, BLOCK_GAS_LIMIT), 0.0);
    }
}
