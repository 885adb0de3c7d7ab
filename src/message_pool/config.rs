// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::shim::{
    econ::BLOCK_GAS_LIMIT,
    gas::{ON_CHAIN_MESSAGE_BASE, ON_CHAIN_MESSAGE_PER_BYTE, PriceList},
};
use crate::utils::io::read_toml_file;

/// Configuration of the message chain builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpoolConfig {
    /// Gas ceiling of a single block. Bounds the total gas limit of the
    /// chains built for one sender.
    pub block_gas_limit: u64,
    /// Fixed part of the on-chain message cost.
    pub on_chain_message_base: u64,
    /// Per-byte part of the on-chain message cost.
    pub on_chain_message_per_byte: u64,
    /// Merge neighbouring chains with equal gas performance.
    pub merge_equal_gas_perf: bool,
}

impl Default for MpoolConfig {
    fn default() -> Self {
        Self {
            block_gas_limit: BLOCK_GAS_LIMIT,
            on_chain_message_base: ON_CHAIN_MESSAGE_BASE,
            on_chain_message_per_byte: ON_CHAIN_MESSAGE_PER_BYTE,
            merge_equal_gas_perf: false,
        }
    }
}

impl MpoolConfig {
    /// Loads the configuration from a TOML file. Missing keys fall back to
    /// their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: Self = read_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.block_gas_limit > 0, "block gas limit must be positive");
        Ok(())
    }

    /// Price list used to derive the minimum gas a message must carry.
    pub fn price_list(&self) -> PriceList {
        PriceList {
            on_chain_message_base: self.on_chain_message_base,
            on_chain_message_per_byte: self.on_chain_message_per_byte,
        }
    }
}
