// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::shim::{address::Address, econ::TokenAmount};

/// Method number indicator for calling actor methods.
pub type MethodNum = u64;

#[derive(Clone, Default, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Message {
    pub version: u64,
    pub from: Address,
    pub to: Address,
    pub sequence: u64,
    pub value: TokenAmount,
    pub method_num: MethodNum,
    pub params: Vec<u8>,
    pub gas_limit: u64,
    pub gas_price: TokenAmount,
}

impl Message {
    pub fn cid(&self) -> anyhow::Result<cid::Cid> {
        use crate::utils::cid::CidCborExt;
        cid::Cid::from_cbor_blake2b256(self)
    }
}
