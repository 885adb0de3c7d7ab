// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// Network prefix used when rendering addresses.
pub const MAINNET_PREFIX: &str = "f";

/// Address protocol identifiers. Only the protocols the message pool deals
/// with are represented.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Protocol {
    /// ID protocol addressing
    #[default]
    Id = 0,
    /// `secp256k1` key addressing
    Secp256k1 = 1,
    /// BLS key addressing
    Bls = 3,
}

/// Actor address. Key addresses carry a stable numeric payload standing in
/// for the key hash.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address {
    protocol: Protocol,
    payload: u64,
}

impl Address {
    /// Generates new address using ID protocol.
    pub const fn new_id(id: u64) -> Self {
        Self {
            protocol: Protocol::Id,
            payload: id,
        }
    }

    /// Generates a `secp256k1` key address from a key index.
    pub const fn new_secp256k1(key: u64) -> Self {
        Self {
            protocol: Protocol::Secp256k1,
            payload: key,
        }
    }

    /// Generates a BLS key address from a key index.
    pub const fn new_bls(key: u64) -> Self {
        Self {
            protocol: Protocol::Bls,
            payload: key,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{MAINNET_PREFIX}{}{}",
            self.protocol() as u8,
            self.payload
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Address::new_id(1234).to_string(), "f01234");
        assert_eq!(Address::new_bls(7).to_string(), "f37");
        assert_eq!(Address::default(), Address::new_id(0));
    }
}
