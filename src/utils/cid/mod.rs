// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use multihash_codetable::{Code, MultihashDigest as _};

/// Multicodec code of `dag-cbor`.
pub const DAG_CBOR: u64 = 0x71;

/// Extension methods for constructing `dag-cbor` [Cid]
pub trait CidCborExt {
    /// Default CID builder for Filecoin
    ///
    /// - The codec is [`DAG_CBOR`]
    /// - The hash function is 256 bit BLAKE2b
    fn from_cbor_blake2b256<S: serde::ser::Serialize>(obj: &S) -> anyhow::Result<Cid> {
        let bytes = crate::utils::encoding::to_vec(obj)?;
        Ok(Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&bytes)))
    }
}

impl CidCborExt for Cid {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cid_is_stable_for_equal_input() {
        let a = Cid::from_cbor_blake2b256(&(1u64, "forest")).unwrap();
        let b = Cid::from_cbor_blake2b256(&(1u64, "forest")).unwrap();
        let c = Cid::from_cbor_blake2b256(&(2u64, "forest")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.codec(), DAG_CBOR);
    }
}
