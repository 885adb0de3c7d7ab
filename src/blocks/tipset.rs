// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use cid::Cid;
use itertools::Itertools as _;
use crate::utils::cid::CidCborExt as _;

/// Epoch number of a chain.
pub type ChainEpoch = i64;

/// A set of CIDs forming a unique key for a tipset.
/// Equal keys will have equivalent iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TipsetKey(Vec<Cid>);

impl TipsetKey {
    pub fn cids(&self) -> &[Cid] {
        &self.0
    }
}

impl From<Vec<Cid>> for TipsetKey {
    fn from(cids: Vec<Cid>) -> Self {
        Self(cids)
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// The reference point against which actor state is resolved. Only the
/// parts of a tipset the message pool needs are carried.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tipset {
    key: TipsetKey,
    epoch: ChainEpoch,
}

impl Tipset {
    pub fn new(key: TipsetKey, epoch: ChainEpoch) -> Self {
        Self { key, epoch }
    }

    /// Returns the key of the tipset.
    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    /// Returns the epoch of the tipset.
    pub fn epoch(&self) -> ChainEpoch {
        self.epoch
    }

    /// Builds a single-block tipset at `epoch` whose block CID is derived
    /// from `(epoch, ticket)`.
    pub fn mock(epoch: ChainEpoch, ticket: u64) -> anyhow::Result<Self> {
        let cid = Cid::from_cbor_blake2b256(&(epoch, ticket))?;
        Ok(Self::new(TipsetKey::from(vec![cid]), epoch))
    }
}
