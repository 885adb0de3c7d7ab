// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod tipset;

pub use tipset::{ChainEpoch, Tipset, TipsetKey};
