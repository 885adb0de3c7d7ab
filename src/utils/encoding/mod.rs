// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::Serialize;

/// Serializes `obj` into its `dag-cbor` representation.
pub fn to_vec<S: Serialize + ?Sized>(obj: &S) -> anyhow::Result<Vec<u8>> {
    serde_ipld_dagcbor::to_vec(obj).map_err(|e| anyhow::anyhow!("cbor encoding failed: {e}"))
}
