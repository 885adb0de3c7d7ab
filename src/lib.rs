// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Builds the per-sender message chains the Filecoin message pool hands to
//! block producers.
//!
//! Pending messages of a sender are cut to the run that can actually execute
//! on top of a tipset (no sequence gaps, enough gas, enough funds), grouped by
//! gas performance and bounded by the block gas limit. See
//! [`message_pool::create_message_chains`].

pub mod blocks;
pub mod message;
pub mod message_pool;
pub mod shim;
pub mod utils;
