// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT
mod config;
mod errors;
mod msg_chain;
mod msgpool;

use self::msgpool::{msg_pool, provider, utils};

pub use self::{
    config::*,
    errors::*,
    msg_chain::{MsgChainNode, MsgChains, create_message_chains},
    msgpool::{
        create_pending_chains,
        msg_pool::{MsgSet, add_pending},
        provider::Provider,
        test_provider,
    },
};
