// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod address;
pub mod crypto;
pub mod econ;
pub mod gas;
pub mod message;
pub mod state_tree;
