// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod signed_message;

use crate::shim::{address::Address, econ::TokenAmount, message::Message as ShimMessage};
use crate::shim::message::MethodNum;
pub use signed_message::SignedMessage;

/// Message interface to interact with Signed and unsigned messages in a generic
/// context.
pub trait Message {
    /// Returns the from address of the message.
    fn from(&self) -> Address;
    /// Returns the destination address of the message.
    fn to(&self) -> Address;
    /// Returns the message sequence or nonce.
    fn sequence(&self) -> u64;
    /// Returns the amount sent in message.
    fn value(&self) -> TokenAmount;
    /// Returns the method number to be called.
    fn method_num(&self) -> MethodNum;
    /// Returns the gas limit for the message.
    fn gas_limit(&self) -> u64;
    /// Returns the price paid per unit of gas.
    fn gas_price(&self) -> TokenAmount;
    /// Returns the required funds for the message.
    fn required_funds(&self) -> TokenAmount;
}

impl Message for ShimMessage {
    fn from(&self) -> Address {
        self.from
    }
    fn to(&self) -> Address {
        self.to
    }
    fn sequence(&self) -> u64 {
        self.sequence
    }
    fn value(&self) -> TokenAmount {
        self.value.clone()
    }
    fn method_num(&self) -> MethodNum {
        self.method_num
    }
    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
    fn gas_price(&self) -> TokenAmount {
        self.gas_price.clone()
    }
    fn required_funds(&self) -> TokenAmount {
        &self.gas_price * self.gas_limit + &self.value
    }
}
