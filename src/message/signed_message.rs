// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use super::Message as MessageTrait;
use crate::shim::message::MethodNum;
use crate::shim::{
    address::Address,
    crypto::{Signature, SignatureType},
    econ::TokenAmount,
    message::Message,
};

/// Represents a wrapped message with signature bytes.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize, Hash, Eq)]
pub struct SignedMessage {
    pub message: Message,
    pub signature: Signature,
}

impl SignedMessage {
    /// Generate a new signed message from fields.
    /// The signature is not verified; verification belongs to the pool's
    /// admission path.
    pub fn new_unchecked(message: Message, signature: Signature) -> SignedMessage {
        SignedMessage { message, signature }
    }

    /// Returns reference to the unsigned message.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Checks if the signed message is a BLS message.
    pub fn is_bls(&self) -> bool {
        self.signature.signature_type() == SignatureType::Bls
    }

    // BLS messages are identified by their unsigned message, as signatures
    // are aggregated in blocks.
    pub fn cid(&self) -> anyhow::Result<cid::Cid> {
        if self.is_bls() {
            self.message.cid()
        } else {
            use crate::utils::cid::CidCborExt;
            cid::Cid::from_cbor_blake2b256(self)
        }
    }

    /// Returns the length of the chain message in bytes.
    pub fn chain_length(&self) -> anyhow::Result<usize> {
        let serialized = match self.signature.signature_type() {
            SignatureType::Bls => {
                // BLS chain message length doesn't include the signature
                crate::utils::encoding::to_vec(&self.message)?
            }
            SignatureType::Secp256k1 => crate::utils::encoding::to_vec(self)?,
        };
        Ok(serialized.len())
    }

    /// Creates a mock signed message for testing purposes. The signature is
    /// all zeroes.
    #[cfg(test)]
    pub fn mock_bls_signed_message(message: Message) -> SignedMessage {
        let signature = Signature::new_bls(vec![0; crate::shim::crypto::BLS_SIG_LEN]);
        SignedMessage::new_unchecked(message, signature)
    }

    #[cfg(test)]
    pub fn mock_secp_signed_message(message: Message) -> SignedMessage {
        let signature = Signature::new_secp256k1(vec![0; crate::shim::crypto::SECP_SIG_LEN]);
        SignedMessage::new_unchecked(message, signature)
    }
}

impl MessageTrait for SignedMessage {
    fn from(&self) -> Address {
        self.message.from()
    }
    fn to(&self) -> Address {
        self.message.to()
    }
    fn sequence(&self) -> u64 {
        self.message.sequence()
    }
    fn value(&self) -> TokenAmount {
        self.message.value()
    }
    fn method_num(&self) -> MethodNum {
        self.message.method_num()
    }
    fn gas_limit(&self) -> u64 {
        self.message.gas_limit()
    }
    fn gas_price(&self) -> TokenAmount {
        self.message.gas_price()
    }
    fn required_funds(&self) -> TokenAmount {
        self.message.required_funds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sequence: u64) -> Message {
        Message {
            from: Address::new_id(1),
            to: Address::new_id(2),
            sequence,
            gas_limit: 1_000_000,
            gas_price: TokenAmount::from_atto(100),
            ..Message::default()
        }
    }

    #[test]
    fn bls_chain_length_excludes_signature() {
        let bls = SignedMessage::mock_bls_signed_message(message(0));
        let unsigned_len = crate::utils::encoding::to_vec(bls.message()).unwrap().len();
        assert_eq!(bls.chain_length().unwrap(), unsigned_len);

        let secp = SignedMessage::mock_secp_signed_message(message(0));
        assert!(secp.chain_length().unwrap() > unsigned_len);
    }

    #[test]
    fn bls_cid_is_message_cid() {
        let bls = SignedMessage::mock_bls_signed_message(message(3));
        assert_eq!(bls.cid().unwrap(), bls.message().cid().unwrap());

        let secp = SignedMessage::mock_secp_signed_message(message(3));
        assert_ne!(secp.cid().unwrap(), secp.message().cid().unwrap());
    }
}
