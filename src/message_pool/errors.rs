// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// `MessagePool` error.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("gas price is lower than min gas price")]
    GasPriceTooLow,
    #[error("Message sequence too low")]
    SequenceTooLow,
    #[error("Message with sequence already in mempool")]
    DuplicateSequence,
    #[error("Actor state unavailable: {0}")]
    StateUnavailable(String),
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
