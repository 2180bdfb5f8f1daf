// Client-side bytecode assembler and transaction codec for a register-based blockchain VM.
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2021-2024 by
//     Dr Maxim Orlovsky <orlovsky@ubideco.org>
//
// Copyright (C) 2021-2024 UBIDECO Labs,
//     Laboratories for Distributed and Cognitive Computing, Switzerland.
//     All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{Transaction, DEFAULT_EXPIRATION_WINDOW};
use crate::codec::EncodeError;
use crate::script::Timestamp;

/// Envelope parameters shared by the transactions an application creates.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase", default)
)]
pub struct TxParams {
    pub network: String,
    pub chain: String,
    pub payload: String,
    /// Seconds between transaction creation and its expiration.
    pub expiration_window: u32,
}

impl Default for TxParams {
    fn default() -> Self {
        TxParams {
            network: s!("mainnet"),
            chain: s!("main"),
            payload: s!(""),
            expiration_window: DEFAULT_EXPIRATION_WINDOW,
        }
    }
}

impl TxParams {
    /// Creates unsigned transaction for a hex-encoded script, expiring `expiration_window`
    /// seconds from now.
    pub fn build(&self, script: &str) -> Result<Transaction, EncodeError> {
        let expiration = Timestamp::now().saturating_add(self.expiration_window);
        Transaction::new(&self.network, &self.chain, script, Some(expiration), &self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = TxParams::default();
        assert_eq!(params.network, "mainnet");
        assert_eq!(params.chain, "main");
        assert_eq!(params.payload, "");
        assert_eq!(params.expiration_window, 1000);
    }

    #[test]
    fn build() {
        let params = TxParams {
            network: s!("testnet"),
            expiration_window: 60,
            ..TxParams::default()
        };
        let now = Timestamp::now().as_secs();
        let tx = params.build("0B").unwrap();
        assert_eq!(tx.network(), "testnet");
        assert_eq!(tx.chain(), "main");
        assert_eq!(tx.script(), &[0x0B]);
        assert!(tx.expiration().as_secs() >= now + 60 && tx.expiration().as_secs() <= now + 61);
    }
}
