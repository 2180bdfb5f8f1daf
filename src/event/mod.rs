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

//! Events emitted by contracts during transaction execution, as reported by the node RPC.

mod kind;
mod reader;

use core::fmt::{self, Display, Formatter};

use num_bigint::BigUint;

pub use self::kind::EventKind;
pub use self::reader::EventReader;
use crate::codec::{self, DecodeError};

/// Single event reported for an executed transaction.
///
/// The address is kept in the textual form it was reported in; its binary layout is not
/// interpreted by this library.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub struct Event {
    pub kind: EventKind,
    pub address: String,
    pub contract: String,
    pub data: Vec<u8>,
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} @ {}: {}",
            self.kind,
            self.contract,
            self.address,
            codec::to_hex_upper(&self.data)
        )
    }
}

impl Event {
    /// Constructs event from the fields of an RPC response.
    ///
    /// Kind names unknown to this library produce [`EventKind::Custom`]; an empty data string
    /// produces an empty payload.
    pub fn from_rpc(
        kind: &str,
        address: impl ToString,
        contract: impl ToString,
        data: &str,
    ) -> Result<Event, DecodeError> {
        let data = if data.is_empty() { vec![] } else { codec::from_hex(data)? };
        Ok(Event {
            kind: kind.parse().unwrap_or_default(),
            address: address.to_string(),
            contract: contract.to_string(),
            data,
        })
    }

    /// Returns reader positioned at the start of the event payload.
    pub fn reader(&self) -> EventReader { EventReader::new(self.data.clone()) }

    /// Decodes payload of token-related events.
    ///
    /// Bytes following the decoded fields are ignored.
    pub fn token_data(&self) -> Result<TokenEventData, DecodeError> {
        TokenEventData::read(&mut self.reader())
    }

    /// Decodes payload of events reporting a named chain value.
    pub fn chain_value_data(&self) -> Result<ChainValueEventData, DecodeError> {
        ChainValueEventData::read(&mut self.reader())
    }
}

/// Payload of token transfers, mints, burns and other token events.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub struct TokenEventData {
    pub symbol: String,
    pub value: BigUint,
    pub chain: String,
}

impl TokenEventData {
    pub fn read(reader: &mut EventReader) -> Result<Self, DecodeError> {
        let symbol = reader.read_string()?;
        let value = reader.read_big_int_accurate()?;
        let chain = reader.read_string()?;
        Ok(TokenEventData { symbol, value, chain })
    }
}

/// Payload of [`EventKind::ValueCreate`] and [`EventKind::ValueUpdate`] events.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub struct ChainValueEventData {
    pub name: String,
    pub value: BigUint,
}

impl ChainValueEventData {
    pub fn read(reader: &mut EventReader) -> Result<Self, DecodeError> {
        let name = reader.read_string()?;
        let value = reader.read_big_int_accurate()?;
        Ok(ChainValueEventData { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "P2KEYzWsbrMbPNtW1tBzzDKeYxYi4hjzpx4EfiyRyaoLkMM";

    #[test]
    fn from_rpc() {
        let event = Event::from_rpc("TokenSend", ADDRESS, "stake", "").unwrap();
        assert_eq!(event.kind, EventKind::TokenSend);
        assert_eq!(event.address, ADDRESS);
        assert_eq!(event.contract, "stake");
        assert!(event.data.is_empty());

        let event = Event::from_rpc("Slashed", ADDRESS, "custom", "0a0B").unwrap();
        assert_eq!(event.kind, EventKind::Custom);
        assert_eq!(event.data, vec![0x0A, 0x0B]);
        assert_eq!(event.to_string(), format!("Custom/custom @ {ADDRESS}: 0A0B"));

        assert!(Event::from_rpc("TokenSend", ADDRESS, "stake", "abc").is_err());
    }

    #[test]
    fn token_data() {
        let event = Event::from_rpc(
            "TokenReceive",
            ADDRESS,
            "token",
            "044B43414C0500E40B5402046D61696E",
        )
        .unwrap();
        let data = event.token_data().unwrap();
        assert_eq!(data, TokenEventData {
            symbol: s!("KCAL"),
            value: BigUint::from(10_000_000_000u64),
            chain: s!("main"),
        });
    }

    #[test]
    fn token_data_truncated() {
        let event = Event::from_rpc("TokenMint", ADDRESS, "token", "044B43414C05").unwrap();
        assert!(matches!(event.token_data(), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn chain_value() {
        let event = Event::from_rpc("ValueUpdate", ADDRESS, "governance", "03666565020001").unwrap();
        let data = event.chain_value_data().unwrap();
        assert_eq!(data.name, "fee");
        assert_eq!(data.value, BigUint::from(256u32));
    }
}
