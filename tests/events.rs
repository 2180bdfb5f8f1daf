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

use num_bigint::BigUint;
use vmscript::event::{Event, EventKind, EventReader};
use vmscript::DecodeError;

#[test]
fn token_event() {
    let event = Event::from_rpc(
        "TokenSend",
        "P2KEYzWsbrMbPNtW1tBzzDKeYxYi4hjzpx4EfiyRyaoLkMM",
        "token",
        "04534F554C09000010632D5EC76B05046D61696E",
    )
    .unwrap();
    assert!(event.kind.is_token_event());
    let data = event.token_data().unwrap();
    assert_eq!(data.symbol, "SOUL");
    assert_eq!(data.value, BigUint::from(100_000_000_000_000_000_000u128));
    assert_eq!(data.chain, "main");
}

#[test]
fn custom_layout() {
    // timestamp, var int with a 32-bit tag, raw 2 bytes, string
    let mut reader = EventReader::from_hex("00E1F505FEA086010001020568656C6C6F").unwrap();
    assert_eq!(reader.read_u32().unwrap(), 100_000_000);
    assert_eq!(reader.read_var_int().unwrap(), 100_000);
    assert_eq!(reader.read(2).unwrap(), vec![1, 2]);
    assert_eq!(reader.read_string().unwrap(), "hello");
    assert_eq!(reader.read_byte().unwrap_err(), DecodeError::Truncated {
        requested: 1,
        remaining: 0
    });
}

#[test]
fn unknown_kind() {
    let event = Event::from_rpc("Harvest", "S1111111111111111111111111111111111", "farm", "")
        .unwrap();
    assert_eq!(event.kind, EventKind::Custom);
    assert!(!event.kind.is_token_event());
    assert!(event.token_data().is_err());
}
