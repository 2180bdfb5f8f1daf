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

//! Client-side toolkit for a register-based blockchain virtual machine.
//!
//! The crate assembles opcode-level operations into a compact bytecode script, wraps the script
//! into a transaction envelope with a deterministic signable serialization, signs it with Ed25519
//! keys and decodes event payloads emitted by the chain. All of it shares a single wire encoding
//! of variable-length integers, strings and byte arrays, provided by the [`codec`] module.
//!
//! ```
//! use vmscript::script::{ScriptBuilder, NULL_ADDRESS};
//! use vmscript::tx::{KeyPair, Transaction};
//! use vmscript::Timestamp;
//!
//! let sender = "P2KEYzWsbrMbPNtW1tBzzDKeYxYi4hjzpx4EfiyRyaoLkMM";
//! let mut builder = ScriptBuilder::new();
//! builder
//!     .allow_gas(sender, NULL_ADDRESS, 100_000u64, 900u64)
//!     .unwrap()
//!     .spend_gas(sender)
//!     .unwrap();
//! let script = builder.end_script().unwrap();
//!
//! let mut tx = Transaction::new("mainnet", "main", &script, Some(Timestamp::from_secs(0)), "")
//!     .unwrap();
//! tx.sign(&KeyPair::from_seed([7u8; 32])).unwrap();
//! assert!(tx.to_hex(true).unwrap().starts_with(&tx.to_hex(false).unwrap()));
//! ```

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

pub mod codec;
pub mod event;
pub mod isa;
pub mod script;
pub mod tx;

pub use codec::{DecodeError, EncodeError};
pub use isa::{Instr, Opcode, VmType};
pub use script::{LoadValue, ScriptBuilder, Timestamp};
pub use tx::{KeyPair, Transaction, TxError};
