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

//! Transaction envelope, its signable serialization and Ed25519 signing.

mod keys;
mod params;
mod signature;
mod transaction;

pub use keys::{KeyError, KeyPair, PublicKey};
pub use params::TxParams;
pub use signature::{Signature, SignatureKind};
pub use transaction::{Transaction, TxHash, DEFAULT_EXPIRATION_WINDOW};

use crate::codec::{DecodeError, EncodeError};

/// Errors creating, signing and parsing transactions.
#[derive(Debug, Display, Error, From)]
#[display(inner)]
pub enum TxError {
    #[from]
    Encode(EncodeError),

    #[from]
    Decode(DecodeError),

    #[from]
    Key(KeyError),
}
