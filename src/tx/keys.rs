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

use core::fmt::{self, Debug, Display, Formatter};

use amplify::hex::{self, FromHex};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use super::Signature;
use crate::codec::to_hex_upper;

/// Errors handling keys and signatures.
#[derive(Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum KeyError {
    /// invalid hex encoding of a key: {0}
    #[from]
    InvalidHex(hex::Error),

    /// private key must be 32 bytes long, while {0} bytes were provided.
    InvalidLength(usize),

    /// signature of kind `{0}` can't be verified.
    UnsupportedKind(super::SignatureKind),

    /// {0}
    #[from]
    Ed25519(ed25519_dalek::SignatureError),
}

/// Ed25519 public key.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From)]
pub struct PublicKey(#[from] [u8; 32]);

impl PublicKey {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] { &self.0 }

    /// # Errors
    ///
    /// If the bytes are not a valid point on the curve.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        Ok(VerifyingKey::from_bytes(&self.0)?)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&to_hex_upper(self.0)) }
}

/// Ed25519 signing key together with its public key.
#[derive(Clone)]
pub struct KeyPair {
    secret: SigningKey,
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair").field("public", &self.public_key()).finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Constructs key pair from a 32-byte private key seed.
    pub fn from_seed(seed: [u8; 32]) -> KeyPair {
        KeyPair {
            secret: SigningKey::from_bytes(&seed),
        }
    }

    /// Parses a private key seed from hex, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<KeyPair, KeyError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = Vec::<u8>::from_hex(s)?;
        let seed = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| KeyError::InvalidLength(bytes.len()))?;
        Ok(KeyPair::from_seed(seed))
    }

    pub fn public_key(&self) -> PublicKey { PublicKey(self.secret.verifying_key().to_bytes()) }

    /// Signs the message with Ed25519.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature::ed25519(self.secret.sign(msg).to_bytes())
    }
}
