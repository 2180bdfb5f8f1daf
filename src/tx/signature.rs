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

use ed25519_dalek::Verifier;

use super::{KeyError, PublicKey};
use crate::codec::{DecodeError, WireRead, WireWrite};

/// Signature scheme tag, written before the signature bytes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[repr(u8)]
pub enum SignatureKind {
    #[default]
    #[display("none")]
    None = 0,

    #[display("ed25519")]
    Ed25519 = 1,

    #[display("ecdsa")]
    Ecdsa = 2,

    /// Linkable ring signature.
    #[display("ring")]
    Ring = 3,
}

impl TryFrom<u8> for SignatureKind {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0 => SignatureKind::None,
            1 => SignatureKind::Ed25519,
            2 => SignatureKind::Ecdsa,
            3 => SignatureKind::Ring,
            other => return Err(DecodeError::InvalidTag(other)),
        })
    }
}

/// Signature attached to a transaction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Signature {
    kind: SignatureKind,
    bytes: Vec<u8>,
}

impl Signature {
    /// Wraps raw Ed25519 signature.
    pub fn ed25519(bytes: [u8; 64]) -> Signature {
        Signature {
            kind: SignatureKind::Ed25519,
            bytes: bytes.to_vec(),
        }
    }

    /// Constructs signature of an arbitrary kind, without checking its data.
    pub fn with(kind: SignatureKind, bytes: impl Into<Vec<u8>>) -> Signature {
        Signature {
            kind,
            bytes: bytes.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SignatureKind { self.kind }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Writes the kind byte followed by the length-prefixed signature data.
    pub fn encode(&self, writer: &mut impl WireWrite) {
        writer.write_byte(self.kind as u8);
        writer.write_byte_array(&self.bytes);
    }

    pub fn decode(reader: &mut impl WireRead) -> Result<Signature, DecodeError> {
        let kind = SignatureKind::try_from(reader.read_byte()?)?;
        let bytes = reader.read_byte_array()?;
        Ok(Signature { kind, bytes })
    }

    /// Checks the signature against the message and the signer public key.
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKind`] for any signature which is not Ed25519, and the error of the
    /// Ed25519 primitive if the data are malformed or the signature doesn't match.
    pub fn verify(&self, msg: &[u8], signer: &PublicKey) -> Result<(), KeyError> {
        if self.kind != SignatureKind::Ed25519 {
            return Err(KeyError::UnsupportedKind(self.kind));
        }
        let sig = ed25519_dalek::Signature::from_slice(&self.bytes)?;
        signer.to_verifying_key()?.verify(msg, &sig)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Cursor, Marshaller};
    use crate::tx::KeyPair;

    #[test]
    fn layout() {
        let sig = Signature::with(SignatureKind::Ed25519, vec![0xAA; 64]);
        let mut marshaller = Marshaller::new();
        sig.encode(&mut marshaller);
        let bytes = marshaller.into_bytes();
        assert_eq!(&bytes[..2], &[0x01, 0x40]);
        assert_eq!(bytes.len(), 66);

        let mut cursor = Cursor::new(&bytes);
        assert_eq!(Signature::decode(&mut cursor).unwrap(), sig);
        assert!(cursor.is_eof());
    }

    #[test]
    fn unknown_kind() {
        let mut cursor = Cursor::new([0x07, 0x00]);
        assert_eq!(Signature::decode(&mut cursor).unwrap_err(), DecodeError::InvalidTag(7));
    }

    #[test]
    fn verify_kinds() {
        let keys = KeyPair::from_seed([1u8; 32]);
        let sig = keys.sign(b"msg");
        assert_eq!(sig.kind(), SignatureKind::Ed25519);
        sig.verify(b"msg", &keys.public_key()).unwrap();

        let ring = Signature::with(SignatureKind::Ring, sig.as_bytes());
        assert!(matches!(
            ring.verify(b"msg", &keys.public_key()),
            Err(KeyError::UnsupportedKind(SignatureKind::Ring))
        ));
        let short = Signature::with(SignatureKind::Ed25519, &sig.as_bytes()[..10]);
        assert!(matches!(short.verify(b"msg", &keys.public_key()), Err(KeyError::Ed25519(_))));
    }
}
