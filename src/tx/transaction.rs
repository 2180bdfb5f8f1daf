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

use core::fmt::{self, Display, Formatter};

use amplify::Bytes32;
use sha2::{Digest, Sha256};

use super::{KeyPair, PublicKey, Signature, TxError};
use crate::codec::{
    self, latin1_bytes, Cursor, DecodeError, EncodeError, Marshaller, WireRead, WireWrite,
};
use crate::script::Timestamp;

/// Number of seconds a transaction stays valid when no explicit expiration is given.
pub const DEFAULT_EXPIRATION_WINDOW: u32 = 1000;

/// Transaction identifier: SHA-256 of the unsigned serialization.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug, From)]
#[wrapper(Deref, BorrowSlice, Hex, Index, RangeOps)]
pub struct TxHash(
    #[from]
    #[from([u8; 32])]
    Bytes32,
);

impl Display for TxHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::to_hex_upper(self.0.to_byte_array()))
    }
}

/// Transaction envelope carrying a script to the chain.
///
/// Wire layout (all strings are VarInt-prefixed, one byte per character):
///
/// ```text
/// network | chain | script (VarInt-prefixed) | expiration (u32 LE) | payload
///     [ | signature count (VarInt) | { kind (u8) | signature (VarInt-prefixed) }* ]
/// ```
///
/// The part before the signatures is the message being signed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Transaction {
    network: String,
    chain: String,
    script: Vec<u8>,
    expiration: Timestamp,
    payload: String,
    signatures: Vec<Signature>,
}

impl Transaction {
    /// Creates unsigned transaction from a hex-encoded script.
    ///
    /// If `expiration` is not given, the transaction expires [`DEFAULT_EXPIRATION_WINDOW`]
    /// seconds from now.
    ///
    /// # Errors
    ///
    /// [`EncodeError::MalformedScript`] if the script is not an even-length hex string, and
    /// [`EncodeError::UnsupportedCharacter`] if some of the strings are not representable on the
    /// wire.
    pub fn new(
        network: &str,
        chain: &str,
        script: &str,
        expiration: Option<Timestamp>,
        payload: &str,
    ) -> Result<Transaction, EncodeError> {
        if script.len() % 2 != 0 {
            return Err(EncodeError::MalformedScript);
        }
        let script = codec::from_hex(script).map_err(|_| EncodeError::MalformedScript)?;
        Transaction::with_script(network, chain, script, expiration, payload)
    }

    /// Creates unsigned transaction from raw script bytecode.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedCharacter`] if some of the strings are not representable on the
    /// wire.
    pub fn with_script(
        network: &str,
        chain: &str,
        script: Vec<u8>,
        expiration: Option<Timestamp>,
        payload: &str,
    ) -> Result<Transaction, EncodeError> {
        for s in [network, chain, payload] {
            latin1_bytes(s)?;
        }
        let expiration = expiration
            .unwrap_or_else(|| Timestamp::now().saturating_add(DEFAULT_EXPIRATION_WINDOW));
        Ok(Transaction {
            network: network.to_owned(),
            chain: chain.to_owned(),
            script,
            expiration,
            payload: payload.to_owned(),
            signatures: vec![],
        })
    }

    #[inline]
    pub fn network(&self) -> &str { &self.network }

    #[inline]
    pub fn chain(&self) -> &str { &self.chain }

    #[inline]
    pub fn script(&self) -> &[u8] { &self.script }

    #[inline]
    pub fn expiration(&self) -> Timestamp { self.expiration }

    #[inline]
    pub fn payload(&self) -> &str { &self.payload }

    /// Signatures, the most recently added first.
    #[inline]
    pub fn signatures(&self) -> &[Signature] { &self.signatures }

    fn write_unsigned(&self, writer: &mut Marshaller) -> Result<(), EncodeError> {
        writer.write_var_string(&self.network)?;
        writer.write_var_string(&self.chain)?;
        writer.write_byte_array(&self.script);
        writer.write_u32(self.expiration.as_secs());
        writer.write_var_string(&self.payload)
    }

    /// Serializes transaction, optionally with its signatures.
    ///
    /// The serialization without signatures is the message which gets signed.
    pub fn to_bytes(&self, with_signatures: bool) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Marshaller::with_capacity(self.script.len() + 64);
        self.write_unsigned(&mut writer)?;
        if with_signatures {
            writer.write_var_int(self.signatures.len() as u64);
            for sig in &self.signatures {
                sig.encode(&mut writer);
            }
        }
        Ok(writer.into_bytes())
    }

    /// Serializes transaction into an uppercase hex string.
    pub fn to_hex(&self, with_signatures: bool) -> Result<String, EncodeError> {
        self.to_bytes(with_signatures).map(|bytes| codec::to_hex_upper(bytes))
    }

    /// Transaction hash, which doesn't depend on the signatures.
    pub fn hash(&self) -> Result<TxHash, EncodeError> {
        let digest = Sha256::digest(self.to_bytes(false)?);
        Ok(TxHash::from(<[u8; 32]>::from(digest)))
    }

    /// Signs the transaction, putting the new signature in front of the existing ones.
    ///
    /// Signing repeatedly with different keys produces a multi-signed transaction.
    pub fn sign(&mut self, keys: &KeyPair) -> Result<(), TxError> {
        let msg = self.to_bytes(false)?;
        self.signatures.insert(0, keys.sign(&msg));
        #[cfg(feature = "log")]
        log::debug!(
            "transaction signed by {}, {} signature(s) in total",
            keys.public_key(),
            self.signatures.len()
        );
        Ok(())
    }

    /// Checks whether any of the signatures was made by the key and is valid.
    pub fn is_signed_by(&self, signer: &PublicKey) -> bool {
        let Ok(msg) = self.to_bytes(false) else {
            return false;
        };
        self.signatures.iter().any(|sig| sig.verify(&msg, signer).is_ok())
    }

    /// Parses signed or unsigned serialization.
    ///
    /// Data ending right after the payload mean a transaction without signatures.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TrailingData`] if the data continue after the last signature.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Transaction, DecodeError> {
        let mut reader = Cursor::new(bytes.as_ref());
        let network = reader.read_var_string()?;
        let chain = reader.read_var_string()?;
        let script = reader.read_byte_array()?;
        let expiration = Timestamp::from_secs(reader.read_u32()?);
        let payload = reader.read_var_string()?;

        let mut signatures = vec![];
        if !reader.is_eof() {
            let count = reader.read_var_int()?;
            for _ in 0..count {
                signatures.push(Signature::decode(&mut reader)?);
            }
        }
        if !reader.is_eof() {
            return Err(DecodeError::TrailingData(reader.remaining()));
        }

        #[cfg(feature = "log")]
        log::trace!(
            "decoded transaction for {network}/{chain}: {} script bytes, {} signature(s)",
            script.len(),
            signatures.len()
        );

        Ok(Transaction {
            network,
            chain,
            script,
            expiration,
            payload,
            signatures,
        })
    }

    /// Parses serialization given as a hex string in any letter case.
    pub fn from_hex(s: &str) -> Result<Transaction, DecodeError> {
        Transaction::from_bytes(codec::from_hex(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        let expiration = Some(Timestamp::from_secs(0x5F5E1000));
        Transaction::new("mainnet", "main", "0D00040361626300", expiration, "sdk").unwrap()
    }

    #[test]
    fn unsigned_layout() {
        assert_eq!(
            sample().to_hex(false).unwrap(),
            concat!("076D61696E6E6574", "046D61696E", "080D00040361626300", "00105E5F", "0373646B")
        );
    }

    #[test]
    fn script_validation() {
        let expiration = Some(Timestamp::from_secs(0));
        assert_eq!(
            Transaction::new("mainnet", "main", "0B0", expiration, "").unwrap_err(),
            EncodeError::MalformedScript
        );
        assert_eq!(
            Transaction::new("mainnet", "main", "GG", expiration, "").unwrap_err(),
            EncodeError::MalformedScript
        );
        assert_eq!(
            Transaction::new("mainnet", "main", "0b", expiration, "ünicode ✓").unwrap_err(),
            EncodeError::UnsupportedCharacter('✓')
        );
        let empty = Transaction::new("mainnet", "main", "", expiration, "").unwrap();
        assert!(empty.script().is_empty());
    }

    #[test]
    fn default_expiration() {
        let before = Timestamp::now().as_secs();
        let tx = Transaction::new("mainnet", "main", "0B", None, "").unwrap();
        let after = Timestamp::now().as_secs();
        assert!(tx.expiration().as_secs() >= before + DEFAULT_EXPIRATION_WINDOW);
        assert!(tx.expiration().as_secs() <= after + DEFAULT_EXPIRATION_WINDOW);
    }

    #[test]
    fn signature_section() {
        let mut tx = sample();
        let unsigned = tx.to_bytes(false).unwrap();
        assert_eq!(tx.to_bytes(true).unwrap(), [&unsigned[..], &[0x00]].concat());

        let keys = KeyPair::from_seed([3u8; 32]);
        tx.sign(&keys).unwrap();
        let signed = tx.to_bytes(true).unwrap();
        assert_eq!(&signed[..unsigned.len()], &unsigned[..]);
        assert_eq!(&signed[unsigned.len()..unsigned.len() + 3], &[0x01, 0x01, 0x40]);
        assert_eq!(signed.len(), unsigned.len() + 3 + 64);
        assert_eq!(tx.to_bytes(false).unwrap(), unsigned);
    }

    #[test]
    fn newest_signature_first() {
        let mut tx = sample();
        let first = KeyPair::from_seed([1u8; 32]);
        let second = KeyPair::from_seed([2u8; 32]);
        tx.sign(&first).unwrap();
        tx.sign(&second).unwrap();
        let msg = tx.to_bytes(false).unwrap();
        assert_eq!(tx.signatures(), &[second.sign(&msg), first.sign(&msg)]);
        assert!(tx.is_signed_by(&first.public_key()));
        assert!(tx.is_signed_by(&second.public_key()));
        assert!(!tx.is_signed_by(&KeyPair::from_seed([9u8; 32]).public_key()));
    }

    #[test]
    fn decode() {
        let mut tx = sample();
        assert_eq!(Transaction::from_hex(&tx.to_hex(false).unwrap()).unwrap(), tx);
        assert_eq!(Transaction::from_hex(&tx.to_hex(true).unwrap()).unwrap(), tx);

        tx.sign(&KeyPair::from_seed([5u8; 32])).unwrap();
        let hex = tx.to_hex(true).unwrap();
        assert_eq!(Transaction::from_hex(&hex.to_lowercase()).unwrap(), tx);

        let mut bytes = tx.to_bytes(true).unwrap();
        bytes.push(0);
        assert_eq!(Transaction::from_bytes(&bytes).unwrap_err(), DecodeError::TrailingData(1));
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            Transaction::from_bytes(&bytes).unwrap_err(),
            DecodeError::Truncated { requested: 64, remaining: 63 }
        ));
    }

    #[test]
    fn hash_ignores_signatures() {
        let mut tx = sample();
        let hash = tx.hash().unwrap();
        tx.sign(&KeyPair::from_seed([1u8; 32])).unwrap();
        assert_eq!(tx.hash().unwrap(), hash);
        assert_eq!(hash.to_string().len(), 64);
        assert_eq!(hash.to_string(), hash.to_string().to_uppercase());
    }
}
