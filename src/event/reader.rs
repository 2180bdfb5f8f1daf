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

use num_bigint::BigUint;

use crate::codec::{self, Cursor, DecodeError, WireRead};

/// Sequential decoder for event payloads reported by the chain.
///
/// The reader owns its data and moves forward with each successful read. Failed reads leave the
/// position untouched, so the caller may inspect [`EventReader::remaining`] afterwards.
#[derive(Clone, Debug)]
pub struct EventReader {
    cursor: Cursor<Vec<u8>>,
}

impl Display for EventReader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.cursor, f) }
}

impl From<Vec<u8>> for EventReader {
    fn from(bytes: Vec<u8>) -> Self { EventReader::new(bytes) }
}

impl EventReader {
    #[inline]
    pub fn new(bytes: Vec<u8>) -> Self { EventReader { cursor: Cursor::new(bytes) } }

    /// Constructs reader from a hex-encoded payload, in any letter case.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> { codec::from_hex(s).map(Self::new) }

    /// Offset of the next byte to be read.
    #[inline]
    pub fn pos(&self) -> usize { self.cursor.pos() }

    /// Number of bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize { self.cursor.remaining() }

    #[inline]
    pub fn is_eof(&self) -> bool { self.cursor.is_eof() }

    /// Returns bytes not consumed yet.
    #[inline]
    pub fn rest(&self) -> &[u8] { self.cursor.rest() }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> { self.cursor.read_byte() }

    /// Reads exactly `len` raw bytes.
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        self.cursor.read_slice(len).map(<[u8]>::to_vec)
    }

    /// Reads a 32-bit little-endian integer, which is how the chain encodes timestamps.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> { self.cursor.read_u32() }

    pub fn read_var_int(&mut self) -> Result<u64, DecodeError> { self.cursor.read_var_int() }

    /// Reads a length-prefixed string with one byte per character.
    pub fn read_string(&mut self) -> Result<String, DecodeError> { self.cursor.read_var_string() }

    pub fn read_byte_array(&mut self) -> Result<Vec<u8>, DecodeError> {
        self.cursor.read_byte_array()
    }

    /// Reads a length-prefixed little-endian unsigned integer of arbitrary width.
    ///
    /// Token amounts and NFT identifiers routinely exceed 64 bits, so no native integer type is
    /// involved at any step.
    pub fn read_big_int_accurate(&mut self) -> Result<BigUint, DecodeError> {
        self.cursor.read_big_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential() {
        // "SOUL", 10^20, "main"
        let mut reader =
            EventReader::from_hex("04534f554c09000010632d5ec76b05046d61696e").unwrap();
        assert_eq!(reader.read_string().unwrap(), "SOUL");
        assert_eq!(
            reader.read_big_int_accurate().unwrap(),
            BigUint::from(100_000_000_000_000_000_000u128)
        );
        assert_eq!(reader.read_string().unwrap(), "main");
        assert!(reader.is_eof());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn raw_reads() {
        let mut reader = EventReader::from_hex("01FD2C01785634120A0B").unwrap();
        assert_eq!(reader.read_byte().unwrap(), 1);
        assert_eq!(reader.read_var_int().unwrap(), 300);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.pos(), 8);
        assert_eq!(reader.read(3).unwrap_err(), DecodeError::Truncated {
            requested: 3,
            remaining: 2
        });
        assert_eq!(reader.read(2).unwrap(), vec![0x0A, 0x0B]);
    }

    #[test]
    fn byte_array() {
        let mut reader = EventReader::from(vec![3, 7, 8, 9, 0]);
        assert_eq!(reader.read_byte_array().unwrap(), vec![7, 8, 9]);
        assert_eq!(reader.read_byte_array().unwrap(), Vec::<u8>::new());
        assert!(reader.read_byte().is_err());
    }

    #[test]
    fn invalid_hex() {
        assert!(matches!(EventReader::from_hex("0g"), Err(DecodeError::InvalidHex(_))));
    }
}
