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

use amplify::hex;
use num_bigint::BigUint;

use crate::isa::{Opcode, VmType};

/// VarInt tag prefixing a 16-bit little-endian value.
pub const VAR_INT_TAG_U16: u8 = 0xFD;
/// VarInt tag prefixing a 32-bit little-endian value.
pub const VAR_INT_TAG_U32: u8 = 0xFE;
/// VarInt tag prefixing a 64-bit little-endian value.
pub const VAR_INT_TAG_U64: u8 = 0xFF;

/// Errors encoding scripts and transactions into their wire representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub enum EncodeError {
    /// value {0} does not fit into its wire slot (maximum is {1}).
    OutOfRange(u64, u64),

    /// character {0:?} can't be encoded as a single byte.
    UnsupportedCharacter(char),

    /// values of type `{0}` can't be loaded into a register.
    UnsupportedLoadType(VmType),

    /// tried to load {0} bytes of data, while the limit is 65535 bytes.
    PayloadTooLarge(usize),

    /// `{0}` is not a valid opcode for this kind of jump.
    InvalidJumpOpcode(Opcode),

    /// invalid number of registers {0}; it must be in range 1..=32.
    InvalidRegisterCount(u8),

    /// jump target label `{0}` is never defined in the script.
    UndefinedLabel(String),

    /// script must be a hex string with an even number of characters.
    MalformedScript,
}

/// Errors decoding data from their wire representation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum DecodeError {
    /// attempt to read {requested} bytes while only {remaining} bytes remain.
    Truncated { requested: usize, remaining: usize },

    /// unknown tag byte {0:#04X}.
    InvalidTag(u8),

    /// {0} unexpected bytes after the end of data.
    TrailingData(usize),

    /// invalid hex encoding: {0}
    #[from]
    InvalidHex(hex::Error),
}

/// Converts a string into bytes using one byte per character.
///
/// # Errors
///
/// [`EncodeError::UnsupportedCharacter`] for the first character above `U+00FF`.
pub fn latin1_bytes(s: &str) -> Result<Vec<u8>, EncodeError> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| EncodeError::UnsupportedCharacter(c)))
        .collect()
}

/// Converts bytes into a string using one character per byte.
pub fn latin1_string(bytes: &[u8]) -> String { bytes.iter().copied().map(char::from).collect() }

mod private {
    use super::super::{Cursor, Marshaller};

    pub trait Sealed {}

    impl<T: AsRef<[u8]>> Sealed for Cursor<T> {}
    impl Sealed for Marshaller {}
}

/// Reading primitive values from the wire representation.
pub trait WireRead: private::Sealed {
    /// Returns current byte offset of the reader.
    fn pos(&self) -> usize;
    /// Returns number of bytes left for reading.
    fn remaining(&self) -> usize;
    /// Returns whether all bytes were consumed.
    fn is_eof(&self) -> bool { self.remaining() == 0 }
    /// Peeks a single byte without moving the reader.
    fn peek_byte(&self) -> Result<u8, DecodeError>;
    /// Reads exactly `len` bytes.
    ///
    /// Never returns fewer bytes than requested: if the input is shorter,
    /// [`DecodeError::Truncated`] is returned and the reader does not move.
    fn read_slice(&mut self, len: usize) -> Result<&[u8], DecodeError>;

    /// Reads a single byte.
    fn read_byte(&mut self) -> Result<u8, DecodeError> { Ok(self.read_slice(1)?[0]) }

    /// Reads a fixed-size byte array.
    fn read_array<const LEN: usize>(&mut self) -> Result<[u8; LEN], DecodeError> {
        let mut buf = [0u8; LEN];
        buf.copy_from_slice(self.read_slice(LEN)?);
        Ok(buf)
    }

    /// Reads a 16-bit little-endian integer.
    fn read_u16(&mut self) -> Result<u16, DecodeError> { self.read_array().map(u16::from_le_bytes) }

    /// Reads a 32-bit little-endian integer.
    fn read_u32(&mut self) -> Result<u32, DecodeError> { self.read_array().map(u32::from_le_bytes) }

    /// Reads a 64-bit little-endian integer.
    fn read_u64(&mut self) -> Result<u64, DecodeError> { self.read_array().map(u64::from_le_bytes) }

    /// Reads a variable-length integer.
    ///
    /// Any syntactically valid encoding is accepted, including non-minimal ones.
    fn read_var_int(&mut self) -> Result<u64, DecodeError> {
        match self.read_byte()? {
            VAR_INT_TAG_U16 => self.read_u16().map(u64::from),
            VAR_INT_TAG_U32 => self.read_u32().map(u64::from),
            VAR_INT_TAG_U64 => self.read_u64(),
            tag => Ok(tag as u64),
        }
    }

    /// Reads a VarInt length followed by that many bytes.
    fn read_byte_array(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_var_int()?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.read_slice(len).map(<[u8]>::to_vec)
    }

    /// Reads a VarInt length followed by one byte per character.
    fn read_var_string(&mut self) -> Result<String, DecodeError> {
        self.read_byte_array().map(|bytes| latin1_string(&bytes))
    }

    /// Reads a VarInt length followed by that many bytes of a little-endian unsigned integer
    /// of arbitrary size.
    fn read_big_int(&mut self) -> Result<BigUint, DecodeError> {
        self.read_byte_array().map(|bytes| BigUint::from_bytes_le(&bytes))
    }
}

/// Writing primitive values into the wire representation.
pub trait WireWrite: private::Sealed {
    /// Appends a single byte.
    fn write_byte(&mut self, byte: u8);
    /// Appends raw bytes, without any length prefix.
    fn write_slice(&mut self, bytes: &[u8]);

    /// Appends a 16-bit little-endian integer.
    fn write_u16(&mut self, value: u16) { self.write_slice(&value.to_le_bytes()) }

    /// Appends a 32-bit little-endian integer.
    fn write_u32(&mut self, value: u32) { self.write_slice(&value.to_le_bytes()) }

    /// Appends a 64-bit little-endian integer.
    fn write_u64(&mut self, value: u64) { self.write_slice(&value.to_le_bytes()) }

    /// Appends a variable-length integer using the smallest tag covering the value.
    fn write_var_int(&mut self, value: u64) {
        if value < VAR_INT_TAG_U16 as u64 {
            self.write_byte(value as u8);
        } else if value <= u16::MAX as u64 {
            self.write_byte(VAR_INT_TAG_U16);
            self.write_u16(value as u16);
        } else if value <= u32::MAX as u64 {
            self.write_byte(VAR_INT_TAG_U32);
            self.write_u32(value as u32);
        } else {
            self.write_byte(VAR_INT_TAG_U64);
            self.write_u64(value);
        }
    }

    /// Appends a VarInt length followed by the bytes.
    fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_var_int(bytes.len() as u64);
        self.write_slice(bytes);
    }

    /// Appends a VarInt length followed by one byte per character.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedCharacter`] if the string has characters above `U+00FF`; in this
    /// case nothing is written.
    fn write_var_string(&mut self, s: &str) -> Result<(), EncodeError> {
        let bytes = latin1_bytes(s)?;
        self.write_byte_array(&bytes);
        Ok(())
    }

    /// Appends a VarInt length followed by the little-endian magnitude of the integer.
    fn write_big_int(&mut self, value: &BigUint) { self.write_byte_array(&value.to_bytes_le()) }
}
