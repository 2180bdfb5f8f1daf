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

use amplify::hex::ToHex;

use super::{DecodeError, WireRead};

/// Read cursor over an immutable byte sequence.
#[derive(Clone)]
pub struct Cursor<T>
where T: AsRef<[u8]>
{
    bytes: T,
    pos: usize,
}

impl<T> Debug for Cursor<T>
where T: AsRef<[u8]>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("bytes", &self.data().to_hex())
            .field("pos", &self.pos)
            .finish()
    }
}

impl<T> Display for Cursor<T>
where T: AsRef<[u8]>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ ", self.pos)?;
        let hex = self.data().to_hex();
        if f.alternate() && hex.len() > 8 {
            write!(f, "{}..{}", &hex[..4], &hex[hex.len() - 4..])
        } else {
            f.write_str(&hex)
        }
    }
}

impl<T> Cursor<T>
where T: AsRef<[u8]>
{
    /// Creates cursor positioned at the start of the provided bytes.
    #[inline]
    pub fn new(bytes: T) -> Cursor<T> { Cursor { bytes, pos: 0 } }

    /// Releases the underlying bytes.
    #[inline]
    pub fn into_inner(self) -> T { self.bytes }

    /// Returns bytes which were not read yet.
    #[inline]
    pub fn rest(&self) -> &[u8] { &self.data()[self.pos..] }

    #[inline]
    fn data(&self) -> &[u8] { self.bytes.as_ref() }
}

impl<T> WireRead for Cursor<T>
where T: AsRef<[u8]>
{
    #[inline]
    fn pos(&self) -> usize { self.pos }

    #[inline]
    fn remaining(&self) -> usize { self.data().len() - self.pos }

    fn peek_byte(&self) -> Result<u8, DecodeError> {
        self.data()
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::Truncated { requested: 1, remaining: 0 })
    }

    fn read_slice(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::Truncated { requested: len, remaining });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes.as_ref()[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn read_fixed() {
        let mut cursor = Cursor::new([0x0B, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(cursor.read_byte().unwrap(), 0x0B);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x12345678);
        assert!(cursor.is_eof());
    }

    #[test]
    fn read_eof() {
        let mut cursor = Cursor::new([0x01, 0x02, 0x03]);
        assert_eq!(cursor.read_byte().unwrap(), 0x01);
        assert_eq!(
            cursor.read_u32().unwrap_err(),
            DecodeError::Truncated { requested: 4, remaining: 2 }
        );
        // failed read must not consume anything
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.read_u16().unwrap(), 0x0302);
        assert!(cursor.peek_byte().is_err());
    }

    #[test]
    fn var_int_lenient() {
        // 5 encoded with a 16-bit tag is accepted
        let mut cursor = Cursor::new([0xFD, 0x05, 0x00, 0xFF, 0x01, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(cursor.read_var_int().unwrap(), 5);
        assert_eq!(cursor.read_var_int().unwrap(), 1);
    }

    #[test]
    fn var_int_truncated() {
        let mut cursor = Cursor::new([0xFE, 0x01, 0x02]);
        assert_eq!(
            cursor.read_var_int().unwrap_err(),
            DecodeError::Truncated { requested: 4, remaining: 2 }
        );
    }

    #[test]
    fn strings() {
        let mut cursor = Cursor::new(b"\x04KCAL\x00\x02\xE9a".to_vec());
        assert_eq!(cursor.read_var_string().unwrap(), "KCAL");
        assert_eq!(cursor.read_var_string().unwrap(), "");
        assert_eq!(cursor.read_var_string().unwrap(), "éa");
    }

    #[test]
    fn big_int() {
        let mut cursor = Cursor::new([0x03, 0x01, 0x02, 0x03, 0x00]);
        assert_eq!(cursor.read_big_int().unwrap(), BigUint::from(0x030201u32));
        assert_eq!(cursor.read_big_int().unwrap(), BigUint::from(0u8));
    }

    #[test]
    fn big_int_wider_than_u128() {
        let mut bytes = vec![17u8];
        bytes.extend([0u8; 16]);
        bytes.push(1);
        let mut cursor = Cursor::new(bytes);
        assert_eq!(cursor.read_big_int().unwrap(), BigUint::from(1u8) << 128usize);
    }

    #[test]
    fn display() {
        let mut cursor = Cursor::new([0xAB, 0xCD, 0xEF, 0x01, 0x23]);
        cursor.read_byte().unwrap();
        assert_eq!(cursor.to_string(), "1 @ abcdef0123");
        assert_eq!(format!("{cursor:#}"), "1 @ abcd..0123");
    }
}
