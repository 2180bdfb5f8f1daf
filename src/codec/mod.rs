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

//! Primitive wire codec shared by scripts, transactions and chain events.
//!
//! All multi-byte fields are little-endian. Variable-length integers use a tag-prefixed scheme:
//!
//! | Tag byte      | Value                         |
//! |---------------|-------------------------------|
//! | `0x00`-`0xFC` | the tag itself                |
//! | `0xFD`        | next 2 bytes, little-endian   |
//! | `0xFE`        | next 4 bytes, little-endian   |
//! | `0xFF`        | next 8 bytes, little-endian   |
//!
//! Strings are written as a VarInt byte length followed by one byte per character; only
//! characters in `U+0000..=U+00FF` are representable.

mod cursor;
mod marshaller;
mod rw;

use amplify::hex::{FromHex, ToHex};

pub use cursor::Cursor;
pub use marshaller::Marshaller;
pub use rw::{
    latin1_bytes, latin1_string, DecodeError, EncodeError, WireRead, WireWrite, VAR_INT_TAG_U16,
    VAR_INT_TAG_U32, VAR_INT_TAG_U64,
};

/// Encodes bytes as an uppercase hexadecimal string without `0x` prefix.
pub fn to_hex_upper(bytes: impl AsRef<[u8]>) -> String { bytes.as_ref().to_hex().to_uppercase() }

/// Decodes a hexadecimal string (in any letter case) into bytes.
pub fn from_hex(s: &str) -> Result<Vec<u8>, DecodeError> { Ok(Vec::<u8>::from_hex(s)?) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_case() {
        assert_eq!(to_hex_upper([0x0b, 0xfd, 0x00]), "0BFD00");
        assert_eq!(from_hex("0bFd00").unwrap(), vec![0x0b, 0xfd, 0x00]);
        assert!(from_hex("0BF").is_err());
        assert!(from_hex("ZZ").is_err());
    }
}
