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

use core::fmt::{self, Debug, Formatter};

use amplify::hex::ToHex;

use super::WireWrite;

/// Append-only byte buffer producing wire-encoded data.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Marshaller {
    bytes: Vec<u8>,
}

impl Debug for Marshaller {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Marshaller").field(&self.bytes.to_hex()).finish()
    }
}

impl Marshaller {
    /// Creates an empty buffer.
    #[inline]
    pub fn new() -> Marshaller { Marshaller::default() }

    /// Creates an empty buffer with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Marshaller {
        Marshaller { bytes: Vec::with_capacity(capacity) }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize { self.bytes.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    #[inline]
    pub fn as_slice(&self) -> &[u8] { &self.bytes }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> { self.bytes }

    /// Lowercase hex of the bytes written so far.
    #[inline]
    pub fn to_hex(&self) -> String { self.bytes.to_hex() }

    /// Overwrites two already written bytes at `offset` with a little-endian `value`.
    ///
    /// Returns `false` and leaves the buffer intact if `offset + 2` is past the end of data.
    pub fn patch_u16(&mut self, offset: usize, value: u16) -> bool {
        match self.bytes.get_mut(offset..offset.saturating_add(2)) {
            Some(slot) if slot.len() == 2 => {
                slot.copy_from_slice(&value.to_le_bytes());
                true
            }
            _ => false,
        }
    }
}

impl WireWrite for Marshaller {
    #[inline]
    fn write_byte(&mut self, byte: u8) { self.bytes.push(byte) }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) { self.bytes.extend_from_slice(bytes) }
}

impl From<Marshaller> for Vec<u8> {
    #[inline]
    fn from(marshaller: Marshaller) -> Self { marshaller.bytes }
}
