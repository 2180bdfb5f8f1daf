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

use crate::codec::DecodeError;

/// Type tags of values held by VM registers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[repr(u8)]
pub enum VmType {
    /// Empty register.
    #[default]
    #[display("none")]
    None = 0,

    #[display("struct")]
    Struct = 1,

    /// Raw byte sequence.
    #[display("bytes")]
    Bytes = 2,

    /// Signed arbitrary-precision integer.
    #[display("number")]
    Number = 3,

    #[display("string")]
    String = 4,

    /// Unix time in seconds, 32 bits.
    #[display("timestamp")]
    Timestamp = 5,

    #[display("bool")]
    Bool = 6,

    /// Enumeration value, 32 bits.
    #[display("enum")]
    Enum = 7,

    /// Chain object (address, hash and alike) in its serialized form.
    #[display("object")]
    Object = 8,
}

impl VmType {
    /// All type tags, indexed by their byte value.
    pub const ALL: [VmType; 9] = [
        VmType::None,
        VmType::Struct,
        VmType::Bytes,
        VmType::Number,
        VmType::String,
        VmType::Timestamp,
        VmType::Bool,
        VmType::Enum,
        VmType::Object,
    ];

    #[inline]
    pub const fn byte(self) -> u8 { self as u8 }

    /// Returns size of the value data for the types which have fixed width.
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            VmType::Bool => Some(1),
            VmType::Timestamp | VmType::Enum => Some(4),
            _ => None,
        }
    }
}

impl From<VmType> for u8 {
    #[inline]
    fn from(ty: VmType) -> Self { ty as u8 }
}

impl TryFrom<u8> for VmType {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        VmType::ALL.get(byte as usize).copied().ok_or(DecodeError::InvalidTag(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        for (byte, ty) in VmType::ALL.into_iter().enumerate() {
            assert_eq!(u8::from(ty) as usize, byte);
            assert_eq!(VmType::try_from(byte as u8).unwrap(), ty);
        }
        assert_eq!(VmType::String.byte(), 4);
        assert_eq!(VmType::Object.byte(), 8);
        assert_eq!(VmType::try_from(9).unwrap_err(), DecodeError::InvalidTag(9));
    }

    #[test]
    fn widths() {
        assert_eq!(VmType::Bool.fixed_len(), Some(1));
        assert_eq!(VmType::Enum.fixed_len(), Some(4));
        assert_eq!(VmType::String.fixed_len(), None);
    }
}
