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
use std::time::{SystemTime, UNIX_EPOCH};

use amplify::hex::ToHex;
use num_bigint::{BigInt, BigUint};

use crate::codec::{latin1_string, EncodeError};
use crate::isa::VmType;

/// Unix time with one-second precision, as understood by the VM.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, From, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}")]
pub struct Timestamp(#[from] u32);

impl Timestamp {
    #[inline]
    pub const fn from_secs(secs: u32) -> Timestamp { Timestamp(secs) }

    /// Constructs timestamp from a signed Unix time.
    ///
    /// # Errors
    ///
    /// [`EncodeError::OutOfRange`] if the value doesn't fit into 32 bits.
    pub fn from_unix(secs: i64) -> Result<Timestamp, EncodeError> {
        u32::try_from(secs)
            .map(Timestamp)
            .map_err(|_| EncodeError::OutOfRange(secs as u64, u32::MAX as u64))
    }

    /// Current system time.
    ///
    /// Times before the epoch are represented as zero; times past 2106 saturate.
    pub fn now() -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Timestamp(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    #[inline]
    pub const fn as_secs(self) -> u32 { self.0 }

    /// Returns timestamp moved `secs` seconds into the future, saturating at the maximum.
    #[inline]
    pub const fn saturating_add(self, secs: u32) -> Timestamp { Timestamp(self.0.saturating_add(secs)) }

    /// Wire representation: 4 bytes little-endian.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 4] { self.0.to_le_bytes() }
}

/// Value which can be loaded into a VM register by [`crate::ScriptBuilder::emit_load`].
///
/// Numbers are kept in their decimal text form and loaded as strings: the VM parses them into its
/// arbitrary-precision integers itself.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum LoadValue {
    String(String),
    Bool(bool),
    Number(String),
    Timestamp(Timestamp),
    Bytes(Vec<u8>),
    Enum(u32),
    /// Struct built from a list of values indexed from zero.
    Array(Vec<LoadValue>),
}

impl LoadValue {
    /// Type tag under which the value lands in a register.
    pub fn vm_type(&self) -> VmType {
        match self {
            LoadValue::String(_) | LoadValue::Number(_) => VmType::String,
            LoadValue::Bool(_) => VmType::Bool,
            LoadValue::Timestamp(_) => VmType::Timestamp,
            LoadValue::Bytes(_) => VmType::Bytes,
            LoadValue::Enum(_) => VmType::Enum,
            LoadValue::Array(_) => VmType::Struct,
        }
    }

    /// Reconstructs value from the operand data of a `load` instruction.
    ///
    /// Numbers are indistinguishable from strings at this level and come back as
    /// [`LoadValue::String`].
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedLoadType`] for type tags which are never produced by the builder,
    /// and for fixed-width types whose data has a wrong length.
    pub fn from_raw(ty: VmType, data: &[u8]) -> Result<LoadValue, EncodeError> {
        let unsupported = EncodeError::UnsupportedLoadType(ty);
        Ok(match ty {
            VmType::String => LoadValue::String(latin1_string(data)),
            VmType::Bytes => LoadValue::Bytes(data.to_vec()),
            VmType::Bool => match data {
                [0] => LoadValue::Bool(false),
                [1] => LoadValue::Bool(true),
                _ => return Err(unsupported),
            },
            VmType::Timestamp => {
                let bytes = <[u8; 4]>::try_from(data).map_err(|_| unsupported)?;
                LoadValue::Timestamp(Timestamp(u32::from_le_bytes(bytes)))
            }
            VmType::Enum => {
                let bytes = <[u8; 4]>::try_from(data).map_err(|_| unsupported)?;
                LoadValue::Enum(u32::from_le_bytes(bytes))
            }
            VmType::None | VmType::Struct | VmType::Number | VmType::Object => {
                return Err(unsupported)
            }
        })
    }
}

impl Display for LoadValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadValue::String(s) => write!(f, "{s:?}"),
            LoadValue::Bool(b) => Display::fmt(b, f),
            LoadValue::Number(n) => f.write_str(n),
            LoadValue::Timestamp(t) => write!(f, "time({t})"),
            LoadValue::Bytes(data) => write!(f, "0x{}", data.to_hex()),
            LoadValue::Enum(e) => write!(f, "enum({e})"),
            LoadValue::Array(items) => {
                f.write_str("[")?;
                for (no, item) in items.iter().enumerate() {
                    if no > 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for LoadValue {
    fn from(s: &str) -> Self { LoadValue::String(s.to_owned()) }
}

impl From<String> for LoadValue {
    fn from(s: String) -> Self { LoadValue::String(s) }
}

impl From<&String> for LoadValue {
    fn from(s: &String) -> Self { LoadValue::String(s.clone()) }
}

impl From<bool> for LoadValue {
    fn from(b: bool) -> Self { LoadValue::Bool(b) }
}

impl From<Timestamp> for LoadValue {
    fn from(t: Timestamp) -> Self { LoadValue::Timestamp(t) }
}

impl From<Vec<u8>> for LoadValue {
    fn from(data: Vec<u8>) -> Self { LoadValue::Bytes(data) }
}

impl From<&[u8]> for LoadValue {
    fn from(data: &[u8]) -> Self { LoadValue::Bytes(data.to_vec()) }
}

impl From<Vec<LoadValue>> for LoadValue {
    fn from(items: Vec<LoadValue>) -> Self { LoadValue::Array(items) }
}

impl From<BigUint> for LoadValue {
    fn from(n: BigUint) -> Self { LoadValue::Number(n.to_string()) }
}

impl From<&BigUint> for LoadValue {
    fn from(n: &BigUint) -> Self { LoadValue::Number(n.to_string()) }
}

impl From<BigInt> for LoadValue {
    fn from(n: BigInt) -> Self { LoadValue::Number(n.to_string()) }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {$(
        impl From<$ty> for LoadValue {
            fn from(n: $ty) -> Self { LoadValue::Number(n.to_string()) }
        }
    )+};
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_from_float {
    ($($ty:ty),+) => {$(
        impl From<$ty> for LoadValue {
            fn from(n: $ty) -> Self {
                // integral values keep a trailing `.0`, distinguishing them from integers
                if n.is_finite() && n.fract() == 0.0 {
                    LoadValue::Number(format!("{n:.1}"))
                } else {
                    LoadValue::Number(n.to_string())
                }
            }
        }
    )+};
}

impl_from_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_textual() {
        assert_eq!(LoadValue::from(10_000_000_000u64), LoadValue::Number(s!("10000000000")));
        assert_eq!(LoadValue::from(-5i32), LoadValue::Number(s!("-5")));
        assert_eq!(LoadValue::from(1.0f64), LoadValue::Number(s!("1.0")));
        assert_eq!(LoadValue::from(2.5f32), LoadValue::Number(s!("2.5")));
        assert_eq!(LoadValue::from(BigUint::from(1u8) << 70usize).to_string(), "1180591620717411303424");
        assert_eq!(LoadValue::from(7u8).vm_type(), VmType::String);
    }

    #[test]
    fn raw_values() {
        assert_eq!(LoadValue::from_raw(VmType::Bool, &[1]).unwrap(), LoadValue::Bool(true));
        assert_eq!(
            LoadValue::from_raw(VmType::Timestamp, &[0x10, 0x27, 0, 0]).unwrap(),
            LoadValue::Timestamp(Timestamp::from_secs(10_000))
        );
        assert_eq!(LoadValue::from_raw(VmType::Enum, &[2, 0, 0, 0]).unwrap(), LoadValue::Enum(2));
        assert_eq!(
            LoadValue::from_raw(VmType::Enum, &[2, 0]).unwrap_err(),
            EncodeError::UnsupportedLoadType(VmType::Enum)
        );
        assert_eq!(
            LoadValue::from_raw(VmType::Bool, &[2]).unwrap_err(),
            EncodeError::UnsupportedLoadType(VmType::Bool)
        );
        assert_eq!(
            LoadValue::from_raw(VmType::Object, &[]).unwrap_err(),
            EncodeError::UnsupportedLoadType(VmType::Object)
        );
    }

    #[test]
    fn timestamps() {
        assert_eq!(Timestamp::from_unix(1_600_000_000).unwrap().as_secs(), 1_600_000_000);
        assert!(Timestamp::from_unix(-1).is_err());
        assert!(Timestamp::from_unix(u32::MAX as i64 + 1).is_err());
        assert_eq!(Timestamp::from_secs(u32::MAX).saturating_add(1000).as_secs(), u32::MAX);
        assert!(Timestamp::now().as_secs() > 1_600_000_000);
    }

    #[test]
    fn display() {
        let value = LoadValue::Array(vec![
            LoadValue::from("a"),
            LoadValue::from(true),
            LoadValue::from(vec![0xABu8]),
            LoadValue::Enum(3),
        ]);
        assert_eq!(value.to_string(), r#"["a", true, 0xab, enum(3)]"#);
    }
}
