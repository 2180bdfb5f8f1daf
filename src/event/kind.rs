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

use core::convert::Infallible;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use crate::codec::DecodeError;

/// Kinds of events emitted by the chain.
///
/// Kinds starting from [`EventKind::Custom`] are defined by contracts; they all map to
/// [`EventKind::Custom`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
#[repr(u8)]
pub enum EventKind {
    #[default]
    Unknown = 0,
    ChainCreate = 1,
    TokenCreate = 2,
    TokenSend = 3,
    TokenReceive = 4,
    TokenMint = 5,
    TokenBurn = 6,
    TokenStake = 7,
    TokenClaim = 8,
    AddressRegister = 9,
    AddressLink = 10,
    AddressUnlink = 11,
    OrganizationCreate = 12,
    OrganizationAdd = 13,
    OrganizationRemove = 14,
    GasEscrow = 15,
    GasPayment = 16,
    AddressUnregister = 17,
    OrderCreated = 18,
    OrderCancelled = 19,
    OrderFilled = 20,
    OrderClosed = 21,
    FeedCreate = 22,
    FeedUpdate = 23,
    FileCreate = 24,
    FileDelete = 25,
    ValidatorPropose = 26,
    ValidatorElect = 27,
    ValidatorRemove = 28,
    ValidatorSwitch = 29,
    PackedNft = 30,
    ValueCreate = 31,
    ValueUpdate = 32,
    PollCreated = 33,
    PollClosed = 34,
    PollVote = 35,
    ChannelCreate = 36,
    ChannelRefill = 37,
    ChannelSettle = 38,
    LeaderboardCreate = 39,
    LeaderboardInsert = 40,
    LeaderboardReset = 41,
    PlatformCreate = 42,
    ChainSwap = 43,
    ContractRegister = 44,
    ContractDeploy = 45,
    AddressMigration = 46,
    ContractUpgrade = 47,
    Log = 48,
    Custom = 64,
}

impl EventKind {
    /// All kinds together with the names under which they are reported by the node.
    pub const NAMES: [(EventKind, &'static str); 50] = [
        (EventKind::Unknown, "Unknown"),
        (EventKind::ChainCreate, "ChainCreate"),
        (EventKind::TokenCreate, "TokenCreate"),
        (EventKind::TokenSend, "TokenSend"),
        (EventKind::TokenReceive, "TokenReceive"),
        (EventKind::TokenMint, "TokenMint"),
        (EventKind::TokenBurn, "TokenBurn"),
        (EventKind::TokenStake, "TokenStake"),
        (EventKind::TokenClaim, "TokenClaim"),
        (EventKind::AddressRegister, "AddressRegister"),
        (EventKind::AddressLink, "AddressLink"),
        (EventKind::AddressUnlink, "AddressUnlink"),
        (EventKind::OrganizationCreate, "OrganizationCreate"),
        (EventKind::OrganizationAdd, "OrganizationAdd"),
        (EventKind::OrganizationRemove, "OrganizationRemove"),
        (EventKind::GasEscrow, "GasEscrow"),
        (EventKind::GasPayment, "GasPayment"),
        (EventKind::AddressUnregister, "AddressUnregister"),
        (EventKind::OrderCreated, "OrderCreated"),
        (EventKind::OrderCancelled, "OrderCancelled"),
        (EventKind::OrderFilled, "OrderFilled"),
        (EventKind::OrderClosed, "OrderClosed"),
        (EventKind::FeedCreate, "FeedCreate"),
        (EventKind::FeedUpdate, "FeedUpdate"),
        (EventKind::FileCreate, "FileCreate"),
        (EventKind::FileDelete, "FileDelete"),
        (EventKind::ValidatorPropose, "ValidatorPropose"),
        (EventKind::ValidatorElect, "ValidatorElect"),
        (EventKind::ValidatorRemove, "ValidatorRemove"),
        (EventKind::ValidatorSwitch, "ValidatorSwitch"),
        (EventKind::PackedNft, "PackedNFT"),
        (EventKind::ValueCreate, "ValueCreate"),
        (EventKind::ValueUpdate, "ValueUpdate"),
        (EventKind::PollCreated, "PollCreated"),
        (EventKind::PollClosed, "PollClosed"),
        (EventKind::PollVote, "PollVote"),
        (EventKind::ChannelCreate, "ChannelCreate"),
        (EventKind::ChannelRefill, "ChannelRefill"),
        (EventKind::ChannelSettle, "ChannelSettle"),
        (EventKind::LeaderboardCreate, "LeaderboardCreate"),
        (EventKind::LeaderboardInsert, "LeaderboardInsert"),
        (EventKind::LeaderboardReset, "LeaderboardReset"),
        (EventKind::PlatformCreate, "PlatformCreate"),
        (EventKind::ChainSwap, "ChainSwap"),
        (EventKind::ContractRegister, "ContractRegister"),
        (EventKind::ContractDeploy, "ContractDeploy"),
        (EventKind::AddressMigration, "AddressMigration"),
        (EventKind::ContractUpgrade, "ContractUpgrade"),
        (EventKind::Log, "Log"),
        (EventKind::Custom, "Custom"),
    ];

    /// Name of the kind, as reported by the node.
    pub fn name(self) -> &'static str {
        EventKind::NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("Custom")
    }

    #[inline]
    pub const fn byte(self) -> u8 { self as u8 }

    /// Detects kinds of events reporting a change of token balance or ownership.
    pub const fn is_token_event(self) -> bool {
        matches!(
            self,
            EventKind::TokenCreate
                | EventKind::TokenSend
                | EventKind::TokenReceive
                | EventKind::TokenMint
                | EventKind::TokenBurn
                | EventKind::TokenStake
                | EventKind::TokenClaim
                | EventKind::GasEscrow
                | EventKind::GasPayment
        )
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for EventKind {
    type Err = Infallible;

    /// Names not known to this library are treated as contract-defined events.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EventKind::NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(kind, _)| *kind)
            .unwrap_or(EventKind::Custom))
    }
}

impl TryFrom<u8> for EventKind {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if byte >= EventKind::Custom.byte() {
            return Ok(EventKind::Custom);
        }
        EventKind::NAMES
            .iter()
            .map(|(kind, _)| *kind)
            .find(|kind| kind.byte() == byte)
            .ok_or(DecodeError::InvalidTag(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(EventKind::GasPayment.byte(), 16);
        assert_eq!(EventKind::PackedNft.byte(), 30);
        assert_eq!(EventKind::Log.byte(), 48);
        assert_eq!(EventKind::Custom.byte(), 64);
        for (kind, _) in EventKind::NAMES {
            assert_eq!(EventKind::try_from(kind.byte()).unwrap(), kind);
        }
        assert_eq!(EventKind::try_from(70).unwrap(), EventKind::Custom);
        assert_eq!(EventKind::try_from(49).unwrap_err(), DecodeError::InvalidTag(49));
    }

    #[test]
    fn names() {
        assert_eq!(EventKind::TokenSend.to_string(), "TokenSend");
        assert_eq!(EventKind::PackedNft.to_string(), "PackedNFT");
        assert_eq!("TokenReceive".parse::<EventKind>().unwrap(), EventKind::TokenReceive);
        assert_eq!("Unknown".parse::<EventKind>().unwrap(), EventKind::Unknown);
        assert_eq!("DragonSlain".parse::<EventKind>().unwrap(), EventKind::Custom);
        for (kind, name) in EventKind::NAMES {
            assert_eq!(kind.name(), name);
        }
    }
}
