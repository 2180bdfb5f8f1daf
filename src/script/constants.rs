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

#![allow(missing_docs)]

/// Textual form of the null address, used as a neutral counterparty (e.g. the gas target).
pub const NULL_ADDRESS: &str = "S1111111111111111111111111111111111";

/// Largest payload of a single `load` instruction.
pub const MAX_LOAD_LEN: usize = 0xFFFF;

/// Largest byte offset addressable by jumps and calls.
pub const MAX_JUMP_OFFSET: usize = 0xFFFF;

// Native contracts
pub const GAS_CONTRACT: &str = "gas";
pub const BLOCK_CONTRACT: &str = "block";
pub const STAKE_CONTRACT: &str = "stake";
pub const SWAP_CONTRACT: &str = "swap";
pub const ACCOUNT_CONTRACT: &str = "account";
pub const CONSENSUS_CONTRACT: &str = "consensus";
pub const GOVERNANCE_CONTRACT: &str = "governance";
pub const STORAGE_CONTRACT: &str = "storage";
pub const VALIDATOR_CONTRACT: &str = "validator";
pub const INTEROP_CONTRACT: &str = "interop";
pub const EXCHANGE_CONTRACT: &str = "exchange";
pub const PRIVACY_CONTRACT: &str = "privacy";
pub const RELAY_CONTRACT: &str = "relay";
pub const RANKING_CONTRACT: &str = "ranking";

pub const NATIVE_CONTRACTS: [&str; 14] = [
    GAS_CONTRACT,
    BLOCK_CONTRACT,
    STAKE_CONTRACT,
    SWAP_CONTRACT,
    ACCOUNT_CONTRACT,
    CONSENSUS_CONTRACT,
    GOVERNANCE_CONTRACT,
    STORAGE_CONTRACT,
    VALIDATOR_CONTRACT,
    INTEROP_CONTRACT,
    EXCHANGE_CONTRACT,
    PRIVACY_CONTRACT,
    RELAY_CONTRACT,
    RANKING_CONTRACT,
];

// Gas contract methods
pub const METHOD_ALLOW_GAS: &str = "AllowGas";
pub const METHOD_SPEND_GAS: &str = "SpendGas";

// Runtime interop methods
pub const INTEROP_TRANSFER_TOKENS: &str = "Runtime.TransferTokens";
pub const INTEROP_TRANSFER_TOKEN: &str = "Runtime.TransferToken";
pub const INTEROP_TRANSFER_BALANCE: &str = "Runtime.TransferBalance";
pub const INTEROP_MINT_TOKENS: &str = "Runtime.MintTokens";
pub const INTEROP_MINT_TOKEN: &str = "Runtime.MintToken";
pub const INTEROP_BURN_TOKENS: &str = "Runtime.BurnTokens";
pub const INTEROP_BURN_TOKEN: &str = "Runtime.BurnToken";
pub const INTEROP_READ_TOKEN: &str = "Runtime.ReadToken";
pub const INTEROP_WRITE_TOKEN: &str = "Runtime.WriteToken";
