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

//! Calling conventions for contract methods and runtime interops.
//!
//! Arguments are pushed onto the VM stack in reverse order, so the callee pops them in the order
//! they were given. Register `r0` is used as a scratch register; loading an array argument also
//! overwrites `r1` and `r2`.

use super::constants::*;
use super::{LoadValue, ScriptBuilder};
use crate::codec::EncodeError;
use crate::isa::Reg;

const SCRATCH_REG: Reg = 0;
const CONTEXT_REG: Reg = 1;

impl ScriptBuilder {
    /// Loads each argument into the scratch register and pushes it, last argument first.
    pub fn insert_method_args(&mut self, args: &[LoadValue]) -> Result<&mut Self, EncodeError> {
        for arg in args.iter().rev() {
            self.emit_load(SCRATCH_REG, arg.clone())?;
            self.emit_push(SCRATCH_REG);
        }
        Ok(self)
    }

    /// Calls `method` of the named contract.
    ///
    /// Pushes the arguments and the method name, resolves the contract context from its name
    /// and switches into it.
    pub fn call_contract(
        &mut self,
        contract: &str,
        method: &str,
        args: &[LoadValue],
    ) -> Result<&mut Self, EncodeError> {
        self.insert_method_args(args)?;
        self.emit_load(SCRATCH_REG, method)?;
        self.emit_push(SCRATCH_REG);
        self.emit_load(SCRATCH_REG, contract)?;
        Ok(self.emit_ctx(SCRATCH_REG, CONTEXT_REG).emit_switch(CONTEXT_REG))
    }

    /// Calls a method provided by the VM runtime.
    pub fn call_interop(
        &mut self,
        method: &str,
        args: &[LoadValue],
    ) -> Result<&mut Self, EncodeError> {
        self.insert_method_args(args)?;
        self.emit_ext_call(method, SCRATCH_REG)
    }

    /// Allows the gas contract to charge `from` for the script execution.
    pub fn allow_gas(
        &mut self,
        from: &str,
        to: &str,
        gas_price: impl Into<LoadValue>,
        gas_limit: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_contract(GAS_CONTRACT, METHOD_ALLOW_GAS, &[
            from.into(),
            to.into(),
            gas_price.into(),
            gas_limit.into(),
        ])
    }

    /// Settles gas spent by the script with the gas contract.
    pub fn spend_gas(&mut self, address: &str) -> Result<&mut Self, EncodeError> {
        self.call_contract(GAS_CONTRACT, METHOD_SPEND_GAS, &[address.into()])
    }

    /// Transfers fungible tokens.
    pub fn transfer_tokens(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
        amount: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_TRANSFER_TOKENS, &[
            from.into(),
            to.into(),
            symbol.into(),
            amount.into(),
        ])
    }

    /// Transfers whole balance of a fungible token.
    pub fn transfer_balance(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_TRANSFER_BALANCE, &[from.into(), to.into(), symbol.into()])
    }

    /// Transfers a single non-fungible token.
    pub fn transfer_token(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
        token_id: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_TRANSFER_TOKEN, &[
            from.into(),
            to.into(),
            symbol.into(),
            token_id.into(),
        ])
    }

    pub fn mint_tokens(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
        amount: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_MINT_TOKENS, &[
            from.into(),
            to.into(),
            symbol.into(),
            amount.into(),
        ])
    }

    /// Mints a non-fungible token with its immutable (`rom`) and mutable (`ram`) contents.
    pub fn mint_token(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
        rom: &[u8],
        ram: &[u8],
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_MINT_TOKEN, &[
            from.into(),
            to.into(),
            symbol.into(),
            rom.into(),
            ram.into(),
        ])
    }

    pub fn burn_tokens(
        &mut self,
        from: &str,
        symbol: &str,
        amount: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_BURN_TOKENS, &[from.into(), symbol.into(), amount.into()])
    }

    pub fn burn_token(
        &mut self,
        from: &str,
        symbol: &str,
        token_id: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_BURN_TOKEN, &[from.into(), symbol.into(), token_id.into()])
    }

    /// Reads contents of a non-fungible token into `dst`.
    pub fn read_token_to_register(
        &mut self,
        symbol: &str,
        token_id: impl Into<LoadValue>,
        dst: Reg,
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_READ_TOKEN, &[symbol.into(), token_id.into()])?;
        Ok(self.emit_pop(dst))
    }

    /// Replaces mutable contents of a non-fungible token.
    pub fn write_token(
        &mut self,
        symbol: &str,
        token_id: impl Into<LoadValue>,
        ram: &[u8],
    ) -> Result<&mut Self, EncodeError> {
        self.call_interop(INTEROP_WRITE_TOKEN, &[symbol.into(), token_id.into(), ram.into()])
    }
}
