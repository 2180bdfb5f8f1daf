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

/// Operation codes of the virtual machine.
///
/// Numeric values are a part of the wire format and never change.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[repr(u8)]
pub enum Opcode {
    /// No operation; also marks label locations.
    #[display("nop")]
    Nop = 0,

    /// Moves value from one register into another, clearing the source.
    #[display("mov")]
    Move = 1,

    /// Copies value from one register into another.
    #[display("cpy")]
    Copy = 2,

    /// Pushes register value onto the stack.
    #[display("push")]
    Push = 3,

    /// Pops value from the stack into a register.
    #[display("pop")]
    Pop = 4,

    /// Swaps values of two registers.
    #[display("swap")]
    Swap = 5,

    /// Calls a subroutine within the script.
    #[display("call")]
    Call = 6,

    /// Calls a runtime-provided method named by a register value.
    #[display("extcall")]
    ExtCall = 7,

    /// Unconditional jump.
    #[display("jmp")]
    Jmp = 8,

    /// Jumps if the register holds `true`.
    #[display("jmpif")]
    JmpIf = 9,

    /// Jumps if the register holds `false`.
    #[display("jmpnot")]
    JmpNot = 10,

    /// Returns from a subroutine or ends the script.
    #[display("ret")]
    Ret = 11,

    /// Aborts execution with an error payload.
    #[display("throw")]
    Throw = 12,

    /// Loads a typed constant into a register.
    #[display("load")]
    Load = 13,

    /// Converts register value into another VM type.
    #[display("cast")]
    Cast = 14,

    /// Concatenation.
    #[display("cat")]
    Cat = 15,

    /// Substring extraction.
    #[display("substr")]
    Substr = 16,

    /// Takes leading bytes.
    #[display("left")]
    Left = 17,

    /// Takes trailing bytes.
    #[display("right")]
    Right = 18,

    /// Byte size of a value.
    #[display("size")]
    Size = 19,

    /// Number of elements in a struct.
    #[display("count")]
    Count = 20,

    #[display("not")]
    Not = 21,

    #[display("and")]
    And = 22,

    #[display("or")]
    Or = 23,

    #[display("xor")]
    Xor = 24,

    #[display("eq")]
    Equal = 25,

    #[display("lt")]
    Lt = 26,

    #[display("gt")]
    Gt = 27,

    #[display("lte")]
    Lte = 28,

    #[display("gte")]
    Gte = 29,

    #[display("inc")]
    Inc = 30,

    #[display("dec")]
    Dec = 31,

    #[display("sign")]
    Sign = 32,

    #[display("neg")]
    Negate = 33,

    #[display("abs")]
    Abs = 34,

    #[display("add")]
    Add = 35,

    #[display("sub")]
    Sub = 36,

    #[display("mul")]
    Mul = 37,

    #[display("div")]
    Div = 38,

    #[display("mod")]
    Mod = 39,

    #[display("shl")]
    Shl = 40,

    #[display("shr")]
    Shr = 41,

    #[display("min")]
    Min = 42,

    #[display("max")]
    Max = 43,

    /// Puts address of the current contract into a register.
    #[display("this")]
    This = 44,

    /// Resolves contract context by name.
    #[display("ctx")]
    Ctx = 45,

    /// Switches execution into a contract context.
    #[display("switch")]
    Switch = 46,

    /// Puts a value into a struct under a key.
    #[display("put")]
    Put = 47,

    /// Reads a value from a struct under a key.
    #[display("get")]
    Get = 48,
}

impl Opcode {
    /// All opcodes, indexed by their byte value.
    pub const ALL: [Opcode; 49] = [
        Opcode::Nop,
        Opcode::Move,
        Opcode::Copy,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Swap,
        Opcode::Call,
        Opcode::ExtCall,
        Opcode::Jmp,
        Opcode::JmpIf,
        Opcode::JmpNot,
        Opcode::Ret,
        Opcode::Throw,
        Opcode::Load,
        Opcode::Cast,
        Opcode::Cat,
        Opcode::Substr,
        Opcode::Left,
        Opcode::Right,
        Opcode::Size,
        Opcode::Count,
        Opcode::Not,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Equal,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Lte,
        Opcode::Gte,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Sign,
        Opcode::Negate,
        Opcode::Abs,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Min,
        Opcode::Max,
        Opcode::This,
        Opcode::Ctx,
        Opcode::Switch,
        Opcode::Put,
        Opcode::Get,
    ];

    /// Returns byte value of the opcode.
    #[inline]
    pub const fn byte(self) -> u8 { self as u8 }

    /// Detects jump opcodes which carry a 16-bit target address.
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self, Opcode::Jmp | Opcode::JmpIf | Opcode::JmpNot)
    }
}

impl From<Opcode> for u8 {
    #[inline]
    fn from(opcode: Opcode) -> Self { opcode as u8 }
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::ALL.get(byte as usize).copied().ok_or(DecodeError::InvalidTag(byte))
    }
}

/// Binary arithmetic operations sharing the `op src1, src2, dst` operand layout.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Shift left.
    Shl,
    /// Shift right.
    Shr,
    Min,
    Max,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 9] = [
        ArithmeticOp::Add,
        ArithmeticOp::Sub,
        ArithmeticOp::Mul,
        ArithmeticOp::Div,
        ArithmeticOp::Mod,
        ArithmeticOp::Shl,
        ArithmeticOp::Shr,
        ArithmeticOp::Min,
        ArithmeticOp::Max,
    ];
}

impl From<ArithmeticOp> for Opcode {
    fn from(op: ArithmeticOp) -> Self {
        match op {
            ArithmeticOp::Add => Opcode::Add,
            ArithmeticOp::Sub => Opcode::Sub,
            ArithmeticOp::Mul => Opcode::Mul,
            ArithmeticOp::Div => Opcode::Div,
            ArithmeticOp::Mod => Opcode::Mod,
            ArithmeticOp::Shl => Opcode::Shl,
            ArithmeticOp::Shr => Opcode::Shr,
            ArithmeticOp::Min => Opcode::Min,
            ArithmeticOp::Max => Opcode::Max,
        }
    }
}
