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
use std::io;

use amplify::hex::ToHex;

use super::{Opcode, VmType};
use crate::codec::{Cursor, DecodeError, WireRead, WireWrite};
use crate::script::LoadValue;

/// Index of a VM register.
pub type Reg = u8;

/// Single instruction together with its operands, as it is laid out in the bytecode.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Instr {
    /// Not an operation.
    Nop,

    /// Return from a subroutine or finish the script.
    Ret,

    /// Operation over a single register: `push`, `pop`, `extcall`, `inc`, `dec`, `this` and
    /// `switch`.
    Single { op: Opcode, reg: Reg },

    /// Operation over two registers, the source going first.
    Pair { op: Opcode, regs: [Reg; 2] },

    /// Operation over three registers.
    ///
    /// For logical and arithmetic operations the registers are two sources followed by the
    /// destination; `put` uses source, destination struct and key register; `get` uses source
    /// struct, destination and key register.
    Triple { op: Opcode, regs: [Reg; 3] },

    /// Subroutine call providing a number of registers to the callee.
    Call { regs: u8, pos: u16 },

    Jmp { pos: u16 },

    /// Jump to location if the register holds `true`.
    JmpIf { reg: Reg, pos: u16 },

    /// Jump to location if the register holds `false`.
    JmpNot { reg: Reg, pos: u16 },

    Throw { data: Vec<u8> },

    /// Load constant data of a given type into the register.
    Load { dst: Reg, ty: VmType, data: Vec<u8> },

    Cast { src: Reg, dst: Reg, ty: VmType },

    Left { src: Reg, dst: Reg, len: u64 },

    Right { src: Reg, dst: Reg, len: u64 },

    Substr { src: Reg, dst: Reg, index: u64, len: u64 },
}

impl Instr {
    /// Returns opcode of the instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instr::Nop => Opcode::Nop,
            Instr::Ret => Opcode::Ret,
            Instr::Single { op, .. } | Instr::Pair { op, .. } | Instr::Triple { op, .. } => *op,
            Instr::Call { .. } => Opcode::Call,
            Instr::Jmp { .. } => Opcode::Jmp,
            Instr::JmpIf { .. } => Opcode::JmpIf,
            Instr::JmpNot { .. } => Opcode::JmpNot,
            Instr::Throw { .. } => Opcode::Throw,
            Instr::Load { .. } => Opcode::Load,
            Instr::Cast { .. } => Opcode::Cast,
            Instr::Left { .. } => Opcode::Left,
            Instr::Right { .. } => Opcode::Right,
            Instr::Substr { .. } => Opcode::Substr,
        }
    }

    /// Writes the instruction as bytecode.
    ///
    /// Operand limits (payload size, lengths, register ranges) are not checked here; they are
    /// enforced by [`crate::ScriptBuilder`].
    pub fn encode(&self, writer: &mut impl WireWrite) {
        writer.write_byte(self.opcode().byte());
        match self {
            Instr::Nop | Instr::Ret => {}
            Instr::Single { reg, .. } => writer.write_byte(*reg),
            Instr::Pair { regs, .. } => writer.write_slice(regs),
            Instr::Triple { regs, .. } => writer.write_slice(regs),
            Instr::Call { regs, pos } => {
                writer.write_byte(*regs);
                writer.write_u16(*pos);
            }
            Instr::Jmp { pos } => writer.write_u16(*pos),
            Instr::JmpIf { reg, pos } | Instr::JmpNot { reg, pos } => {
                writer.write_byte(*reg);
                writer.write_u16(*pos);
            }
            Instr::Throw { data } => writer.write_byte_array(data),
            Instr::Load { dst, ty, data } => {
                writer.write_byte(*dst);
                writer.write_byte(ty.byte());
                writer.write_byte_array(data);
            }
            Instr::Cast { src, dst, ty } => writer.write_slice(&[*src, *dst, ty.byte()]),
            Instr::Left { src, dst, len } | Instr::Right { src, dst, len } => {
                writer.write_slice(&[*src, *dst]);
                writer.write_var_int(*len);
            }
            Instr::Substr { src, dst, index, len } => {
                writer.write_slice(&[*src, *dst]);
                writer.write_var_int(*index);
                writer.write_var_int(*len);
            }
        }
    }

    /// Reads a single instruction from bytecode.
    pub fn decode(reader: &mut impl WireRead) -> Result<Instr, DecodeError> {
        let opcode = Opcode::try_from(reader.read_byte()?)?;
        Ok(match opcode {
            Opcode::Nop => Instr::Nop,
            Opcode::Ret => Instr::Ret,

            op @ (Opcode::Push
            | Opcode::Pop
            | Opcode::ExtCall
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::This
            | Opcode::Switch) => Instr::Single { op, reg: reader.read_byte()? },

            op @ (Opcode::Move
            | Opcode::Copy
            | Opcode::Swap
            | Opcode::Size
            | Opcode::Count
            | Opcode::Not
            | Opcode::Sign
            | Opcode::Negate
            | Opcode::Abs
            | Opcode::Ctx) => Instr::Pair { op, regs: reader.read_array()? },

            op @ (Opcode::Cat
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Equal
            | Opcode::Lt
            | Opcode::Gt
            | Opcode::Lte
            | Opcode::Gte
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Shl
            | Opcode::Shr
            | Opcode::Min
            | Opcode::Max
            | Opcode::Put
            | Opcode::Get) => Instr::Triple { op, regs: reader.read_array()? },

            Opcode::Call => Instr::Call {
                regs: reader.read_byte()?,
                pos: reader.read_u16()?,
            },
            Opcode::Jmp => Instr::Jmp { pos: reader.read_u16()? },
            Opcode::JmpIf => Instr::JmpIf {
                reg: reader.read_byte()?,
                pos: reader.read_u16()?,
            },
            Opcode::JmpNot => Instr::JmpNot {
                reg: reader.read_byte()?,
                pos: reader.read_u16()?,
            },

            Opcode::Throw => Instr::Throw { data: reader.read_byte_array()? },
            Opcode::Load => Instr::Load {
                dst: reader.read_byte()?,
                ty: VmType::try_from(reader.read_byte()?)?,
                data: reader.read_byte_array()?,
            },
            Opcode::Cast => Instr::Cast {
                src: reader.read_byte()?,
                dst: reader.read_byte()?,
                ty: VmType::try_from(reader.read_byte()?)?,
            },
            Opcode::Left => Instr::Left {
                src: reader.read_byte()?,
                dst: reader.read_byte()?,
                len: reader.read_var_int()?,
            },
            Opcode::Right => Instr::Right {
                src: reader.read_byte()?,
                dst: reader.read_byte()?,
                len: reader.read_var_int()?,
            },
            Opcode::Substr => Instr::Substr {
                src: reader.read_byte()?,
                dst: reader.read_byte()?,
                index: reader.read_var_int()?,
                len: reader.read_var_int()?,
            },
        })
    }
}

struct Regs<'a>(&'a [Reg]);

impl Display for Regs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (no, reg) in self.0.iter().enumerate() {
            if no > 0 {
                f.write_str(", ")?;
            }
            write!(f, "r{reg}")?;
        }
        Ok(())
    }
}

impl Display for Instr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = self.opcode().to_string();
        match self {
            Instr::Nop | Instr::Ret => f.write_str(&op),
            Instr::Single { reg, .. } => write!(f, "{op:<8}r{reg}"),
            Instr::Pair { regs, .. } => write!(f, "{op:<8}{}", Regs(regs)),
            Instr::Triple { regs, .. } => write!(f, "{op:<8}{}", Regs(regs)),
            Instr::Call { regs, pos } => write!(f, "{op:<8}{pos:04x}.h, {regs}"),
            Instr::Jmp { pos } => write!(f, "{op:<8}{pos:04x}.h"),
            Instr::JmpIf { reg, pos } | Instr::JmpNot { reg, pos } => {
                write!(f, "{op:<8}r{reg}, {pos:04x}.h")
            }
            Instr::Throw { data } => write!(f, "{op:<8}0x{}", data.to_hex()),
            Instr::Load { dst, ty, data } => match LoadValue::from_raw(*ty, data) {
                Ok(value) => write!(f, "{op:<8}r{dst}, {value}"),
                Err(_) => write!(f, "{op:<8}r{dst}, {ty}:0x{}", data.to_hex()),
            },
            Instr::Cast { src, dst, ty } => write!(f, "{op:<8}r{src}, r{dst}, {ty}"),
            Instr::Left { src, dst, len } | Instr::Right { src, dst, len } => {
                write!(f, "{op:<8}r{src}, r{dst}, {len}")
            }
            Instr::Substr { src, dst, index, len } => {
                write!(f, "{op:<8}r{src}, r{dst}, {index}, {len}")
            }
        }
    }
}

/// Decodes bytecode into a list of instructions together with their byte offsets.
///
/// # Errors
///
/// [`DecodeError::InvalidTag`] for an unknown opcode or type tag and [`DecodeError::Truncated`]
/// if the last instruction misses some of its operands.
pub fn disassemble(code: impl AsRef<[u8]>) -> Result<Vec<(usize, Instr)>, DecodeError> {
    let mut reader = Cursor::new(code.as_ref());
    let mut instrs = Vec::new();
    while !reader.is_eof() {
        let pos = reader.pos();
        instrs.push((pos, Instr::decode(&mut reader)?));
    }
    Ok(instrs)
}

/// Disassembles bytecode and prints it to the writer, one instruction per line.
///
/// Decoding stops at the first malformed instruction, which is reported as a comment line.
pub fn print_disassemble(code: impl AsRef<[u8]>, mut writer: impl io::Write) -> io::Result<()> {
    let mut reader = Cursor::new(code.as_ref());
    while !reader.is_eof() {
        let pos = reader.pos();
        write!(writer, "@x{pos:06X}: ")?;
        match Instr::decode(&mut reader) {
            Ok(instr) => writeln!(writer, "{instr}")?,
            Err(err) => {
                writeln!(writer, "; <{err}>")?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Marshaller;

    fn encoded(instr: &Instr) -> Vec<u8> {
        let mut marshaller = Marshaller::new();
        instr.encode(&mut marshaller);
        marshaller.into_bytes()
    }

    #[test]
    fn layouts() {
        assert_eq!(encoded(&Instr::Ret), vec![0x0B]);
        assert_eq!(encoded(&Instr::Single { op: Opcode::Push, reg: 3 }), vec![3, 3]);
        assert_eq!(encoded(&Instr::Pair { op: Opcode::Ctx, regs: [0, 1] }), vec![45, 0, 1]);
        assert_eq!(encoded(&Instr::Triple { op: Opcode::Put, regs: [1, 0, 2] }), vec![47, 1, 0, 2]);
        assert_eq!(encoded(&Instr::Call { regs: 2, pos: 0x0102 }), vec![6, 2, 0x02, 0x01]);
        assert_eq!(encoded(&Instr::JmpNot { reg: 5, pos: 0x0010 }), vec![10, 5, 0x10, 0x00]);
        assert_eq!(
            encoded(&Instr::Load { dst: 0, ty: VmType::String, data: b"gas".to_vec() }),
            vec![13, 0, 4, 3, b'g', b'a', b's']
        );
        assert_eq!(encoded(&Instr::Cast { src: 2, dst: 2, ty: VmType::None }), vec![14, 2, 2, 0]);
        assert_eq!(
            encoded(&Instr::Substr { src: 1, dst: 2, index: 3, len: 300 }),
            vec![16, 1, 2, 3, 0xFD, 0x2C, 0x01]
        );
    }

    #[test]
    fn decode_back() {
        let instrs = [
            Instr::Nop,
            Instr::Single { op: Opcode::Switch, reg: 1 },
            Instr::Pair { op: Opcode::Move, regs: [1, 2] },
            Instr::Triple { op: Opcode::Max, regs: [1, 2, 3] },
            Instr::Jmp { pos: 0xFFFF },
            Instr::Throw { data: vec![0xDE, 0xAD] },
            Instr::Load { dst: 7, ty: VmType::Bool, data: vec![1] },
            Instr::Left { src: 0, dst: 1, len: 4 },
            Instr::Ret,
        ];
        let mut marshaller = Marshaller::new();
        for instr in &instrs {
            instr.encode(&mut marshaller);
        }
        let decoded = disassemble(marshaller.as_slice()).unwrap();
        assert_eq!(decoded.into_iter().map(|(_, instr)| instr).collect::<Vec<_>>(), instrs);
    }

    #[test]
    fn offsets() {
        let code = [0x00, 0x08, 0x00, 0x00, 0x0B];
        let instrs = disassemble(code).unwrap();
        assert_eq!(instrs, vec![(0, Instr::Nop), (1, Instr::Jmp { pos: 0 }), (4, Instr::Ret)]);
    }

    #[test]
    fn malformed() {
        assert_eq!(disassemble([0x31]).unwrap_err(), DecodeError::InvalidTag(0x31));
        assert_eq!(
            disassemble([0x08, 0x01]).unwrap_err(),
            DecodeError::Truncated { requested: 2, remaining: 1 }
        );
        assert_eq!(disassemble([0x0D, 0x00, 0x09, 0x00]).unwrap_err(), DecodeError::InvalidTag(9));
    }

    #[test]
    fn display() {
        assert_eq!(Instr::Ret.to_string(), "ret");
        assert_eq!(Instr::Pair { op: Opcode::Ctx, regs: [0, 1] }.to_string(), "ctx     r0, r1");
        assert_eq!(Instr::Jmp { pos: 0x1A }.to_string(), "jmp     001a.h");
        assert_eq!(Instr::Call { regs: 4, pos: 0x1A }.to_string(), "call    001a.h, 4");
        assert_eq!(
            Instr::Load { dst: 0, ty: VmType::String, data: b"KCAL".to_vec() }.to_string(),
            "load    r0, \"KCAL\""
        );
        assert_eq!(
            Instr::Load { dst: 0, ty: VmType::Number, data: vec![0x10] }.to_string(),
            "load    r0, number:0x10"
        );
    }

    #[test]
    fn print() {
        let mut out = Vec::new();
        print_disassemble([0x03, 0x00, 0x0B, 0x08], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "@x000000: push    r0");
        assert_eq!(lines[1], "@x000002: ret");
        assert!(lines[2].starts_with("@x000003: ; <"));
        assert_eq!(lines.len(), 3);
    }
}
