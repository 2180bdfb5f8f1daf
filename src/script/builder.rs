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

use std::collections::BTreeMap;

use super::constants::{MAX_JUMP_OFFSET, MAX_LOAD_LEN};
use super::{LoadValue, Timestamp};
use crate::codec::{self, latin1_bytes, EncodeError, Marshaller, WireWrite};
use crate::isa::{ArithmeticOp, Instr, Opcode, Reg, VmType, MAX_REGISTER_COUNT};

/// Two reserved bytes of a jump or call waiting for the address of their target label.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct PendingFixup {
    offset: usize,
    label: String,
}

/// Append-only bytecode assembler.
///
/// Instructions are written immediately; jumps and calls to labels reserve two bytes which are
/// filled with the label address once the script is finalized, allowing forward references.
/// Each label is placed right after the `nop` instruction emitted by [`Self::emit_label`].
///
/// Once any method returns an error the builder state is unspecified and the script must be
/// discarded (or the builder reset with [`Self::begin_script`]).
#[derive(Clone, Default, Debug)]
pub struct ScriptBuilder {
    writer: Marshaller,
    labels: BTreeMap<String, usize>,
    fixups: Vec<PendingFixup>,
}

impl ScriptBuilder {
    /// Creates builder for an empty script.
    #[inline]
    pub fn new() -> ScriptBuilder { ScriptBuilder::default() }

    /// Resets builder to an empty script, forgetting all labels and pending jumps.
    pub fn begin_script(&mut self) -> &mut Self {
        *self = ScriptBuilder::default();
        self
    }

    /// Current length of the script, which is also the offset of the next instruction.
    #[inline]
    pub fn offset(&self) -> usize { self.writer.len() }

    /// Address of a label, if it was already defined.
    #[inline]
    pub fn label_offset(&self, label: &str) -> Option<usize> { self.labels.get(label).copied() }

    /// Appends opcode followed by raw operand bytes.
    pub fn emit(&mut self, opcode: Opcode, operands: &[u8]) -> &mut Self {
        self.writer.write_byte(opcode.byte());
        self.writer.write_slice(operands);
        self
    }

    /// Appends a fully formed instruction.
    pub fn emit_instr(&mut self, instr: &Instr) -> &mut Self {
        instr.encode(&mut self.writer);
        self
    }

    #[inline]
    fn single(&mut self, op: Opcode, reg: Reg) -> &mut Self {
        self.emit_instr(&Instr::Single { op, reg })
    }

    #[inline]
    fn pair(&mut self, op: Opcode, src: Reg, dst: Reg) -> &mut Self {
        self.emit_instr(&Instr::Pair { op, regs: [src, dst] })
    }

    #[inline]
    fn triple(&mut self, op: Opcode, a: Reg, b: Reg, c: Reg) -> &mut Self {
        self.emit_instr(&Instr::Triple { op, regs: [a, b, c] })
    }

    pub fn emit_push(&mut self, reg: Reg) -> &mut Self { self.single(Opcode::Push, reg) }

    pub fn emit_pop(&mut self, reg: Reg) -> &mut Self { self.single(Opcode::Pop, reg) }

    pub fn emit_move(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Move, src, dst) }

    pub fn emit_copy(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Copy, src, dst) }

    pub fn emit_swap(&mut self, a: Reg, b: Reg) -> &mut Self { self.pair(Opcode::Swap, a, b) }

    pub fn emit_cast(&mut self, src: Reg, dst: Reg, ty: VmType) -> &mut Self {
        self.emit_instr(&Instr::Cast { src, dst, ty })
    }

    pub fn emit_cat(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Cat, src_a, src_b, dst)
    }

    /// Takes `len` leading bytes of the source.
    ///
    /// # Errors
    ///
    /// [`EncodeError::OutOfRange`] if `len` exceeds `0xFFFF`.
    pub fn emit_left(&mut self, src: Reg, dst: Reg, len: u64) -> Result<&mut Self, EncodeError> {
        check_u16(len)?;
        Ok(self.emit_instr(&Instr::Left { src, dst, len }))
    }

    /// Takes `len` trailing bytes of the source.
    ///
    /// # Errors
    ///
    /// [`EncodeError::OutOfRange`] if `len` exceeds `0xFFFF`.
    pub fn emit_right(&mut self, src: Reg, dst: Reg, len: u64) -> Result<&mut Self, EncodeError> {
        check_u16(len)?;
        Ok(self.emit_instr(&Instr::Right { src, dst, len }))
    }

    /// # Errors
    ///
    /// [`EncodeError::OutOfRange`] if `index` or `len` exceeds `0xFFFF`.
    pub fn emit_substr(
        &mut self,
        src: Reg,
        dst: Reg,
        index: u64,
        len: u64,
    ) -> Result<&mut Self, EncodeError> {
        check_u16(index)?;
        check_u16(len)?;
        Ok(self.emit_instr(&Instr::Substr { src, dst, index, len }))
    }

    pub fn emit_size(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Size, src, dst) }

    pub fn emit_count(&mut self, src: Reg, dst: Reg) -> &mut Self {
        self.pair(Opcode::Count, src, dst)
    }

    pub fn emit_not(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Not, src, dst) }

    pub fn emit_and(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::And, src_a, src_b, dst)
    }

    pub fn emit_or(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Or, src_a, src_b, dst)
    }

    pub fn emit_xor(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Xor, src_a, src_b, dst)
    }

    pub fn emit_equal(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Equal, src_a, src_b, dst)
    }

    pub fn emit_less_than(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Lt, src_a, src_b, dst)
    }

    pub fn emit_less_than_equal(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Lte, src_a, src_b, dst)
    }

    pub fn emit_greater_than(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Gt, src_a, src_b, dst)
    }

    pub fn emit_greater_than_equal(&mut self, src_a: Reg, src_b: Reg, dst: Reg) -> &mut Self {
        self.triple(Opcode::Gte, src_a, src_b, dst)
    }

    pub fn emit_inc(&mut self, reg: Reg) -> &mut Self { self.single(Opcode::Inc, reg) }

    pub fn emit_dec(&mut self, reg: Reg) -> &mut Self { self.single(Opcode::Dec, reg) }

    pub fn emit_sign(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Sign, src, dst) }

    pub fn emit_negate(&mut self, src: Reg, dst: Reg) -> &mut Self {
        self.pair(Opcode::Negate, src, dst)
    }

    pub fn emit_abs(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Abs, src, dst) }

    /// Emits binary arithmetic operation `dst = src_a <op> src_b`.
    pub fn emit_arithmetic(
        &mut self,
        op: ArithmeticOp,
        src_a: Reg,
        src_b: Reg,
        dst: Reg,
    ) -> &mut Self {
        self.triple(op.into(), src_a, src_b, dst)
    }

    /// Puts value of `src` into struct `dst` under the key held by `key`.
    pub fn emit_put(&mut self, src: Reg, dst: Reg, key: Reg) -> &mut Self {
        self.triple(Opcode::Put, src, dst, key)
    }

    /// Reads value under the key held by `key` from struct `src` into `dst`.
    pub fn emit_get(&mut self, src: Reg, dst: Reg, key: Reg) -> &mut Self {
        self.triple(Opcode::Get, src, dst, key)
    }

    pub fn emit_this(&mut self, dst: Reg) -> &mut Self { self.single(Opcode::This, dst) }

    pub fn emit_ctx(&mut self, src: Reg, dst: Reg) -> &mut Self { self.pair(Opcode::Ctx, src, dst) }

    pub fn emit_switch(&mut self, reg: Reg) -> &mut Self { self.single(Opcode::Switch, reg) }

    pub fn emit_throw(&mut self, data: &[u8]) -> &mut Self {
        self.writer.write_byte(Opcode::Throw.byte());
        self.writer.write_byte_array(data);
        self
    }

    /// Loads method name into `reg` and calls it as a runtime interop.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedCharacter`] if the method name is not representable.
    pub fn emit_ext_call(&mut self, method: &str, reg: Reg) -> Result<&mut Self, EncodeError> {
        self.emit_load(reg, method)?;
        Ok(self.single(Opcode::ExtCall, reg))
    }

    /// Loads a value into the register, choosing the type tag from the kind of value.
    ///
    /// Arrays are assembled in place as a struct: the register is cleared with a cast to
    /// [`VmType::None`], then each element is loaded into `reg + 1`, its index into `reg + 2`,
    /// and both are `put` into `reg`. The two following registers are overwritten.
    ///
    /// # Errors
    ///
    /// [`EncodeError::PayloadTooLarge`] if the value data exceeds 65535 bytes,
    /// [`EncodeError::UnsupportedCharacter`] for strings which can't be represented one byte per
    /// character and [`EncodeError::OutOfRange`] if an array doesn't fit into the register file.
    pub fn emit_load(
        &mut self,
        reg: Reg,
        value: impl Into<LoadValue>,
    ) -> Result<&mut Self, EncodeError> {
        match value.into() {
            LoadValue::String(s) | LoadValue::Number(s) => {
                let data = latin1_bytes(&s)?;
                self.emit_load_bytes(reg, &data, VmType::String)
            }
            LoadValue::Bool(b) => self.emit_load_bytes(reg, &[b as u8], VmType::Bool),
            LoadValue::Timestamp(t) => self.emit_load_timestamp(reg, t),
            LoadValue::Bytes(data) => self.emit_load_bytes(reg, &data, VmType::Bytes),
            LoadValue::Enum(e) => self.emit_load_enum(reg, e),
            LoadValue::Array(items) => self.emit_load_array(reg, items),
        }
    }

    fn emit_load_array(&mut self, reg: Reg, items: Vec<LoadValue>) -> Result<&mut Self, EncodeError> {
        let key_reg = reg
            .checked_add(2)
            .filter(|r| *r < MAX_REGISTER_COUNT)
            .ok_or(EncodeError::OutOfRange(reg as u64 + 2, MAX_REGISTER_COUNT as u64 - 1))?;
        let val_reg = reg + 1;
        self.emit_cast(reg, reg, VmType::None);
        for (index, item) in items.into_iter().enumerate() {
            self.emit_load(val_reg, item)?;
            self.emit_load(key_reg, index)?;
            self.emit_put(val_reg, reg, key_reg);
        }
        Ok(self)
    }

    /// Loads raw data tagged with the given type.
    ///
    /// # Errors
    ///
    /// [`EncodeError::PayloadTooLarge`] if data exceed 65535 bytes; nothing is written then.
    pub fn emit_load_bytes(
        &mut self,
        reg: Reg,
        data: &[u8],
        ty: VmType,
    ) -> Result<&mut Self, EncodeError> {
        if data.len() > MAX_LOAD_LEN {
            return Err(EncodeError::PayloadTooLarge(data.len()));
        }
        self.writer.write_byte(Opcode::Load.byte());
        self.writer.write_byte(reg);
        self.writer.write_byte(ty.byte());
        self.writer.write_byte_array(data);
        Ok(self)
    }

    /// Loads enumeration value as 4 bytes little-endian.
    pub fn emit_load_enum(&mut self, reg: Reg, value: u32) -> Result<&mut Self, EncodeError> {
        self.emit_load_bytes(reg, &value.to_le_bytes(), VmType::Enum)
    }

    /// Loads timestamp as 4 bytes little-endian.
    pub fn emit_load_timestamp(
        &mut self,
        reg: Reg,
        time: Timestamp,
    ) -> Result<&mut Self, EncodeError> {
        self.emit_load_bytes(reg, &time.to_le_bytes(), VmType::Timestamp)
    }

    /// Emits `nop` and binds the label to the offset right after it.
    ///
    /// Defining the same label again moves it: the last definition wins.
    pub fn emit_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.emit(Opcode::Nop, &[]);
        self.labels.insert(label.into(), self.writer.len());
        self
    }

    fn reserve_address(&mut self, label: impl Into<String>) {
        self.fixups.push(PendingFixup {
            offset: self.writer.len(),
            label: label.into(),
        });
        self.writer.write_u16(0);
    }

    /// Emits a jump to a label. The register is used only by the conditional jumps.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidJumpOpcode`] unless `opcode` is `jmp`, `jmpif` or `jmpnot`.
    pub fn emit_jump(
        &mut self,
        opcode: Opcode,
        label: impl Into<String>,
        reg: Reg,
    ) -> Result<&mut Self, EncodeError> {
        if !opcode.is_jump() {
            return Err(EncodeError::InvalidJumpOpcode(opcode));
        }
        self.writer.write_byte(opcode.byte());
        if opcode != Opcode::Jmp {
            self.writer.write_byte(reg);
        }
        self.reserve_address(label);
        Ok(self)
    }

    /// Emits a conditional jump to a label.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidJumpOpcode`] unless `opcode` is `jmpif` or `jmpnot`.
    pub fn emit_conditional_jump(
        &mut self,
        opcode: Opcode,
        reg: Reg,
        label: impl Into<String>,
    ) -> Result<&mut Self, EncodeError> {
        if !matches!(opcode, Opcode::JmpIf | Opcode::JmpNot) {
            return Err(EncodeError::InvalidJumpOpcode(opcode));
        }
        self.emit_jump(opcode, label, reg)
    }

    /// Emits a subroutine call to a label, passing `reg_count` registers to the callee.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidRegisterCount`] unless `reg_count` is within `1..=32`.
    pub fn emit_call(
        &mut self,
        label: impl Into<String>,
        reg_count: u8,
    ) -> Result<&mut Self, EncodeError> {
        if !(1..=MAX_REGISTER_COUNT).contains(&reg_count) {
            return Err(EncodeError::InvalidRegisterCount(reg_count));
        }
        self.emit(Opcode::Call, &[reg_count]);
        self.reserve_address(label);
        Ok(self)
    }

    /// Appends a bare VarInt.
    pub fn emit_var_bytes(&mut self, value: u64) -> &mut Self {
        self.writer.write_var_int(value);
        self
    }

    /// Appends raw bytes.
    pub fn emit_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.writer.write_slice(bytes);
        self
    }

    /// Appends bytes given as a hex string, e.g. a previously assembled script fragment.
    ///
    /// # Errors
    ///
    /// [`EncodeError::MalformedScript`] if the string is not a valid hex.
    pub fn append_hex(&mut self, hex: &str) -> Result<&mut Self, EncodeError> {
        let bytes = codec::from_hex(hex).map_err(|_| EncodeError::MalformedScript)?;
        Ok(self.emit_raw(&bytes))
    }

    /// Returns the script assembled so far with all jump addresses resolved, without adding
    /// the final `ret`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UndefinedLabel`] if some jump targets a label which was never emitted and
    /// [`EncodeError::OutOfRange`] if a label lies beyond the 16-bit address space.
    pub fn to_script(&self) -> Result<Vec<u8>, EncodeError> {
        let mut script = self.writer.clone();
        for fixup in &self.fixups {
            let target = *self
                .labels
                .get(&fixup.label)
                .ok_or_else(|| EncodeError::UndefinedLabel(fixup.label.clone()))?;
            if target > MAX_JUMP_OFFSET {
                return Err(EncodeError::OutOfRange(target as u64, MAX_JUMP_OFFSET as u64));
            }
            let patched = script.patch_u16(fixup.offset, target as u16);
            debug_assert!(patched, "jump address reserved outside of the script");
        }
        Ok(script.into_bytes())
    }

    /// Terminates the script with `ret` and returns resolved bytecode.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_script`].
    pub fn end_script_bytes(&mut self) -> Result<Vec<u8>, EncodeError> {
        self.emit(Opcode::Ret, &[]);
        let script = self.to_script()?;
        #[cfg(feature = "log")]
        log::debug!(
            "script finalized: {} bytes, {} label(s), {} jump(s) resolved",
            script.len(),
            self.labels.len(),
            self.fixups.len()
        );
        Ok(script)
    }

    /// Terminates the script with `ret` and returns resolved bytecode as an uppercase hex string.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_script`].
    pub fn end_script(&mut self) -> Result<String, EncodeError> {
        self.end_script_bytes().map(|script| codec::to_hex_upper(script))
    }
}

fn check_u16(value: u64) -> Result<(), EncodeError> {
    if value > u16::MAX as u64 {
        return Err(EncodeError::OutOfRange(value, u16::MAX as u64));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::disassemble;

    #[test]
    fn registers() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push(1).emit_pop(2).emit_move(3, 4).emit_copy(5, 6);
        assert_eq!(builder.to_script().unwrap(), vec![3, 1, 4, 2, 1, 3, 4, 2, 5, 6]);
    }

    #[test]
    fn load_kinds() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_load(0, "gas")
            .unwrap()
            .emit_load(1, true)
            .unwrap()
            .emit_load(2, 100_000u32)
            .unwrap()
            .emit_load(3, Timestamp::from_secs(0x01020304))
            .unwrap()
            .emit_load(4, vec![0xAAu8])
            .unwrap()
            .emit_load_enum(5, 0x0A0B)
            .unwrap();
        let script = builder.to_script().unwrap();
        let expected = [
            &[13, 0, 4, 3, b'g', b'a', b's'][..],
            &[13, 1, 6, 1, 1],
            &[13, 2, 4, 6, b'1', b'0', b'0', b'0', b'0', b'0'],
            &[13, 3, 5, 4, 4, 3, 2, 1],
            &[13, 4, 2, 1, 0xAA],
            &[13, 5, 7, 4, 0x0B, 0x0A, 0, 0],
        ]
        .concat();
        assert_eq!(script, expected);
    }

    #[test]
    fn load_limits() {
        let mut builder = ScriptBuilder::new();
        assert!(builder.emit_load_bytes(0, &vec![0u8; 0xFFFF], VmType::Bytes).is_ok());
        assert_eq!(builder.offset(), 6 + 0xFFFF);
        let len = builder.offset();
        assert_eq!(
            builder.emit_load_bytes(0, &vec![0u8; 0x10000], VmType::Bytes).unwrap_err(),
            EncodeError::PayloadTooLarge(0x10000)
        );
        assert_eq!(builder.offset(), len);
        assert_eq!(
            builder.emit_load(0, "€").unwrap_err(),
            EncodeError::UnsupportedCharacter('€')
        );
    }

    #[test]
    fn load_array() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_load(4, vec![LoadValue::from("a"), LoadValue::from(false)])
            .unwrap();
        let instrs = disassemble(builder.to_script().unwrap())
            .unwrap()
            .into_iter()
            .map(|(_, instr)| instr)
            .collect::<Vec<_>>();
        assert_eq!(instrs, vec![
            Instr::Cast { src: 4, dst: 4, ty: VmType::None },
            Instr::Load { dst: 5, ty: VmType::String, data: b"a".to_vec() },
            Instr::Load { dst: 6, ty: VmType::String, data: b"0".to_vec() },
            Instr::Triple { op: Opcode::Put, regs: [5, 4, 6] },
            Instr::Load { dst: 5, ty: VmType::Bool, data: vec![0] },
            Instr::Load { dst: 6, ty: VmType::String, data: b"1".to_vec() },
            Instr::Triple { op: Opcode::Put, regs: [5, 4, 6] },
        ]);

        assert_eq!(
            ScriptBuilder::new().emit_load(30, Vec::<LoadValue>::new()).unwrap_err(),
            EncodeError::OutOfRange(32, 31)
        );
    }

    #[test]
    fn forward_jump() {
        let mut builder = ScriptBuilder::new();
        builder.emit_jump(Opcode::Jmp, "end", 0).unwrap();
        builder.emit_push(0);
        builder.emit_label("end");
        let script = builder.end_script_bytes().unwrap();
        // jmp 0006 | push r0 | nop | ret
        assert_eq!(script, vec![8, 6, 0, 3, 0, 0, 11]);
        assert_eq!(builder.label_offset("end"), Some(6));
    }

    #[test]
    fn backward_jumps_and_calls() {
        let mut builder = ScriptBuilder::new();
        builder.emit_label("loop");
        builder.emit_conditional_jump(Opcode::JmpNot, 2, "loop").unwrap();
        builder.emit_call("loop", 3).unwrap();
        let script = builder.to_script().unwrap();
        assert_eq!(script, vec![0, 10, 2, 1, 0, 6, 3, 1, 0]);
    }

    #[test]
    fn duplicate_label_last_wins() {
        let mut builder = ScriptBuilder::new();
        builder.emit_label("x");
        builder.emit_jump(Opcode::Jmp, "x", 0).unwrap();
        builder.emit_label("x");
        let script = builder.to_script().unwrap();
        assert_eq!(&script[2..4], &[5, 0]);
    }

    #[test]
    fn jump_errors() {
        let mut builder = ScriptBuilder::new();
        assert_eq!(
            builder.emit_jump(Opcode::Call, "a", 0).unwrap_err(),
            EncodeError::InvalidJumpOpcode(Opcode::Call)
        );
        assert_eq!(
            builder.emit_conditional_jump(Opcode::Jmp, 0, "a").unwrap_err(),
            EncodeError::InvalidJumpOpcode(Opcode::Jmp)
        );
        assert_eq!(
            builder.emit_call("a", 0).unwrap_err(),
            EncodeError::InvalidRegisterCount(0)
        );
        assert_eq!(
            builder.emit_call("a", 33).unwrap_err(),
            EncodeError::InvalidRegisterCount(33)
        );
        assert_eq!(builder.offset(), 0);

        builder.emit_jump(Opcode::JmpIf, "nowhere", 1).unwrap();
        assert_eq!(builder.end_script().unwrap_err(), EncodeError::UndefinedLabel(s!("nowhere")));
    }

    #[test]
    fn label_out_of_range() {
        let mut builder = ScriptBuilder::new();
        builder.emit_jump(Opcode::Jmp, "far", 0).unwrap();
        builder.emit_raw(&vec![0u8; 0xFFFF]);
        builder.emit_label("far");
        assert_eq!(
            builder.to_script().unwrap_err(),
            EncodeError::OutOfRange(0x10003, 0xFFFF)
        );
    }

    #[test]
    fn operand_helpers() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_cat(1, 2, 3)
            .emit_arithmetic(ArithmeticOp::Mod, 1, 2, 3)
            .emit_get(1, 2, 3)
            .emit_this(4)
            .emit_throw(b"no")
            .emit_var_bytes(0x1234)
            .append_hex("0b")
            .unwrap();
        builder.emit_substr(1, 2, 3, 4).unwrap();
        assert_eq!(
            builder.emit_left(0, 1, 0x10000).unwrap_err(),
            EncodeError::OutOfRange(0x10000, 0xFFFF)
        );
        assert_eq!(
            builder.emit_substr(0, 1, 0x10000, 0).unwrap_err(),
            EncodeError::OutOfRange(0x10000, 0xFFFF)
        );
        assert_eq!(builder.append_hex("0").unwrap_err(), EncodeError::MalformedScript);
        assert_eq!(
            codec::to_hex_upper(builder.to_script().unwrap()),
            "0F010203270102033001020\
             32C040C026E6FFD34120B1001020304"
        );
    }

    #[test]
    fn reset() {
        let mut builder = ScriptBuilder::new();
        builder.emit_label("a").emit_push(1);
        builder.emit_jump(Opcode::Jmp, "b", 0).unwrap();
        builder.begin_script();
        assert_eq!(builder.end_script().unwrap(), "0B");
        assert_eq!(builder.label_offset("a"), None);
    }

    #[test]
    fn deterministic() {
        let build = || {
            let mut builder = ScriptBuilder::new();
            builder.emit_label("start").emit_load(0, "x").unwrap();
            builder.emit_jump(Opcode::Jmp, "start", 0).unwrap();
            builder.end_script().unwrap()
        };
        assert_eq!(build(), build());
    }
}
