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

/// Macro assembler producing finalized bytecode from mnemonic statements.
///
/// Evaluates to `Result<Vec<u8>, EncodeError>`; a trailing `ret` is always appended.
///
/// # Example
///
/// ```
/// use vmscript::vmasm;
///
/// let code = vmasm! {
///     load    0, "hello";
///     label   again;
///     push    0;
///     jmpif   1, again;
///     interop "Runtime.Log", "done";
///     contract "gas", "SpendGas", "P2K";
/// }
/// .unwrap();
/// assert_eq!(code.last(), Some(&0x0B));
/// ```
#[macro_export]
macro_rules! vmasm {
    ($( $tt:tt )+) => {{
        let mut builder = $crate::ScriptBuilder::new();
        #[allow(clippy::redundant_closure_call)]
        let result = (|| -> ::core::result::Result<::std::vec::Vec<u8>, $crate::EncodeError> {
            $crate::vmasm_inner! { builder => $( $tt )+ }
            builder.end_script_bytes()
        })();
        result
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! vmasm_inner {
    // end of program
    { $b:ident => } => { };
    // no operands
    { $b:ident => nop ; $($tt:tt)* } => {
        $b.emit($crate::Opcode::Nop, &[]);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => ret ; $($tt:tt)* } => {
        $b.emit($crate::Opcode::Ret, &[]);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    // stack
    { $b:ident => push $reg:literal ; $($tt:tt)* } => {
        $b.emit_push($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => pop $reg:literal ; $($tt:tt)* } => {
        $b.emit_pop($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    // registers
    { $b:ident => mov $src:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_move($src, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => cpy $src:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_copy($src, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => swap $a:literal, $b2:literal ; $($tt:tt)* } => {
        $b.emit_swap($a, $b2);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => inc $reg:literal ; $($tt:tt)* } => {
        $b.emit_inc($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => dec $reg:literal ; $($tt:tt)* } => {
        $b.emit_dec($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => this $reg:literal ; $($tt:tt)* } => {
        $b.emit_this($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => eq $src1:literal, $src2:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_equal($src1, $src2, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => add $src1:literal, $src2:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_arithmetic($crate::isa::ArithmeticOp::Add, $src1, $src2, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => sub $src1:literal, $src2:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_arithmetic($crate::isa::ArithmeticOp::Sub, $src1, $src2, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => put $src:literal, $dst:literal, $key:literal ; $($tt:tt)* } => {
        $b.emit_put($src, $dst, $key);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    // data
    { $b:ident => load $reg:literal, $val:expr ; $($tt:tt)* } => {
        $b.emit_load($reg, $val)?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    // control flow
    { $b:ident => label $name:ident ; $($tt:tt)* } => {
        $b.emit_label(stringify!($name));
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => jmp $name:ident ; $($tt:tt)* } => {
        $b.emit_jump($crate::Opcode::Jmp, stringify!($name), 0)?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => jmpif $reg:literal, $name:ident ; $($tt:tt)* } => {
        $b.emit_conditional_jump($crate::Opcode::JmpIf, $reg, stringify!($name))?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => jmpnot $reg:literal, $name:ident ; $($tt:tt)* } => {
        $b.emit_conditional_jump($crate::Opcode::JmpNot, $reg, stringify!($name))?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => call $name:ident, $regs:literal ; $($tt:tt)* } => {
        $b.emit_call(stringify!($name), $regs)?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    // contexts and calls
    { $b:ident => ctx $src:literal, $dst:literal ; $($tt:tt)* } => {
        $b.emit_ctx($src, $dst);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => switch $reg:literal ; $($tt:tt)* } => {
        $b.emit_switch($reg);
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => extcall $method:literal ; $($tt:tt)* } => {
        $b.emit_ext_call($method, 0)?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => interop $method:literal $(, $arg:expr)* ; $($tt:tt)* } => {
        $b.call_interop($method, &[$( $crate::LoadValue::from($arg) ),*])?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
    { $b:ident => contract $name:literal, $method:literal $(, $arg:expr)* ; $($tt:tt)* } => {
        $b.call_contract($name, $method, &[$( $crate::LoadValue::from($arg) ),*])?;
        $crate::vmasm_inner! { $b => $( $tt )* }
    };
}
