//! Method bodies: locals, operations and protected regions.
//!
//! Operations are kept in a decoded form. An operand that names another graph entity (a type,
//! field or method token, or a local or parameter) is an [`Operand::Node`]; everything else is
//! an immediate value that the rewriter never touches.

use std::fmt;

use bitflags::bitflags;

use crate::metadata::node_id::NodeId;

bitflags! {
    /// Exception handler flags defining the type of exception handling clause.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ExceptionHandlerFlags: u16 {
        /// A typed exception clause, `exception_type` names the caught type
        const EXCEPTION = 0x0000;
        /// A filter clause, the filter block decides whether the handler runs
        const FILTER = 0x0001;
        /// A finally clause
        const FINALLY = 0x0002;
        /// A fault clause, a finally that only runs on exception
        const FAULT = 0x0004;
    }
}

/// A CIL opcode. Two-byte opcodes carry the `0xFE` prefix in the high byte.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OpCode(pub u16);

#[allow(missing_docs)]
impl OpCode {
    pub const NOP: OpCode = OpCode(0x00);
    pub const LDARG_0: OpCode = OpCode(0x02);
    pub const LDLOC_0: OpCode = OpCode(0x06);
    pub const STLOC_0: OpCode = OpCode(0x0A);
    pub const LDARG_S: OpCode = OpCode(0x0E);
    pub const STARG_S: OpCode = OpCode(0x10);
    pub const LDLOC_S: OpCode = OpCode(0x11);
    pub const STLOC_S: OpCode = OpCode(0x13);
    pub const LDNULL: OpCode = OpCode(0x14);
    pub const LDC_I4: OpCode = OpCode(0x20);
    pub const LDC_I8: OpCode = OpCode(0x21);
    pub const LDC_R8: OpCode = OpCode(0x23);
    pub const CALL: OpCode = OpCode(0x28);
    pub const RET: OpCode = OpCode(0x2A);
    pub const BR: OpCode = OpCode(0x38);
    pub const BRTRUE: OpCode = OpCode(0x3A);
    pub const SWITCH: OpCode = OpCode(0x45);
    pub const CALLVIRT: OpCode = OpCode(0x6F);
    pub const LDSTR: OpCode = OpCode(0x72);
    pub const NEWOBJ: OpCode = OpCode(0x73);
    pub const CASTCLASS: OpCode = OpCode(0x74);
    pub const ISINST: OpCode = OpCode(0x75);
    pub const LDFLD: OpCode = OpCode(0x7B);
    pub const LDFLDA: OpCode = OpCode(0x7C);
    pub const STFLD: OpCode = OpCode(0x7D);
    pub const LDSFLD: OpCode = OpCode(0x7E);
    pub const STSFLD: OpCode = OpCode(0x80);
    pub const BOX: OpCode = OpCode(0x8C);
    pub const NEWARR: OpCode = OpCode(0x8D);
    pub const LDTOKEN: OpCode = OpCode(0xD0);
    pub const LDFTN: OpCode = OpCode(0xFE06);
    pub const LDARG: OpCode = OpCode(0xFE09);
    pub const LDLOC: OpCode = OpCode(0xFE0C);
    pub const STLOC: OpCode = OpCode(0xFE0E);

    /// Returns the mnemonic for the opcodes known to this crate.
    #[must_use]
    pub fn mnemonic(&self) -> Option<&'static str> {
        Some(match *self {
            OpCode::NOP => "nop",
            OpCode::LDARG_0 => "ldarg.0",
            OpCode::LDLOC_0 => "ldloc.0",
            OpCode::STLOC_0 => "stloc.0",
            OpCode::LDARG_S => "ldarg.s",
            OpCode::STARG_S => "starg.s",
            OpCode::LDLOC_S => "ldloc.s",
            OpCode::STLOC_S => "stloc.s",
            OpCode::LDNULL => "ldnull",
            OpCode::LDC_I4 => "ldc.i4",
            OpCode::LDC_I8 => "ldc.i8",
            OpCode::LDC_R8 => "ldc.r8",
            OpCode::CALL => "call",
            OpCode::RET => "ret",
            OpCode::BR => "br",
            OpCode::BRTRUE => "brtrue",
            OpCode::SWITCH => "switch",
            OpCode::CALLVIRT => "callvirt",
            OpCode::LDSTR => "ldstr",
            OpCode::NEWOBJ => "newobj",
            OpCode::CASTCLASS => "castclass",
            OpCode::ISINST => "isinst",
            OpCode::LDFLD => "ldfld",
            OpCode::LDFLDA => "ldflda",
            OpCode::STFLD => "stfld",
            OpCode::LDSFLD => "ldsfld",
            OpCode::STSFLD => "stsfld",
            OpCode::BOX => "box",
            OpCode::NEWARR => "newarr",
            OpCode::LDTOKEN => "ldtoken",
            OpCode::LDFTN => "ldftn",
            OpCode::LDARG => "ldarg",
            OpCode::LDLOC => "ldloc",
            OpCode::STLOC => "stloc",
            _ => return None,
        })
    }
}

impl fmt::Debug for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => write!(f, "OpCode({name})"),
            None => write!(f, "OpCode(0x{:04x})", self.0),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04x}", self.0),
        }
    }
}

/// The decoded operand of an operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Operand {
    /// No operand
    #[default]
    None,
    /// 32-bit integer immediate
    Int32(i32),
    /// 64-bit integer immediate
    Int64(i64),
    /// 64-bit floating point immediate
    Float64(f64),
    /// String literal
    String(String),
    /// Branch target offset
    Target(u32),
    /// Switch target offsets
    Targets(Vec<u32>),
    /// A type, field, method, local or parameter
    Node(NodeId),
}

impl Operand {
    /// Returns the graph node carried by this operand, if any.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Operand::Node(id) => Some(*id),
            _ => None,
        }
    }
}

/// The IL body of a method.
#[derive(Clone, Debug, Default)]
pub struct MethodBody {
    /// The method owning the body
    pub method_definition: NodeId,
    /// Local variables, in slot order
    pub local_variables: Vec<NodeId>,
    /// Whether locals are zero initialized on entry
    pub locals_are_zero_initialized: bool,
    /// Maximum evaluation stack depth
    pub max_stack: u16,
    /// Operations, in offset order
    pub operations: Vec<NodeId>,
    /// Protected regions, innermost first
    pub exception_information: Vec<NodeId>,
}

/// A single IL operation.
#[derive(Clone, Debug, Default)]
pub struct Operation {
    /// Offset of the operation within the body
    pub offset: u32,
    /// Operation code
    pub opcode: OpCode,
    /// Decoded operand
    pub value: Operand,
}

/// A local variable of a method body.
#[derive(Clone, Debug, Default)]
pub struct LocalDefinition {
    /// Debug name, may be empty
    pub name: String,
    /// Slot index
    pub index: u16,
    /// Whether the local pins its referent
    pub is_pinned: bool,
    /// Whether the local holds a managed pointer
    pub is_reference: bool,
    /// Attached custom modifiers
    pub custom_modifiers: Vec<NodeId>,
    /// Local type
    pub local_type: NodeId,
    /// The method declaring the local
    pub method_definition: NodeId,
}

/// A protected region and its handler.
#[derive(Clone, Debug, Default)]
pub struct OperationExceptionInformation {
    /// Kind of handler
    pub handler_kind: ExceptionHandlerFlags,
    /// Caught type for typed handlers, the sentinel otherwise
    pub exception_type: NodeId,
    /// Start offset of the protected block
    pub try_start_offset: u32,
    /// End offset of the protected block
    pub try_end_offset: u32,
    /// Start offset of the filter block
    pub filter_decision_start_offset: u32,
    /// Start offset of the handler block
    pub handler_start_offset: u32,
    /// End offset of the handler block
    pub handler_end_offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_display() {
        assert_eq!(OpCode::CALL.to_string(), "call");
        assert_eq!(OpCode::LDLOC.to_string(), "ldloc");
        assert_eq!(OpCode(0xFE1F).to_string(), "0xfe1f");
        assert_eq!(format!("{:?}", OpCode::RET), "OpCode(ret)");
    }

    #[test]
    fn test_operand_node() {
        assert_eq!(Operand::Node(NodeId(3)).node(), Some(NodeId(3)));
        assert_eq!(Operand::Int32(3).node(), None);
        assert_eq!(Operand::default(), Operand::None);
    }

    #[test]
    fn test_handler_kinds() {
        let finally = ExceptionHandlerFlags::FINALLY;
        assert!(finally.contains(ExceptionHandlerFlags::FINALLY));
        assert_eq!(ExceptionHandlerFlags::default(), ExceptionHandlerFlags::EXCEPTION);
    }
}
