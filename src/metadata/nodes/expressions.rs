//! Metadata expressions: the constant sub-language of custom attributes and default values.

use std::fmt;

use crate::metadata::node_id::NodeId;

/// The value of a compile time constant.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConstantValue {
    /// Null reference
    #[default]
    Null,
    /// Boolean
    Boolean(bool),
    /// UTF-16 code unit
    Char(u16),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// String
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => f.write_str("null"),
            ConstantValue::Boolean(v) => write!(f, "{v}"),
            ConstantValue::Char(v) => write!(f, "'\\u{v:04x}'"),
            ConstantValue::I1(v) => write!(f, "{v}"),
            ConstantValue::U1(v) => write!(f, "{v}"),
            ConstantValue::I2(v) => write!(f, "{v}"),
            ConstantValue::U2(v) => write!(f, "{v}"),
            ConstantValue::I4(v) => write!(f, "{v}"),
            ConstantValue::U4(v) => write!(f, "{v}"),
            ConstantValue::I8(v) => write!(f, "{v}"),
            ConstantValue::U8(v) => write!(f, "{v}"),
            ConstantValue::R4(v) => write!(f, "{v}"),
            ConstantValue::R8(v) => write!(f, "{v}"),
            ConstantValue::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// A compile time constant.
#[derive(Clone, Debug, Default)]
pub struct MetadataConstant {
    /// The value
    pub value: ConstantValue,
    /// Type of the value
    pub constant_type: NodeId,
}

/// An array built from constant initializers.
#[derive(Clone, Debug, Default)]
pub struct MetadataCreateArray {
    /// Element type
    pub element_type: NodeId,
    /// Initializer expressions
    pub initializers: Vec<NodeId>,
    /// Number of dimensions
    pub rank: u32,
    /// Dimension sizes
    pub sizes: Vec<u64>,
    /// Dimension lower bounds
    pub lower_bounds: Vec<i64>,
    /// Type of the array itself
    pub array_type: NodeId,
}

/// A `typeof(T)` expression.
#[derive(Clone, Debug, Default)]
pub struct MetadataTypeOf {
    /// The type whose runtime handle is taken
    pub type_to_get: NodeId,
    /// Type of the expression (`System.Type`)
    pub expression_type: NodeId,
}

/// A named field or property assignment of a custom attribute.
#[derive(Clone, Debug, Default)]
pub struct MetadataNamedArgument {
    /// Name of the assigned field or property
    pub argument_name: String,
    /// Whether a field (rather than a property) is assigned
    pub is_field: bool,
    /// Assigned value
    pub argument_value: NodeId,
    /// Type of the assigned member
    pub argument_type: NodeId,
}
