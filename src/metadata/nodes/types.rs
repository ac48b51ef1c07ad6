//! Type definitions and the type reference constructions.
//!
//! Namespace and nested type references are *nominal*: they name a type by its container and
//! name. Every other reference here is a *structural* construction over other type references
//! (arrays, pointers, function pointers, modified types, generic instances) and is fully
//! determined by its children.

use bitflags::bitflags;

use crate::metadata::node_id::NodeId;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Type definition attributes, ECMA-335 II.23.1.15 values
    pub struct TypeDefinitionFlags: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type can not be derived from
        const SEALED = 0x0000_0100;
        /// Name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0000_0800;
        /// Type is imported
        const IMPORT = 0x0000_1000;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
        /// Type has declarative security attached
        const HAS_SECURITY = 0x0004_0000;
        /// Type initializer may run before first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Generic parameter attributes, ECMA-335 II.23.1.7 values
    pub struct GenericParameterFlags: u16 {
        /// Parameter is covariant
        const COVARIANT = 0x0001;
        /// Parameter is contravariant
        const CONTRAVARIANT = 0x0002;
        /// Parameter must be a reference type
        const REFERENCE_TYPE_CONSTRAINT = 0x0004;
        /// Parameter must be a non-nullable value type
        const VALUE_TYPE_CONSTRAINT = 0x0008;
        /// Parameter must have a public default constructor
        const DEFAULT_CONSTRUCTOR_CONSTRAINT = 0x0010;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Calling convention bits of a method or function pointer signature
    pub struct CallingConvention: u8 {
        /// Variable argument list
        const VARARG = 0x05;
        /// Signature declares generic parameters
        const GENERIC = 0x10;
        /// Signature has an implicit `this`
        const HAS_THIS = 0x20;
        /// `this` is passed explicitly as the first parameter
        const EXPLICIT_THIS = 0x40;
    }
}

/// Slots shared by namespace-level and nested type definitions.
#[derive(Clone, Debug, Default)]
pub struct TypeDefinitionCore {
    /// Simple name, including generic arity suffix
    pub name: String,
    /// Type attributes
    pub flags: TypeDefinitionFlags,
    /// Whether this is a value type
    pub is_value_type: bool,
    /// Whether this is an enumeration
    pub is_enum: bool,
    /// Custom attributes
    pub attributes: Vec<NodeId>,
    /// Base class, at most one entry
    pub base_classes: Vec<NodeId>,
    /// Explicit method implementations
    pub explicit_implementation_overrides: Vec<NodeId>,
    /// Declared generic parameters
    pub generic_parameters: Vec<NodeId>,
    /// Implemented interfaces
    pub interfaces: Vec<NodeId>,
    /// Declared events
    pub events: Vec<NodeId>,
    /// Declared fields
    pub fields: Vec<NodeId>,
    /// Declared methods
    pub methods: Vec<NodeId>,
    /// Declared nested types
    pub nested_types: Vec<NodeId>,
    /// Declared properties
    pub properties: Vec<NodeId>,
    /// Declarative security attributes
    pub security_attributes: Vec<NodeId>,
    /// Underlying integral type of an enumeration
    pub underlying_type: NodeId,
    /// Compiler generated helper members not listed among the regular members
    pub private_helper_members: Vec<NodeId>,
}

impl TypeDefinitionCore {
    /// Returns `true` if declarative security is attached.
    #[must_use]
    pub fn has_declarative_security(&self) -> bool {
        self.flags.contains(TypeDefinitionFlags::HAS_SECURITY)
    }

    /// Returns `true` if the type declares generic parameters.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}

/// A type declared directly in a namespace.
#[derive(Clone, Debug, Default)]
pub struct NamespaceTypeDefinition {
    /// Type slots
    pub definition: TypeDefinitionCore,
    /// Declaring namespace
    pub containing_namespace: NodeId,
}

/// A type declared within another type.
#[derive(Clone, Debug, Default)]
pub struct NestedTypeDefinition {
    /// Type slots
    pub definition: TypeDefinitionCore,
    /// Enclosing type definition
    pub containing_type: NodeId,
}

/// Slots shared by type and method generic parameters.
#[derive(Clone, Debug, Default)]
pub struct GenericParameterCore {
    /// Parameter name
    pub name: String,
    /// Zero-based position
    pub index: u16,
    /// Variance and constraint flags
    pub flags: GenericParameterFlags,
    /// Custom attributes
    pub attributes: Vec<NodeId>,
    /// Type constraints
    pub constraints: Vec<NodeId>,
}

/// A generic parameter declared by a type.
#[derive(Clone, Debug, Default)]
pub struct GenericTypeParameter {
    /// Parameter slots
    pub parameter: GenericParameterCore,
    /// Declaring type
    pub defining_type: NodeId,
}

/// A generic parameter declared by a method.
#[derive(Clone, Debug, Default)]
pub struct GenericMethodParameter {
    /// Parameter slots
    pub parameter: GenericParameterCore,
    /// Declaring method
    pub defining_method: NodeId,
}

/// Reference to a namespace-level type.
#[derive(Clone, Debug, Default)]
pub struct NamespaceTypeReference {
    /// Simple name
    pub name: String,
    /// Number of generic parameters of the referenced type
    pub generic_parameter_count: u16,
    /// Whether the referenced type is a value type
    pub is_value_type: bool,
    /// Namespace (definition or reference) of the referenced type
    pub containing_namespace: NodeId,
}

/// Reference to a nested type.
#[derive(Clone, Debug, Default)]
pub struct NestedTypeReference {
    /// Simple name
    pub name: String,
    /// Number of generic parameters of the referenced type
    pub generic_parameter_count: u16,
    /// Enclosing type reference
    pub containing_type: NodeId,
}

/// A nested type seen through a generic instance of its enclosing type.
#[derive(Clone, Debug, Default)]
pub struct SpecializedNestedTypeReference {
    /// Nested reference slots; `containing_type` is the generic instance
    pub reference: NestedTypeReference,
    /// The nested type of the generic original
    pub unspecialized_version: NodeId,
}

/// Reference to a type's generic parameter by position.
#[derive(Clone, Debug, Default)]
pub struct GenericTypeParameterReference {
    /// Parameter name
    pub name: String,
    /// Zero-based position
    pub index: u16,
    /// The type declaring the parameter
    pub defining_type: NodeId,
}

/// Reference to a method's generic parameter by position.
#[derive(Clone, Debug, Default)]
pub struct GenericMethodParameterReference {
    /// Parameter name
    pub name: String,
    /// Zero-based position
    pub index: u16,
    /// The method declaring the parameter
    pub defining_method: NodeId,
}

/// A generic type applied to type arguments.
#[derive(Clone, Debug, Default)]
pub struct GenericTypeInstanceReference {
    /// The generic type being instantiated
    pub generic_type: NodeId,
    /// Type arguments, in parameter order
    pub generic_arguments: Vec<NodeId>,
}

/// A single-dimensional zero-based array.
#[derive(Clone, Debug, Default)]
pub struct VectorTypeReference {
    /// Element type
    pub element_type: NodeId,
}

/// A multi-dimensional array.
#[derive(Clone, Debug, Default)]
pub struct MatrixTypeReference {
    /// Element type
    pub element_type: NodeId,
    /// Number of dimensions
    pub rank: u32,
    /// Declared dimension sizes
    pub sizes: Vec<u64>,
    /// Declared lower bounds
    pub lower_bounds: Vec<i64>,
}

/// An unmanaged pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerTypeReference {
    /// Pointee type
    pub target_type: NodeId,
}

/// A managed pointer.
#[derive(Clone, Debug, Default)]
pub struct ManagedPointerTypeReference {
    /// Pointee type
    pub target_type: NodeId,
}

/// A function pointer signature.
#[derive(Clone, Debug, Default)]
pub struct FunctionPointerTypeReference {
    /// Calling convention
    pub calling_convention: CallingConvention,
    /// Parameter type informations
    pub parameters: Vec<NodeId>,
    /// Extra argument types passed through a vararg call site
    pub extra_argument_types: Vec<NodeId>,
    /// Custom modifiers of the return value
    pub return_value_custom_modifiers: Vec<NodeId>,
    /// Whether the return value is returned by reference
    pub return_value_is_by_ref: bool,
    /// Return type
    pub return_type: NodeId,
}

/// A type with custom modifiers attached.
#[derive(Clone, Debug, Default)]
pub struct ModifiedTypeReference {
    /// Attached modifiers
    pub custom_modifiers: Vec<NodeId>,
    /// The type without modifiers
    pub unmodified_type: NodeId,
}
