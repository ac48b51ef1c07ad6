//! The closed catalog of metadata graph node kinds.
//!
//! [`NodeKind`] enumerates every concrete kind that can appear in a
//! [`crate::metadata::graph::MetadataGraph`]. Kinds fall into two families:
//!
//! - **Definitions** own the full description of an entity (attributes, members, bodies).
//! - **References** point at a definition, possibly in another unit, without carrying it.
//!
//! Some definitions double as references: a namespace type definition is a perfectly valid
//! value for a field's type slot. The dispatcher therefore never asks "what is this node?"
//! in isolation but "what is this node *as a member of category X*?". Each broad category
//! has its own classification enum and a total function from [`NodeKind`] to
//! `Option<Category>`:
//!
//! | Category | Classifier |
//! |----------|------------|
//! | Type reference | [`NodeKind::as_type_reference`] |
//! | Field reference | [`NodeKind::as_field_reference`] |
//! | Method reference | [`NodeKind::as_method_reference`] |
//! | Namespace member | [`NodeKind::as_namespace_member`] |
//! | Type member | [`NodeKind::as_type_member`] |
//! | Unit namespace reference | [`NodeKind::as_unit_namespace_reference`] |
//! | Unit reference | [`NodeKind::as_unit_reference`] |
//! | Metadata expression | [`NodeKind::as_expression`] |
//! | Operation operand | [`NodeKind::as_operand`] |
//! | Signature | [`NodeKind::as_signature`] |
//!
//! All classifiers are exhaustive matches, so a kind added to the catalog without being
//! classified is a compile error instead of a silent dispatch hole.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Every concrete node kind of the metadata graph.
///
/// The discriminant of a node is fixed at construction and is the only input to dispatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount, IntoStaticStr)]
pub enum NodeKind {
    /// Sentinel standing in for absent or unresolved slots
    Dummy,

    // Units
    /// An assembly: a module carrying a manifest
    Assembly,
    /// A module that is not an assembly manifest
    Module,
    /// A reference to another assembly
    AssemblyReference,
    /// A reference to another module
    ModuleReference,

    // Namespaces
    /// The root namespace of a unit
    RootNamespace,
    /// A namespace nested within another namespace
    NestedNamespace,
    /// A reference to the root namespace of another unit
    RootNamespaceReference,
    /// A reference to a nested namespace of another unit
    NestedNamespaceReference,
    /// An exported type forwarded from a namespace
    NamespaceAliasForType,
    /// An exported type nested within another exported type
    NestedAliasForType,

    // Type definitions
    /// A type declared directly in a namespace
    NamespaceTypeDefinition,
    /// A type declared within another type
    NestedTypeDefinition,
    /// A generic parameter declared by a type
    GenericTypeParameter,
    /// A generic parameter declared by a method
    GenericMethodParameter,

    // Type references
    /// A reference to a namespace-level type
    NamespaceTypeReference,
    /// A reference to a nested type
    NestedTypeReference,
    /// A nested type of a generic instance, viewed under its substitution
    SpecializedNestedTypeReference,
    /// A reference to a type's generic parameter by position
    GenericTypeParameterReference,
    /// A reference to a method's generic parameter by position
    GenericMethodParameterReference,
    /// A generic type applied to type arguments
    GenericTypeInstanceReference,
    /// A single-dimensional zero-based array
    VectorTypeReference,
    /// A multi-dimensional array
    MatrixTypeReference,
    /// An unmanaged pointer
    PointerTypeReference,
    /// A managed (by-ref) pointer
    ManagedPointerTypeReference,
    /// A function pointer signature
    FunctionPointerTypeReference,
    /// A type with custom modifiers attached
    ModifiedTypeReference,

    // Members
    /// A field declared by a type
    FieldDefinition,
    /// A field declared at namespace level
    GlobalFieldDefinition,
    /// A field of a generic instance, viewed under its substitution
    SpecializedFieldDefinition,
    /// A reference to a field
    FieldReference,
    /// A field reference through a generic instance
    SpecializedFieldReference,
    /// A method declared by a type
    MethodDefinition,
    /// A method declared at namespace level
    GlobalMethodDefinition,
    /// A method of a generic instance, viewed under its substitution
    SpecializedMethodDefinition,
    /// A reference to a method
    MethodReference,
    /// A method reference through a generic instance
    SpecializedMethodReference,
    /// A generic method applied to type arguments
    GenericMethodInstanceReference,
    /// A property declared by a type
    PropertyDefinition,
    /// A property of a generic instance, viewed under its substitution
    SpecializedPropertyDefinition,
    /// An event declared by a type
    EventDefinition,
    /// An event of a generic instance, viewed under its substitution
    SpecializedEventDefinition,
    /// A parameter of a method or property definition
    ParameterDefinition,
    /// A parameter of a method reference or function pointer signature
    ParameterTypeInformation,
    /// An explicit override mapping an implementing method to an implemented one
    MethodImplementation,

    // Bodies
    /// The IL body of a method
    MethodBody,
    /// A single IL operation
    Operation,
    /// A local variable of a method body
    LocalDefinition,
    /// A protected region with its handler
    OperationExceptionInformation,

    // Expressions
    /// A compile-time constant
    MetadataConstant,
    /// An array built from constant initializers
    MetadataCreateArray,
    /// A `typeof` expression
    MetadataTypeOf,
    /// A named field or property assignment of a custom attribute
    MetadataNamedArgument,

    // Attributes and auxiliaries
    /// A custom attribute application
    CustomAttribute,
    /// A declarative security attribute set
    SecurityAttribute,
    /// A required or optional custom modifier
    CustomModifier,
    /// Marshalling description for interop
    MarshallingInformation,
    /// P/Invoke import description
    PlatformInvokeInformation,
    /// A manifest resource
    ResourceReference,
    /// A file of a multi-file assembly
    FileReference,
    /// An unmanaged Win32 resource
    Win32Resource,
    /// A block of initialized data in a PE section
    SectionBlock,
}

/// Concrete kinds that can appear wherever a type reference is expected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeReferenceKind {
    /// Namespace type definition used as a reference
    NamespaceTypeDefinition,
    /// Nested type definition used as a reference
    NestedTypeDefinition,
    /// Generic type parameter definition used as a reference
    GenericTypeParameter,
    /// Generic method parameter definition used as a reference
    GenericMethodParameter,
    /// Namespace type reference
    NamespaceTypeReference,
    /// Nested type reference
    NestedTypeReference,
    /// Specialized nested type reference
    SpecializedNestedTypeReference,
    /// Generic type parameter reference
    GenericTypeParameterReference,
    /// Generic method parameter reference
    GenericMethodParameterReference,
    /// Generic type instance
    GenericTypeInstance,
    /// Vector
    Vector,
    /// Matrix
    Matrix,
    /// Unmanaged pointer
    Pointer,
    /// Managed pointer
    ManagedPointer,
    /// Function pointer
    FunctionPointer,
    /// Modified type
    Modified,
}

/// Concrete kinds that can appear wherever a field reference is expected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FieldReferenceKind {
    /// Field definition of a type
    Definition,
    /// Global field definition
    GlobalDefinition,
    /// Specialized field definition
    SpecializedDefinition,
    /// Plain field reference
    Reference,
    /// Specialized field reference
    SpecializedReference,
}

/// Concrete kinds that can appear wherever a method reference is expected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MethodReferenceKind {
    /// Method definition of a type
    Definition,
    /// Global method definition
    GlobalDefinition,
    /// Specialized method definition
    SpecializedDefinition,
    /// Plain method reference
    Reference,
    /// Specialized method reference
    SpecializedReference,
    /// Generic method instance
    GenericInstance,
}

/// Concrete kinds that can be members of a namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NamespaceMemberKind {
    /// Namespace type definition
    NamespaceType,
    /// Nested namespace
    NestedNamespace,
    /// Global method
    GlobalMethod,
    /// Global field
    GlobalField,
    /// Exported type alias
    NamespaceAlias,
}

/// Concrete kinds that can be members of a type definition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeMemberKind {
    /// Event
    Event,
    /// Field
    Field,
    /// Method
    Method,
    /// Nested type
    NestedType,
    /// Property
    Property,
    /// Specialized event
    SpecializedEvent,
    /// Specialized field
    SpecializedField,
    /// Specialized method
    SpecializedMethod,
    /// Specialized property
    SpecializedProperty,
}

/// Concrete kinds that can identify the namespace of a type reference.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnitNamespaceReferenceKind {
    /// Root namespace definition
    RootNamespace,
    /// Nested namespace definition
    NestedNamespace,
    /// Root namespace reference
    RootNamespaceReference,
    /// Nested namespace reference
    NestedNamespaceReference,
}

/// Concrete kinds that can identify a unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnitReferenceKind {
    /// Assembly definition
    Assembly,
    /// Module definition
    Module,
    /// Assembly reference
    AssemblyReference,
    /// Module reference
    ModuleReference,
}

/// Concrete kinds of metadata expressions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ExpressionKind {
    /// Constant
    Constant,
    /// Array creation
    CreateArray,
    /// `typeof`
    TypeOf,
    /// Named argument
    NamedArgument,
}

/// Concrete payload kinds of an operation operand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OperandKind {
    /// A type token
    Type(TypeReferenceKind),
    /// A field token
    Field(FieldReferenceKind),
    /// A method token
    Method(MethodReferenceKind),
    /// A parameter of the enclosing method
    Parameter,
    /// A local of the enclosing body
    Local,
}

/// Concrete kinds that carry a parameter list and a return type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SignatureKind {
    /// Method definition of any flavor
    MethodDefinition,
    /// Method reference of any flavor
    MethodReference,
    /// Property definition
    Property,
    /// Function pointer
    FunctionPointer,
}

impl NodeKind {
    /// Returns the static name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns `true` for kinds that own the full description of an entity.
    #[must_use]
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            NodeKind::Assembly
                | NodeKind::Module
                | NodeKind::RootNamespace
                | NodeKind::NestedNamespace
                | NodeKind::NamespaceAliasForType
                | NodeKind::NestedAliasForType
                | NodeKind::NamespaceTypeDefinition
                | NodeKind::NestedTypeDefinition
                | NodeKind::GenericTypeParameter
                | NodeKind::GenericMethodParameter
                | NodeKind::FieldDefinition
                | NodeKind::GlobalFieldDefinition
                | NodeKind::SpecializedFieldDefinition
                | NodeKind::MethodDefinition
                | NodeKind::GlobalMethodDefinition
                | NodeKind::SpecializedMethodDefinition
                | NodeKind::PropertyDefinition
                | NodeKind::SpecializedPropertyDefinition
                | NodeKind::EventDefinition
                | NodeKind::SpecializedEventDefinition
                | NodeKind::ParameterDefinition
                | NodeKind::LocalDefinition
        )
    }

    /// Returns `true` for kinds that point at a definition without carrying it.
    #[must_use]
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            NodeKind::AssemblyReference
                | NodeKind::ModuleReference
                | NodeKind::RootNamespaceReference
                | NodeKind::NestedNamespaceReference
                | NodeKind::NamespaceTypeReference
                | NodeKind::NestedTypeReference
                | NodeKind::SpecializedNestedTypeReference
                | NodeKind::GenericTypeParameterReference
                | NodeKind::GenericMethodParameterReference
                | NodeKind::GenericTypeInstanceReference
                | NodeKind::VectorTypeReference
                | NodeKind::MatrixTypeReference
                | NodeKind::PointerTypeReference
                | NodeKind::ManagedPointerTypeReference
                | NodeKind::FunctionPointerTypeReference
                | NodeKind::ModifiedTypeReference
                | NodeKind::FieldReference
                | NodeKind::SpecializedFieldReference
                | NodeKind::MethodReference
                | NodeKind::SpecializedMethodReference
                | NodeKind::GenericMethodInstanceReference
                | NodeKind::ParameterTypeInformation
                | NodeKind::ResourceReference
                | NodeKind::FileReference
        )
    }

    /// Returns `true` for kinds that only exist as a substitution view of a generic original.
    #[must_use]
    pub fn is_specialized(self) -> bool {
        matches!(
            self,
            NodeKind::SpecializedNestedTypeReference
                | NodeKind::SpecializedFieldDefinition
                | NodeKind::SpecializedFieldReference
                | NodeKind::SpecializedMethodDefinition
                | NodeKind::SpecializedMethodReference
                | NodeKind::SpecializedPropertyDefinition
                | NodeKind::SpecializedEventDefinition
        )
    }

    /// Returns `true` for reference kinds that are fully determined by their children.
    ///
    /// Pure nodes are only materialized anew when at least one child changed.
    #[must_use]
    pub fn is_pure(self) -> bool {
        matches!(
            self,
            NodeKind::GenericTypeInstanceReference
                | NodeKind::GenericMethodInstanceReference
                | NodeKind::SpecializedNestedTypeReference
                | NodeKind::SpecializedFieldReference
                | NodeKind::SpecializedMethodReference
        )
    }

    /// Classifies this kind as a type reference.
    #[must_use]
    pub fn as_type_reference(self) -> Option<TypeReferenceKind> {
        match self {
            NodeKind::NamespaceTypeDefinition => Some(TypeReferenceKind::NamespaceTypeDefinition),
            NodeKind::NestedTypeDefinition => Some(TypeReferenceKind::NestedTypeDefinition),
            NodeKind::GenericTypeParameter => Some(TypeReferenceKind::GenericTypeParameter),
            NodeKind::GenericMethodParameter => Some(TypeReferenceKind::GenericMethodParameter),
            NodeKind::NamespaceTypeReference => Some(TypeReferenceKind::NamespaceTypeReference),
            NodeKind::NestedTypeReference => Some(TypeReferenceKind::NestedTypeReference),
            NodeKind::SpecializedNestedTypeReference => {
                Some(TypeReferenceKind::SpecializedNestedTypeReference)
            }
            NodeKind::GenericTypeParameterReference => {
                Some(TypeReferenceKind::GenericTypeParameterReference)
            }
            NodeKind::GenericMethodParameterReference => {
                Some(TypeReferenceKind::GenericMethodParameterReference)
            }
            NodeKind::GenericTypeInstanceReference => Some(TypeReferenceKind::GenericTypeInstance),
            NodeKind::VectorTypeReference => Some(TypeReferenceKind::Vector),
            NodeKind::MatrixTypeReference => Some(TypeReferenceKind::Matrix),
            NodeKind::PointerTypeReference => Some(TypeReferenceKind::Pointer),
            NodeKind::ManagedPointerTypeReference => Some(TypeReferenceKind::ManagedPointer),
            NodeKind::FunctionPointerTypeReference => Some(TypeReferenceKind::FunctionPointer),
            NodeKind::ModifiedTypeReference => Some(TypeReferenceKind::Modified),
            NodeKind::Dummy
            | NodeKind::Assembly
            | NodeKind::Module
            | NodeKind::AssemblyReference
            | NodeKind::ModuleReference
            | NodeKind::RootNamespace
            | NodeKind::NestedNamespace
            | NodeKind::RootNamespaceReference
            | NodeKind::NestedNamespaceReference
            | NodeKind::NamespaceAliasForType
            | NodeKind::NestedAliasForType
            | NodeKind::FieldDefinition
            | NodeKind::GlobalFieldDefinition
            | NodeKind::SpecializedFieldDefinition
            | NodeKind::FieldReference
            | NodeKind::SpecializedFieldReference
            | NodeKind::MethodDefinition
            | NodeKind::GlobalMethodDefinition
            | NodeKind::SpecializedMethodDefinition
            | NodeKind::MethodReference
            | NodeKind::SpecializedMethodReference
            | NodeKind::GenericMethodInstanceReference
            | NodeKind::PropertyDefinition
            | NodeKind::SpecializedPropertyDefinition
            | NodeKind::EventDefinition
            | NodeKind::SpecializedEventDefinition
            | NodeKind::ParameterDefinition
            | NodeKind::ParameterTypeInformation
            | NodeKind::MethodImplementation
            | NodeKind::MethodBody
            | NodeKind::Operation
            | NodeKind::LocalDefinition
            | NodeKind::OperationExceptionInformation
            | NodeKind::MetadataConstant
            | NodeKind::MetadataCreateArray
            | NodeKind::MetadataTypeOf
            | NodeKind::MetadataNamedArgument
            | NodeKind::CustomAttribute
            | NodeKind::SecurityAttribute
            | NodeKind::CustomModifier
            | NodeKind::MarshallingInformation
            | NodeKind::PlatformInvokeInformation
            | NodeKind::ResourceReference
            | NodeKind::FileReference
            | NodeKind::Win32Resource
            | NodeKind::SectionBlock => None,
        }
    }

    /// Classifies this kind as a field reference.
    #[must_use]
    pub fn as_field_reference(self) -> Option<FieldReferenceKind> {
        match self {
            NodeKind::FieldDefinition => Some(FieldReferenceKind::Definition),
            NodeKind::GlobalFieldDefinition => Some(FieldReferenceKind::GlobalDefinition),
            NodeKind::SpecializedFieldDefinition => Some(FieldReferenceKind::SpecializedDefinition),
            NodeKind::FieldReference => Some(FieldReferenceKind::Reference),
            NodeKind::SpecializedFieldReference => Some(FieldReferenceKind::SpecializedReference),
            _ => None,
        }
    }

    /// Classifies this kind as a method reference.
    #[must_use]
    pub fn as_method_reference(self) -> Option<MethodReferenceKind> {
        match self {
            NodeKind::MethodDefinition => Some(MethodReferenceKind::Definition),
            NodeKind::GlobalMethodDefinition => Some(MethodReferenceKind::GlobalDefinition),
            NodeKind::SpecializedMethodDefinition => {
                Some(MethodReferenceKind::SpecializedDefinition)
            }
            NodeKind::MethodReference => Some(MethodReferenceKind::Reference),
            NodeKind::SpecializedMethodReference => Some(MethodReferenceKind::SpecializedReference),
            NodeKind::GenericMethodInstanceReference => Some(MethodReferenceKind::GenericInstance),
            _ => None,
        }
    }

    /// Classifies this kind as a namespace member.
    #[must_use]
    pub fn as_namespace_member(self) -> Option<NamespaceMemberKind> {
        match self {
            NodeKind::NamespaceTypeDefinition => Some(NamespaceMemberKind::NamespaceType),
            NodeKind::NestedNamespace => Some(NamespaceMemberKind::NestedNamespace),
            NodeKind::GlobalMethodDefinition => Some(NamespaceMemberKind::GlobalMethod),
            NodeKind::GlobalFieldDefinition => Some(NamespaceMemberKind::GlobalField),
            NodeKind::NamespaceAliasForType => Some(NamespaceMemberKind::NamespaceAlias),
            _ => None,
        }
    }

    /// Classifies this kind as a type member.
    #[must_use]
    pub fn as_type_member(self) -> Option<TypeMemberKind> {
        match self {
            NodeKind::EventDefinition => Some(TypeMemberKind::Event),
            NodeKind::FieldDefinition => Some(TypeMemberKind::Field),
            NodeKind::MethodDefinition => Some(TypeMemberKind::Method),
            NodeKind::NestedTypeDefinition => Some(TypeMemberKind::NestedType),
            NodeKind::PropertyDefinition => Some(TypeMemberKind::Property),
            NodeKind::SpecializedEventDefinition => Some(TypeMemberKind::SpecializedEvent),
            NodeKind::SpecializedFieldDefinition => Some(TypeMemberKind::SpecializedField),
            NodeKind::SpecializedMethodDefinition => Some(TypeMemberKind::SpecializedMethod),
            NodeKind::SpecializedPropertyDefinition => Some(TypeMemberKind::SpecializedProperty),
            _ => None,
        }
    }

    /// Classifies this kind as the namespace part of a namespace type reference.
    #[must_use]
    pub fn as_unit_namespace_reference(self) -> Option<UnitNamespaceReferenceKind> {
        match self {
            NodeKind::RootNamespace => Some(UnitNamespaceReferenceKind::RootNamespace),
            NodeKind::NestedNamespace => Some(UnitNamespaceReferenceKind::NestedNamespace),
            NodeKind::RootNamespaceReference => {
                Some(UnitNamespaceReferenceKind::RootNamespaceReference)
            }
            NodeKind::NestedNamespaceReference => {
                Some(UnitNamespaceReferenceKind::NestedNamespaceReference)
            }
            _ => None,
        }
    }

    /// Classifies this kind as a unit reference.
    #[must_use]
    pub fn as_unit_reference(self) -> Option<UnitReferenceKind> {
        match self {
            NodeKind::Assembly => Some(UnitReferenceKind::Assembly),
            NodeKind::Module => Some(UnitReferenceKind::Module),
            NodeKind::AssemblyReference => Some(UnitReferenceKind::AssemblyReference),
            NodeKind::ModuleReference => Some(UnitReferenceKind::ModuleReference),
            _ => None,
        }
    }

    /// Classifies this kind as a metadata expression.
    #[must_use]
    pub fn as_expression(self) -> Option<ExpressionKind> {
        match self {
            NodeKind::MetadataConstant => Some(ExpressionKind::Constant),
            NodeKind::MetadataCreateArray => Some(ExpressionKind::CreateArray),
            NodeKind::MetadataTypeOf => Some(ExpressionKind::TypeOf),
            NodeKind::MetadataNamedArgument => Some(ExpressionKind::NamedArgument),
            _ => None,
        }
    }

    /// Classifies this kind as the payload of an operation operand.
    ///
    /// Type tokens take precedence over member tokens; a node can never satisfy both.
    #[must_use]
    pub fn as_operand(self) -> Option<OperandKind> {
        if let Some(kind) = self.as_type_reference() {
            return Some(OperandKind::Type(kind));
        }
        if let Some(kind) = self.as_field_reference() {
            return Some(OperandKind::Field(kind));
        }
        if let Some(kind) = self.as_method_reference() {
            return Some(OperandKind::Method(kind));
        }
        match self {
            NodeKind::ParameterDefinition => Some(OperandKind::Parameter),
            NodeKind::LocalDefinition => Some(OperandKind::Local),
            _ => None,
        }
    }

    /// Classifies this kind as a signature.
    #[must_use]
    pub fn as_signature(self) -> Option<SignatureKind> {
        match self {
            NodeKind::MethodDefinition
            | NodeKind::GlobalMethodDefinition
            | NodeKind::SpecializedMethodDefinition => Some(SignatureKind::MethodDefinition),
            NodeKind::MethodReference
            | NodeKind::SpecializedMethodReference
            | NodeKind::GenericMethodInstanceReference => Some(SignatureKind::MethodReference),
            NodeKind::PropertyDefinition | NodeKind::SpecializedPropertyDefinition => {
                Some(SignatureKind::Property)
            }
            NodeKind::FunctionPointerTypeReference => Some(SignatureKind::FunctionPointer),
            _ => None,
        }
    }

    /// Returns `true` for kinds that are type definitions (namespace-level or nested).
    #[must_use]
    pub fn is_type_definition(self) -> bool {
        matches!(
            self,
            NodeKind::NamespaceTypeDefinition | NodeKind::NestedTypeDefinition
        )
    }

    /// Returns `true` for kinds that count as a unit for path queries.
    #[must_use]
    pub fn is_unit(self) -> bool {
        matches!(self, NodeKind::Assembly | NodeKind::Module)
    }

    /// Returns `true` for namespace definitions.
    #[must_use]
    pub fn is_namespace(self) -> bool {
        matches!(self, NodeKind::RootNamespace | NodeKind::NestedNamespace)
    }

    /// Returns `true` for method definitions of any flavor.
    #[must_use]
    pub fn is_method_definition(self) -> bool {
        matches!(
            self,
            NodeKind::MethodDefinition
                | NodeKind::GlobalMethodDefinition
                | NodeKind::SpecializedMethodDefinition
        )
    }
}
