//! Member definitions, member references and their specialized views.
//!
//! Definition flavors that only differ by container (global fields and methods) or by being a
//! substitution view (specialized members) embed the plain definition struct, so one rule
//! body serves all flavors of a member kind.

use bitflags::bitflags;

use crate::metadata::{node_id::NodeId, nodes::types::CallingConvention};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Field attributes, ECMA-335 II.23.1.5 values
    pub struct FieldFlags: u16 {
        /// Field is static
        const STATIC = 0x0010;
        /// Field can only be initialized
        const INIT_ONLY = 0x0020;
        /// Value is a compile time constant
        const LITERAL = 0x0040;
        /// Field is not serialized
        const NOT_SERIALIZED = 0x0080;
        /// Field has an RVA mapping into a section block
        const HAS_FIELD_RVA = 0x0100;
        /// Name is special
        const SPECIAL_NAME = 0x0200;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0400;
        /// Field has explicit marshalling information
        const HAS_FIELD_MARSHAL = 0x1000;
        /// Field has a default value
        const HAS_DEFAULT = 0x8000;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Method attributes, ECMA-335 II.23.1.10 values
    pub struct MethodFlags: u16 {
        /// Method is static
        const STATIC = 0x0010;
        /// Method can not be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name and signature
        const HIDE_BY_SIG = 0x0080;
        /// Method is abstract
        const ABSTRACT = 0x0400;
        /// Name is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x1000;
        /// Method is implemented through P/Invoke
        const PINVOKE_IMPL = 0x2000;
        /// Method has declarative security attached
        const HAS_SECURITY = 0x4000;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Property attributes, ECMA-335 II.23.1.14 values
    pub struct PropertyFlags: u16 {
        /// Name is special
        const SPECIAL_NAME = 0x0200;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0400;
        /// Property has a default value
        const HAS_DEFAULT = 0x1000;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Parameter attributes, ECMA-335 II.23.1.13 values
    pub struct ParameterFlags: u16 {
        /// Input parameter
        const IN = 0x0001;
        /// Output parameter
        const OUT = 0x0002;
        /// Optional parameter
        const OPTIONAL = 0x0010;
        /// Parameter has a default value
        const HAS_DEFAULT = 0x1000;
        /// Parameter has explicit marshalling information
        const HAS_FIELD_MARSHAL = 0x2000;
    }
}

/// Slots shared by every type member definition.
#[derive(Clone, Debug, Default)]
pub struct MemberCore {
    /// Member name
    pub name: String,
    /// Custom attributes
    pub attributes: Vec<NodeId>,
    /// Declaring type; the sentinel for global members
    pub containing_type: NodeId,
}

/// A field definition.
#[derive(Clone, Debug, Default)]
pub struct FieldDefinition {
    /// Member slots
    pub member: MemberCore,
    /// Field attributes
    pub flags: FieldFlags,
    /// Field type
    pub field_type: NodeId,
    /// Constant value, meaningful only for literal fields
    pub compile_time_value: NodeId,
    /// Marshalling description, meaningful only with explicit marshalling
    pub marshalling_information: NodeId,
    /// Initial data, meaningful only for RVA mapped fields
    pub field_mapping: NodeId,
}

impl FieldDefinition {
    /// Returns `true` if the field is a compile time constant.
    #[must_use]
    pub fn is_compile_time_constant(&self) -> bool {
        self.flags.contains(FieldFlags::LITERAL)
    }

    /// Returns `true` if the field carries an initial data mapping.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.flags.contains(FieldFlags::HAS_FIELD_RVA)
    }

    /// Returns `true` if the field has explicit marshalling information.
    #[must_use]
    pub fn is_marshalled_explicitly(&self) -> bool {
        self.flags.contains(FieldFlags::HAS_FIELD_MARSHAL)
    }
}

/// A field declared at namespace level.
#[derive(Clone, Debug, Default)]
pub struct GlobalFieldDefinition {
    /// Field slots
    pub field: FieldDefinition,
    /// Declaring namespace
    pub containing_namespace: NodeId,
}

/// A field of a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedFieldDefinition {
    /// Field slots under the substitution
    pub field: FieldDefinition,
    /// The field of the generic original
    pub unspecialized_version: NodeId,
}

/// A reference to a field.
#[derive(Clone, Debug, Default)]
pub struct FieldReference {
    /// Field name
    pub name: String,
    /// Declaring type reference
    pub containing_type: NodeId,
    /// Field type
    pub field_type: NodeId,
    /// Whether the field is static
    pub is_static: bool,
}

/// A field reference through a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedFieldReference {
    /// Reference slots; `containing_type` is the generic instance
    pub reference: FieldReference,
    /// The field of the generic original
    pub unspecialized_version: NodeId,
}

/// A method definition.
#[derive(Clone, Debug, Default)]
pub struct MethodDefinition {
    /// Member slots
    pub member: MemberCore,
    /// Method attributes
    pub flags: MethodFlags,
    /// Calling convention
    pub calling_convention: CallingConvention,
    /// Whether the implementation lives outside this unit (runtime, internal call)
    pub is_external: bool,
    /// Declared generic parameters
    pub generic_parameters: Vec<NodeId>,
    /// Declared parameters
    pub parameters: Vec<NodeId>,
    /// P/Invoke description, meaningful only for P/Invoke methods
    pub platform_invoke_data: NodeId,
    /// Custom attributes of the return value
    pub return_value_attributes: Vec<NodeId>,
    /// Custom modifiers of the return value
    pub return_value_custom_modifiers: Vec<NodeId>,
    /// Whether the return value is returned by reference
    pub return_value_is_by_ref: bool,
    /// Whether the return value has explicit marshalling information
    pub return_value_is_marshalled_explicitly: bool,
    /// Marshalling description of the return value
    pub return_value_marshalling_information: NodeId,
    /// Declarative security attributes
    pub security_attributes: Vec<NodeId>,
    /// Return type
    pub return_type: NodeId,
    /// Method body, the sentinel for abstract and external methods
    pub body: NodeId,
}

impl MethodDefinition {
    /// Returns `true` if the method declares generic parameters.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// Returns `true` if the method is abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// Returns `true` if the method is a P/Invoke stub.
    #[must_use]
    pub fn is_platform_invoke(&self) -> bool {
        self.flags.contains(MethodFlags::PINVOKE_IMPL)
    }

    /// Returns `true` if declarative security is attached.
    #[must_use]
    pub fn has_declarative_security(&self) -> bool {
        self.flags.contains(MethodFlags::HAS_SECURITY)
    }

    /// Returns `true` if the return value carries custom modifiers.
    #[must_use]
    pub fn return_value_is_modified(&self) -> bool {
        !self.return_value_custom_modifiers.is_empty()
    }

    /// Returns `true` if the method has an IL body that belongs to it.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.is_abstract() && !self.is_external
    }
}

/// A method declared at namespace level.
#[derive(Clone, Debug, Default)]
pub struct GlobalMethodDefinition {
    /// Method slots
    pub method: MethodDefinition,
    /// Declaring namespace
    pub containing_namespace: NodeId,
}

/// A method of a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedMethodDefinition {
    /// Method slots under the substitution
    pub method: MethodDefinition,
    /// The method of the generic original
    pub unspecialized_version: NodeId,
}

/// A reference to a method.
#[derive(Clone, Debug, Default)]
pub struct MethodReference {
    /// Method name
    pub name: String,
    /// Declaring type reference
    pub containing_type: NodeId,
    /// Calling convention
    pub calling_convention: CallingConvention,
    /// Number of generic parameters of the referenced method
    pub generic_parameter_count: u16,
    /// Parameter type informations
    pub parameters: Vec<NodeId>,
    /// Extra parameters of a vararg call site
    pub extra_parameters: Vec<NodeId>,
    /// Custom modifiers of the return value
    pub return_value_custom_modifiers: Vec<NodeId>,
    /// Whether the return value is returned by reference
    pub return_value_is_by_ref: bool,
    /// Return type
    pub return_type: NodeId,
}

impl MethodReference {
    /// Returns `true` if the return value carries custom modifiers.
    #[must_use]
    pub fn return_value_is_modified(&self) -> bool {
        !self.return_value_custom_modifiers.is_empty()
    }
}

/// A method reference through a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedMethodReference {
    /// Reference slots; `containing_type` is the generic instance
    pub reference: MethodReference,
    /// The method of the generic original
    pub unspecialized_version: NodeId,
}

/// A generic method applied to type arguments.
#[derive(Clone, Debug, Default)]
pub struct GenericMethodInstanceReference {
    /// The generic method being instantiated
    pub generic_method: NodeId,
    /// Type arguments, in parameter order
    pub generic_arguments: Vec<NodeId>,
}

/// A property definition.
#[derive(Clone, Debug, Default)]
pub struct PropertyDefinition {
    /// Member slots
    pub member: MemberCore,
    /// Property attributes
    pub flags: PropertyFlags,
    /// All accessor methods
    pub accessors: Vec<NodeId>,
    /// Default value, meaningful only with `HAS_DEFAULT`
    pub default_value: NodeId,
    /// Getter, or the sentinel
    pub getter: NodeId,
    /// Setter, or the sentinel
    pub setter: NodeId,
    /// Indexer parameters
    pub parameters: Vec<NodeId>,
    /// Custom attributes of the return value
    pub return_value_attributes: Vec<NodeId>,
    /// Custom modifiers of the return value
    pub return_value_custom_modifiers: Vec<NodeId>,
    /// Whether the value is returned by reference
    pub return_value_is_by_ref: bool,
    /// Property type
    pub property_type: NodeId,
}

impl PropertyDefinition {
    /// Returns `true` if the property has a default value.
    #[must_use]
    pub fn has_default_value(&self) -> bool {
        self.flags.contains(PropertyFlags::HAS_DEFAULT)
    }

    /// Returns `true` if the return value carries custom modifiers.
    #[must_use]
    pub fn return_value_is_modified(&self) -> bool {
        !self.return_value_custom_modifiers.is_empty()
    }
}

/// A property of a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedPropertyDefinition {
    /// Property slots under the substitution
    pub property: PropertyDefinition,
    /// The property of the generic original
    pub unspecialized_version: NodeId,
}

/// An event definition.
#[derive(Clone, Debug, Default)]
pub struct EventDefinition {
    /// Member slots
    pub member: MemberCore,
    /// All accessor methods
    pub accessors: Vec<NodeId>,
    /// Add accessor
    pub adder: NodeId,
    /// Remove accessor
    pub remover: NodeId,
    /// Raise accessor, or the sentinel
    pub caller: NodeId,
    /// Delegate type of the event
    pub event_type: NodeId,
}

/// An event of a generic type instance.
#[derive(Clone, Debug, Default)]
pub struct SpecializedEventDefinition {
    /// Event slots under the substitution
    pub event: EventDefinition,
    /// The event of the generic original
    pub unspecialized_version: NodeId,
}

/// A parameter of a method or property definition.
#[derive(Clone, Debug, Default)]
pub struct ParameterDefinition {
    /// Parameter name
    pub name: String,
    /// Zero-based position
    pub index: u16,
    /// Parameter attributes
    pub flags: ParameterFlags,
    /// Custom attributes
    pub attributes: Vec<NodeId>,
    /// The method or property declaring the parameter
    pub containing_signature: NodeId,
    /// Default value, meaningful only with `HAS_DEFAULT`
    pub default_value: NodeId,
    /// Attached custom modifiers
    pub custom_modifiers: Vec<NodeId>,
    /// Whether the parameter is passed by reference
    pub is_by_reference: bool,
    /// Marshalling description, meaningful only with explicit marshalling
    pub marshalling_information: NodeId,
    /// Parameter type
    pub parameter_type: NodeId,
}

impl ParameterDefinition {
    /// Returns `true` if the parameter has a default value.
    #[must_use]
    pub fn has_default_value(&self) -> bool {
        self.flags.contains(ParameterFlags::HAS_DEFAULT)
    }

    /// Returns `true` if custom modifiers are attached.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.custom_modifiers.is_empty()
    }

    /// Returns `true` if the parameter has explicit marshalling information.
    #[must_use]
    pub fn is_marshalled_explicitly(&self) -> bool {
        self.flags.contains(ParameterFlags::HAS_FIELD_MARSHAL)
    }
}

/// A parameter of a method reference or function pointer signature.
#[derive(Clone, Debug, Default)]
pub struct ParameterTypeInformation {
    /// Zero-based position
    pub index: u16,
    /// Whether the parameter is passed by reference
    pub is_by_reference: bool,
    /// Attached custom modifiers
    pub custom_modifiers: Vec<NodeId>,
    /// The signature declaring the parameter
    pub containing_signature: NodeId,
    /// Parameter type
    pub parameter_type: NodeId,
}

impl ParameterTypeInformation {
    /// Returns `true` if custom modifiers are attached.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.custom_modifiers.is_empty()
    }
}

/// An explicit override: `implementing_method` implements `implemented_method`.
#[derive(Clone, Debug, Default)]
pub struct MethodImplementation {
    /// The type declaring the override
    pub containing_type: NodeId,
    /// The overridden interface or base method
    pub implemented_method: NodeId,
    /// The method providing the implementation
    pub implementing_method: NodeId,
}
