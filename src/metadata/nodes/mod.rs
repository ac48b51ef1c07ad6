//! Node payloads of the metadata graph.
//!
//! [`Node`] is the closed sum type over every concrete kind listed in
//! [`crate::metadata::kinds::NodeKind`]. Payloads reference other nodes exclusively through
//! [`NodeId`] slots; absent slots hold [`NodeId::DUMMY`].
//!
//! # Typed Access
//!
//! The [`NodeData`] trait maps a payload type back to the variants that carry it. Some payload
//! structs are shared by several kinds (for example [`members::MemberCore`] is part of every
//! member definition), which lets one rule body handle every flavor of a kind:
//!
//! ```rust
//! use dotrewrite::metadata::{graph::MetadataGraph, nodes::{Node, members::*}};
//!
//! let mut graph = MetadataGraph::new();
//! let field = graph.add(Node::GlobalFieldDefinition(GlobalFieldDefinition::default()));
//!
//! graph.get_mut::<MemberCore>(field)?.name = "counter".to_string();
//! assert_eq!(graph.get::<FieldDefinition>(field)?.member.name, "counter");
//! # Ok::<(), dotrewrite::Error>(())
//! ```
//!
//! # Edges
//!
//! [`Node::children`] enumerates every outgoing edge, containment and non-containment alike,
//! in the order the rewrite rules visit them. Structural snapshots and the DOT dump are built
//! on top of it.

pub mod attributes;
pub mod body;
pub mod expressions;
pub mod members;
pub mod namespaces;
pub mod types;
pub mod units;

use crate::metadata::{kinds::NodeKind, node_id::NodeId};

use attributes::*;
use body::*;
use expressions::*;
use members::*;
use namespaces::*;
use types::*;
use units::*;

/// Access to a payload type stored inside [`Node`] variants.
pub trait NodeData: Sized {
    /// Human readable payload name used in errors.
    const NAME: &'static str;

    /// Borrows the payload if `node` carries it.
    fn from_node(node: &Node) -> Option<&Self>;

    /// Mutably borrows the payload if `node` carries it.
    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;
}

macro_rules! define_nodes {
    ($($variant:ident($payload:ty)),+ $(,)?) => {
        /// A metadata graph node.
        #[derive(Clone, Debug)]
        pub enum Node {
            /// The sentinel placeholder
            Dummy,
            $(
                #[allow(missing_docs)]
                $variant($payload),
            )+
        }

        impl Node {
            /// Returns the concrete kind of this node.
            #[must_use]
            pub fn kind(&self) -> NodeKind {
                match self {
                    Node::Dummy => NodeKind::Dummy,
                    $( Node::$variant(_) => NodeKind::$variant, )+
                }
            }
        }

    };
}

define_nodes! {
    Assembly(AssemblyDefinition),
    Module(ModuleDefinition),
    AssemblyReference(AssemblyReference),
    ModuleReference(ModuleReference),
    RootNamespace(RootNamespace),
    NestedNamespace(NestedNamespace),
    RootNamespaceReference(RootNamespaceReference),
    NestedNamespaceReference(NestedNamespaceReference),
    NamespaceAliasForType(NamespaceAliasForType),
    NestedAliasForType(NestedAliasForType),
    NamespaceTypeDefinition(NamespaceTypeDefinition),
    NestedTypeDefinition(NestedTypeDefinition),
    GenericTypeParameter(GenericTypeParameter),
    GenericMethodParameter(GenericMethodParameter),
    NamespaceTypeReference(NamespaceTypeReference),
    NestedTypeReference(NestedTypeReference),
    SpecializedNestedTypeReference(SpecializedNestedTypeReference),
    GenericTypeParameterReference(GenericTypeParameterReference),
    GenericMethodParameterReference(GenericMethodParameterReference),
    GenericTypeInstanceReference(GenericTypeInstanceReference),
    VectorTypeReference(VectorTypeReference),
    MatrixTypeReference(MatrixTypeReference),
    PointerTypeReference(PointerTypeReference),
    ManagedPointerTypeReference(ManagedPointerTypeReference),
    FunctionPointerTypeReference(FunctionPointerTypeReference),
    ModifiedTypeReference(ModifiedTypeReference),
    FieldDefinition(FieldDefinition),
    GlobalFieldDefinition(GlobalFieldDefinition),
    SpecializedFieldDefinition(SpecializedFieldDefinition),
    FieldReference(FieldReference),
    SpecializedFieldReference(SpecializedFieldReference),
    MethodDefinition(MethodDefinition),
    GlobalMethodDefinition(GlobalMethodDefinition),
    SpecializedMethodDefinition(SpecializedMethodDefinition),
    MethodReference(MethodReference),
    SpecializedMethodReference(SpecializedMethodReference),
    GenericMethodInstanceReference(GenericMethodInstanceReference),
    PropertyDefinition(PropertyDefinition),
    SpecializedPropertyDefinition(SpecializedPropertyDefinition),
    EventDefinition(EventDefinition),
    SpecializedEventDefinition(SpecializedEventDefinition),
    ParameterDefinition(ParameterDefinition),
    ParameterTypeInformation(ParameterTypeInformation),
    MethodImplementation(MethodImplementation),
    MethodBody(MethodBody),
    Operation(Operation),
    LocalDefinition(LocalDefinition),
    OperationExceptionInformation(OperationExceptionInformation),
    MetadataConstant(MetadataConstant),
    MetadataCreateArray(MetadataCreateArray),
    MetadataTypeOf(MetadataTypeOf),
    MetadataNamedArgument(MetadataNamedArgument),
    CustomAttribute(CustomAttribute),
    SecurityAttribute(SecurityAttribute),
    CustomModifier(CustomModifier),
    MarshallingInformation(MarshallingInformation),
    PlatformInvokeInformation(PlatformInvokeInformation),
    ResourceReference(ResourceReference),
    FileReference(FileReference),
    Win32Resource(Win32Resource),
    SectionBlock(SectionBlock),
}

// Exact payloads
node_data!(AssemblyDefinition => Assembly);
node_data!(ModuleDefinition => Module);
node_data!(AssemblyReference => AssemblyReference);
node_data!(ModuleReference => ModuleReference);
node_data!(RootNamespace => RootNamespace);
node_data!(NestedNamespace => NestedNamespace);
node_data!(RootNamespaceReference => RootNamespaceReference);
node_data!(NestedNamespaceReference => NestedNamespaceReference);
node_data!(NamespaceAliasForType => NamespaceAliasForType);
node_data!(NestedAliasForType => NestedAliasForType);
node_data!(NamespaceTypeDefinition => NamespaceTypeDefinition);
node_data!(NestedTypeDefinition => NestedTypeDefinition);
node_data!(GenericTypeParameter => GenericTypeParameter);
node_data!(GenericMethodParameter => GenericMethodParameter);
node_data!(NamespaceTypeReference => NamespaceTypeReference);
node_data!(GenericTypeParameterReference => GenericTypeParameterReference);
node_data!(GenericMethodParameterReference => GenericMethodParameterReference);
node_data!(GenericTypeInstanceReference => GenericTypeInstanceReference);
node_data!(VectorTypeReference => VectorTypeReference);
node_data!(MatrixTypeReference => MatrixTypeReference);
node_data!(PointerTypeReference => PointerTypeReference);
node_data!(ManagedPointerTypeReference => ManagedPointerTypeReference);
node_data!(FunctionPointerTypeReference => FunctionPointerTypeReference);
node_data!(ModifiedTypeReference => ModifiedTypeReference);
node_data!(GenericMethodInstanceReference => GenericMethodInstanceReference);
node_data!(ParameterDefinition => ParameterDefinition);
node_data!(ParameterTypeInformation => ParameterTypeInformation);
node_data!(MethodImplementation => MethodImplementation);
node_data!(MethodBody => MethodBody);
node_data!(Operation => Operation);
node_data!(LocalDefinition => LocalDefinition);
node_data!(OperationExceptionInformation => OperationExceptionInformation);
node_data!(MetadataConstant => MetadataConstant);
node_data!(MetadataCreateArray => MetadataCreateArray);
node_data!(MetadataTypeOf => MetadataTypeOf);
node_data!(MetadataNamedArgument => MetadataNamedArgument);
node_data!(CustomAttribute => CustomAttribute);
node_data!(SecurityAttribute => SecurityAttribute);
node_data!(CustomModifier => CustomModifier);
node_data!(MarshallingInformation => MarshallingInformation);
node_data!(PlatformInvokeInformation => PlatformInvokeInformation);
node_data!(ResourceReference => ResourceReference);
node_data!(FileReference => FileReference);
node_data!(Win32Resource => Win32Resource);
node_data!(SectionBlock => SectionBlock);

// Flavored payloads: global and specialized definitions expose the plain struct they embed
node_data!(FieldDefinition =>
    FieldDefinition,
    GlobalFieldDefinition.field,
    SpecializedFieldDefinition.field,
);
node_data!(MethodDefinition =>
    MethodDefinition,
    GlobalMethodDefinition.method,
    SpecializedMethodDefinition.method,
);
node_data!(PropertyDefinition => PropertyDefinition, SpecializedPropertyDefinition.property);
node_data!(EventDefinition => EventDefinition, SpecializedEventDefinition.event);
node_data!(FieldReference => FieldReference, SpecializedFieldReference.reference);
node_data!(MethodReference => MethodReference, SpecializedMethodReference.reference);
node_data!(NestedTypeReference => NestedTypeReference, SpecializedNestedTypeReference.reference);
node_data!(GlobalFieldDefinition => GlobalFieldDefinition);
node_data!(SpecializedFieldDefinition => SpecializedFieldDefinition);
node_data!(GlobalMethodDefinition => GlobalMethodDefinition);
node_data!(SpecializedMethodDefinition => SpecializedMethodDefinition);
node_data!(SpecializedPropertyDefinition => SpecializedPropertyDefinition);
node_data!(SpecializedEventDefinition => SpecializedEventDefinition);
node_data!(SpecializedFieldReference => SpecializedFieldReference);
node_data!(SpecializedMethodReference => SpecializedMethodReference);
node_data!(SpecializedNestedTypeReference => SpecializedNestedTypeReference);

// Shared payloads
node_data!(ModuleCore => Assembly.module, Module.module);
node_data!(NamespaceCore => RootNamespace.namespace, NestedNamespace.namespace);
node_data!(AliasCore => NamespaceAliasForType.alias, NestedAliasForType.alias);
node_data!(TypeDefinitionCore =>
    NamespaceTypeDefinition.definition,
    NestedTypeDefinition.definition,
);
node_data!(GenericParameterCore =>
    GenericTypeParameter.parameter,
    GenericMethodParameter.parameter,
);
node_data!(MemberCore =>
    FieldDefinition.member,
    GlobalFieldDefinition.field.member,
    SpecializedFieldDefinition.field.member,
    MethodDefinition.member,
    GlobalMethodDefinition.method.member,
    SpecializedMethodDefinition.method.member,
    PropertyDefinition.member,
    SpecializedPropertyDefinition.property.member,
    EventDefinition.member,
    SpecializedEventDefinition.event.member,
);

fn push_module(module: &ModuleCore, out: &mut Vec<NodeId>) {
    out.extend(&module.module_attributes);
    out.extend(&module.assembly_references);
    out.extend(&module.module_references);
    out.extend(&module.win32_resources);
    out.push(module.root_namespace);
    out.extend(&module.all_types);
    out.extend(&module.type_member_references);
    out.extend(&module.type_references);
    out.push(module.entry_point);
}

fn push_namespace(namespace: &NamespaceCore, out: &mut Vec<NodeId>) {
    out.extend(&namespace.attributes);
    out.extend(&namespace.members);
    out.push(namespace.unit);
}

fn push_alias(alias: &AliasCore, out: &mut Vec<NodeId>) {
    out.extend(&alias.attributes);
    out.push(alias.aliased_type);
    out.extend(&alias.members);
}

fn push_type_definition(definition: &TypeDefinitionCore, out: &mut Vec<NodeId>) {
    out.extend(&definition.attributes);
    out.extend(&definition.base_classes);
    out.extend(&definition.explicit_implementation_overrides);
    out.extend(&definition.generic_parameters);
    out.extend(&definition.interfaces);
    out.extend(&definition.events);
    out.extend(&definition.fields);
    out.extend(&definition.methods);
    out.extend(&definition.nested_types);
    out.extend(&definition.properties);
    out.extend(&definition.security_attributes);
    out.push(definition.underlying_type);
    out.extend(&definition.private_helper_members);
}

fn push_generic_parameter(parameter: &GenericParameterCore, out: &mut Vec<NodeId>) {
    out.extend(&parameter.attributes);
    out.extend(&parameter.constraints);
}

fn push_member(member: &MemberCore, out: &mut Vec<NodeId>) {
    out.extend(&member.attributes);
    out.push(member.containing_type);
}

fn push_field(field: &FieldDefinition, out: &mut Vec<NodeId>) {
    push_member(&field.member, out);
    out.push(field.compile_time_value);
    out.push(field.field_mapping);
    out.push(field.marshalling_information);
    out.push(field.field_type);
}

fn push_field_reference(reference: &FieldReference, out: &mut Vec<NodeId>) {
    out.push(reference.containing_type);
    out.push(reference.field_type);
}

fn push_method(method: &MethodDefinition, out: &mut Vec<NodeId>) {
    push_member(&method.member, out);
    out.extend(&method.generic_parameters);
    out.extend(&method.parameters);
    out.push(method.platform_invoke_data);
    out.extend(&method.return_value_attributes);
    out.extend(&method.return_value_custom_modifiers);
    out.push(method.return_value_marshalling_information);
    out.extend(&method.security_attributes);
    out.push(method.return_type);
    out.push(method.body);
}

fn push_method_reference(reference: &MethodReference, out: &mut Vec<NodeId>) {
    out.push(reference.containing_type);
    out.extend(&reference.extra_parameters);
    out.extend(&reference.parameters);
    out.extend(&reference.return_value_custom_modifiers);
    out.push(reference.return_type);
}

fn push_property(property: &PropertyDefinition, out: &mut Vec<NodeId>) {
    push_member(&property.member, out);
    out.extend(&property.accessors);
    out.push(property.default_value);
    out.push(property.getter);
    out.extend(&property.parameters);
    out.extend(&property.return_value_attributes);
    out.extend(&property.return_value_custom_modifiers);
    out.push(property.setter);
    out.push(property.property_type);
}

fn push_event(event: &EventDefinition, out: &mut Vec<NodeId>) {
    push_member(&event.member, out);
    out.extend(&event.accessors);
    out.push(event.adder);
    out.push(event.caller);
    out.push(event.remover);
    out.push(event.event_type);
}

impl Node {
    /// Returns the simple name of named nodes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Node::Assembly(a) => &a.name,
            Node::Module(m) => &m.module.name,
            Node::AssemblyReference(r) => &r.name,
            Node::ModuleReference(r) => &r.name,
            Node::RootNamespace(n) => &n.namespace.name,
            Node::NestedNamespace(n) => &n.namespace.name,
            Node::NestedNamespaceReference(r) => &r.name,
            Node::NamespaceAliasForType(a) => &a.alias.name,
            Node::NestedAliasForType(a) => &a.alias.name,
            Node::NamespaceTypeDefinition(t) => &t.definition.name,
            Node::NestedTypeDefinition(t) => &t.definition.name,
            Node::GenericTypeParameter(p) => &p.parameter.name,
            Node::GenericMethodParameter(p) => &p.parameter.name,
            Node::NamespaceTypeReference(r) => &r.name,
            Node::NestedTypeReference(r) => &r.name,
            Node::SpecializedNestedTypeReference(r) => &r.reference.name,
            Node::GenericTypeParameterReference(r) => &r.name,
            Node::GenericMethodParameterReference(r) => &r.name,
            Node::FieldDefinition(f) => &f.member.name,
            Node::GlobalFieldDefinition(f) => &f.field.member.name,
            Node::SpecializedFieldDefinition(f) => &f.field.member.name,
            Node::FieldReference(r) => &r.name,
            Node::SpecializedFieldReference(r) => &r.reference.name,
            Node::MethodDefinition(m) => &m.member.name,
            Node::GlobalMethodDefinition(m) => &m.method.member.name,
            Node::SpecializedMethodDefinition(m) => &m.method.member.name,
            Node::MethodReference(r) => &r.name,
            Node::SpecializedMethodReference(r) => &r.reference.name,
            Node::PropertyDefinition(p) => &p.member.name,
            Node::SpecializedPropertyDefinition(p) => &p.property.member.name,
            Node::EventDefinition(e) => &e.member.name,
            Node::SpecializedEventDefinition(e) => &e.event.member.name,
            Node::ParameterDefinition(p) => &p.name,
            Node::LocalDefinition(l) => &l.name,
            Node::MetadataNamedArgument(n) => &n.argument_name,
            Node::ResourceReference(r) => &r.name,
            Node::FileReference(f) => &f.name,
            Node::Win32Resource(w) => &w.name,
            _ => return None,
        };
        Some(name.as_str())
    }

    /// Renders the scalar content of this node, excluding every edge.
    ///
    /// Two nodes with equal labels and pairwise equivalent children are structurally equal.
    #[must_use]
    pub fn label(&self) -> String {
        let detail = match self {
            Node::Assembly(a) => format!(
                "{} v{} culture={:?} key={:02x?}",
                a.name, a.version, a.culture, a.public_key
            ),
            Node::AssemblyReference(r) => format!(
                "{} v{} culture={:?} token={:02x?}",
                r.name, r.version, r.culture, r.public_key_token
            ),
            Node::NamespaceTypeDefinition(NamespaceTypeDefinition { definition, .. })
            | Node::NestedTypeDefinition(NestedTypeDefinition { definition, .. }) => format!(
                "{} {:?} value_type={} enum={}",
                definition.name, definition.flags, definition.is_value_type, definition.is_enum
            ),
            Node::GenericTypeParameter(GenericTypeParameter { parameter, .. })
            | Node::GenericMethodParameter(GenericMethodParameter { parameter, .. }) => {
                format!("{}@{} {:?}", parameter.name, parameter.index, parameter.flags)
            }
            Node::NamespaceTypeReference(r) => format!(
                "{}`{} value_type={}",
                r.name, r.generic_parameter_count, r.is_value_type
            ),
            Node::NestedTypeReference(r) => format!("{}`{}", r.name, r.generic_parameter_count),
            Node::SpecializedNestedTypeReference(s) => {
                format!("{}`{}", s.reference.name, s.reference.generic_parameter_count)
            }
            Node::GenericTypeParameterReference(r) => format!("{}@{}", r.name, r.index),
            Node::GenericMethodParameterReference(r) => format!("{}@{}", r.name, r.index),
            Node::MatrixTypeReference(m) => {
                format!("rank={} sizes={:?} bounds={:?}", m.rank, m.sizes, m.lower_bounds)
            }
            Node::FunctionPointerTypeReference(f) => format!(
                "{:?} by_ref={}",
                f.calling_convention, f.return_value_is_by_ref
            ),
            Node::FieldDefinition(field)
            | Node::GlobalFieldDefinition(GlobalFieldDefinition { field, .. })
            | Node::SpecializedFieldDefinition(SpecializedFieldDefinition { field, .. }) => {
                format!("{} {:?}", field.member.name, field.flags)
            }
            Node::FieldReference(reference)
            | Node::SpecializedFieldReference(SpecializedFieldReference { reference, .. }) => {
                format!("{} static={}", reference.name, reference.is_static)
            }
            Node::MethodDefinition(method)
            | Node::GlobalMethodDefinition(GlobalMethodDefinition { method, .. })
            | Node::SpecializedMethodDefinition(SpecializedMethodDefinition { method, .. }) => {
                format!(
                    "{} {:?} {:?} external={} by_ref={} marshalled={}",
                    method.member.name,
                    method.flags,
                    method.calling_convention,
                    method.is_external,
                    method.return_value_is_by_ref,
                    method.return_value_is_marshalled_explicitly
                )
            }
            Node::MethodReference(reference)
            | Node::SpecializedMethodReference(SpecializedMethodReference { reference, .. }) => {
                format!(
                    "{}`{} {:?} by_ref={}",
                    reference.name,
                    reference.generic_parameter_count,
                    reference.calling_convention,
                    reference.return_value_is_by_ref
                )
            }
            Node::PropertyDefinition(property)
            | Node::SpecializedPropertyDefinition(SpecializedPropertyDefinition {
                property, ..
            }) => format!(
                "{} {:?} by_ref={}",
                property.member.name, property.flags, property.return_value_is_by_ref
            ),
            Node::ParameterDefinition(p) => format!(
                "{}@{} {:?} by_ref={}",
                p.name, p.index, p.flags, p.is_by_reference
            ),
            Node::ParameterTypeInformation(p) => {
                format!("@{} by_ref={}", p.index, p.is_by_reference)
            }
            Node::MethodBody(b) => format!(
                "zero_init={} max_stack={}",
                b.locals_are_zero_initialized, b.max_stack
            ),
            Node::Operation(o) => match &o.value {
                Operand::Node(_) => format!("IL_{:04x} {}", o.offset, o.opcode),
                other => format!("IL_{:04x} {} {:?}", o.offset, o.opcode, other),
            },
            Node::LocalDefinition(l) => format!(
                "{}@{} pinned={} by_ref={}",
                l.name, l.index, l.is_pinned, l.is_reference
            ),
            Node::OperationExceptionInformation(e) => format!(
                "{:?} try={:04x}..{:04x} filter={:04x} handler={:04x}..{:04x}",
                e.handler_kind,
                e.try_start_offset,
                e.try_end_offset,
                e.filter_decision_start_offset,
                e.handler_start_offset,
                e.handler_end_offset
            ),
            Node::MetadataConstant(c) => c.value.to_string(),
            Node::MetadataCreateArray(c) => {
                format!("rank={} sizes={:?} bounds={:?}", c.rank, c.sizes, c.lower_bounds)
            }
            Node::MetadataNamedArgument(n) => {
                format!("{} field={}", n.argument_name, n.is_field)
            }
            Node::SecurityAttribute(s) => format!("{:?}", s.action),
            Node::CustomModifier(c) => format!("optional={}", c.is_optional),
            Node::MarshallingInformation(m) => format!(
                "native=0x{:02x} cookie={:?} subtype={} element=0x{:02x} count={} param={:?}",
                m.unmanaged_type,
                m.custom_marshaller_runtime_argument,
                m.safe_array_element_subtype,
                m.element_type,
                m.number_of_elements,
                m.param_index
            ),
            Node::PlatformInvokeInformation(p) => format!("{} {:?}", p.import_name, p.flags),
            Node::ResourceReference(r) => {
                format!("{} public={} len={}", r.name, r.is_public, r.data.len())
            }
            Node::FileReference(f) => format!(
                "{} metadata={} hash={:02x?}",
                f.name, f.has_metadata, f.hash_value
            ),
            Node::Win32Resource(w) => format!(
                "{}/{} {}/{} lang={} cp={} len={}",
                w.type_id,
                w.type_name,
                w.id,
                w.name,
                w.language_id,
                w.code_page,
                w.data.len()
            ),
            Node::SectionBlock(s) => format!("{:?}+{:x} len={}", s.section, s.offset, s.data.len()),
            other => other.name().unwrap_or_default().to_string(),
        };

        if detail.is_empty() {
            self.kind().name().to_string()
        } else {
            format!("{} {}", self.kind().name(), detail)
        }
    }

    /// Returns every outgoing edge in rewrite slot order.
    ///
    /// Absent slots are reported as [`NodeId::DUMMY`].
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Node::Dummy => {}
            Node::Assembly(a) => {
                out.extend(&a.assembly_attributes);
                out.extend(&a.exported_types);
                out.extend(&a.files);
                out.extend(&a.member_modules);
                out.extend(&a.resources);
                out.extend(&a.security_attributes);
                push_module(&a.module, &mut out);
            }
            Node::Module(m) => push_module(&m.module, &mut out),
            Node::AssemblyReference(r) => out.push(r.resolved_assembly),
            Node::ModuleReference(r) => out.push(r.resolved_module),
            Node::RootNamespace(n) => push_namespace(&n.namespace, &mut out),
            Node::NestedNamespace(n) => {
                push_namespace(&n.namespace, &mut out);
                out.push(n.containing_namespace);
            }
            Node::RootNamespaceReference(r) => out.push(r.unit),
            Node::NestedNamespaceReference(r) => out.push(r.containing_namespace),
            Node::NamespaceAliasForType(a) => {
                push_alias(&a.alias, &mut out);
                out.push(a.containing_namespace);
            }
            Node::NestedAliasForType(a) => {
                push_alias(&a.alias, &mut out);
                out.push(a.containing_alias);
            }
            Node::NamespaceTypeDefinition(t) => {
                push_type_definition(&t.definition, &mut out);
                out.push(t.containing_namespace);
            }
            Node::NestedTypeDefinition(t) => {
                push_type_definition(&t.definition, &mut out);
                out.push(t.containing_type);
            }
            Node::GenericTypeParameter(p) => {
                push_generic_parameter(&p.parameter, &mut out);
                out.push(p.defining_type);
            }
            Node::GenericMethodParameter(p) => {
                push_generic_parameter(&p.parameter, &mut out);
                out.push(p.defining_method);
            }
            Node::NamespaceTypeReference(r) => out.push(r.containing_namespace),
            Node::NestedTypeReference(r) => out.push(r.containing_type),
            Node::SpecializedNestedTypeReference(s) => {
                out.push(s.reference.containing_type);
                out.push(s.unspecialized_version);
            }
            Node::GenericTypeParameterReference(r) => out.push(r.defining_type),
            Node::GenericMethodParameterReference(r) => out.push(r.defining_method),
            Node::GenericTypeInstanceReference(g) => {
                out.push(g.generic_type);
                out.extend(&g.generic_arguments);
            }
            Node::VectorTypeReference(v) => out.push(v.element_type),
            Node::MatrixTypeReference(m) => out.push(m.element_type),
            Node::PointerTypeReference(p) => out.push(p.target_type),
            Node::ManagedPointerTypeReference(p) => out.push(p.target_type),
            Node::FunctionPointerTypeReference(f) => {
                out.extend(&f.parameters);
                out.extend(&f.extra_argument_types);
                out.extend(&f.return_value_custom_modifiers);
                out.push(f.return_type);
            }
            Node::ModifiedTypeReference(m) => {
                out.extend(&m.custom_modifiers);
                out.push(m.unmodified_type);
            }
            Node::FieldDefinition(f) => push_field(f, &mut out),
            Node::GlobalFieldDefinition(g) => {
                push_field(&g.field, &mut out);
                out.push(g.containing_namespace);
            }
            Node::SpecializedFieldDefinition(s) => {
                push_field(&s.field, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::FieldReference(r) => push_field_reference(r, &mut out),
            Node::SpecializedFieldReference(s) => {
                push_field_reference(&s.reference, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::MethodDefinition(m) => push_method(m, &mut out),
            Node::GlobalMethodDefinition(g) => {
                push_method(&g.method, &mut out);
                out.push(g.containing_namespace);
            }
            Node::SpecializedMethodDefinition(s) => {
                push_method(&s.method, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::MethodReference(r) => push_method_reference(r, &mut out),
            Node::SpecializedMethodReference(s) => {
                push_method_reference(&s.reference, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::GenericMethodInstanceReference(g) => {
                out.push(g.generic_method);
                out.extend(&g.generic_arguments);
            }
            Node::PropertyDefinition(p) => push_property(p, &mut out),
            Node::SpecializedPropertyDefinition(s) => {
                push_property(&s.property, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::EventDefinition(e) => push_event(e, &mut out),
            Node::SpecializedEventDefinition(s) => {
                push_event(&s.event, &mut out);
                out.push(s.unspecialized_version);
            }
            Node::ParameterDefinition(p) => {
                out.extend(&p.attributes);
                out.push(p.containing_signature);
                out.push(p.default_value);
                out.extend(&p.custom_modifiers);
                out.push(p.marshalling_information);
                out.push(p.parameter_type);
            }
            Node::ParameterTypeInformation(p) => {
                out.extend(&p.custom_modifiers);
                out.push(p.containing_signature);
                out.push(p.parameter_type);
            }
            Node::MethodImplementation(m) => {
                out.push(m.containing_type);
                out.push(m.implemented_method);
                out.push(m.implementing_method);
            }
            Node::MethodBody(b) => {
                out.push(b.method_definition);
                out.extend(&b.local_variables);
                out.extend(&b.operations);
                out.extend(&b.exception_information);
            }
            Node::Operation(o) => {
                if let Some(id) = o.value.node() {
                    out.push(id);
                }
            }
            Node::LocalDefinition(l) => {
                out.extend(&l.custom_modifiers);
                out.push(l.local_type);
                out.push(l.method_definition);
            }
            Node::OperationExceptionInformation(e) => out.push(e.exception_type),
            Node::MetadataConstant(c) => out.push(c.constant_type),
            Node::MetadataCreateArray(c) => {
                out.push(c.element_type);
                out.extend(&c.initializers);
                out.push(c.array_type);
            }
            Node::MetadataTypeOf(t) => {
                out.push(t.type_to_get);
                out.push(t.expression_type);
            }
            Node::MetadataNamedArgument(n) => {
                out.push(n.argument_value);
                out.push(n.argument_type);
            }
            Node::CustomAttribute(c) => {
                out.extend(&c.arguments);
                out.push(c.constructor);
                out.extend(&c.named_arguments);
            }
            Node::SecurityAttribute(s) => out.extend(&s.attributes),
            Node::CustomModifier(c) => out.push(c.modifier),
            Node::MarshallingInformation(m) => {
                out.push(m.custom_marshaller);
                out.push(m.safe_array_element_user_defined_subtype);
            }
            Node::PlatformInvokeInformation(p) => out.push(p.import_module),
            Node::ResourceReference(r) => {
                out.extend(&r.attributes);
                out.push(r.defining_assembly);
            }
            Node::FileReference(_) | Node::Win32Resource(_) | Node::SectionBlock(_) => {}
        }
        out
    }
}
