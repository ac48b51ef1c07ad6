//! Routing of nodes known only by their broad category to the per-kind operations.
//!
//! Each function classifies the node through the matching [`NodeKind`] classifier and calls
//! exactly one [`Rewriter`] method. The classifiers are exhaustive, so every kind of the
//! catalog either has a route or is reported as not belonging to the category.
//!
//! Definitions found in reference position are *nominal*: the slot receives the definition's
//! own working copy and the definition's children are left to its container. Specialized
//! definitions are the exception, they only exist as views and are rewritten where found.

use crate::{
    metadata::{
        kinds::{
            ExpressionKind, FieldReferenceKind, MethodReferenceKind, NamespaceMemberKind, NodeKind,
            OperandKind, TypeMemberKind, TypeReferenceKind, UnitNamespaceReferenceKind,
            UnitReferenceKind,
        },
        node_id::NodeId,
    },
    rewriter::Rewriter,
    Result,
};

fn kind_of<R: Rewriter + ?Sized>(rw: &R, id: NodeId) -> Result<Option<NodeKind>> {
    if id.is_dummy() || rw.context().is_stopped() {
        return Ok(None);
    }
    Ok(Some(rw.context().graph().kind(id)?))
}

/// Routes a node of any kind to its own rewrite operation.
///
/// # Errors
/// Propagates the errors of the selected operation.
pub fn rewrite_any<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind {
        NodeKind::Dummy => Ok(id),
        NodeKind::Assembly => rw.rewrite_assembly(id),
        NodeKind::Module => rw.rewrite_module(id),
        NodeKind::AssemblyReference => rw.rewrite_assembly_reference(id),
        NodeKind::ModuleReference => rw.rewrite_module_reference(id),
        NodeKind::RootNamespace => rw.rewrite_root_namespace(id),
        NodeKind::NestedNamespace => rw.rewrite_nested_namespace(id),
        NodeKind::RootNamespaceReference => rw.rewrite_root_namespace_reference(id),
        NodeKind::NestedNamespaceReference => rw.rewrite_nested_namespace_reference(id),
        NodeKind::NamespaceAliasForType => rw.rewrite_namespace_alias_for_type(id),
        NodeKind::NestedAliasForType => rw.rewrite_nested_alias_for_type(id),
        NodeKind::NamespaceTypeDefinition => rw.rewrite_namespace_type_definition(id),
        NodeKind::NestedTypeDefinition => rw.rewrite_nested_type_definition(id),
        NodeKind::GenericTypeParameter => rw.rewrite_generic_type_parameter(id),
        NodeKind::GenericMethodParameter => rw.rewrite_generic_method_parameter(id),
        NodeKind::NamespaceTypeReference => rw.rewrite_namespace_type_reference(id),
        NodeKind::NestedTypeReference => rw.rewrite_nested_type_reference(id),
        NodeKind::SpecializedNestedTypeReference => {
            rw.rewrite_specialized_nested_type_reference(id)
        }
        NodeKind::GenericTypeParameterReference => rw.rewrite_generic_type_parameter_reference(id),
        NodeKind::GenericMethodParameterReference => {
            rw.rewrite_generic_method_parameter_reference(id)
        }
        NodeKind::GenericTypeInstanceReference => rw.rewrite_generic_type_instance_reference(id),
        NodeKind::VectorTypeReference => rw.rewrite_vector_type_reference(id),
        NodeKind::MatrixTypeReference => rw.rewrite_matrix_type_reference(id),
        NodeKind::PointerTypeReference => rw.rewrite_pointer_type_reference(id),
        NodeKind::ManagedPointerTypeReference => rw.rewrite_managed_pointer_type_reference(id),
        NodeKind::FunctionPointerTypeReference => rw.rewrite_function_pointer_type_reference(id),
        NodeKind::ModifiedTypeReference => rw.rewrite_modified_type_reference(id),
        NodeKind::FieldDefinition => rw.rewrite_field_definition(id),
        NodeKind::GlobalFieldDefinition => rw.rewrite_global_field_definition(id),
        NodeKind::SpecializedFieldDefinition => rw.rewrite_specialized_field_definition(id),
        NodeKind::FieldReference => rw.rewrite_plain_field_reference(id),
        NodeKind::SpecializedFieldReference => rw.rewrite_specialized_field_reference(id),
        NodeKind::MethodDefinition => rw.rewrite_method_definition(id),
        NodeKind::GlobalMethodDefinition => rw.rewrite_global_method_definition(id),
        NodeKind::SpecializedMethodDefinition => rw.rewrite_specialized_method_definition(id),
        NodeKind::MethodReference => rw.rewrite_plain_method_reference(id),
        NodeKind::SpecializedMethodReference => rw.rewrite_specialized_method_reference(id),
        NodeKind::GenericMethodInstanceReference => {
            rw.rewrite_generic_method_instance_reference(id)
        }
        NodeKind::PropertyDefinition => rw.rewrite_property_definition(id),
        NodeKind::SpecializedPropertyDefinition => rw.rewrite_specialized_property_definition(id),
        NodeKind::EventDefinition => rw.rewrite_event_definition(id),
        NodeKind::SpecializedEventDefinition => rw.rewrite_specialized_event_definition(id),
        NodeKind::ParameterDefinition => rw.rewrite_parameter_definition(id),
        NodeKind::ParameterTypeInformation => rw.rewrite_parameter_type_information(id),
        NodeKind::MethodImplementation => rw.rewrite_method_implementation(id),
        NodeKind::MethodBody => rw.rewrite_method_body(id),
        NodeKind::Operation => rw.rewrite_operation(id),
        NodeKind::LocalDefinition => rw.rewrite_local_definition(id),
        NodeKind::OperationExceptionInformation => rw.rewrite_operation_exception_information(id),
        NodeKind::MetadataConstant => rw.rewrite_metadata_constant(id),
        NodeKind::MetadataCreateArray => rw.rewrite_metadata_create_array(id),
        NodeKind::MetadataTypeOf => rw.rewrite_metadata_type_of(id),
        NodeKind::MetadataNamedArgument => rw.rewrite_metadata_named_argument(id),
        NodeKind::CustomAttribute => rw.rewrite_custom_attribute(id),
        NodeKind::SecurityAttribute => rw.rewrite_security_attribute(id),
        NodeKind::CustomModifier => rw.rewrite_custom_modifier(id),
        NodeKind::MarshallingInformation => rw.rewrite_marshalling_information(id),
        NodeKind::PlatformInvokeInformation => rw.rewrite_platform_invoke_information(id),
        NodeKind::ResourceReference => rw.rewrite_resource_reference(id),
        NodeKind::FileReference => rw.rewrite_file_reference(id),
        NodeKind::Win32Resource => rw.rewrite_win32_resource(id),
        NodeKind::SectionBlock => rw.rewrite_section_block(id),
    }
}

/// Routes a node found in a type slot.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not a type
/// reference fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_type_reference() {
        Some(
            TypeReferenceKind::NamespaceTypeDefinition
            | TypeReferenceKind::NestedTypeDefinition
            | TypeReferenceKind::GenericTypeParameter
            | TypeReferenceKind::GenericMethodParameter,
        ) => rw.rewrite_definition_reference(id),
        Some(TypeReferenceKind::NamespaceTypeReference) => rw.rewrite_namespace_type_reference(id),
        Some(TypeReferenceKind::NestedTypeReference) => rw.rewrite_nested_type_reference(id),
        Some(TypeReferenceKind::SpecializedNestedTypeReference) => {
            rw.rewrite_specialized_nested_type_reference(id)
        }
        Some(TypeReferenceKind::GenericTypeParameterReference) => {
            rw.rewrite_generic_type_parameter_reference(id)
        }
        Some(TypeReferenceKind::GenericMethodParameterReference) => {
            rw.rewrite_generic_method_parameter_reference(id)
        }
        Some(TypeReferenceKind::GenericTypeInstance) => {
            rw.rewrite_generic_type_instance_reference(id)
        }
        Some(TypeReferenceKind::Vector) => rw.rewrite_vector_type_reference(id),
        Some(TypeReferenceKind::Matrix) => rw.rewrite_matrix_type_reference(id),
        Some(TypeReferenceKind::Pointer) => rw.rewrite_pointer_type_reference(id),
        Some(TypeReferenceKind::ManagedPointer) => rw.rewrite_managed_pointer_type_reference(id),
        Some(TypeReferenceKind::FunctionPointer) => {
            rw.rewrite_function_pointer_type_reference(id)
        }
        Some(TypeReferenceKind::Modified) => rw.rewrite_modified_type_reference(id),
        None => rw.context_mut().unrecognized(id, "type reference"),
    }
}

/// Routes a node found in a field slot.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not a field
/// reference fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_field_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_field_reference() {
        Some(FieldReferenceKind::Definition | FieldReferenceKind::GlobalDefinition) => {
            rw.rewrite_definition_reference(id)
        }
        Some(FieldReferenceKind::SpecializedDefinition) => {
            rw.rewrite_specialized_field_definition(id)
        }
        Some(FieldReferenceKind::Reference) => rw.rewrite_plain_field_reference(id),
        Some(FieldReferenceKind::SpecializedReference) => {
            rw.rewrite_specialized_field_reference(id)
        }
        None => rw.context_mut().unrecognized(id, "field reference"),
    }
}

/// Routes a node found in a method slot.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not a
/// method reference fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_method_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_method_reference() {
        Some(MethodReferenceKind::Definition | MethodReferenceKind::GlobalDefinition) => {
            rw.rewrite_definition_reference(id)
        }
        Some(MethodReferenceKind::SpecializedDefinition) => {
            rw.rewrite_specialized_method_definition(id)
        }
        Some(MethodReferenceKind::Reference) => rw.rewrite_plain_method_reference(id),
        Some(MethodReferenceKind::SpecializedReference) => {
            rw.rewrite_specialized_method_reference(id)
        }
        Some(MethodReferenceKind::GenericInstance) => {
            rw.rewrite_generic_method_instance_reference(id)
        }
        None => rw.context_mut().unrecognized(id, "method reference"),
    }
}

/// Routes a member of a namespace.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that can not be a
/// namespace member fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_namespace_member<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_namespace_member() {
        Some(NamespaceMemberKind::NamespaceType) => rw.rewrite_namespace_type_definition(id),
        Some(NamespaceMemberKind::NestedNamespace) => rw.rewrite_nested_namespace(id),
        Some(NamespaceMemberKind::GlobalMethod) => rw.rewrite_global_method_definition(id),
        Some(NamespaceMemberKind::GlobalField) => rw.rewrite_global_field_definition(id),
        Some(NamespaceMemberKind::NamespaceAlias) => rw.rewrite_namespace_alias_for_type(id),
        None => rw.context_mut().unrecognized(id, "namespace member"),
    }
}

/// Routes a member of a type definition.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that can not be a
/// type member fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_type_member<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_type_member() {
        Some(TypeMemberKind::Event) => rw.rewrite_event_definition(id),
        Some(TypeMemberKind::Field) => rw.rewrite_field_definition(id),
        Some(TypeMemberKind::Method) => rw.rewrite_method_definition(id),
        Some(TypeMemberKind::NestedType) => rw.rewrite_nested_type_definition(id),
        Some(TypeMemberKind::Property) => rw.rewrite_property_definition(id),
        Some(TypeMemberKind::SpecializedEvent) => rw.rewrite_specialized_event_definition(id),
        Some(TypeMemberKind::SpecializedField) => rw.rewrite_specialized_field_definition(id),
        Some(TypeMemberKind::SpecializedMethod) => rw.rewrite_specialized_method_definition(id),
        Some(TypeMemberKind::SpecializedProperty) => {
            rw.rewrite_specialized_property_definition(id)
        }
        None => rw.context_mut().unrecognized(id, "type member"),
    }
}

/// Routes the namespace slot of a namespace type reference or namespace back-link.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not a
/// namespace fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_unit_namespace_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_unit_namespace_reference() {
        Some(
            UnitNamespaceReferenceKind::RootNamespace
            | UnitNamespaceReferenceKind::NestedNamespace,
        ) => rw.rewrite_definition_reference(id),
        Some(UnitNamespaceReferenceKind::RootNamespaceReference) => {
            rw.rewrite_root_namespace_reference(id)
        }
        Some(UnitNamespaceReferenceKind::NestedNamespaceReference) => {
            rw.rewrite_nested_namespace_reference(id)
        }
        None => rw.context_mut().unrecognized(id, "unit namespace reference"),
    }
}

/// Routes a node found in a unit slot.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not a unit
/// fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_unit_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_unit_reference() {
        Some(UnitReferenceKind::Assembly | UnitReferenceKind::Module) => {
            rw.rewrite_definition_reference(id)
        }
        Some(UnitReferenceKind::AssemblyReference) => rw.rewrite_assembly_reference(id),
        Some(UnitReferenceKind::ModuleReference) => rw.rewrite_module_reference(id),
        None => rw.context_mut().unrecognized(id, "unit reference"),
    }
}

/// Routes a metadata expression.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not an
/// expression fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_expression<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_expression() {
        Some(ExpressionKind::Constant) => rw.rewrite_metadata_constant(id),
        Some(ExpressionKind::CreateArray) => rw.rewrite_metadata_create_array(id),
        Some(ExpressionKind::TypeOf) => rw.rewrite_metadata_type_of(id),
        Some(ExpressionKind::NamedArgument) => rw.rewrite_metadata_named_argument(id),
        None => rw.context_mut().unrecognized(id, "metadata expression"),
    }
}

/// Routes the operand of an operation.
///
/// Locals and parameters belong to the enclosing body and signature; the operand receives
/// their working copy when one exists and is left alone otherwise.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that can not be an
/// operand fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_operand<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind.as_operand() {
        Some(OperandKind::Type(_)) => rw.rewrite_type_reference(id),
        Some(OperandKind::Field(_)) => rw.rewrite_field_reference(id),
        Some(OperandKind::Method(_)) => rw.rewrite_method_reference(id),
        Some(OperandKind::Parameter | OperandKind::Local) => {
            Ok(rw.context_mut().cached_or_unchanged(id))
        }
        None => rw.context_mut().unrecognized(id, "operand"),
    }
}

/// Routes an exported type alias.
///
/// # Errors
/// Propagates the errors of the selected operation; in strict mode a node that is not an
/// alias fails with [`crate::Error::UnexpectedKind`].
pub fn rewrite_alias<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let Some(kind) = kind_of(rw, id)? else {
        return Ok(id);
    };

    match kind {
        NodeKind::NamespaceAliasForType => rw.rewrite_namespace_alias_for_type(id),
        NodeKind::NestedAliasForType => rw.rewrite_nested_alias_for_type(id),
        _ => rw.context_mut().unrecognized(id, "alias for type"),
    }
}
