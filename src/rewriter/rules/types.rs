//! Rules for type definitions, generic parameters and every type reference shape.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::types::{
            FunctionPointerTypeReference, GenericMethodParameter, GenericMethodParameterReference,
            GenericParameterCore, GenericTypeInstanceReference, GenericTypeParameter,
            GenericTypeParameterReference, ManagedPointerTypeReference, MatrixTypeReference,
            ModifiedTypeReference, NamespaceTypeDefinition, NamespaceTypeReference,
            NestedTypeDefinition, NestedTypeReference, PointerTypeReference,
            SpecializedNestedTypeReference, TypeDefinitionCore, VectorTypeReference,
        },
    },
    rewriter::{
        rules::{map_list, map_required, visit, visit_pure},
        specialized, Rewriter,
    },
    Result,
};

/// Rewrites a top-level type definition and records it for the module's flat type list.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_namespace_type_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    let rewritten = visit(rw, id, |rw, copy| {
        walk_type_definition_slots(rw, copy)?;
        let namespace = read_node!(rw, NamespaceTypeDefinition, copy)?.containing_namespace;
        write_slot!(rw, NamespaceTypeDefinition, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(namespace)?);
        Ok(())
    })?;
    if !id.is_dummy() {
        rw.context_mut().note_type(id, rewritten);
    }
    Ok(rewritten)
}

/// Rewrites a nested type definition and records it for the module's flat type list.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_nested_type_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    let rewritten = visit(rw, id, |rw, copy| {
        walk_type_definition_slots(rw, copy)?;
        let containing_type = read_node!(rw, NestedTypeDefinition, copy)?.containing_type;
        write_slot!(rw, NestedTypeDefinition, copy,
            containing_type = rw.rewrite_type_reference(containing_type)?);
        Ok(())
    })?;
    if !id.is_dummy() {
        rw.context_mut().note_type(id, rewritten);
    }
    Ok(rewritten)
}

// Private helper members are left alone here; the enclosing module rewrites them once every
// regular member of every type is done.
fn walk_type_definition_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let definition = read_node!(rw, TypeDefinitionCore, copy)?.clone();

    write_slot!(rw, TypeDefinitionCore, copy,
        attributes = rw.rewrite_custom_attributes(&definition.attributes)?);
    write_slot!(rw, TypeDefinitionCore, copy,
        base_classes = rw.rewrite_type_references(&definition.base_classes)?);
    write_slot!(rw, TypeDefinitionCore, copy,
        explicit_implementation_overrides = rw.rewrite_method_implementations(
            &definition.explicit_implementation_overrides,
        )?);
    write_slot!(rw, TypeDefinitionCore, copy,
        generic_parameters = rw.rewrite_generic_type_parameters(&definition.generic_parameters)?);
    write_slot!(rw, TypeDefinitionCore, copy,
        interfaces = rw.rewrite_type_references(&definition.interfaces)?);
    write_slot!(rw, TypeDefinitionCore, copy, events = rw.rewrite_events(&definition.events)?);
    write_slot!(rw, TypeDefinitionCore, copy, fields = rw.rewrite_fields(&definition.fields)?);
    write_slot!(rw, TypeDefinitionCore, copy, methods = rw.rewrite_methods(&definition.methods)?);
    write_slot!(rw, TypeDefinitionCore, copy,
        nested_types = rw.rewrite_nested_types(&definition.nested_types)?);
    write_slot!(rw, TypeDefinitionCore, copy,
        properties = rw.rewrite_properties(&definition.properties)?);

    if definition.has_declarative_security() {
        write_slot!(rw, TypeDefinitionCore, copy,
            security_attributes = rw.rewrite_security_attributes(&definition.security_attributes)?);
    }
    if definition.is_enum {
        write_slot!(rw, TypeDefinitionCore, copy,
            underlying_type = rw.rewrite_type_reference(definition.underlying_type)?);
    }
    Ok(())
}

fn walk_generic_parameter_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let parameter = read_node!(rw, GenericParameterCore, copy)?.clone();
    write_slot!(rw, GenericParameterCore, copy,
        attributes = rw.rewrite_custom_attributes(&parameter.attributes)?);
    write_slot!(rw, GenericParameterCore, copy,
        constraints = rw.rewrite_type_references(&parameter.constraints)?);
    Ok(())
}

/// Rewrites a generic parameter declared by a type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_type_parameter<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_generic_parameter_slots(rw, copy)?;
        let defining_type = read_node!(rw, GenericTypeParameter, copy)?.defining_type;
        write_slot!(rw, GenericTypeParameter, copy,
            defining_type = rw.rewrite_type_reference(defining_type)?);
        Ok(())
    })
}

/// Rewrites a generic parameter declared by a method.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_method_parameter<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_generic_parameter_slots(rw, copy)?;
        let defining_method = read_node!(rw, GenericMethodParameter, copy)?.defining_method;
        write_slot!(rw, GenericMethodParameter, copy,
            defining_method = rw.rewrite_method_reference(defining_method)?);
        Ok(())
    })
}

/// Rewrites a reference to a top-level type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_namespace_type_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let namespace = read_node!(rw, NamespaceTypeReference, copy)?.containing_namespace;
        write_slot!(rw, NamespaceTypeReference, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(namespace)?);
        Ok(())
    })
}

fn walk_nested_type_reference_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let containing_type = read_node!(rw, NestedTypeReference, copy)?.containing_type;
    write_slot!(rw, NestedTypeReference, copy,
        containing_type = rw.rewrite_type_reference(containing_type)?);
    Ok(())
}

/// Rewrites a reference to a nested type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_nested_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_nested_type_reference_slots)
}

/// Rewrites a nested type seen through a generic instance of its container, then its generic
/// original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_nested_type_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit_pure(rw, id, |rw, copy| {
        walk_nested_type_reference_slots(rw, copy)?;
        specialized::resolve::<SpecializedNestedTypeReference, _>(rw, copy)
    })
}

/// Rewrites a reference to a type's generic parameter.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_type_parameter_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let defining_type = read_node!(rw, GenericTypeParameterReference, copy)?.defining_type;
        write_slot!(rw, GenericTypeParameterReference, copy,
            defining_type = rw.rewrite_type_reference(defining_type)?);
        Ok(())
    })
}

/// Rewrites a reference to a method's generic parameter.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_method_parameter_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let defining_method =
            read_node!(rw, GenericMethodParameterReference, copy)?.defining_method;
        write_slot!(rw, GenericMethodParameterReference, copy,
            defining_method = rw.rewrite_method_reference(defining_method)?);
        Ok(())
    })
}

/// Rewrites a generic type instantiation. Returns the instance itself when neither the
/// arguments nor the generic type changed.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_type_instance_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit_pure(rw, id, |rw, copy| {
        let instance = read_node!(rw, GenericTypeInstanceReference, copy)?.clone();
        write_slot!(rw, GenericTypeInstanceReference, copy,
            generic_arguments = rw.rewrite_type_references(&instance.generic_arguments)?);
        write_slot!(rw, GenericTypeInstanceReference, copy,
            generic_type = rw.rewrite_type_reference(instance.generic_type)?);
        Ok(())
    })
}

/// Rewrites a single-dimensional zero-based array type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_vector_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let element_type = read_node!(rw, VectorTypeReference, copy)?.element_type;
        write_slot!(rw, VectorTypeReference, copy,
            element_type = rw.rewrite_type_reference(element_type)?);
        Ok(())
    })
}

/// Rewrites a multi-dimensional array type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_matrix_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let element_type = read_node!(rw, MatrixTypeReference, copy)?.element_type;
        write_slot!(rw, MatrixTypeReference, copy,
            element_type = rw.rewrite_type_reference(element_type)?);
        Ok(())
    })
}

/// Rewrites an unmanaged pointer type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_pointer_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let target_type = read_node!(rw, PointerTypeReference, copy)?.target_type;
        write_slot!(rw, PointerTypeReference, copy,
            target_type = rw.rewrite_type_reference(target_type)?);
        Ok(())
    })
}

/// Rewrites a managed pointer type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_managed_pointer_type_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let target_type = read_node!(rw, ManagedPointerTypeReference, copy)?.target_type;
        write_slot!(rw, ManagedPointerTypeReference, copy,
            target_type = rw.rewrite_type_reference(target_type)?);
        Ok(())
    })
}

/// Rewrites a function pointer signature.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_function_pointer_type_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let pointer = read_node!(rw, FunctionPointerTypeReference, copy)?.clone();
        write_slot!(rw, FunctionPointerTypeReference, copy,
            parameters = rw.rewrite_parameter_type_informations(&pointer.parameters)?);
        write_slot!(rw, FunctionPointerTypeReference, copy,
            extra_argument_types = rw.rewrite_type_references(&pointer.extra_argument_types)?);
        write_slot!(rw, FunctionPointerTypeReference, copy,
            return_value_custom_modifiers =
                rw.rewrite_custom_modifiers(&pointer.return_value_custom_modifiers)?);
        write_slot!(rw, FunctionPointerTypeReference, copy,
            return_type = rw.rewrite_type_reference(pointer.return_type)?);
        Ok(())
    })
}

/// Rewrites a type carrying custom modifiers.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_modified_type_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let modified = read_node!(rw, ModifiedTypeReference, copy)?.clone();
        write_slot!(rw, ModifiedTypeReference, copy,
            custom_modifiers = rw.rewrite_custom_modifiers(&modified.custom_modifiers)?);
        write_slot!(rw, ModifiedTypeReference, copy,
            unmodified_type = rw.rewrite_type_reference(modified.unmodified_type)?);
        Ok(())
    })
}

/// Rewrites a list of type references of any shape.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_type_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_type_reference(item))
}

/// Rewrites the generic parameters declared by a type.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not type generic parameters.
pub fn walk_generic_type_parameters<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::GenericTypeParameter,
        "type generic parameters",
        |rw, item| rw.rewrite_generic_type_parameter(item),
    )
}

/// Rewrites the generic parameters declared by a method.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not method generic parameters.
pub fn walk_generic_method_parameters<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::GenericMethodParameter,
        "method generic parameters",
        |rw, item| rw.rewrite_generic_method_parameter(item),
    )
}

/// Rewrites the nested types of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not nested type definitions.
pub fn walk_nested_types<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::NestedTypeDefinition,
        "nested types",
        |rw, item| rw.rewrite_nested_type_definition(item),
    )
}
