//! Rules for fields, methods, properties, events, parameters and their references.
//!
//! Global and specialized definitions embed the plain definition payload, so each family
//! shares one slot walker and adds its own back-link afterwards.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::members::{
            EventDefinition, FieldDefinition, FieldReference, GenericMethodInstanceReference,
            GlobalFieldDefinition, GlobalMethodDefinition, MemberCore, MethodDefinition,
            MethodImplementation, MethodReference, ParameterDefinition, ParameterTypeInformation,
            PropertyDefinition, SpecializedEventDefinition, SpecializedFieldDefinition,
            SpecializedFieldReference, SpecializedMethodDefinition, SpecializedMethodReference,
            SpecializedPropertyDefinition,
        },
    },
    rewriter::{
        rules::{map_list, map_required, require, visit, visit_pure},
        specialized, Rewriter,
    },
    Result,
};

fn walk_member_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let member = read_node!(rw, MemberCore, copy)?.clone();
    write_slot!(rw, MemberCore, copy,
        attributes = rw.rewrite_custom_attributes(&member.attributes)?);
    write_slot!(rw, MemberCore, copy,
        containing_type = rw.rewrite_type_reference(member.containing_type)?);
    Ok(())
}

// The signature a parameter belongs to is the innermost signature on the path; a parameter
// reached on its own keeps whatever the pass made of its original owner.
fn containing_signature<R: Rewriter + ?Sized>(rw: &mut R, original: NodeId) -> NodeId {
    let current = rw.current_signature();
    if current.is_dummy() {
        rw.context_mut().cached_or_unchanged(original)
    } else {
        current
    }
}

fn walk_field_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    walk_member_slots(rw, copy)?;
    let field = read_node!(rw, FieldDefinition, copy)?.clone();

    if field.is_compile_time_constant() {
        write_slot!(rw, FieldDefinition, copy,
            compile_time_value = rw.rewrite_expression(field.compile_time_value)?);
    }
    if field.is_mapped() {
        write_slot!(rw, FieldDefinition, copy,
            field_mapping = rw.rewrite_section_block(field.field_mapping)?);
    }
    if field.is_marshalled_explicitly() {
        write_slot!(rw, FieldDefinition, copy,
            marshalling_information =
                rw.rewrite_marshalling_information(field.marshalling_information)?);
    }
    write_slot!(rw, FieldDefinition, copy,
        field_type = rw.rewrite_type_reference(field.field_type)?);
    Ok(())
}

/// Rewrites a field declared by a type.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_field_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_field_slots)
}

/// Rewrites a field declared at namespace level.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_global_field_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_field_slots(rw, copy)?;
        let namespace = read_node!(rw, GlobalFieldDefinition, copy)?.containing_namespace;
        write_slot!(rw, GlobalFieldDefinition, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(namespace)?);
        Ok(())
    })
}

/// Rewrites a field of a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_field_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_field_slots(rw, copy)?;
        specialized::resolve::<SpecializedFieldDefinition, _>(rw, copy)
    })
}

fn walk_field_reference_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let reference = read_node!(rw, FieldReference, copy)?.clone();
    write_slot!(rw, FieldReference, copy,
        containing_type = rw.rewrite_type_reference(reference.containing_type)?);
    write_slot!(rw, FieldReference, copy,
        field_type = rw.rewrite_type_reference(reference.field_type)?);
    Ok(())
}

/// Rewrites a reference to a field.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_field_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_field_reference_slots)
}

/// Rewrites a field reference seen through a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_field_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit_pure(rw, id, |rw, copy| {
        walk_field_reference_slots(rw, copy)?;
        specialized::resolve::<SpecializedFieldReference, _>(rw, copy)
    })
}

fn walk_method_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    walk_member_slots(rw, copy)?;
    let method = read_node!(rw, MethodDefinition, copy)?.clone();

    if method.is_generic() {
        write_slot!(rw, MethodDefinition, copy,
            generic_parameters = rw.rewrite_generic_method_parameters(&method.generic_parameters)?);
    }
    write_slot!(rw, MethodDefinition, copy,
        parameters = rw.rewrite_parameters(&method.parameters)?);
    if method.is_platform_invoke() {
        write_slot!(rw, MethodDefinition, copy,
            platform_invoke_data =
                rw.rewrite_platform_invoke_information(method.platform_invoke_data)?);
    }
    write_slot!(rw, MethodDefinition, copy,
        return_value_attributes = rw.rewrite_custom_attributes(&method.return_value_attributes)?);
    if method.return_value_is_modified() {
        write_slot!(rw, MethodDefinition, copy,
            return_value_custom_modifiers =
                rw.rewrite_custom_modifiers(&method.return_value_custom_modifiers)?);
    }
    if method.return_value_is_marshalled_explicitly {
        write_slot!(rw, MethodDefinition, copy,
            return_value_marshalling_information = rw.rewrite_marshalling_information(
                method.return_value_marshalling_information,
            )?);
    }
    if method.has_declarative_security() {
        write_slot!(rw, MethodDefinition, copy,
            security_attributes = rw.rewrite_security_attributes(&method.security_attributes)?);
    }
    write_slot!(rw, MethodDefinition, copy,
        return_type = rw.rewrite_type_reference(method.return_type)?);
    if method.has_body() {
        write_slot!(rw, MethodDefinition, copy, body = rw.rewrite_method_body(method.body)?);
    }
    Ok(())
}

/// Rewrites a method declared by a type. Abstract and external methods keep their body slot.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_method_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_method_slots)
}

/// Rewrites a method declared at namespace level.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_global_method_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_method_slots(rw, copy)?;
        let namespace = read_node!(rw, GlobalMethodDefinition, copy)?.containing_namespace;
        write_slot!(rw, GlobalMethodDefinition, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(namespace)?);
        Ok(())
    })
}

/// Rewrites a method of a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_method_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_method_slots(rw, copy)?;
        specialized::resolve::<SpecializedMethodDefinition, _>(rw, copy)
    })
}

fn walk_method_reference_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let reference = read_node!(rw, MethodReference, copy)?.clone();
    write_slot!(rw, MethodReference, copy,
        containing_type = rw.rewrite_type_reference(reference.containing_type)?);
    write_slot!(rw, MethodReference, copy,
        extra_parameters = rw.rewrite_parameter_type_informations(&reference.extra_parameters)?);
    write_slot!(rw, MethodReference, copy,
        parameters = rw.rewrite_parameter_type_informations(&reference.parameters)?);
    if reference.return_value_is_modified() {
        write_slot!(rw, MethodReference, copy,
            return_value_custom_modifiers =
                rw.rewrite_custom_modifiers(&reference.return_value_custom_modifiers)?);
    }
    write_slot!(rw, MethodReference, copy,
        return_type = rw.rewrite_type_reference(reference.return_type)?);
    Ok(())
}

/// Rewrites a reference to a method.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_method_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_method_reference_slots)
}

/// Rewrites a method reference seen through a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_method_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit_pure(rw, id, |rw, copy| {
        walk_method_reference_slots(rw, copy)?;
        specialized::resolve::<SpecializedMethodReference, _>(rw, copy)
    })
}

/// Rewrites a generic method instantiation. Returns the instance itself when neither the
/// arguments nor the generic method changed.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_generic_method_instance_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit_pure(rw, id, |rw, copy| {
        let instance = read_node!(rw, GenericMethodInstanceReference, copy)?.clone();
        write_slot!(rw, GenericMethodInstanceReference, copy,
            generic_arguments = rw.rewrite_type_references(&instance.generic_arguments)?);
        write_slot!(rw, GenericMethodInstanceReference, copy,
            generic_method = rw.rewrite_method_reference(instance.generic_method)?);
        Ok(())
    })
}

fn walk_property_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    walk_member_slots(rw, copy)?;
    let property = read_node!(rw, PropertyDefinition, copy)?.clone();

    write_slot!(rw, PropertyDefinition, copy,
        accessors = rw.rewrite_method_references(&property.accessors)?);
    if property.has_default_value() {
        write_slot!(rw, PropertyDefinition, copy,
            default_value = rw.rewrite_expression(property.default_value)?);
    }
    write_slot!(rw, PropertyDefinition, copy,
        getter = rw.rewrite_method_reference(property.getter)?);
    write_slot!(rw, PropertyDefinition, copy,
        parameters = rw.rewrite_parameters(&property.parameters)?);
    write_slot!(rw, PropertyDefinition, copy,
        return_value_attributes = rw.rewrite_custom_attributes(&property.return_value_attributes)?);
    if property.return_value_is_modified() {
        write_slot!(rw, PropertyDefinition, copy,
            return_value_custom_modifiers =
                rw.rewrite_custom_modifiers(&property.return_value_custom_modifiers)?);
    }
    write_slot!(rw, PropertyDefinition, copy,
        setter = rw.rewrite_method_reference(property.setter)?);
    write_slot!(rw, PropertyDefinition, copy,
        property_type = rw.rewrite_type_reference(property.property_type)?);
    Ok(())
}

/// Rewrites a property.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_property_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_property_slots)
}

/// Rewrites a property of a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_property_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_property_slots(rw, copy)?;
        specialized::resolve::<SpecializedPropertyDefinition, _>(rw, copy)
    })
}

fn walk_event_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    walk_member_slots(rw, copy)?;
    let event = read_node!(rw, EventDefinition, copy)?.clone();

    write_slot!(rw, EventDefinition, copy,
        accessors = rw.rewrite_method_references(&event.accessors)?);
    write_slot!(rw, EventDefinition, copy, adder = rw.rewrite_method_reference(event.adder)?);
    if !event.caller.is_dummy() {
        write_slot!(rw, EventDefinition, copy, caller = rw.rewrite_method_reference(event.caller)?);
    }
    write_slot!(rw, EventDefinition, copy, remover = rw.rewrite_method_reference(event.remover)?);
    write_slot!(rw, EventDefinition, copy,
        event_type = rw.rewrite_type_reference(event.event_type)?);
    Ok(())
}

/// Rewrites an event.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_event_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_event_slots)
}

/// Rewrites an event of a generic instance, then its generic original.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_specialized_event_definition<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_event_slots(rw, copy)?;
        specialized::resolve::<SpecializedEventDefinition, _>(rw, copy)
    })
}

/// Rewrites a parameter of a method or property definition.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_parameter_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let parameter = read_node!(rw, ParameterDefinition, copy)?.clone();

        write_slot!(rw, ParameterDefinition, copy,
            attributes = rw.rewrite_custom_attributes(&parameter.attributes)?);
        write_slot!(rw, ParameterDefinition, copy,
            containing_signature = containing_signature(rw, parameter.containing_signature));
        if parameter.has_default_value() {
            write_slot!(rw, ParameterDefinition, copy,
                default_value = rw.rewrite_expression(parameter.default_value)?);
        }
        if parameter.is_modified() {
            write_slot!(rw, ParameterDefinition, copy,
                custom_modifiers = rw.rewrite_custom_modifiers(&parameter.custom_modifiers)?);
        }
        if parameter.is_marshalled_explicitly() {
            write_slot!(rw, ParameterDefinition, copy,
                marshalling_information =
                    rw.rewrite_marshalling_information(parameter.marshalling_information)?);
        }
        write_slot!(rw, ParameterDefinition, copy,
            parameter_type = rw.rewrite_type_reference(parameter.parameter_type)?);
        Ok(())
    })
}

/// Rewrites a parameter of a method reference or function pointer signature.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_parameter_type_information<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let parameter = read_node!(rw, ParameterTypeInformation, copy)?.clone();

        write_slot!(rw, ParameterTypeInformation, copy,
            containing_signature = containing_signature(rw, parameter.containing_signature));
        if parameter.is_modified() {
            write_slot!(rw, ParameterTypeInformation, copy,
                custom_modifiers = rw.rewrite_custom_modifiers(&parameter.custom_modifiers)?);
        }
        write_slot!(rw, ParameterTypeInformation, copy,
            parameter_type = rw.rewrite_type_reference(parameter.parameter_type)?);
        Ok(())
    })
}

/// Rewrites an explicit interface implementation override.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] if the implementing method is not a method, and
/// propagates errors of the child rules.
pub fn walk_method_implementation<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let implementation = read_node!(rw, MethodImplementation, copy)?.clone();

        write_slot!(rw, MethodImplementation, copy,
            containing_type = rw.rewrite_type_reference(implementation.containing_type)?);
        write_slot!(rw, MethodImplementation, copy,
            implemented_method = rw.rewrite_method_reference(implementation.implemented_method)?);

        require(
            rw,
            implementation.implementing_method,
            |kind| kind.as_method_reference().is_some(),
            "implementing method",
        )?;
        write_slot!(rw, MethodImplementation, copy,
            implementing_method =
                rw.rewrite_method_reference(implementation.implementing_method)?);
        Ok(())
    })
}

fn is_event(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::EventDefinition | NodeKind::SpecializedEventDefinition)
}

fn is_field(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::FieldDefinition | NodeKind::SpecializedFieldDefinition)
}

fn is_method(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::MethodDefinition | NodeKind::SpecializedMethodDefinition)
}

fn is_property(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::PropertyDefinition | NodeKind::SpecializedPropertyDefinition)
}

/// Rewrites the events of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not events.
pub fn walk_events<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(rw, items, is_event, "events", |rw, item| rw.rewrite_type_member(item))
}

/// Rewrites the fields of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not fields.
pub fn walk_fields<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(rw, items, is_field, "fields", |rw, item| rw.rewrite_type_member(item))
}

/// Rewrites the methods of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not methods.
pub fn walk_methods<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(rw, items, is_method, "methods", |rw, item| rw.rewrite_type_member(item))
}

/// Rewrites the properties of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not properties.
pub fn walk_properties<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(rw, items, is_property, "properties", |rw, item| rw.rewrite_type_member(item))
}

/// Rewrites a mixed list of type members.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_type_members<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_type_member(item))
}

/// Rewrites a list of method references of any shape, such as property accessors.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_method_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_method_reference(item))
}

/// Rewrites the parameters of a method or property definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not parameter definitions.
pub fn walk_parameters<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::ParameterDefinition,
        "parameters",
        |rw, item| rw.rewrite_parameter_definition(item),
    )
}

/// Rewrites the parameters of a method reference or function pointer.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not parameter type
/// information.
pub fn walk_parameter_type_informations<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::ParameterTypeInformation,
        "parameter types",
        |rw, item| rw.rewrite_parameter_type_information(item),
    )
}

/// Rewrites the explicit implementation overrides of a type definition.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not method implementations.
pub fn walk_method_implementations<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::MethodImplementation,
        "explicit implementation overrides",
        |rw, item| rw.rewrite_method_implementation(item),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            builder::GraphBuilder,
            graph::MetadataGraph,
            nodes::{members::FieldFlags, Node},
        },
        rewriter::{MetadataRewriter, RewriterConfig},
        Error,
    };

    #[test]
    fn test_parameter_points_at_copied_method() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Params").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let ty = builder.class(root, "Calc").unwrap();
        let int32 = builder.platform_reference(assembly, "System", "Int32").unwrap();
        let method = builder.method(ty, "Add", int32).unwrap();
        builder.parameter(method, "a", int32).unwrap();
        let graph = builder.build_frozen();

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        let result = rewriter.rewrite(ty).unwrap();
        let graph = rewriter.context().graph();

        let copied_method = graph.get::<crate::metadata::nodes::types::TypeDefinitionCore>(result)
            .unwrap()
            .methods[0];
        assert_ne!(copied_method, method);
        let parameter = graph.get::<MethodDefinition>(copied_method).unwrap().parameters[0];
        assert_eq!(
            graph.get::<ParameterDefinition>(parameter).unwrap().containing_signature,
            copied_method
        );
    }

    #[test]
    fn test_constant_value_only_for_literals() {
        let mut graph = MetadataGraph::new();
        let value = graph.add_frozen(Node::MetadataConstant(Default::default()));
        let field = graph.add(Node::FieldDefinition(FieldDefinition {
            compile_time_value: value,
            ..Default::default()
        }));
        let literal = graph.add(Node::FieldDefinition(FieldDefinition {
            flags: FieldFlags::LITERAL,
            compile_time_value: value,
            ..Default::default()
        }));

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        rewriter.rewrite_field_definition(field).unwrap();
        assert_eq!(
            rewriter.context().graph().get::<FieldDefinition>(field).unwrap().compile_time_value,
            value
        );

        rewriter.rewrite_field_definition(literal).unwrap();
        assert_ne!(
            rewriter.context().graph().get::<FieldDefinition>(literal).unwrap().compile_time_value,
            value
        );
    }

    #[test]
    fn test_implementing_method_must_be_a_method() {
        let mut graph = MetadataGraph::new();
        let field = graph.add(Node::FieldReference(FieldReference::default()));
        let implementation = graph.add(Node::MethodImplementation(MethodImplementation {
            implementing_method: field,
            ..Default::default()
        }));

        let mut rewriter = MetadataRewriter::new(graph);
        assert!(matches!(
            rewriter.rewrite(implementation),
            Err(Error::Precondition { .. })
        ));
    }

    #[test]
    fn test_fields_list_rejects_methods() {
        let mut graph = MetadataGraph::new();
        let method = graph.add(Node::MethodDefinition(MethodDefinition::default()));
        let mut rewriter = MetadataRewriter::new(graph);

        assert!(matches!(
            walk_fields(&mut rewriter, &[method]),
            Err(Error::Precondition { .. })
        ));
        assert_eq!(walk_methods(&mut rewriter, &[method]).unwrap(), vec![method]);
    }
}
