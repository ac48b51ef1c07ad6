//! Rules for custom and security attributes, modifiers, marshalling and interop records.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::attributes::{
            CustomAttribute, CustomModifier, MarshallingInformation, PlatformInvokeInformation,
            SecurityAttribute,
        },
    },
    rewriter::{
        rules::{map_required, visit},
        Rewriter,
    },
    Result,
};

/// Rewrites a custom attribute: positional arguments, constructor, then named arguments.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_custom_attribute<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let attribute = read_node!(rw, CustomAttribute, copy)?.clone();
        write_slot!(rw, CustomAttribute, copy,
            arguments = rw.rewrite_expressions(&attribute.arguments)?);
        write_slot!(rw, CustomAttribute, copy,
            constructor = rw.rewrite_method_reference(attribute.constructor)?);
        write_slot!(rw, CustomAttribute, copy,
            named_arguments = rw.rewrite_named_arguments(&attribute.named_arguments)?);
        Ok(())
    })
}

/// Rewrites a declarative security entry.
///
/// # Errors
/// Propagates errors of the attribute rules.
pub fn walk_security_attribute<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let attributes = read_node!(rw, SecurityAttribute, copy)?.attributes.clone();
        write_slot!(rw, SecurityAttribute, copy,
            attributes = rw.rewrite_custom_attributes(&attributes)?);
        Ok(())
    })
}

/// Rewrites a required or optional custom modifier.
///
/// # Errors
/// Propagates errors of the type rules.
pub fn walk_custom_modifier<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let modifier = read_node!(rw, CustomModifier, copy)?.modifier;
        write_slot!(rw, CustomModifier, copy, modifier = rw.rewrite_type_reference(modifier)?);
        Ok(())
    })
}

/// Rewrites marshalling information. Type slots are only visited for the native types that
/// use them.
///
/// # Errors
/// Propagates errors of the type rules.
pub fn walk_marshalling_information<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let marshalling = read_node!(rw, MarshallingInformation, copy)?.clone();
        if marshalling.uses_custom_marshaller() {
            write_slot!(rw, MarshallingInformation, copy,
                custom_marshaller = rw.rewrite_type_reference(marshalling.custom_marshaller)?);
        }
        if marshalling.uses_safe_array_user_subtype() {
            write_slot!(rw, MarshallingInformation, copy,
                safe_array_element_user_defined_subtype = rw.rewrite_type_reference(
                    marshalling.safe_array_element_user_defined_subtype,
                )?);
        }
        Ok(())
    })
}

/// Rewrites the P/Invoke record of a method.
///
/// # Errors
/// Propagates errors of the unit rules.
pub fn walk_platform_invoke_information<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let module = read_node!(rw, PlatformInvokeInformation, copy)?.import_module;
        write_slot!(rw, PlatformInvokeInformation, copy,
            import_module = rw.rewrite_unit_reference(module)?);
        Ok(())
    })
}

/// Rewrites a section block, a leaf.
///
/// # Errors
/// Propagates cache and copy errors.
pub fn walk_section_block<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |_, _| Ok(()))
}

/// Rewrites a list of custom attributes.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not custom attributes.
pub fn walk_custom_attributes<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::CustomAttribute,
        "custom attributes",
        |rw, item| rw.rewrite_custom_attribute(item),
    )
}

/// Rewrites a list of declarative security entries.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not security attributes.
pub fn walk_security_attributes<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::SecurityAttribute,
        "security attributes",
        |rw, item| rw.rewrite_security_attribute(item),
    )
}

/// Rewrites a list of custom modifiers.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not custom modifiers.
pub fn walk_custom_modifiers<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::CustomModifier,
        "custom modifiers",
        |rw, item| rw.rewrite_custom_modifier(item),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{graph::MetadataGraph, nodes::types::VectorTypeReference, nodes::Node},
        rewriter::{MetadataRewriter, RewriterConfig},
        Error,
    };

    #[test]
    fn test_marshaller_type_only_when_custom() {
        let mut graph = MetadataGraph::new();
        let marshaller = graph.add_frozen(Node::VectorTypeReference(VectorTypeReference::default()));
        let plain = graph.add(Node::MarshallingInformation(MarshallingInformation {
            custom_marshaller: marshaller,
            ..Default::default()
        }));

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        rewriter.rewrite(plain).unwrap();
        assert_eq!(
            rewriter
                .context()
                .graph()
                .get::<MarshallingInformation>(plain)
                .unwrap()
                .custom_marshaller,
            marshaller
        );
    }

    #[test]
    fn test_attribute_list_rejects_other_kinds() {
        let mut graph = MetadataGraph::new();
        let modifier = graph.add(Node::CustomModifier(CustomModifier::default()));
        let attribute = graph.add(Node::CustomAttribute(CustomAttribute::default()));
        let mut rewriter = MetadataRewriter::new(graph);

        assert!(matches!(
            walk_custom_attributes(&mut rewriter, &[attribute, modifier]),
            Err(Error::Precondition { .. })
        ));
        assert_eq!(
            walk_custom_modifiers(&mut rewriter, &[modifier]).unwrap(),
            vec![modifier]
        );
    }
}
