//! Rules for metadata expressions: constants, array initializers, typeof and named arguments.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::expressions::{
            MetadataConstant, MetadataCreateArray, MetadataNamedArgument, MetadataTypeOf,
        },
    },
    rewriter::{
        rules::{map_list, map_required, visit},
        Rewriter,
    },
    Result,
};

/// Rewrites a constant. The value itself is never touched.
///
/// # Errors
/// Propagates errors of the type rules.
pub fn walk_metadata_constant<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let constant_type = read_node!(rw, MetadataConstant, copy)?.constant_type;
        write_slot!(rw, MetadataConstant, copy,
            constant_type = rw.rewrite_type_reference(constant_type)?);
        Ok(())
    })
}

/// Rewrites an array creation expression.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_metadata_create_array<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let array = read_node!(rw, MetadataCreateArray, copy)?.clone();
        write_slot!(rw, MetadataCreateArray, copy,
            element_type = rw.rewrite_type_reference(array.element_type)?);
        write_slot!(rw, MetadataCreateArray, copy,
            initializers = rw.rewrite_expressions(&array.initializers)?);
        write_slot!(rw, MetadataCreateArray, copy,
            array_type = rw.rewrite_type_reference(array.array_type)?);
        Ok(())
    })
}

/// Rewrites a typeof expression.
///
/// # Errors
/// Propagates errors of the type rules.
pub fn walk_metadata_type_of<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let type_of = read_node!(rw, MetadataTypeOf, copy)?.clone();
        write_slot!(rw, MetadataTypeOf, copy,
            type_to_get = rw.rewrite_type_reference(type_of.type_to_get)?);
        write_slot!(rw, MetadataTypeOf, copy,
            expression_type = rw.rewrite_type_reference(type_of.expression_type)?);
        Ok(())
    })
}

/// Rewrites a named field or property argument of a custom attribute.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_metadata_named_argument<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let argument = read_node!(rw, MetadataNamedArgument, copy)?.clone();
        write_slot!(rw, MetadataNamedArgument, copy,
            argument_value = rw.rewrite_expression(argument.argument_value)?);
        write_slot!(rw, MetadataNamedArgument, copy,
            argument_type = rw.rewrite_type_reference(argument.argument_type)?);
        Ok(())
    })
}

/// Rewrites a list of expressions of any shape.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_expressions<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_expression(item))
}

/// Rewrites the named arguments of a custom attribute.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not named arguments.
pub fn walk_named_arguments<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::MetadataNamedArgument,
        "named arguments",
        |rw, item| rw.rewrite_metadata_named_argument(item),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            graph::MetadataGraph,
            host::PlatformType,
            nodes::{expressions::ConstantValue, types::NamespaceTypeReference, Node},
        },
        rewriter::{MetadataRewriter, RewriterConfig},
    };

    #[test]
    fn test_copied_constant_gets_platform_type() {
        let mut graph = MetadataGraph::new();
        let constant = graph.add_frozen(Node::MetadataConstant(MetadataConstant {
            value: ConstantValue::I4(7),
            constant_type: NodeId::DUMMY,
        }));

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        let copy = rewriter.rewrite(constant).unwrap();
        assert_ne!(copy, constant);

        // The filled-in platform reference is frozen, so the pass copies it as well
        let graph = rewriter.context().graph();
        let constant_type = graph.get::<MetadataConstant>(copy).unwrap().constant_type;
        let platform = graph.platform_type(PlatformType::Int32).unwrap();
        assert_ne!(constant_type, platform);
        assert_eq!(
            graph.get::<NamespaceTypeReference>(constant_type).unwrap().name,
            PlatformType::Int32.name()
        );
    }

    #[test]
    fn test_array_initializers_keep_order() {
        let mut graph = MetadataGraph::new();
        let first = graph.add(Node::MetadataConstant(MetadataConstant {
            value: ConstantValue::I4(1),
            constant_type: NodeId::DUMMY,
        }));
        let second = graph.add(Node::MetadataConstant(MetadataConstant {
            value: ConstantValue::I4(2),
            constant_type: NodeId::DUMMY,
        }));
        let array = graph.add(Node::MetadataCreateArray(MetadataCreateArray {
            initializers: vec![first, second],
            rank: 1,
            ..Default::default()
        }));

        let mut rewriter = MetadataRewriter::new(graph);
        assert_eq!(rewriter.rewrite(array).unwrap(), array);
        assert_eq!(
            rewriter
                .context()
                .graph()
                .get::<MetadataCreateArray>(array)
                .unwrap()
                .initializers,
            vec![first, second]
        );
    }
}
