//! Rules for method bodies: locals, operations and exception regions.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::body::{LocalDefinition, MethodBody, Operand, Operation, OperationExceptionInformation},
    },
    rewriter::{
        rules::{map_required, visit},
        Rewriter,
    },
    Result,
};

/// Rewrites a method body. Locals are rewritten before the operations that use them.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_method_body<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let body = read_node!(rw, MethodBody, copy)?.clone();

        let current = rw.current_method();
        let method = if current.is_dummy() {
            rw.rewrite_method_reference(body.method_definition)?
        } else {
            current
        };
        write_slot!(rw, MethodBody, copy, method_definition = method);
        write_slot!(rw, MethodBody, copy,
            local_variables = rw.rewrite_local_definitions(&body.local_variables)?);
        write_slot!(rw, MethodBody, copy,
            operations = rw.rewrite_operations(&body.operations)?);
        write_slot!(rw, MethodBody, copy,
            exception_information =
                rw.rewrite_operation_exception_informations(&body.exception_information)?);
        Ok(())
    })
}

/// Rewrites an operation. Only operands that carry a graph node are touched.
///
/// # Errors
/// Propagates errors of the operand rules.
pub fn walk_operation<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let operand = read_node!(rw, Operation, copy)?.value.node();
        if let Some(operand) = operand {
            write_slot!(rw, Operation, copy, value = Operand::Node(rw.rewrite_operand(operand)?));
        }
        Ok(())
    })
}

/// Rewrites a local variable of a body.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_local_definition<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let local = read_node!(rw, LocalDefinition, copy)?.clone();

        write_slot!(rw, LocalDefinition, copy,
            custom_modifiers = rw.rewrite_custom_modifiers(&local.custom_modifiers)?);
        write_slot!(rw, LocalDefinition, copy,
            local_type = rw.rewrite_type_reference(local.local_type)?);

        let current = rw.current_method();
        let method = if current.is_dummy() {
            rw.context_mut().cached_or_unchanged(local.method_definition)
        } else {
            current
        };
        write_slot!(rw, LocalDefinition, copy, method_definition = method);
        Ok(())
    })
}

/// Rewrites an exception handling region.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_operation_exception_information<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let exception_type = read_node!(rw, OperationExceptionInformation, copy)?.exception_type;
        write_slot!(rw, OperationExceptionInformation, copy,
            exception_type = rw.rewrite_type_reference(exception_type)?);
        Ok(())
    })
}

/// Rewrites the locals of a body.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not locals.
pub fn walk_local_definitions<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::LocalDefinition,
        "locals",
        |rw, item| rw.rewrite_local_definition(item),
    )
}

/// Rewrites the operations of a body.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not operations.
pub fn walk_operations<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::Operation,
        "operations",
        |rw, item| rw.rewrite_operation(item),
    )
}

/// Rewrites the exception regions of a body.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not exception regions.
pub fn walk_operation_exception_informations<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::OperationExceptionInformation,
        "exception regions",
        |rw, item| rw.rewrite_operation_exception_information(item),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{builder::GraphBuilder, nodes::body::OpCode, nodes::members::MethodDefinition},
        rewriter::{MetadataRewriter, RewriterConfig},
    };

    #[test]
    fn test_body_follows_copied_method() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Bodies").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let ty = builder.class(root, "Program").unwrap();
        let int32 = builder.platform_reference(assembly, "System", "Int32").unwrap();
        let method = builder.method(ty, "Run", int32).unwrap();
        let body = builder.body(method).unwrap();
        let local = builder.local(body, "x", int32).unwrap();
        builder.operation(body, OpCode(0x06), Operand::Node(local)).unwrap();
        let graph = builder.build_frozen();

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        let new_method = rewriter.rewrite(method).unwrap();
        let graph = rewriter.context().graph();

        let new_body = graph.get::<MethodDefinition>(new_method).unwrap().body;
        assert_ne!(new_body, body);
        let data = graph.get::<MethodBody>(new_body).unwrap();
        assert_eq!(data.method_definition, new_method);

        let new_local = data.local_variables[0];
        assert_ne!(new_local, local);
        assert_eq!(
            graph.get::<LocalDefinition>(new_local).unwrap().method_definition,
            new_method
        );

        let operation = graph.get::<Operation>(data.operations[0]).unwrap();
        assert_eq!(operation.value, Operand::Node(new_local));
    }
}
