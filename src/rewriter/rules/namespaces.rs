//! Rules for namespaces, namespace references and type aliases.

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::namespaces::{
            AliasCore, NamespaceAliasForType, NamespaceCore, NestedAliasForType, NestedNamespace,
            NestedNamespaceReference, RootNamespaceReference,
        },
    },
    rewriter::{
        rules::{map_list, map_required, visit},
        Rewriter,
    },
    Result,
};

fn walk_namespace_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let namespace = read_node!(rw, NamespaceCore, copy)?.clone();
    write_slot!(rw, NamespaceCore, copy,
        attributes = rw.rewrite_custom_attributes(&namespace.attributes)?);
    write_slot!(rw, NamespaceCore, copy,
        members = rw.rewrite_namespace_members(&namespace.members)?);
    write_slot!(rw, NamespaceCore, copy, unit = rw.rewrite_unit_reference(namespace.unit)?);
    Ok(())
}

/// Rewrites the root namespace of a unit.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_root_namespace<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_namespace_slots)
}

/// Rewrites a nested namespace.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_nested_namespace<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_namespace_slots(rw, copy)?;
        let containing = read_node!(rw, NestedNamespace, copy)?.containing_namespace;
        write_slot!(rw, NestedNamespace, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(containing)?);
        Ok(())
    })
}

/// Rewrites a reference to the root namespace of another unit.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_root_namespace_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let unit = read_node!(rw, RootNamespaceReference, copy)?.unit;
        write_slot!(rw, RootNamespaceReference, copy, unit = rw.rewrite_unit_reference(unit)?);
        Ok(())
    })
}

/// Rewrites a reference to a nested namespace of another unit.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_nested_namespace_reference<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let containing = read_node!(rw, NestedNamespaceReference, copy)?.containing_namespace;
        write_slot!(rw, NestedNamespaceReference, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(containing)?);
        Ok(())
    })
}

fn walk_alias_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let alias = read_node!(rw, AliasCore, copy)?.clone();
    write_slot!(rw, AliasCore, copy, attributes = rw.rewrite_custom_attributes(&alias.attributes)?);
    write_slot!(rw, AliasCore, copy,
        aliased_type = rw.rewrite_type_reference(alias.aliased_type)?);
    write_slot!(rw, AliasCore, copy, members = rw.rewrite_nested_aliases(&alias.members)?);
    Ok(())
}

/// Rewrites a type forwarded or aliased at namespace level.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_namespace_alias_for_type<R: Rewriter + ?Sized>(
    rw: &mut R,
    id: NodeId,
) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_alias_slots(rw, copy)?;
        let containing = read_node!(rw, NamespaceAliasForType, copy)?.containing_namespace;
        write_slot!(rw, NamespaceAliasForType, copy,
            containing_namespace = rw.rewrite_unit_namespace_reference(containing)?);
        Ok(())
    })
}

/// Rewrites an alias nested in another alias.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_nested_alias_for_type<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        walk_alias_slots(rw, copy)?;
        let containing = read_node!(rw, NestedAliasForType, copy)?.containing_alias;
        write_slot!(rw, NestedAliasForType, copy,
            containing_alias = rw.rewrite_definition_reference(containing)?);
        Ok(())
    })
}

/// Rewrites the members of a namespace.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_namespace_members<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_namespace_member(item))
}

/// Rewrites a list of aliases of either shape, such as the exported types of an assembly.
///
/// # Errors
/// Returns the first error of the dispatched rules.
pub fn walk_aliases<R: Rewriter + ?Sized>(rw: &mut R, items: &[NodeId]) -> Result<Vec<NodeId>> {
    map_list(rw, items, |rw, item| rw.rewrite_alias(item))
}

/// Rewrites the aliases nested in an alias.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not nested aliases.
pub fn walk_nested_aliases<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::NestedAliasForType,
        "nested aliases",
        |rw, item| rw.rewrite_nested_alias_for_type(item),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{builder::GraphBuilder, nodes::types::NamespaceTypeDefinition},
        rewriter::{MetadataRewriter, RewriterConfig},
    };

    #[test]
    fn test_copied_namespace_tree_links_back() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Tree").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let inner = builder.namespace(root, "Inner").unwrap();
        let ty = builder.class(inner, "Leaf").unwrap();
        let graph = builder.build_frozen();

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        let new_root = rewriter.rewrite(root).unwrap();
        let graph = rewriter.context().graph();

        let new_inner = graph.get::<NamespaceCore>(new_root).unwrap().members[0];
        assert_ne!(new_inner, inner);
        assert_eq!(
            graph.get::<NestedNamespace>(new_inner).unwrap().containing_namespace,
            new_root
        );

        let new_ty = graph.get::<NamespaceCore>(new_inner).unwrap().members[0];
        assert_ne!(new_ty, ty);
        assert_eq!(
            graph.get::<NamespaceTypeDefinition>(new_ty).unwrap().containing_namespace,
            new_inner
        );
    }

    #[test]
    fn test_namespace_unit_resolves_to_copied_assembly() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Unit").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let graph = builder.build_frozen();

        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
        let new_assembly = rewriter.rewrite(assembly).unwrap();
        let graph = rewriter.context().graph();

        let new_root = graph
            .get::<crate::metadata::nodes::units::ModuleCore>(new_assembly)
            .unwrap()
            .root_namespace;
        assert_ne!(new_root, root);
        assert_eq!(graph.get::<NamespaceCore>(new_root).unwrap().unit, new_assembly);
    }
}
