//! Integration tests for category dispatch.
//!
//! A node of a kind that can never appear in a category slot is passed through and reported
//! in lenient mode, and rejected in strict mode. Definition lists holding the wrong family
//! are structural errors in either mode.

use dotrewrite::{
    metadata::nodes::{attributes::CustomAttribute, members::FieldDefinition},
    prelude::*,
};

/// An assembly whose single field has a custom attribute in its type slot.
fn misplaced_type() -> Result<(MetadataGraph, NodeId, NodeId, NodeId)> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Misplaced")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Holder")?;
    let bogus = builder.add(Node::CustomAttribute(CustomAttribute::default()));
    let field = builder.field(ty, "value", bogus)?;
    Ok((builder.build(), assembly, field, bogus))
}

#[test]
fn test_lenient_dispatch_passes_through() -> Result<()> {
    let (graph, assembly, field, bogus) = misplaced_type()?;

    let mut rewriter = MetadataRewriter::new(graph);
    assert_eq!(rewriter.rewrite(assembly)?, assembly);

    let context = rewriter.context();
    assert_eq!(context.graph().get::<FieldDefinition>(field)?.field_type, bogus);

    let diagnostics = context.diagnostics();
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.by_category(DiagnosticCategory::Dispatch).len(), 1);
    assert_eq!(diagnostics.for_node(bogus).len(), 1);
    assert_eq!(diagnostics.passed_through(), vec![bogus]);
    Ok(())
}

#[test]
fn test_lenient_dispatch_without_diagnostics() -> Result<()> {
    let (graph, assembly, _, _) = misplaced_type()?;
    let config = RewriterConfig {
        record_diagnostics: false,
        ..RewriterConfig::default()
    };

    let mut rewriter = MetadataRewriter::with_config(graph, config);
    rewriter.rewrite(assembly)?;
    assert!(!rewriter.context().diagnostics().has_any());
    Ok(())
}

#[test]
fn test_strict_dispatch_rejects() -> Result<()> {
    let (graph, assembly, _, bogus) = misplaced_type()?;

    let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::strict());
    match rewriter.rewrite(assembly) {
        Err(Error::UnexpectedKind {
            node,
            kind,
            expected,
        }) => {
            assert_eq!(node, bogus);
            assert_eq!(kind, NodeKind::CustomAttribute);
            assert_eq!(expected, "type reference");
        }
        other => panic!("expected a dispatch error, got {other:?}"),
    }
    assert!(rewriter.context().path().is_empty());
    Ok(())
}

#[test]
fn test_strict_dispatch_accepts_well_formed_graph() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("WellFormed")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Point")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    builder.field(ty, "x", int32)?;
    builder.field(ty, "y", int32)?;
    let length = builder.method(ty, "Length", int32)?;
    builder.body(length)?;

    let mut rewriter = MetadataRewriter::with_config(builder.build_frozen(), RewriterConfig::copying_strict());
    let copy = rewriter.rewrite(assembly)?;
    assert_ne!(copy, assembly);
    assert!(!rewriter.context().diagnostics().has_any());
    Ok(())
}

#[test]
fn test_wrong_family_in_definition_list() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Broken")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Holder")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let method = builder.method(ty, "Value", int32)?;
    builder
        .graph_mut()
        .get_mut::<TypeDefinitionCore>(ty)?
        .fields
        .push(method);

    // Structural errors do not depend on the dispatch mode.
    let mut rewriter = MetadataRewriter::new(builder.build());
    assert!(matches!(
        rewriter.rewrite(assembly),
        Err(Error::Precondition { .. })
    ));
    Ok(())
}

#[test]
fn test_sentinel_passes_every_dispatcher() -> Result<()> {
    let mut rewriter = MetadataRewriter::with_config(MetadataGraph::new(), RewriterConfig::copying_strict());

    assert_eq!(rewriter.rewrite(NodeId::DUMMY)?, NodeId::DUMMY);
    assert_eq!(rewriter.rewrite_type_reference(NodeId::DUMMY)?, NodeId::DUMMY);
    assert_eq!(rewriter.rewrite_method_reference(NodeId::DUMMY)?, NodeId::DUMMY);
    assert_eq!(rewriter.rewrite_expression(NodeId::DUMMY)?, NodeId::DUMMY);
    assert_eq!(rewriter.rewrite_unit_reference(NodeId::DUMMY)?, NodeId::DUMMY);
    assert_eq!(rewriter.context().cache().stats().copies, 0);
    Ok(())
}
