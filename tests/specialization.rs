//! Integration tests for specialized members.
//!
//! A specialized field reference is a generic field seen through a type instance. Its own
//! slots and its generic original are rewritten separately, each through the cache.

use dotrewrite::{
    metadata::nodes::{
        body::{MethodBody, OpCode, Operand, Operation},
        members::{FieldReference, MethodDefinition, SpecializedFieldReference},
        types::GenericTypeInstanceReference,
    },
    prelude::*,
};

struct Generic {
    assembly: NodeId,
    generic: NodeId,
    parameter: NodeId,
    instance: NodeId,
    original: NodeId,
    specialized: NodeId,
    user: NodeId,
}

// class Box<T> { T value; }
// class User { int Read() { ldfld Box<int>::value; ldfld Box<T>::value; } }
fn generic() -> Result<(GraphBuilder, Generic)> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Generics")?;
    let root = builder.root_namespace(assembly)?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;

    let generic = builder.class(root, "Box")?;
    let parameter = builder.generic_parameter(generic, "T")?;
    builder.field(generic, "value", parameter)?;

    let original = builder.field_reference(assembly, generic, "value", parameter)?;
    let instance = builder.generic_instance(generic, &[int32]);
    let specialized = builder.specialized_field_reference(assembly, instance, original, int32)?;

    let user = builder.class(root, "User")?;
    let read = builder.method(user, "Read", int32)?;
    let body = builder.body(read)?;
    builder.operation(body, OpCode(0x7B), Operand::Node(specialized))?;
    builder.operation(body, OpCode(0x7B), Operand::Node(original))?;

    Ok((
        builder,
        Generic {
            assembly,
            generic,
            parameter,
            instance,
            original,
            specialized,
            user,
        },
    ))
}

#[test]
fn test_specialized_and_original_rewritten_separately() -> Result<()> {
    let (builder, sample) = generic()?;
    let mut rewriter = MetadataRewriter::with_config(builder.build_frozen(), RewriterConfig::copying());

    let specialized = rewriter.rewrite(sample.specialized)?;
    let graph = rewriter.context().graph();
    assert_ne!(specialized, sample.specialized);

    let data = graph.get::<SpecializedFieldReference>(specialized)?;
    let original = data.unspecialized_version;
    assert_ne!(original, sample.original);
    assert_ne!(original, specialized);
    assert_eq!(graph.kind(original)?, NodeKind::FieldReference);

    // The specialized view points at the copied instance, the original at the copied generic.
    let instance = data.reference.containing_type;
    assert_ne!(instance, sample.instance);
    let generic = graph.get::<GenericTypeInstanceReference>(instance)?.generic_type;
    assert_ne!(generic, sample.generic);
    let original_data = graph.get::<FieldReference>(original)?;
    assert_eq!(original_data.containing_type, generic);
    assert_ne!(original_data.field_type, sample.parameter);
    assert_ne!(original_data.field_type, data.reference.field_type);

    let cache = rewriter.context().cache();
    assert_eq!(cache.peek(CacheTable::References, sample.specialized), Some(specialized));
    assert_eq!(cache.peek(CacheTable::References, sample.original), Some(original));
    Ok(())
}

#[test]
fn test_original_shared_with_direct_use() -> Result<()> {
    let (builder, sample) = generic()?;
    let graph = builder.build_frozen();
    let position = graph
        .get::<ModuleCore>(sample.assembly)?
        .all_types
        .iter()
        .position(|&ty| ty == sample.user);

    let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
    let copy = rewriter.rewrite(sample.assembly)?;
    let graph = rewriter.context().graph();

    let user = graph.get::<ModuleCore>(copy)?.all_types[position.unwrap_or_default()];
    let read = graph.get::<TypeDefinitionCore>(user)?.methods[0];
    let body = graph.get::<MethodDefinition>(read)?.body;
    let operands: Vec<NodeId> = graph
        .get::<MethodBody>(body)?
        .operations
        .iter()
        .map(|&operation| Ok(graph.get::<Operation>(operation)?.value.node().unwrap_or_default()))
        .collect::<Result<_>>()?;

    let specialized = graph.get::<SpecializedFieldReference>(operands[0])?;
    assert_ne!(operands[0], sample.specialized);
    assert_ne!(operands[1], sample.original);
    assert_eq!(specialized.unspecialized_version, operands[1]);

    // Both references are listed on the module in their rewritten form.
    assert_eq!(
        graph.get::<ModuleCore>(copy)?.type_member_references,
        vec![operands[1], operands[0]]
    );
    Ok(())
}

#[test]
fn test_mutable_specialized_reference_kept_in_place() -> Result<()> {
    let (builder, sample) = generic()?;
    let mut rewriter = MetadataRewriter::new(builder.build());

    assert_eq!(rewriter.rewrite(sample.specialized)?, sample.specialized);
    assert_eq!(
        rewriter
            .context()
            .graph()
            .get::<SpecializedFieldReference>(sample.specialized)?
            .unspecialized_version,
        sample.original
    );

    let stats = rewriter.context().cache().stats();
    assert_eq!(stats.copies, 0);
    assert_eq!(stats.retracted, 0);
    Ok(())
}

#[test]
fn test_specialized_reference_without_original() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let orphan = builder.add(Node::SpecializedFieldReference(SpecializedFieldReference::default()));
    let mut rewriter = MetadataRewriter::new(builder.build());

    assert_eq!(rewriter.rewrite(orphan)?, orphan);
    let diagnostics = rewriter.context().diagnostics();
    assert_eq!(
        diagnostics.by_category(DiagnosticCategory::Specialization).len(),
        1
    );
    Ok(())
}
