//! Integration tests for the host services consumed by a pass: interning of copied
//! references, platform types for sentinel type slots and custom shallow copies.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use dotrewrite::{
    metadata::nodes::{
        body::{MethodBody, OpCode, Operand, Operation},
        expressions::{ConstantValue, MetadataConstant, MetadataTypeOf},
        members::{FieldDefinition, MethodDefinition, MethodReference, ParameterTypeInformation},
        namespaces::{NestedNamespaceReference, RootNamespaceReference},
        types::{FunctionPointerTypeReference, NamespaceTypeReference},
        units::{AssemblyReference, AssemblyVersion},
    },
    prelude::*,
};

/// An assembly with fields of type `int[]`, `int[]` (a distinct node) and `string[]`.
fn arrays() -> Result<(MetadataGraph, NodeId, [NodeId; 3])> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Arrays")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Buffers")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let string = builder.platform_reference(assembly, "System", "String")?;

    let ints = builder.vector(int32);
    let more_ints = builder.vector(int32);
    let strings = builder.vector(string);
    let fields = [
        builder.field(ty, "ints", ints)?,
        builder.field(ty, "more_ints", more_ints)?,
        builder.field(ty, "strings", strings)?,
    ];
    Ok((builder.build_frozen(), assembly, fields))
}

fn copied_field_types(graph: &MetadataGraph, unit: NodeId) -> Result<Vec<NodeId>> {
    let ty = graph.get::<ModuleCore>(unit)?.all_types[0];
    graph
        .get::<TypeDefinitionCore>(ty)?
        .fields
        .iter()
        .map(|&field| Ok(graph.get::<FieldDefinition>(field)?.field_type))
        .collect()
}

#[test]
fn test_copied_references_are_interned() -> Result<()> {
    let (graph, assembly, fields) = arrays()?;
    let originals: Vec<NodeId> = fields
        .iter()
        .map(|&field| Ok(graph.get::<FieldDefinition>(field)?.field_type))
        .collect::<Result<_>>()?;

    let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
    let copy = rewriter.rewrite(assembly)?;
    let graph = rewriter.context().graph();
    let types = copied_field_types(graph, copy)?;

    // Structurally equal copies stay distinct nodes but share a key.
    assert_ne!(types[0], types[1]);
    let keys: Vec<Option<InternedKey>> = types.iter().map(|&ty| graph.interned_key(ty)).collect();
    assert!(keys.iter().all(Option::is_some));
    assert_eq!(keys[0], keys[1]);
    assert_ne!(keys[0], keys[2]);

    assert!(originals.iter().all(|&ty| graph.interned_key(ty).is_none()));
    Ok(())
}

#[test]
fn test_intern_table_shared_between_passes() -> Result<()> {
    let host = Arc::new(DefaultHost::default());

    let mut keys = Vec::new();
    for _ in 0..2 {
        let (graph, assembly, _) = arrays()?;
        let mut rewriter = MetadataRewriter::with_host(graph, RewriterConfig::copying(), host.clone());
        let copy = rewriter.rewrite(assembly)?;
        let graph = rewriter.context().graph();
        let types = copied_field_types(graph, copy)?;
        keys.push(graph.interned_key(types[0]));
    }

    assert!(keys[0].is_some());
    assert_eq!(keys[0], keys[1]);
    assert!(!host.interner().is_empty());
    Ok(())
}

#[test]
fn test_typeof_receives_platform_type() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Reflection")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let type_of = builder.add(Node::MetadataTypeOf(MetadataTypeOf {
        type_to_get: int32,
        expression_type: NodeId::DUMMY,
    }));

    let mut rewriter = MetadataRewriter::with_config(builder.build_frozen(), RewriterConfig::copying());
    let copy = rewriter.rewrite(type_of)?;
    let graph = rewriter.context().graph();

    let expression_type = graph.get::<MetadataTypeOf>(copy)?.expression_type;
    assert!(!expression_type.is_dummy());
    assert_eq!(graph.get::<NamespaceTypeReference>(expression_type)?.name, "Type");
    assert!(graph.platform_type(PlatformType::Type).is_some());
    Ok(())
}

#[test]
fn test_mutable_constant_keeps_sentinel_type() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let constant = builder.constant(ConstantValue::Boolean(true), NodeId::DUMMY);

    let mut rewriter = MetadataRewriter::with_config(builder.build(), RewriterConfig::copying());
    assert_eq!(rewriter.rewrite(constant)?, constant);

    let graph = rewriter.context().graph();
    assert!(graph.get::<MetadataConstant>(constant)?.constant_type.is_dummy());
    assert!(graph.platform_type(PlatformType::Boolean).is_none());
    Ok(())
}

#[test]
fn test_platform_types_from_custom_core_library() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let constant = builder.constant(ConstantValue::String("hello".to_string()), NodeId::DUMMY);
    let host = Arc::new(DefaultHost::new(CoreLibrary::new(
        "System.Runtime",
        AssemblyVersion::new(8, 0, 0, 0),
    )));

    let mut rewriter = MetadataRewriter::with_host(builder.build_frozen(), RewriterConfig::copying(), host);
    let copy = rewriter.rewrite(constant)?;
    let graph = rewriter.context().graph();

    let string = graph.get::<MetadataConstant>(copy)?.constant_type;
    let string_data = graph.get::<NamespaceTypeReference>(string)?;
    assert_eq!(string_data.name, "String");
    assert!(!string_data.is_value_type);

    let system = graph.get::<NestedNamespaceReference>(string_data.containing_namespace)?;
    assert_eq!(system.name, "System");
    let root = graph.get::<RootNamespaceReference>(system.containing_namespace)?;
    assert_eq!(graph.get::<AssemblyReference>(root.unit)?.name, "System.Runtime");
    Ok(())
}

/// Host that counts shallow copies and leaves sentinel type slots alone.
#[derive(Default)]
struct CountingHost {
    inner: DefaultHost,
    copies: AtomicUsize,
}

impl InternFactory for CountingHost {
    fn intern(&self, graph: &MetadataGraph, id: NodeId) -> Result<InternedKey> {
        self.inner.intern(graph, id)
    }
}

impl PlatformTypeProvider for CountingHost {
    fn platform_type(&self, graph: &mut MetadataGraph, kind: PlatformType) -> Result<NodeId> {
        self.inner.platform_type(graph, kind)
    }
}

impl ShallowCopy for CountingHost {
    fn shallow_copy(&self, graph: &mut MetadataGraph, id: NodeId) -> Result<NodeId> {
        self.copies.fetch_add(1, Ordering::Relaxed);
        graph.copy_node(id)
    }
}

#[test]
fn test_custom_shallow_copy_service() -> Result<()> {
    let (graph, assembly, _) = arrays()?;
    let host = Arc::new(CountingHost::default());

    let mut rewriter = MetadataRewriter::with_host(graph, RewriterConfig::copying(), host.clone());
    let copy = rewriter.rewrite(assembly)?;
    assert_ne!(copy, assembly);

    let stats = rewriter.context().cache().stats();
    assert!(stats.copies > 0);
    assert_eq!(host.copies.load(Ordering::Relaxed), stats.copies);
    Ok(())
}

// class Math { }
// class Program { void Main() { call Math::Add(int, int); call Math::Add(int, int); } }
fn calls() -> Result<(MetadataGraph, NodeId, [NodeId; 2])> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Calls")?;
    let root = builder.root_namespace(assembly)?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let math = builder.class(root, "Math")?;
    let add = builder.method_reference(assembly, math, "Add", int32, &[int32, int32])?;
    let same_add = builder.method_reference(assembly, math, "Add", int32, &[int32, int32])?;

    let program = builder.class(root, "Program")?;
    let main = builder.method(program, "Main", int32)?;
    let body = builder.body(main)?;
    builder.operation(body, OpCode(0x28), Operand::Node(add))?;
    builder.operation(body, OpCode(0x28), Operand::Node(same_add))?;
    Ok((builder.build_frozen(), assembly, [add, same_add]))
}

#[test]
fn test_copying_pass_over_multi_parameter_call() -> Result<()> {
    let (graph, assembly, originals) = calls()?;
    let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
    let copy = rewriter.rewrite(assembly)?;
    let graph = rewriter.context().graph();

    let program = graph.get::<ModuleCore>(copy)?.all_types[1];
    let main = graph.get::<TypeDefinitionCore>(program)?.methods[0];
    let body = graph.get::<MethodDefinition>(main)?.body;
    let callees: Vec<NodeId> = graph
        .get::<MethodBody>(body)?
        .operations
        .iter()
        .map(|&operation| Ok(graph.get::<Operation>(operation)?.value.node().unwrap_or_default()))
        .collect::<Result<_>>()?;

    assert_ne!(callees[0], originals[0]);
    assert_ne!(callees[1], originals[1]);
    let key = graph.interned_key(callees[0]);
    assert!(key.is_some());
    assert_eq!(key, graph.interned_key(callees[1]));

    for &parameter in &graph.get::<MethodReference>(callees[0])?.parameters {
        let information = graph.get::<ParameterTypeInformation>(parameter)?;
        assert_eq!(information.containing_signature, callees[0]);
    }
    Ok(())
}

#[test]
fn test_function_pointer_with_many_parameters_interned() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Callbacks")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Dispatcher")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;

    let mut pointers = Vec::new();
    for name in ["handler", "fallback"] {
        let pointer = builder.add(Node::FunctionPointerTypeReference(
            FunctionPointerTypeReference {
                return_type: int32,
                ..FunctionPointerTypeReference::default()
            },
        ));
        let parameters: Vec<NodeId> = (0..6)
            .map(|index| {
                builder.add(Node::ParameterTypeInformation(ParameterTypeInformation {
                    index,
                    containing_signature: pointer,
                    parameter_type: int32,
                    ..ParameterTypeInformation::default()
                }))
            })
            .collect();
        builder
            .graph_mut()
            .get_mut::<FunctionPointerTypeReference>(pointer)?
            .parameters = parameters;
        builder.field(ty, name, pointer)?;
        pointers.push(pointer);
    }

    let mut rewriter = MetadataRewriter::with_config(builder.build_frozen(), RewriterConfig::copying());
    let copy = rewriter.rewrite(assembly)?;
    let graph = rewriter.context().graph();

    let types = copied_field_types(graph, copy)?;
    assert!(types.iter().all(|ty| !pointers.contains(ty)));
    let keys: Vec<Option<InternedKey>> = types.iter().map(|&ty| graph.interned_key(ty)).collect();
    assert!(keys[0].is_some());
    assert_eq!(keys[0], keys[1]);
    Ok(())
}
