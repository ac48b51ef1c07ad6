//! Integration tests for caller-supplied transformations.
//!
//! Overrides replace single operations of [`Rewriter`] and reuse the default rules for
//! everything else. These tests exercise path queries from inside an override, node
//! replacement, post-processing of copies, cancellation and the recursion guard.

use dotrewrite::{
    metadata::nodes::{
        body::{OpCode, Operand},
        members::FieldDefinition,
    },
    prelude::*,
    rewriter::rules,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Location {
    method: NodeId,
    ty: NodeId,
    namespace: NodeId,
    unit: NodeId,
    signature: NodeId,
}

struct PathRecorder {
    context: RewriteContext,
    locals: Vec<Location>,
    parameters: Vec<Location>,
}

impl PathRecorder {
    fn new(graph: MetadataGraph, config: RewriterConfig) -> Self {
        PathRecorder {
            context: RewriteContext::new(graph, config),
            locals: Vec::new(),
            parameters: Vec::new(),
        }
    }

    fn location(&self) -> Location {
        Location {
            method: self.current_method(),
            ty: self.current_type(),
            namespace: self.current_namespace(),
            unit: self.current_unit(),
            signature: self.current_signature(),
        }
    }
}

impl Rewriter for PathRecorder {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }

    fn rewrite_local_definition(&mut self, id: NodeId) -> Result<NodeId> {
        let location = self.location();
        self.locals.push(location);
        rules::body::walk_local_definition(self, id)
    }

    fn rewrite_parameter_definition(&mut self, id: NodeId) -> Result<NodeId> {
        let location = self.location();
        self.parameters.push(location);
        rules::members::walk_parameter_definition(self, id)
    }
}

struct Program {
    assembly: NodeId,
    namespace: NodeId,
    ty: NodeId,
    method: NodeId,
}

fn program() -> Result<(GraphBuilder, Program)> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Program")?;
    let root = builder.root_namespace(assembly)?;
    let namespace = builder.namespace(root, "App")?;
    let outer = builder.class(namespace, "Outer")?;
    let ty = builder.nested_class(outer, "Worker")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let method = builder.method(ty, "Run", int32)?;
    builder.parameter(method, "count", int32)?;
    let body = builder.body(method)?;
    let local = builder.local(body, "index", int32)?;
    builder.operation(body, OpCode(0x06), Operand::Node(local))?;

    Ok((
        builder,
        Program {
            assembly,
            namespace,
            ty,
            method,
        },
    ))
}

#[test]
fn test_path_queries_in_place() -> Result<()> {
    let (builder, program) = program()?;
    let mut recorder = PathRecorder::new(builder.build(), RewriterConfig::in_place());

    assert_eq!(recorder.location(), Location::default());
    recorder.rewrite(program.assembly)?;
    assert_eq!(recorder.location(), Location::default());

    let expected = Location {
        method: program.method,
        ty: program.ty,
        namespace: program.namespace,
        unit: program.assembly,
        signature: program.method,
    };
    assert_eq!(recorder.locals, vec![expected]);
    assert_eq!(recorder.parameters, vec![expected]);
    Ok(())
}

#[test]
fn test_path_queries_see_working_copies() -> Result<()> {
    let (builder, program) = program()?;
    let mut recorder = PathRecorder::new(builder.build_frozen(), RewriterConfig::copying());

    let copy = recorder.rewrite(program.assembly)?;
    assert_eq!(recorder.locals.len(), 1);

    let location = recorder.locals[0];
    assert_eq!(location.unit, copy);
    assert_ne!(location.method, program.method);
    assert_eq!(location.signature, location.method);
    assert_eq!(
        recorder.context().graph().kind(location.method)?,
        NodeKind::MethodDefinition
    );
    assert_eq!(
        recorder.context().graph().get::<MemberCore>(location.method)?.containing_type,
        location.ty
    );
    Ok(())
}

struct Redirect {
    context: RewriteContext,
    from: NodeId,
    to: NodeId,
}

impl Rewriter for Redirect {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }

    fn rewrite_namespace_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        if id == self.from {
            return Ok(self.to);
        }
        rules::types::walk_namespace_type_reference(self, id)
    }
}

#[test]
fn test_override_replaces_reference() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Widening")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Counter")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let int64 = builder.platform_reference(assembly, "System", "Int64")?;
    let value = builder.field(ty, "value", int32)?;
    let values = builder.vector(int32);
    let history = builder.field(ty, "history", values)?;

    let mut redirect = Redirect {
        context: RewriteContext::new(builder.build(), RewriterConfig::default()),
        from: int32,
        to: int64,
    };
    redirect.rewrite(assembly)?;
    let graph = redirect.context().graph();

    assert_eq!(graph.get::<FieldDefinition>(value)?.field_type, int64);
    let vector = graph.get::<FieldDefinition>(history)?.field_type;
    assert_eq!(vector, values);
    assert_eq!(graph.node(vector)?.children(), vec![int64]);
    Ok(())
}

struct Uppercase {
    context: RewriteContext,
}

impl Rewriter for Uppercase {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }

    fn rewrite_namespace_type_definition(&mut self, id: NodeId) -> Result<NodeId> {
        let rewritten = rules::types::walk_namespace_type_definition(self, id)?;
        if !self.context().graph().is_frozen(rewritten)? {
            let definition = self
                .context_mut()
                .graph_mut()
                .get_mut::<TypeDefinitionCore>(rewritten)?;
            definition.name = definition.name.to_uppercase();
        }
        Ok(rewritten)
    }
}

#[test]
fn test_override_edits_copies_only() -> Result<()> {
    let (builder, program) = program()?;
    let graph = builder.build_frozen();
    let outer = graph.get::<ModuleCore>(program.assembly)?.all_types[0];

    let mut uppercase = Uppercase {
        context: RewriteContext::new(graph, RewriterConfig::copying()),
    };
    let copy = uppercase.rewrite(program.assembly)?;
    let graph = uppercase.context().graph();

    let types = &graph.get::<ModuleCore>(copy)?.all_types;
    assert_eq!(graph.get::<TypeDefinitionCore>(types[0])?.name, "OUTER");
    // Nested types go through a different operation.
    assert_eq!(graph.get::<TypeDefinitionCore>(types[1])?.name, "Worker");
    assert_eq!(graph.get::<TypeDefinitionCore>(outer)?.name, "Outer");
    Ok(())
}

struct StopAtField {
    context: RewriteContext,
    name: &'static str,
}

impl Rewriter for StopAtField {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }

    fn rewrite_field_definition(&mut self, id: NodeId) -> Result<NodeId> {
        if self.context().graph().get::<MemberCore>(id)?.name == self.name {
            self.stop_traversal();
        }
        rules::members::walk_field_definition(self, id)
    }
}

#[test]
fn test_stop_traversal_returns_remaining_inputs() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Cancelled")?;
    let root = builder.root_namespace(assembly)?;
    let ty = builder.class(root, "Record")?;
    let int32 = builder.platform_reference(assembly, "System", "Int32")?;
    let first = builder.field(ty, "first", int32)?;
    let stop = builder.field(ty, "stop", int32)?;
    let last = builder.field(ty, "last", int32)?;
    let later = builder.class(root, "Later")?;

    let mut rewriter = StopAtField {
        context: RewriteContext::new(builder.build_frozen(), RewriterConfig::copying()),
        name: "stop",
    };
    let copy = rewriter.rewrite(assembly)?;
    assert_ne!(copy, assembly);
    assert!(rewriter.context().is_stopped());

    let graph = rewriter.context().graph();
    let types = &graph.get::<ModuleCore>(copy)?.all_types;
    let fields = &graph.get::<TypeDefinitionCore>(types[0])?.fields;
    assert_ne!(fields[0], first);
    assert_eq!(&fields[1..], &[stop, last]);
    assert_eq!(types[1], later);

    let diagnostics = rewriter.context().diagnostics();
    assert_eq!(diagnostics.by_category(DiagnosticCategory::Cancellation).len(), 1);

    // Everything after the stop is returned unchanged.
    assert_eq!(rewriter.rewrite(int32)?, int32);
    Ok(())
}

#[test]
fn test_recursion_guard() -> Result<()> {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Deep")?;
    let mut element = builder.platform_reference(assembly, "System", "Int32")?;
    for _ in 0..64 {
        element = builder.vector(element);
    }
    let graph = builder.build();

    let shallow = RewriterConfig::default().with_max_depth(16);
    let mut rewriter = MetadataRewriter::with_config(graph, shallow);
    assert!(matches!(
        rewriter.rewrite(element),
        Err(Error::RecursionLimit(16))
    ));
    assert!(rewriter.context().path().is_empty());

    let mut rewriter = MetadataRewriter::new(rewriter.into_graph());
    assert_eq!(rewriter.rewrite(element)?, element);
    Ok(())
}

struct DropType {
    context: RewriteContext,
    name: &'static str,
}

impl Rewriter for DropType {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }

    fn rewrite_namespace_members(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        let graph = self.context().graph();
        let mut kept = Vec::with_capacity(items.len());
        for &item in items {
            if graph.node(item)?.name() != Some(self.name) {
                kept.push(item);
            }
        }
        rules::namespaces::walk_namespace_members(self, &kept)
    }
}

fn type_names(graph: &MetadataGraph, unit: NodeId) -> Result<Vec<String>> {
    graph
        .get::<ModuleCore>(unit)?
        .all_types
        .iter()
        .map(|&ty| Ok(graph.get::<TypeDefinitionCore>(ty)?.name.clone()))
        .collect()
}

#[test]
fn test_dropped_type_leaves_flat_type_list() -> Result<()> {
    for config in [RewriterConfig::in_place(), RewriterConfig::copying()] {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Pruned")?;
        let root = builder.root_namespace(assembly)?;
        for name in ["A", "B", "C"] {
            builder.class(root, name)?;
        }
        let graph = if config.copy_and_rewrite_immutable_references {
            builder.build_frozen()
        } else {
            builder.build()
        };

        let mut rewriter = DropType {
            context: RewriteContext::new(graph, config),
            name: "B",
        };
        let unit = rewriter.rewrite(assembly)?;
        let graph = rewriter.context().graph();

        assert_eq!(type_names(graph, unit)?, vec!["A", "C"]);
        let root = graph.get::<ModuleCore>(unit)?.root_namespace;
        assert_eq!(graph.get::<NamespaceCore>(root)?.members.len(), 2);
    }
    Ok(())
}
