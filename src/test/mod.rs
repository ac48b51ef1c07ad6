//! Shared fixtures for unit tests.
//!
//! [`SampleAssembly`] builds a small but complete assembly that exercises most rule families:
//! a namespace tree, a nested type, a self-referencing generic, a method with a body and a
//! custom attribute whose constructor is a member reference into the core library.

use crate::{
    metadata::{
        builder::GraphBuilder,
        graph::MetadataGraph,
        node_id::NodeId,
        nodes::{body::OpCode, body::Operand, expressions::ConstantValue},
    },
    Result,
};

/// Node handles of the fixture built by [`SampleAssembly::build`].
pub struct SampleAssembly {
    pub assembly: NodeId,
    pub root: NodeId,
    pub namespace: NodeId,
    /// `App.A`, `App.A.B` and `App.C`, in declaration order
    pub types: [NodeId; 3],
    /// `App.Node<T>` with a field of type `Node<T>`
    pub generic: NodeId,
    pub instance: NodeId,
    pub method: NodeId,
    pub body: NodeId,
    pub int32: NodeId,
    pub attribute: NodeId,
}

impl SampleAssembly {
    /// Builds the fixture into a fresh builder.
    pub fn build() -> Result<(GraphBuilder, SampleAssembly)> {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Sample")?;
        let root = builder.root_namespace(assembly)?;
        let namespace = builder.namespace(root, "App")?;

        let int32 = builder.platform_reference(assembly, "System", "Int32")?;
        let attribute_type = builder.platform_reference(assembly, "System", "ObsoleteAttribute")?;

        let a = builder.class(namespace, "A")?;
        let b = builder.nested_class(a, "B")?;
        let c = builder.class(namespace, "C")?;

        let generic = builder.class(namespace, "Node")?;
        let parameter = builder.generic_parameter(generic, "T")?;
        let instance = builder.generic_instance(generic, &[parameter]);
        builder.field(generic, "next", instance)?;

        let method = builder.method(b, "Run", int32)?;
        builder.parameter(method, "count", int32)?;
        let body = builder.body(method)?;
        let local = builder.local(body, "total", int32)?;
        builder.operation(body, OpCode(0x06), Operand::Node(local))?;
        builder.operation(body, OpCode(0x2A), Operand::None)?;

        let constructor = builder.method_reference(assembly, attribute_type, ".ctor", NodeId::DUMMY, &[])?;
        let message = builder.constant(ConstantValue::String("legacy".to_string()), NodeId::DUMMY);
        let attribute = builder.type_attribute(c, constructor, &[message])?;

        Ok((
            builder,
            SampleAssembly {
                assembly,
                root,
                namespace,
                types: [a, b, c],
                generic,
                instance,
                method,
                body,
                int32,
                attribute,
            },
        ))
    }

    /// Builds the fixture and freezes every node.
    pub fn frozen() -> Result<(MetadataGraph, SampleAssembly)> {
        let (builder, sample) = Self::build()?;
        Ok((builder.build_frozen(), sample))
    }

    /// Builds the fixture with every node mutable.
    pub fn mutable() -> Result<(MetadataGraph, SampleAssembly)> {
        let (builder, sample) = Self::build()?;
        Ok((builder.build(), sample))
    }
}
