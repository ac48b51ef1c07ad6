//! Benchmarks for rewrite passes.
//!
//! Measures the identity pass over a synthetic assembly:
//! - In place over a mutable graph (visits every node, copies nothing)
//! - Over a frozen graph without copying (stops at every frozen node)
//! - Over a frozen graph with copying (materializes a full private copy)
//! - Deep generic instantiation chains

extern crate dotrewrite;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dotrewrite::{
    metadata::nodes::body::{OpCode, Operand},
    prelude::*,
};
use std::hint::black_box;

/// Builds an assembly with `namespaces * types` classes, each carrying fields, a generic
/// self reference and a method with a small body.
fn synthetic(namespaces: usize, types: usize) -> (GraphBuilder, NodeId) {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Synthetic").unwrap();
    let root = builder.root_namespace(assembly).unwrap();
    let int32 = builder
        .platform_reference(assembly, "System", "Int32")
        .unwrap();
    let string = builder
        .platform_reference(assembly, "System", "String")
        .unwrap();

    for n in 0..namespaces {
        let namespace = builder.namespace(root, &format!("Namespace{n}")).unwrap();
        for t in 0..types {
            let ty = builder.class(namespace, &format!("Type{t}")).unwrap();
            let parameter = builder.generic_parameter(ty, "T").unwrap();
            let instance = builder.generic_instance(ty, &[parameter]);
            let names = builder.vector(string);

            builder.field(ty, "count", int32).unwrap();
            builder.field(ty, "names", names).unwrap();
            builder.field(ty, "next", instance).unwrap();

            let method = builder.method(ty, "Run", int32).unwrap();
            builder.parameter(method, "value", parameter).unwrap();
            let body = builder.body(method).unwrap();
            let local = builder.local(body, "result", int32).unwrap();
            builder
                .operation(body, OpCode(0x06), Operand::Node(local))
                .unwrap();
            builder.operation(body, OpCode(0x2A), Operand::None).unwrap();
        }
    }

    (builder, assembly)
}

/// Benchmark the identity pass over a mutable graph.
fn bench_rewrite_in_place(c: &mut Criterion) {
    let (builder, assembly) = synthetic(8, 32);
    let graph = builder.build();

    c.bench_function("rewrite_in_place", |b| {
        b.iter_batched(
            || MetadataRewriter::new(graph.clone()),
            |mut rewriter| black_box(rewriter.rewrite(black_box(assembly)).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark the identity pass over a frozen graph that is passed through.
fn bench_rewrite_frozen_pass_through(c: &mut Criterion) {
    let (builder, assembly) = synthetic(8, 32);
    let graph = builder.build_frozen();

    c.bench_function("rewrite_frozen_pass_through", |b| {
        b.iter_batched(
            || MetadataRewriter::with_config(graph.clone(), RewriterConfig::in_place()),
            |mut rewriter| black_box(rewriter.rewrite(black_box(assembly)).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark the identity pass that copies a frozen graph.
fn bench_rewrite_copying(c: &mut Criterion) {
    let (builder, assembly) = synthetic(8, 32);
    let graph = builder.build_frozen();

    c.bench_function("rewrite_copying", |b| {
        b.iter_batched(
            || MetadataRewriter::with_config(graph.clone(), RewriterConfig::copying()),
            |mut rewriter| black_box(rewriter.rewrite(black_box(assembly)).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark copying a chain of 256 nested generic instances.
/// Type: Box<Box<Box<...<int>...>>>
fn bench_rewrite_deep_generic_chain(c: &mut Criterion) {
    let mut builder = GraphBuilder::new();
    let assembly = builder.assembly("Deep").unwrap();
    let root = builder.root_namespace(assembly).unwrap();
    let generic = builder.class(root, "Box").unwrap();
    builder.generic_parameter(generic, "T").unwrap();
    let mut chain = builder
        .platform_reference(assembly, "System", "Int32")
        .unwrap();
    for _ in 0..256 {
        chain = builder.generic_instance(generic, &[chain]);
    }
    let graph = builder.build_frozen();

    c.bench_function("rewrite_deep_generic_chain", |b| {
        b.iter_batched(
            || MetadataRewriter::with_config(graph.clone(), RewriterConfig::copying()),
            |mut rewriter| black_box(rewriter.rewrite(black_box(chain)).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_rewrite_in_place,
    bench_rewrite_frozen_pass_through,
    bench_rewrite_copying,
    bench_rewrite_deep_generic_chain
);
criterion_main!(benches);
