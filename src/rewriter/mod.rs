//! The rewriting engine.
//!
//! A rewrite pass walks a metadata graph from one root and gives every reachable node a
//! chance to be replaced. The default pass, [`MetadataRewriter`], replaces nothing: mutable
//! nodes are visited in place, and frozen nodes are either passed through or, with
//! [`RewriterConfig::copy_and_rewrite_immutable_references`], shallow-copied so the result
//! is a graph that no longer shares mutable state with its input.
//!
//! Transformations implement [`Rewriter`] and override the operations they care about. Every
//! operation has a default body in [`rules`] (one function per node kind) or [`dispatch`]
//! (one function per broad category), so an override can call the default and post-process
//! its result.
//!
//! # Guarantees
//!
//! - Every node is rewritten at most once per pass; a second encounter yields the first
//!   result, so shared nodes stay shared.
//! - A node's working copy is recorded before its children are visited, which makes cyclic
//!   graphs terminate.
//! - Pure nodes (generic instances and specialized references) are only replaced when one of
//!   their children was.
//! - Lists keep their order, including the flat type list of a module, which is rebuilt in
//!   its original order even though types are reached through the namespace tree.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::builder::GraphBuilder;
//! use dotrewrite::prelude::*;
//!
//! # fn main() -> dotrewrite::Result<()> {
//! let mut builder = GraphBuilder::new();
//! let assembly = builder.assembly("Sample")?;
//! let root = builder.root_namespace(assembly)?;
//! builder.class(root, "Program")?;
//!
//! let mut rewriter = MetadataRewriter::with_config(builder.build_frozen(), RewriterConfig::copying());
//! let copy = rewriter.rewrite(assembly)?;
//! assert_ne!(copy, assembly);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod rules;
pub mod specialized;

use std::sync::Arc;

use tracing::debug;

pub use cache::{CacheStats, CacheTable, RewriteCache};
pub use config::RewriterConfig;
pub use context::RewriteContext;

use crate::{
    metadata::{graph::MetadataGraph, host::MetadataHost, node_id::NodeId},
    Result,
};

/// A transformation over a metadata graph.
///
/// Only [`Rewriter::context`] and [`Rewriter::context_mut`] have to be provided. Every other
/// method has a default that keeps the node and rewrites its children; override a method to
/// replace the node, change its slots, or skip its subtree.
///
/// Operations return the node that takes the place of their input. Returning the sentinel
/// from an operation whose result lands in a list removes nothing by itself, but module
/// reference lists drop sentinel results.
///
/// # Errors
///
/// Every operation returns [`crate::Error::Precondition`] when a definition list holds a
/// node of the wrong family, [`crate::Error::RecursionLimit`] when the pass nests deeper
/// than configured, and, in strict mode, [`crate::Error::UnexpectedKind`] when a category
/// slot holds a node that does not belong to the category.
pub trait Rewriter {
    /// The state of the pass.
    fn context(&self) -> &RewriteContext;

    /// Mutable access to the state of the pass.
    fn context_mut(&mut self) -> &mut RewriteContext;

    /// Rewrites a node of any kind.
    ///
    /// Called on an idle rewriter this starts a pass and logs its outcome.
    fn rewrite(&mut self, id: NodeId) -> Result<NodeId> {
        if !self.context().path().is_empty() {
            return dispatch::rewrite_any(self, id);
        }

        debug!(root = %id, config = ?self.context().config(), "rewrite pass started");
        let result = dispatch::rewrite_any(self, id);
        let stats = self.context().cache().stats();
        debug!(
            root = %id,
            hits = stats.hits,
            misses = stats.misses,
            copies = stats.copies,
            retracted = stats.retracted,
            stopped = self.context().is_stopped(),
            ok = result.is_ok(),
            "rewrite pass finished"
        );
        result
    }

    /// Resolves a definition found in a reference slot to its working copy without visiting
    /// the definition's own children.
    fn rewrite_definition_reference(&mut self, id: NodeId) -> Result<NodeId> {
        self.context_mut().resolve_definition(id)
    }

    /// The innermost method definition being rewritten, or the sentinel.
    fn current_method(&self) -> NodeId {
        self.context().current_method()
    }

    /// The innermost type definition being rewritten, or the sentinel.
    fn current_type(&self) -> NodeId {
        self.context().current_type()
    }

    /// The innermost namespace being rewritten, or the sentinel.
    fn current_namespace(&self) -> NodeId {
        self.context().current_namespace()
    }

    /// The unit being rewritten, or the sentinel.
    fn current_unit(&self) -> NodeId {
        self.context().current_unit()
    }

    /// The innermost signature being rewritten, or the sentinel.
    fn current_signature(&self) -> NodeId {
        self.context().current_signature()
    }

    /// Stops the pass. Every operation called afterwards returns its input unchanged.
    fn stop_traversal(&mut self) {
        self.context_mut().stop();
    }

    // Categories

    /// Routes a node in a type slot to the rule of its concrete kind.
    fn rewrite_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_type_reference(self, id)
    }

    /// Routes a node in a field reference slot to the rule of its concrete kind.
    fn rewrite_field_reference(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_field_reference(self, id)
    }

    /// Routes a node in a method reference slot to the rule of its concrete kind.
    fn rewrite_method_reference(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_method_reference(self, id)
    }

    /// Routes a member of a namespace (type, nested namespace, global member or alias).
    fn rewrite_namespace_member(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_namespace_member(self, id)
    }

    /// Routes a member of a type (field, method, property, event or nested type).
    fn rewrite_type_member(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_type_member(self, id)
    }

    /// Routes the containing namespace of a namespace-level node.
    fn rewrite_unit_namespace_reference(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_unit_namespace_reference(self, id)
    }

    /// Routes a node in a unit reference slot.
    fn rewrite_unit_reference(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_unit_reference(self, id)
    }

    /// Routes a metadata expression, such as a custom attribute argument.
    fn rewrite_expression(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_expression(self, id)
    }

    /// Routes the operand of an operation by its payload kind.
    fn rewrite_operand(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_operand(self, id)
    }

    /// Routes an exported type alias.
    fn rewrite_alias(&mut self, id: NodeId) -> Result<NodeId> {
        dispatch::rewrite_alias(self, id)
    }

    // Units

    /// Rewrites an assembly manifest, then its module slots.
    fn rewrite_assembly(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_assembly(self, id)
    }

    /// Rewrites a module that is not an assembly manifest.
    fn rewrite_module(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_module(self, id)
    }

    /// Rewrites a reference to another assembly.
    fn rewrite_assembly_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_assembly_reference(self, id)
    }

    /// Rewrites a reference to another module.
    fn rewrite_module_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_module_reference(self, id)
    }

    /// Rewrites a manifest resource.
    fn rewrite_resource_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_resource_reference(self, id)
    }

    /// Rewrites a file of the assembly. Files have no children.
    fn rewrite_file_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_file_reference(self, id)
    }

    /// Rewrites a native resource. Native resources have no children.
    fn rewrite_win32_resource(&mut self, id: NodeId) -> Result<NodeId> {
        rules::units::walk_win32_resource(self, id)
    }

    // Namespaces

    /// Rewrites the root namespace of a unit.
    fn rewrite_root_namespace(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_root_namespace(self, id)
    }

    /// Rewrites a namespace nested in another.
    fn rewrite_nested_namespace(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_nested_namespace(self, id)
    }

    /// Rewrites the root namespace of a referenced unit.
    fn rewrite_root_namespace_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_root_namespace_reference(self, id)
    }

    /// Rewrites a namespace of a referenced unit.
    fn rewrite_nested_namespace_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_nested_namespace_reference(self, id)
    }

    /// Rewrites a type forwarder declared in a namespace.
    fn rewrite_namespace_alias_for_type(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_namespace_alias_for_type(self, id)
    }

    /// Rewrites a type forwarder nested in another forwarder.
    fn rewrite_nested_alias_for_type(&mut self, id: NodeId) -> Result<NodeId> {
        rules::namespaces::walk_nested_alias_for_type(self, id)
    }

    // Types

    /// Rewrites a top-level type definition and records it for the module's flat type list.
    fn rewrite_namespace_type_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_namespace_type_definition(self, id)
    }

    /// Rewrites a nested type definition and records it for the module's flat type list.
    fn rewrite_nested_type_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_nested_type_definition(self, id)
    }

    /// Rewrites a generic parameter declared on a type.
    fn rewrite_generic_type_parameter(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_generic_type_parameter(self, id)
    }

    /// Rewrites a generic parameter declared on a method.
    fn rewrite_generic_method_parameter(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_generic_method_parameter(self, id)
    }

    /// Rewrites a reference to a top-level type.
    fn rewrite_namespace_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_namespace_type_reference(self, id)
    }

    /// Rewrites a reference to a nested type.
    fn rewrite_nested_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_nested_type_reference(self, id)
    }

    /// Rewrites a nested type seen through a generic instance, then its generic original.
    fn rewrite_specialized_nested_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_specialized_nested_type_reference(self, id)
    }

    /// Rewrites a reference to a type's generic parameter.
    fn rewrite_generic_type_parameter_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_generic_type_parameter_reference(self, id)
    }

    /// Rewrites a reference to a method's generic parameter.
    fn rewrite_generic_method_parameter_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_generic_method_parameter_reference(self, id)
    }

    /// Rewrites a generic instantiation. Kept as is when no argument changed.
    fn rewrite_generic_type_instance_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_generic_type_instance_reference(self, id)
    }

    /// Rewrites a single-dimensional, zero-based array type.
    fn rewrite_vector_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_vector_type_reference(self, id)
    }

    /// Rewrites a multi-dimensional array type.
    fn rewrite_matrix_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_matrix_type_reference(self, id)
    }

    /// Rewrites an unmanaged pointer type.
    fn rewrite_pointer_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_pointer_type_reference(self, id)
    }

    /// Rewrites a managed (by-reference) pointer type.
    fn rewrite_managed_pointer_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_managed_pointer_type_reference(self, id)
    }

    /// Rewrites a function pointer signature.
    fn rewrite_function_pointer_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_function_pointer_type_reference(self, id)
    }

    /// Rewrites a type carrying custom modifiers.
    fn rewrite_modified_type_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::types::walk_modified_type_reference(self, id)
    }

    // Members

    /// Rewrites a field declared on a type.
    fn rewrite_field_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_field_definition(self, id)
    }

    /// Rewrites a field declared at namespace level.
    fn rewrite_global_field_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_global_field_definition(self, id)
    }

    /// Rewrites a field of a generic instance, then its generic original.
    fn rewrite_specialized_field_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_field_definition(self, id)
    }

    /// Rewrites a field reference that is neither a definition nor specialized.
    fn rewrite_plain_field_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_field_reference(self, id)
    }

    /// Rewrites a field reference through a generic instance, then its generic original.
    fn rewrite_specialized_field_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_field_reference(self, id)
    }

    /// Rewrites a method declared on a type, including its body unless abstract or external.
    fn rewrite_method_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_method_definition(self, id)
    }

    /// Rewrites a method declared at namespace level.
    fn rewrite_global_method_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_global_method_definition(self, id)
    }

    /// Rewrites a method of a generic instance, then its generic original.
    fn rewrite_specialized_method_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_method_definition(self, id)
    }

    /// Rewrites a method reference that is neither a definition, specialized, nor an
    /// instantiation.
    fn rewrite_plain_method_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_method_reference(self, id)
    }

    /// Rewrites a method reference through a generic instance, then its generic original.
    fn rewrite_specialized_method_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_method_reference(self, id)
    }

    /// Rewrites an instantiation of a generic method.
    fn rewrite_generic_method_instance_reference(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_generic_method_instance_reference(self, id)
    }

    /// Rewrites a property.
    fn rewrite_property_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_property_definition(self, id)
    }

    /// Rewrites a property of a generic instance, then its generic original.
    fn rewrite_specialized_property_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_property_definition(self, id)
    }

    /// Rewrites an event.
    fn rewrite_event_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_event_definition(self, id)
    }

    /// Rewrites an event of a generic instance, then its generic original.
    fn rewrite_specialized_event_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_specialized_event_definition(self, id)
    }

    /// Rewrites a parameter of a method definition.
    fn rewrite_parameter_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_parameter_definition(self, id)
    }

    /// Rewrites a parameter of a method reference or function pointer signature.
    fn rewrite_parameter_type_information(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_parameter_type_information(self, id)
    }

    /// Rewrites an explicit interface implementation override.
    fn rewrite_method_implementation(&mut self, id: NodeId) -> Result<NodeId> {
        rules::members::walk_method_implementation(self, id)
    }

    // Bodies

    /// Rewrites a method body: locals, then operations, then exception regions.
    fn rewrite_method_body(&mut self, id: NodeId) -> Result<NodeId> {
        rules::body::walk_method_body(self, id)
    }

    /// Rewrites one instruction and its operand.
    fn rewrite_operation(&mut self, id: NodeId) -> Result<NodeId> {
        rules::body::walk_operation(self, id)
    }

    /// Rewrites a local variable of a method body.
    fn rewrite_local_definition(&mut self, id: NodeId) -> Result<NodeId> {
        rules::body::walk_local_definition(self, id)
    }

    /// Rewrites an exception handling region.
    fn rewrite_operation_exception_information(&mut self, id: NodeId) -> Result<NodeId> {
        rules::body::walk_operation_exception_information(self, id)
    }

    // Expressions

    /// Rewrites a compile-time constant.
    fn rewrite_metadata_constant(&mut self, id: NodeId) -> Result<NodeId> {
        rules::expressions::walk_metadata_constant(self, id)
    }

    /// Rewrites an array creation expression.
    fn rewrite_metadata_create_array(&mut self, id: NodeId) -> Result<NodeId> {
        rules::expressions::walk_metadata_create_array(self, id)
    }

    /// Rewrites a `typeof` expression.
    fn rewrite_metadata_type_of(&mut self, id: NodeId) -> Result<NodeId> {
        rules::expressions::walk_metadata_type_of(self, id)
    }

    /// Rewrites a named custom attribute argument.
    fn rewrite_metadata_named_argument(&mut self, id: NodeId) -> Result<NodeId> {
        rules::expressions::walk_metadata_named_argument(self, id)
    }

    // Attributes and interop

    /// Rewrites a custom attribute.
    fn rewrite_custom_attribute(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_custom_attribute(self, id)
    }

    /// Rewrites a declarative security attribute.
    fn rewrite_security_attribute(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_security_attribute(self, id)
    }

    /// Rewrites a custom modifier.
    fn rewrite_custom_modifier(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_custom_modifier(self, id)
    }

    /// Rewrites explicit marshalling data.
    fn rewrite_marshalling_information(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_marshalling_information(self, id)
    }

    /// Rewrites platform invoke data.
    fn rewrite_platform_invoke_information(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_platform_invoke_information(self, id)
    }

    /// Rewrites a block of a PE section. Section blocks have no children.
    fn rewrite_section_block(&mut self, id: NodeId) -> Result<NodeId> {
        rules::attributes::walk_section_block(self, id)
    }

    // Lists

    /// Rewrites a list of custom attributes.
    fn rewrite_custom_attributes(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::attributes::walk_custom_attributes(self, items)
    }

    /// Rewrites a list of security attributes.
    fn rewrite_security_attributes(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::attributes::walk_security_attributes(self, items)
    }

    /// Rewrites a list of custom modifiers.
    fn rewrite_custom_modifiers(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::attributes::walk_custom_modifiers(self, items)
    }

    /// Rewrites a list of types of any shape.
    fn rewrite_type_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::types::walk_type_references(self, items)
    }

    /// Rewrites the generic parameters of a type.
    fn rewrite_generic_type_parameters(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::types::walk_generic_type_parameters(self, items)
    }

    /// Rewrites the generic parameters of a method.
    fn rewrite_generic_method_parameters(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::types::walk_generic_method_parameters(self, items)
    }

    /// Rewrites the nested types of a type.
    fn rewrite_nested_types(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::types::walk_nested_types(self, items)
    }

    /// Rewrites the events of a type.
    fn rewrite_events(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_events(self, items)
    }

    /// Rewrites the fields of a type.
    fn rewrite_fields(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_fields(self, items)
    }

    /// Rewrites the methods of a type.
    fn rewrite_methods(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_methods(self, items)
    }

    /// Rewrites the properties of a type.
    fn rewrite_properties(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_properties(self, items)
    }

    /// Rewrites a mixed list of members, such as the private helpers of a type.
    fn rewrite_type_members(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_type_members(self, items)
    }

    /// Rewrites a list of method references, such as property accessors.
    fn rewrite_method_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_method_references(self, items)
    }

    /// Rewrites the parameters of a method or property.
    fn rewrite_parameters(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_parameters(self, items)
    }

    /// Rewrites the parameters of a reference signature.
    fn rewrite_parameter_type_informations(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_parameter_type_informations(self, items)
    }

    /// Rewrites the explicit implementation overrides of a type.
    fn rewrite_method_implementations(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::members::walk_method_implementations(self, items)
    }

    /// Rewrites the locals of a method body.
    fn rewrite_local_definitions(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::body::walk_local_definitions(self, items)
    }

    /// Rewrites the instructions of a method body.
    fn rewrite_operations(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::body::walk_operations(self, items)
    }

    /// Rewrites the exception regions of a method body.
    fn rewrite_operation_exception_informations(
        &mut self,
        items: &[NodeId],
    ) -> Result<Vec<NodeId>> {
        rules::body::walk_operation_exception_informations(self, items)
    }

    /// Rewrites a list of expressions, such as attribute arguments.
    fn rewrite_expressions(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::expressions::walk_expressions(self, items)
    }

    /// Rewrites the named arguments of a custom attribute.
    fn rewrite_named_arguments(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::expressions::walk_named_arguments(self, items)
    }

    /// Rewrites the members of a namespace.
    ///
    /// Types left out of the result also leave the module's flat type list.
    fn rewrite_namespace_members(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::namespaces::walk_namespace_members(self, items)
    }

    /// Rewrites the exported types of an assembly.
    fn rewrite_aliases(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::namespaces::walk_aliases(self, items)
    }

    /// Rewrites the aliases nested in an alias.
    fn rewrite_nested_aliases(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::namespaces::walk_nested_aliases(self, items)
    }

    /// Rewrites the assembly references of a module.
    fn rewrite_assembly_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_assembly_references(self, items)
    }

    /// Rewrites the module references of a module.
    fn rewrite_module_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_module_references(self, items)
    }

    /// Rewrites the secondary modules of an assembly.
    fn rewrite_member_modules(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_member_modules(self, items)
    }

    /// Rewrites the manifest resources of an assembly.
    fn rewrite_resource_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_resource_references(self, items)
    }

    /// Rewrites the files of an assembly.
    fn rewrite_file_references(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_file_references(self, items)
    }

    /// Rewrites the native resources of a module.
    fn rewrite_win32_resources(&mut self, items: &[NodeId]) -> Result<Vec<NodeId>> {
        rules::units::walk_win32_resources(self, items)
    }
}

/// The identity transformation.
///
/// Useful on its own to detach a frozen graph (with
/// [`RewriterConfig::copy_and_rewrite_immutable_references`]) and as the field a custom
/// rewriter delegates its context to.
pub struct MetadataRewriter {
    context: RewriteContext,
}

impl MetadataRewriter {
    /// Creates a rewriter over `graph` with the default configuration.
    #[must_use]
    pub fn new(graph: MetadataGraph) -> Self {
        Self::with_config(graph, RewriterConfig::default())
    }

    /// Creates a rewriter over `graph` with `config`.
    #[must_use]
    pub fn with_config(graph: MetadataGraph, config: RewriterConfig) -> Self {
        MetadataRewriter {
            context: RewriteContext::new(graph, config),
        }
    }

    /// Creates a rewriter over `graph` served by `host`.
    #[must_use]
    pub fn with_host(
        graph: MetadataGraph,
        config: RewriterConfig,
        host: Arc<dyn MetadataHost>,
    ) -> Self {
        MetadataRewriter {
            context: RewriteContext::with_host(graph, config, host),
        }
    }

    /// Gives up the rewriter and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> MetadataGraph {
        self.context.into_graph()
    }
}

impl Rewriter for MetadataRewriter {
    fn context(&self) -> &RewriteContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RewriteContext {
        &mut self.context
    }
}
