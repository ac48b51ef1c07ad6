//! Fluent construction of metadata graphs.
//!
//! Loading a graph from a binary image is outside this crate, so hosts and tests need a
//! convenient way to put graphs together by hand. [`GraphBuilder`] wires the bidirectional
//! edges a loader would produce (a namespace knows its unit, a type is appended to its
//! namespace's member list and to its unit's flat type list, a field knows its containing
//! type, ...) so callers only name the parts they care about.
//!
//! Nodes are created mutable. Call [`GraphBuilder::build_frozen`] to obtain a graph in the
//! state a loader hands over, where every node is shared and read-only.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::builder::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let assembly = builder.assembly("Sample")?;
//! let root = builder.root_namespace(assembly)?;
//! let point = builder.class(root, "Point")?;
//! let int32 = builder.platform_reference(assembly, "System", "Int32")?;
//! builder.field(point, "x", int32)?;
//!
//! let graph = builder.build_frozen();
//! assert!(graph.is_frozen(point)?);
//! # Ok::<(), dotrewrite::Error>(())
//! ```

use crate::{
    metadata::{
        graph::MetadataGraph,
        node_id::NodeId,
        nodes::{
            attributes::CustomAttribute,
            body::{LocalDefinition, MethodBody, OpCode, Operand, Operation},
            expressions::{ConstantValue, MetadataConstant},
            members::{
                FieldDefinition, FieldReference, MemberCore, MethodDefinition, MethodReference,
                ParameterDefinition, ParameterTypeInformation, SpecializedFieldReference,
            },
            namespaces::{
                NamespaceCore, NestedNamespace, NestedNamespaceReference, RootNamespace,
                RootNamespaceReference,
            },
            types::{
                GenericParameterCore, GenericTypeInstanceReference, GenericTypeParameter,
                NamespaceTypeDefinition, NamespaceTypeReference, NestedTypeDefinition,
                PointerTypeReference, TypeDefinitionCore, VectorTypeReference,
            },
            units::{AssemblyDefinition, AssemblyReference, AssemblyVersion, ModuleCore},
            Node,
        },
    },
    Result,
};

/// Builds a [`MetadataGraph`] with consistent back-links.
pub struct GraphBuilder {
    graph: MetadataGraph,
}

impl GraphBuilder {
    /// Creates a builder over an empty graph.
    #[must_use]
    pub fn new() -> Self {
        GraphBuilder {
            graph: MetadataGraph::new(),
        }
    }

    /// Starts from an existing graph.
    #[must_use]
    pub fn from_graph(graph: MetadataGraph) -> Self {
        GraphBuilder { graph }
    }

    /// Borrows the graph under construction.
    #[must_use]
    pub fn graph(&self) -> &MetadataGraph {
        &self.graph
    }

    /// Mutably borrows the graph under construction.
    pub fn graph_mut(&mut self) -> &mut MetadataGraph {
        &mut self.graph
    }

    /// Adds an arbitrary node.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.graph.add(node)
    }

    /// Finishes construction, leaving every node mutable.
    #[must_use]
    pub fn build(self) -> MetadataGraph {
        self.graph
    }

    /// Finishes construction and freezes every node.
    #[must_use]
    pub fn build_frozen(mut self) -> MetadataGraph {
        self.graph.freeze_all();
        self.graph
    }

    /// Adds an assembly together with its root namespace.
    ///
    /// # Errors
    /// Fails only if the graph is inconsistent.
    pub fn assembly(&mut self, name: &str) -> Result<NodeId> {
        let assembly = self.graph.add(Node::Assembly(AssemblyDefinition {
            name: name.to_string(),
            version: AssemblyVersion::new(1, 0, 0, 0),
            module: ModuleCore {
                name: format!("{name}.dll"),
                ..ModuleCore::default()
            },
            ..AssemblyDefinition::default()
        }));

        let root = self.graph.add(Node::RootNamespace(RootNamespace {
            namespace: NamespaceCore {
                unit: assembly,
                ..NamespaceCore::default()
            },
        }));
        self.graph.get_mut::<ModuleCore>(assembly)?.root_namespace = root;
        Ok(assembly)
    }

    /// Returns the root namespace of a unit.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module.
    pub fn root_namespace(&self, unit: NodeId) -> Result<NodeId> {
        Ok(self.graph.get::<ModuleCore>(unit)?.root_namespace)
    }

    /// Adds a nested namespace below `parent`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `parent` is not a namespace.
    pub fn namespace(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let unit = self.graph.get::<NamespaceCore>(parent)?.unit;
        let namespace = self.graph.add(Node::NestedNamespace(NestedNamespace {
            namespace: NamespaceCore {
                name: name.to_string(),
                unit,
                ..NamespaceCore::default()
            },
            containing_namespace: parent,
        }));
        self.graph
            .get_mut::<NamespaceCore>(parent)?
            .members
            .push(namespace);
        Ok(namespace)
    }

    fn unit_of_type(&self, mut ty: NodeId) -> Result<NodeId> {
        loop {
            match self.graph.node(ty)? {
                Node::NestedTypeDefinition(nested) => ty = nested.containing_type,
                Node::NamespaceTypeDefinition(def) => {
                    return Ok(self
                        .graph
                        .get::<NamespaceCore>(def.containing_namespace)?
                        .unit)
                }
                _ => return Ok(NodeId::DUMMY),
            }
        }
    }

    fn register_type(&mut self, unit: NodeId, ty: NodeId) -> Result<()> {
        if !unit.is_dummy() {
            self.graph.get_mut::<ModuleCore>(unit)?.all_types.push(ty);
        }
        Ok(())
    }

    /// Adds a class to `namespace` and to its unit's flat type list.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `namespace` is not a namespace.
    pub fn class(&mut self, namespace: NodeId, name: &str) -> Result<NodeId> {
        let unit = self.graph.get::<NamespaceCore>(namespace)?.unit;
        let ty = self
            .graph
            .add(Node::NamespaceTypeDefinition(NamespaceTypeDefinition {
                definition: TypeDefinitionCore {
                    name: name.to_string(),
                    ..TypeDefinitionCore::default()
                },
                containing_namespace: namespace,
            }));
        self.graph
            .get_mut::<NamespaceCore>(namespace)?
            .members
            .push(ty);
        self.register_type(unit, ty)?;
        Ok(ty)
    }

    /// Adds a type nested in `parent`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `parent` is not a type definition.
    pub fn nested_class(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let unit = self.unit_of_type(parent)?;
        let ty = self.graph.add(Node::NestedTypeDefinition(NestedTypeDefinition {
            definition: TypeDefinitionCore {
                name: name.to_string(),
                ..TypeDefinitionCore::default()
            },
            containing_type: parent,
        }));
        self.graph
            .get_mut::<TypeDefinitionCore>(parent)?
            .nested_types
            .push(ty);
        self.register_type(unit, ty)?;
        Ok(ty)
    }

    /// Declares a generic parameter on a type definition.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `ty` is not a type definition.
    pub fn generic_parameter(&mut self, ty: NodeId, name: &str) -> Result<NodeId> {
        let index = self.graph.get::<TypeDefinitionCore>(ty)?.generic_parameters.len();
        let parameter = self.graph.add(Node::GenericTypeParameter(GenericTypeParameter {
            parameter: GenericParameterCore {
                name: name.to_string(),
                index: index as u16,
                ..GenericParameterCore::default()
            },
            defining_type: ty,
        }));
        self.graph
            .get_mut::<TypeDefinitionCore>(ty)?
            .generic_parameters
            .push(parameter);
        Ok(parameter)
    }

    /// Adds a field of type `field_type` to `ty`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `ty` is not a type definition.
    pub fn field(&mut self, ty: NodeId, name: &str, field_type: NodeId) -> Result<NodeId> {
        let field = self.graph.add(Node::FieldDefinition(FieldDefinition {
            member: MemberCore {
                name: name.to_string(),
                containing_type: ty,
                ..MemberCore::default()
            },
            field_type,
            ..FieldDefinition::default()
        }));
        self.graph
            .get_mut::<TypeDefinitionCore>(ty)?
            .fields
            .push(field);
        Ok(field)
    }

    /// Adds a method returning `return_type` to `ty`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `ty` is not a type definition.
    pub fn method(&mut self, ty: NodeId, name: &str, return_type: NodeId) -> Result<NodeId> {
        let method = self.graph.add(Node::MethodDefinition(MethodDefinition {
            member: MemberCore {
                name: name.to_string(),
                containing_type: ty,
                ..MemberCore::default()
            },
            return_type,
            ..MethodDefinition::default()
        }));
        self.graph
            .get_mut::<TypeDefinitionCore>(ty)?
            .methods
            .push(method);
        Ok(method)
    }

    /// Appends a parameter to a method definition.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `method` is not a method definition.
    pub fn parameter(&mut self, method: NodeId, name: &str, ty: NodeId) -> Result<NodeId> {
        let index = self.graph.get::<MethodDefinition>(method)?.parameters.len();
        let parameter = self.graph.add(Node::ParameterDefinition(ParameterDefinition {
            name: name.to_string(),
            index: index as u16,
            containing_signature: method,
            parameter_type: ty,
            ..ParameterDefinition::default()
        }));
        self.graph
            .get_mut::<MethodDefinition>(method)?
            .parameters
            .push(parameter);
        Ok(parameter)
    }

    /// Gives a method an empty body.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `method` is not a method definition.
    pub fn body(&mut self, method: NodeId) -> Result<NodeId> {
        let body = self.graph.add(Node::MethodBody(MethodBody {
            method_definition: method,
            max_stack: 8,
            locals_are_zero_initialized: true,
            ..MethodBody::default()
        }));
        self.graph.get_mut::<MethodDefinition>(method)?.body = body;
        Ok(body)
    }

    /// Appends a local variable to a body.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `body` is not a method body.
    pub fn local(&mut self, body: NodeId, name: &str, ty: NodeId) -> Result<NodeId> {
        let (method, index) = {
            let data = self.graph.get::<MethodBody>(body)?;
            (data.method_definition, data.local_variables.len())
        };
        let local = self.graph.add(Node::LocalDefinition(LocalDefinition {
            name: name.to_string(),
            index: index as u16,
            local_type: ty,
            method_definition: method,
            ..LocalDefinition::default()
        }));
        self.graph
            .get_mut::<MethodBody>(body)?
            .local_variables
            .push(local);
        Ok(local)
    }

    /// Appends an operation to a body, computing its offset from the previous one.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `body` is not a method body.
    pub fn operation(&mut self, body: NodeId, opcode: OpCode, value: Operand) -> Result<NodeId> {
        let offset = self.graph.get::<MethodBody>(body)?.operations.len() as u32;
        let operation = self.graph.add(Node::Operation(Operation {
            offset,
            opcode,
            value,
        }));
        self.graph
            .get_mut::<MethodBody>(body)?
            .operations
            .push(operation);
        Ok(operation)
    }

    /// Adds a reference to an external assembly and lists it on `unit`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module.
    pub fn assembly_reference(&mut self, unit: NodeId, name: &str) -> Result<NodeId> {
        let reference = self.graph.add(Node::AssemblyReference(AssemblyReference {
            name: name.to_string(),
            version: AssemblyVersion::new(4, 0, 0, 0),
            ..AssemblyReference::default()
        }));
        self.graph
            .get_mut::<ModuleCore>(unit)?
            .assembly_references
            .push(reference);
        Ok(reference)
    }

    /// Adds `namespace.name` as a type reference into a referenced core library and lists
    /// it on `unit`.
    ///
    /// The assembly reference and namespace chain are created on first use and reused.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module.
    pub fn platform_reference(&mut self, unit: NodeId, namespace: &str, name: &str) -> Result<NodeId> {
        let existing = self
            .graph
            .get::<ModuleCore>(unit)?
            .assembly_references
            .iter()
            .copied()
            .find(|&id| self.graph.node(id).ok().and_then(Node::name) == Some("mscorlib"));
        let library = match existing {
            Some(id) => id,
            None => self.assembly_reference(unit, "mscorlib")?,
        };

        let root = self
            .graph
            .add(Node::RootNamespaceReference(RootNamespaceReference { unit: library }));
        let containing_namespace =
            self.graph
                .add(Node::NestedNamespaceReference(NestedNamespaceReference {
                    name: namespace.to_string(),
                    containing_namespace: root,
                }));
        let reference = self
            .graph
            .add(Node::NamespaceTypeReference(NamespaceTypeReference {
                name: name.to_string(),
                containing_namespace,
                ..NamespaceTypeReference::default()
            }));
        self.graph
            .get_mut::<ModuleCore>(unit)?
            .type_references
            .push(reference);
        Ok(reference)
    }

    /// Adds `element[]`.
    pub fn vector(&mut self, element_type: NodeId) -> NodeId {
        self.graph
            .add(Node::VectorTypeReference(VectorTypeReference { element_type }))
    }

    /// Adds `target*`.
    pub fn pointer(&mut self, target_type: NodeId) -> NodeId {
        self.graph
            .add(Node::PointerTypeReference(PointerTypeReference { target_type }))
    }

    /// Adds `generic<arguments...>`.
    pub fn generic_instance(&mut self, generic_type: NodeId, generic_arguments: &[NodeId]) -> NodeId {
        self.graph
            .add(Node::GenericTypeInstanceReference(GenericTypeInstanceReference {
                generic_type,
                generic_arguments: generic_arguments.to_vec(),
            }))
    }

    /// Adds a field reference and lists it on `unit`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module.
    pub fn field_reference(
        &mut self,
        unit: NodeId,
        containing_type: NodeId,
        name: &str,
        field_type: NodeId,
    ) -> Result<NodeId> {
        let reference = self.graph.add(Node::FieldReference(FieldReference {
            name: name.to_string(),
            containing_type,
            field_type,
            is_static: false,
        }));
        self.graph
            .get_mut::<ModuleCore>(unit)?
            .type_member_references
            .push(reference);
        Ok(reference)
    }

    /// Adds a field reference viewed through a generic instance and lists it on `unit`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module or if
    /// `unspecialized` is not a field reference.
    pub fn specialized_field_reference(
        &mut self,
        unit: NodeId,
        containing_type: NodeId,
        unspecialized: NodeId,
        field_type: NodeId,
    ) -> Result<NodeId> {
        let name = self.graph.get::<FieldReference>(unspecialized)?.name.clone();
        let reference = self
            .graph
            .add(Node::SpecializedFieldReference(SpecializedFieldReference {
                reference: FieldReference {
                    name,
                    containing_type,
                    field_type,
                    is_static: false,
                },
                unspecialized_version: unspecialized,
            }));
        self.graph
            .get_mut::<ModuleCore>(unit)?
            .type_member_references
            .push(reference);
        Ok(reference)
    }

    /// Adds a method reference with the given parameter types and lists it on `unit`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `unit` is not an assembly or module.
    pub fn method_reference(
        &mut self,
        unit: NodeId,
        containing_type: NodeId,
        name: &str,
        return_type: NodeId,
        parameter_types: &[NodeId],
    ) -> Result<NodeId> {
        let reference = self.graph.add(Node::MethodReference(MethodReference {
            name: name.to_string(),
            containing_type,
            return_type,
            ..MethodReference::default()
        }));

        let mut parameters = Vec::with_capacity(parameter_types.len());
        for (index, &parameter_type) in parameter_types.iter().enumerate() {
            parameters.push(self.graph.add(Node::ParameterTypeInformation(
                ParameterTypeInformation {
                    index: index as u16,
                    containing_signature: reference,
                    parameter_type,
                    ..ParameterTypeInformation::default()
                },
            )));
        }
        self.graph.get_mut::<MethodReference>(reference)?.parameters = parameters;
        self.graph
            .get_mut::<ModuleCore>(unit)?
            .type_member_references
            .push(reference);
        Ok(reference)
    }

    /// Adds a compile-time constant expression.
    pub fn constant(&mut self, value: ConstantValue, constant_type: NodeId) -> NodeId {
        self.graph.add(Node::MetadataConstant(MetadataConstant {
            value,
            constant_type,
        }))
    }

    /// Attaches a custom attribute built from `constructor` and positional `arguments` to a
    /// type definition.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if `ty` is not a type definition.
    pub fn type_attribute(
        &mut self,
        ty: NodeId,
        constructor: NodeId,
        arguments: &[NodeId],
    ) -> Result<NodeId> {
        let attribute = self.graph.add(Node::CustomAttribute(CustomAttribute {
            constructor,
            arguments: arguments.to_vec(),
            named_arguments: Vec::new(),
        }));
        self.graph
            .get_mut::<TypeDefinitionCore>(ty)?
            .attributes
            .push(attribute);
        Ok(attribute)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::kinds::NodeKind;

    #[test]
    fn test_assembly_has_root_namespace() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Sample").unwrap();
        let root = builder.root_namespace(assembly).unwrap();

        let graph = builder.build();
        assert_eq!(graph.kind(root).unwrap(), NodeKind::RootNamespace);
        assert_eq!(graph.get::<NamespaceCore>(root).unwrap().unit, assembly);
    }

    #[test]
    fn test_types_are_registered_in_order() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Sample").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let ns = builder.namespace(root, "Geometry").unwrap();
        let a = builder.class(ns, "A").unwrap();
        let inner = builder.nested_class(a, "Inner").unwrap();
        let b = builder.class(root, "B").unwrap();

        let graph = builder.build();
        assert_eq!(
            graph.get::<ModuleCore>(assembly).unwrap().all_types,
            vec![a, inner, b]
        );
        assert_eq!(graph.get::<NamespaceCore>(ns).unwrap().members, vec![a]);
        assert_eq!(
            graph.get::<NestedTypeDefinition>(inner).unwrap().containing_type,
            a
        );
    }

    #[test]
    fn test_method_signature_wiring() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Sample").unwrap();
        let root = builder.root_namespace(assembly).unwrap();
        let ty = builder.class(root, "Program").unwrap();
        let void = builder.platform_reference(assembly, "System", "Void").unwrap();
        let int32 = builder.platform_reference(assembly, "System", "Int32").unwrap();
        let main = builder.method(ty, "Main", void).unwrap();
        let arg = builder.parameter(main, "value", int32).unwrap();
        let body = builder.body(main).unwrap();
        let local = builder.local(body, "tmp", int32).unwrap();

        let graph = builder.build();
        let method = graph.get::<MethodDefinition>(main).unwrap();
        assert_eq!(method.parameters, vec![arg]);
        assert_eq!(method.body, body);
        assert_eq!(
            graph.get::<LocalDefinition>(local).unwrap().method_definition,
            main
        );
        assert_eq!(
            graph.get::<ModuleCore>(assembly).unwrap().assembly_references.len(),
            1
        );
    }

    #[test]
    fn test_build_frozen() {
        let mut builder = GraphBuilder::new();
        let assembly = builder.assembly("Sample").unwrap();
        let graph = builder.build_frozen();
        assert!(graph.is_frozen(assembly).unwrap());
    }
}
