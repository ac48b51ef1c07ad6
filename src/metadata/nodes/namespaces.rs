//! Namespace definitions, namespace references and exported type aliases.

use crate::metadata::node_id::NodeId;

/// Slots shared by root and nested namespace definitions.
#[derive(Clone, Debug, Default)]
pub struct NamespaceCore {
    /// Simple name, empty for the root namespace
    pub name: String,
    /// Custom attributes applied to the namespace
    pub attributes: Vec<NodeId>,
    /// Members: types, nested namespaces, global methods and fields, aliases
    pub members: Vec<NodeId>,
    /// The unit that declares this namespace
    pub unit: NodeId,
}

/// The root namespace of a unit.
#[derive(Clone, Debug, Default)]
pub struct RootNamespace {
    /// Namespace slots
    pub namespace: NamespaceCore,
}

/// A namespace nested in another namespace.
#[derive(Clone, Debug, Default)]
pub struct NestedNamespace {
    /// Namespace slots
    pub namespace: NamespaceCore,
    /// The enclosing namespace
    pub containing_namespace: NodeId,
}

/// A reference to the root namespace of a (possibly external) unit.
#[derive(Clone, Debug, Default)]
pub struct RootNamespaceReference {
    /// The referenced unit
    pub unit: NodeId,
}

/// A reference to a nested namespace of a (possibly external) unit.
#[derive(Clone, Debug, Default)]
pub struct NestedNamespaceReference {
    /// Simple name
    pub name: String,
    /// The enclosing namespace reference
    pub containing_namespace: NodeId,
}

/// Slots shared by namespace-level and nested exported type aliases.
#[derive(Clone, Debug, Default)]
pub struct AliasCore {
    /// Alias name
    pub name: String,
    /// Custom attributes applied to the alias
    pub attributes: Vec<NodeId>,
    /// The type the alias forwards to
    pub aliased_type: NodeId,
    /// Nested aliases
    pub members: Vec<NodeId>,
}

/// An exported type declared at namespace level.
#[derive(Clone, Debug, Default)]
pub struct NamespaceAliasForType {
    /// Alias slots
    pub alias: AliasCore,
    /// The namespace declaring the alias
    pub containing_namespace: NodeId,
}

/// An exported type nested within another exported type.
#[derive(Clone, Debug, Default)]
pub struct NestedAliasForType {
    /// Alias slots
    pub alias: AliasCore,
    /// The enclosing alias
    pub containing_alias: NodeId,
}
