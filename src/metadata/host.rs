//! Services a rewrite pass consumes from its host.
//!
//! A pass needs three collaborators it does not implement itself:
//!
//! - [`InternFactory`] returns one canonical key per structurally-equal reference, so that
//!   materialized references compare cheaply.
//! - [`PlatformTypeProvider`] supplies references to well-known core library types.
//! - [`ShallowCopy`] turns a frozen node into a fresh mutable working copy.
//!
//! [`MetadataHost`] bundles them; [`DefaultHost`] is the ready-made implementation used when
//! the caller does not supply one.
//!
//! # Thread Safety
//!
//! Hosts are shared through `Arc` and must be `Send + Sync`. The default [`InternTable`] is
//! backed by a `DashMap`, so concurrent passes (each with their own graph and cache) can share
//! one table and agree on keys.

use std::{
    fmt,
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{
    metadata::{
        graph::MetadataGraph,
        hash::structural_hash,
        node_id::NodeId,
        nodes::{
            expressions::{ConstantValue, MetadataConstant, MetadataTypeOf},
            namespaces::{NestedNamespaceReference, RootNamespaceReference},
            types::NamespaceTypeReference,
            units::{AssemblyReference, AssemblyVersion},
            Node,
        },
    },
    Result,
};

/// Canonical identity of a structurally unique reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedKey(pub u32);

impl fmt::Display for InternedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{}", self.0)
    }
}

/// Interning authority.
pub trait InternFactory: Send + Sync {
    /// Returns the canonical key of the structure of the node at `id`.
    ///
    /// # Errors
    /// Returns an error if the node or a followed child is not live.
    fn intern(&self, graph: &MetadataGraph, id: NodeId) -> Result<InternedKey>;
}

/// Default interning authority keyed by structural digest.
pub struct InternTable {
    keys: DashMap<u64, InternedKey>,
    next: AtomicU32,
}

impl InternTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        InternTable {
            keys: DashMap::new(),
            next: AtomicU32::new(1),
        }
    }

    /// Number of distinct structures seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing was interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for InternTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InternFactory for InternTable {
    fn intern(&self, graph: &MetadataGraph, id: NodeId) -> Result<InternedKey> {
        let digest = structural_hash(graph, id)?;
        let key = *self
            .keys
            .entry(digest)
            .or_insert_with(|| InternedKey(self.next.fetch_add(1, Ordering::Relaxed)));
        Ok(key)
    }
}

/// Well-known core library types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum PlatformType {
    /// System.Void
    Void,
    /// System.Boolean
    Boolean,
    /// System.Char
    Char,
    /// System.SByte
    SByte,
    /// System.Byte
    Byte,
    /// System.Int16
    Int16,
    /// System.UInt16
    UInt16,
    /// System.Int32
    Int32,
    /// System.UInt32
    UInt32,
    /// System.Int64
    Int64,
    /// System.UInt64
    UInt64,
    /// System.Single
    Single,
    /// System.Double
    Double,
    /// System.IntPtr
    IntPtr,
    /// System.UIntPtr
    UIntPtr,
    /// System.Object
    Object,
    /// System.String
    String,
    /// System.Type
    Type,
    /// System.ValueType
    ValueType,
    /// System.Enum
    Enum,
    /// System.Array
    Array,
    /// System.TypedReference
    TypedReference,
}

impl PlatformType {
    /// Simple name within the `System` namespace.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PlatformType::Void => "Void",
            PlatformType::Boolean => "Boolean",
            PlatformType::Char => "Char",
            PlatformType::SByte => "SByte",
            PlatformType::Byte => "Byte",
            PlatformType::Int16 => "Int16",
            PlatformType::UInt16 => "UInt16",
            PlatformType::Int32 => "Int32",
            PlatformType::UInt32 => "UInt32",
            PlatformType::Int64 => "Int64",
            PlatformType::UInt64 => "UInt64",
            PlatformType::Single => "Single",
            PlatformType::Double => "Double",
            PlatformType::IntPtr => "IntPtr",
            PlatformType::UIntPtr => "UIntPtr",
            PlatformType::Object => "Object",
            PlatformType::String => "String",
            PlatformType::Type => "Type",
            PlatformType::ValueType => "ValueType",
            PlatformType::Enum => "Enum",
            PlatformType::Array => "Array",
            PlatformType::TypedReference => "TypedReference",
        }
    }

    /// Returns `true` for value types.
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        !matches!(
            self,
            PlatformType::Object
                | PlatformType::String
                | PlatformType::Type
                | PlatformType::ValueType
                | PlatformType::Enum
                | PlatformType::Array
        )
    }

    /// The platform type of a constant value.
    #[must_use]
    pub fn of_constant(value: &ConstantValue) -> Self {
        match value {
            ConstantValue::Null => PlatformType::Object,
            ConstantValue::Boolean(_) => PlatformType::Boolean,
            ConstantValue::Char(_) => PlatformType::Char,
            ConstantValue::I1(_) => PlatformType::SByte,
            ConstantValue::U1(_) => PlatformType::Byte,
            ConstantValue::I2(_) => PlatformType::Int16,
            ConstantValue::U2(_) => PlatformType::UInt16,
            ConstantValue::I4(_) => PlatformType::Int32,
            ConstantValue::U4(_) => PlatformType::UInt32,
            ConstantValue::I8(_) => PlatformType::Int64,
            ConstantValue::U8(_) => PlatformType::UInt64,
            ConstantValue::R4(_) => PlatformType::Single,
            ConstantValue::R8(_) => PlatformType::Double,
            ConstantValue::String(_) => PlatformType::String,
        }
    }
}

/// Supplier of well-known type references.
pub trait PlatformTypeProvider: Send + Sync {
    /// Returns a reference to `kind`, materializing it in `graph` if needed.
    ///
    /// # Errors
    /// Returns an error if previously materialized nodes are no longer valid.
    fn platform_type(&self, graph: &mut MetadataGraph, kind: PlatformType) -> Result<NodeId>;
}

/// Provider that references types of a named core library.
///
/// Materialized references are frozen and memoized on the graph, so every request for the
/// same type within one graph yields the same node.
pub struct CoreLibrary {
    name: String,
    version: AssemblyVersion,
}

impl CoreLibrary {
    /// Creates a provider for the given core library assembly.
    #[must_use]
    pub fn new(name: &str, version: AssemblyVersion) -> Self {
        CoreLibrary {
            name: name.to_string(),
            version,
        }
    }

    /// Name of the core library assembly.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn system_namespace(&self, graph: &mut MetadataGraph) -> Result<NodeId> {
        if let Some(existing) = PlatformType::iter().find_map(|kind| graph.platform_type(kind)) {
            return Ok(graph
                .get::<NamespaceTypeReference>(existing)?
                .containing_namespace);
        }

        let assembly = graph.add_frozen(Node::AssemblyReference(AssemblyReference {
            name: self.name.clone(),
            version: self.version,
            ..Default::default()
        }));
        let root = graph.add_frozen(Node::RootNamespaceReference(RootNamespaceReference {
            unit: assembly,
        }));
        Ok(
            graph.add_frozen(Node::NestedNamespaceReference(NestedNamespaceReference {
                name: "System".to_string(),
                containing_namespace: root,
            })),
        )
    }
}

impl Default for CoreLibrary {
    fn default() -> Self {
        CoreLibrary::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0))
    }
}

impl PlatformTypeProvider for CoreLibrary {
    fn platform_type(&self, graph: &mut MetadataGraph, kind: PlatformType) -> Result<NodeId> {
        if let Some(id) = graph.platform_type(kind) {
            return Ok(id);
        }

        let namespace = self.system_namespace(graph)?;
        let id = graph.add_frozen(Node::NamespaceTypeReference(NamespaceTypeReference {
            name: kind.name().to_string(),
            generic_parameter_count: 0,
            is_value_type: kind.is_value_type(),
            containing_namespace: namespace,
        }));
        graph.set_platform_type(kind, id);
        Ok(id)
    }
}

/// Producer of mutable working copies.
///
/// The default implementation copies the payload and fills sentinel type slots of metadata
/// expressions with the matching platform type.
pub trait ShallowCopy: PlatformTypeProvider {
    /// Copies the node at `id` into a fresh mutable slot.
    ///
    /// # Errors
    /// Returns an error if `id` is not live.
    fn shallow_copy(&self, graph: &mut MetadataGraph, id: NodeId) -> Result<NodeId> {
        let copy = graph.copy_node(id)?;

        let missing = match graph.node(copy)? {
            Node::MetadataConstant(constant) if constant.constant_type.is_dummy() => {
                Some(PlatformType::of_constant(&constant.value))
            }
            Node::MetadataTypeOf(type_of) if type_of.expression_type.is_dummy() => {
                Some(PlatformType::Type)
            }
            _ => None,
        };

        if let Some(kind) = missing {
            let platform = self.platform_type(graph, kind)?;
            match graph.node_mut(copy)? {
                Node::MetadataConstant(MetadataConstant { constant_type, .. }) => {
                    *constant_type = platform;
                }
                Node::MetadataTypeOf(MetadataTypeOf {
                    expression_type, ..
                }) => *expression_type = platform,
                _ => {}
            }
        }

        Ok(copy)
    }
}

/// Everything a rewrite pass consumes from its environment.
pub trait MetadataHost: InternFactory + ShallowCopy {}

impl<T: InternFactory + ShallowCopy> MetadataHost for T {}

/// The default host: an [`InternTable`] and a [`CoreLibrary`] provider.
#[derive(Default)]
pub struct DefaultHost {
    interner: InternTable,
    core_library: CoreLibrary,
}

impl DefaultHost {
    /// Creates a host referencing `core_library` for platform types.
    #[must_use]
    pub fn new(core_library: CoreLibrary) -> Self {
        DefaultHost {
            interner: InternTable::new(),
            core_library,
        }
    }

    /// The intern table of this host.
    #[must_use]
    pub fn interner(&self) -> &InternTable {
        &self.interner
    }
}

impl InternFactory for DefaultHost {
    fn intern(&self, graph: &MetadataGraph, id: NodeId) -> Result<InternedKey> {
        self.interner.intern(graph, id)
    }
}

impl PlatformTypeProvider for DefaultHost {
    fn platform_type(&self, graph: &mut MetadataGraph, kind: PlatformType) -> Result<NodeId> {
        self.core_library.platform_type(graph, kind)
    }
}

impl ShallowCopy for DefaultHost {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::nodes::types::VectorTypeReference;

    #[test]
    fn test_platform_type_memoized() {
        let host = DefaultHost::default();
        let mut graph = MetadataGraph::new();

        let int32 = host.platform_type(&mut graph, PlatformType::Int32).unwrap();
        let again = host.platform_type(&mut graph, PlatformType::Int32).unwrap();
        let string = host.platform_type(&mut graph, PlatformType::String).unwrap();

        assert_eq!(int32, again);
        assert_ne!(int32, string);
        assert!(graph.is_frozen(int32).unwrap());

        let int32_ref = graph.get::<NamespaceTypeReference>(int32).unwrap();
        let string_ref = graph.get::<NamespaceTypeReference>(string).unwrap();
        assert_eq!(int32_ref.name, "Int32");
        assert!(int32_ref.is_value_type);
        assert!(!string_ref.is_value_type);
        assert_eq!(
            int32_ref.containing_namespace,
            string_ref.containing_namespace
        );
    }

    #[test]
    fn test_platform_namespace_chain() {
        let host = DefaultHost::new(CoreLibrary::new(
            "System.Runtime",
            AssemblyVersion::new(8, 0, 0, 0),
        ));
        let mut graph = MetadataGraph::new();
        let object = host.platform_type(&mut graph, PlatformType::Object).unwrap();

        let namespace = graph
            .get::<NamespaceTypeReference>(object)
            .unwrap()
            .containing_namespace;
        let system = graph.get::<NestedNamespaceReference>(namespace).unwrap();
        assert_eq!(system.name, "System");

        let root = graph
            .get::<RootNamespaceReference>(system.containing_namespace)
            .unwrap();
        let assembly = graph.get::<AssemblyReference>(root.unit).unwrap();
        assert_eq!(assembly.name, "System.Runtime");
    }

    #[test]
    fn test_constant_platform_types() {
        assert_eq!(
            PlatformType::of_constant(&ConstantValue::I4(1)),
            PlatformType::Int32
        );
        assert_eq!(
            PlatformType::of_constant(&ConstantValue::String("x".into())),
            PlatformType::String
        );
        assert_eq!(
            PlatformType::of_constant(&ConstantValue::Null),
            PlatformType::Object
        );
    }

    #[test]
    fn test_intern_structural_equality() {
        let host = DefaultHost::default();
        let mut graph = MetadataGraph::new();
        let int32 = host.platform_type(&mut graph, PlatformType::Int32).unwrap();

        let first = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: int32,
        }));
        let second = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: int32,
        }));
        let other = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: first,
        }));

        let first_key = host.intern(&graph, first).unwrap();
        assert_eq!(first_key, host.intern(&graph, second).unwrap());
        assert_ne!(first_key, host.intern(&graph, other).unwrap());
        assert_eq!(host.interner().len(), 2);
    }

    #[test]
    fn test_shallow_copy_fills_constant_type() {
        let host = DefaultHost::default();
        let mut graph = MetadataGraph::new();
        let constant = graph.add_frozen(Node::MetadataConstant(MetadataConstant {
            value: ConstantValue::Boolean(true),
            constant_type: NodeId::DUMMY,
        }));

        let copy = host.shallow_copy(&mut graph, constant).unwrap();
        let filled = graph.get::<MetadataConstant>(copy).unwrap().constant_type;
        assert_eq!(
            Some(filled),
            graph.platform_type(PlatformType::Boolean)
        );
        assert!(graph
            .get::<MetadataConstant>(constant)
            .unwrap()
            .constant_type
            .is_dummy());
    }

    #[test]
    fn test_shallow_copy_fills_typeof_type() {
        let host = DefaultHost::default();
        let mut graph = MetadataGraph::new();
        let type_of = graph.add_frozen(Node::MetadataTypeOf(MetadataTypeOf::default()));

        let copy = host.shallow_copy(&mut graph, type_of).unwrap();
        assert_eq!(
            Some(graph.get::<MetadataTypeOf>(copy).unwrap().expression_type),
            graph.platform_type(PlatformType::Type)
        );
    }
}
