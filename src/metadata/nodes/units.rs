//! Program units, unit references and unit-level resources.
//!
//! An assembly is a module that additionally carries a manifest (attributes, exported types,
//! files, member modules, resources). Both share [`ModuleCore`], so module-level rules apply
//! to either without duplication.

use std::fmt;

use crate::metadata::node_id::NodeId;

/// Four-part assembly version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AssemblyVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
    /// Build number
    pub build: u16,
    /// Revision number
    pub revision: u16,
}

impl AssemblyVersion {
    /// Creates a new version.
    #[must_use]
    pub fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        AssemblyVersion {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Slots shared by assemblies and plain modules.
#[derive(Clone, Debug, Default)]
pub struct ModuleCore {
    /// Module name, e.g. `Library.dll`
    pub name: String,
    /// Custom attributes applied to the module
    pub module_attributes: Vec<NodeId>,
    /// Assemblies referenced by this module
    pub assembly_references: Vec<NodeId>,
    /// Modules referenced by this module
    pub module_references: Vec<NodeId>,
    /// Unmanaged Win32 resources
    pub win32_resources: Vec<NodeId>,
    /// The root namespace of the module
    pub root_namespace: NodeId,
    /// Flat list of every type defined in the module, in declaration order
    pub all_types: Vec<NodeId>,
    /// Field and method references used by the module, in original order
    pub type_member_references: Vec<NodeId>,
    /// Type references used by the module, in original order
    pub type_references: Vec<NodeId>,
    /// The entry point method, or the sentinel
    pub entry_point: NodeId,
}

/// A module that is not an assembly manifest.
#[derive(Clone, Debug, Default)]
pub struct ModuleDefinition {
    /// Module slots
    pub module: ModuleCore,
}

/// An assembly definition.
#[derive(Clone, Debug, Default)]
pub struct AssemblyDefinition {
    /// Module slots of the manifest module
    pub module: ModuleCore,
    /// Assembly name (without extension)
    pub name: String,
    /// Assembly version
    pub version: AssemblyVersion,
    /// Culture, empty for neutral
    pub culture: String,
    /// Public key blob
    pub public_key: Vec<u8>,
    /// Custom attributes applied to the assembly
    pub assembly_attributes: Vec<NodeId>,
    /// Types exported (forwarded) by this assembly
    pub exported_types: Vec<NodeId>,
    /// Files of a multi-file assembly
    pub files: Vec<NodeId>,
    /// Additional modules of a multi-module assembly
    pub member_modules: Vec<NodeId>,
    /// Manifest resources
    pub resources: Vec<NodeId>,
    /// Declarative security attributes
    pub security_attributes: Vec<NodeId>,
}

/// A reference to another assembly.
#[derive(Clone, Debug, Default)]
pub struct AssemblyReference {
    /// Referenced assembly name
    pub name: String,
    /// Referenced version
    pub version: AssemblyVersion,
    /// Referenced culture
    pub culture: String,
    /// Public key token blob
    pub public_key_token: Vec<u8>,
    /// The assembly this reference resolves to, or the sentinel
    pub resolved_assembly: NodeId,
}

/// A reference to another module.
#[derive(Clone, Debug, Default)]
pub struct ModuleReference {
    /// Referenced module name
    pub name: String,
    /// The module this reference resolves to, or the sentinel
    pub resolved_module: NodeId,
}

/// A file of a multi-file assembly.
#[derive(Clone, Debug, Default)]
pub struct FileReference {
    /// File name
    pub name: String,
    /// Whether the file carries metadata
    pub has_metadata: bool,
    /// Hash of the file contents
    pub hash_value: Vec<u8>,
}

/// A manifest resource.
#[derive(Clone, Debug, Default)]
pub struct ResourceReference {
    /// Resource name
    pub name: String,
    /// Whether the resource is visible outside the assembly
    pub is_public: bool,
    /// Custom attributes applied to the resource
    pub attributes: Vec<NodeId>,
    /// The assembly that holds the resource data
    pub defining_assembly: NodeId,
    /// Embedded data, empty for linked resources
    pub data: Vec<u8>,
}

/// An unmanaged Win32 resource.
#[derive(Clone, Debug, Default)]
pub struct Win32Resource {
    /// Numeric resource type, when not named
    pub type_id: u32,
    /// Resource type name, when named
    pub type_name: String,
    /// Numeric resource id, when not named
    pub id: u32,
    /// Resource name, when named
    pub name: String,
    /// Language identifier
    pub language_id: u32,
    /// Code page of the data
    pub code_page: u32,
    /// Raw resource data
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        assert_eq!(AssemblyVersion::new(4, 0, 0, 0).to_string(), "4.0.0.0");
        assert_eq!(AssemblyVersion::default().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_module_defaults_to_sentinel() {
        let module = ModuleCore::default();
        assert!(module.root_namespace.is_dummy());
        assert!(module.entry_point.is_dummy());
    }
}
