//! Custom and security attributes, custom modifiers and interop descriptions.

use bitflags::bitflags;

use crate::metadata::node_id::NodeId;

/// Native types relevant to marshalling rules, ECMA-335 II.23.4 values.
#[allow(non_snake_case)]
pub mod NATIVE_TYPE {
    /// Boolean type
    pub const BOOLEAN: u8 = 0x02;
    /// Signed 32-bit integer
    pub const I4: u8 = 0x07;
    /// BSTR type
    pub const BSTR: u8 = 0x13;
    /// LPSTR type
    pub const LPSTR: u8 = 0x14;
    /// LPWSTR type
    pub const LPWSTR: u8 = 0x15;
    /// `IUnknown` interface pointer
    pub const IUNKNOWN: u8 = 0x19;
    /// `IDispatch` interface pointer
    pub const IDISPATCH: u8 = 0x1a;
    /// COM interface
    pub const INTERFACE: u8 = 0x1c;
    /// COM safe array
    pub const SAFEARRAY: u8 = 0x1d;
    /// Fixed size array
    pub const FIXEDARRAY: u8 = 0x1e;
    /// Pointer to a C style array
    pub const LPARRAY: u8 = 0x2a;
    /// Custom marshaller
    pub const CUSTOMMARSHALER: u8 = 0x2c;
}

/// COM variant types relevant to safe array marshalling.
#[allow(non_snake_case)]
pub mod VARIANT_TYPE {
    /// Signed 32-bit integer
    pub const I4: u16 = 3;
    /// BSTR
    pub const BSTR: u16 = 8;
    /// `IDispatch` pointer
    pub const DISPATCH: u16 = 9;
    /// `IUnknown` pointer
    pub const UNKNOWN: u16 = 13;
    /// User defined record
    pub const RECORD: u16 = 36;
}

/// Declarative security action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SecurityAction {
    /// Refuse demands for the permission
    Deny = 0x0001,
    /// All callers must hold the permission
    #[default]
    Demand = 0x0002,
    /// Satisfy demands for the permission
    Assert = 0x0003,
    /// Immediate caller must hold the permission
    LinkDemand = 0x0005,
    /// Deriving or overriding code must hold the permission
    InheritanceDemand = 0x0006,
    /// Minimum permissions required to run
    RequestMinimum = 0x0007,
    /// Optional permissions to grant
    RequestOptional = 0x0008,
    /// Permissions not to grant
    RequestRefuse = 0x0009,
    /// Only the specified permission may be used
    PermitOnly = 0x000E,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// P/Invoke attributes, ECMA-335 II.23.1.8 values
    pub struct PInvokeFlags: u16 {
        /// Use the import name as is
        const NO_MANGLE = 0x0001;
        /// Marshal strings as ANSI
        const CHAR_SET_ANSI = 0x0002;
        /// Marshal strings as Unicode
        const CHAR_SET_UNICODE = 0x0004;
        /// Capture the last error after the call
        const SUPPORTS_LAST_ERROR = 0x0040;
        /// Platform default calling convention
        const CALL_CONV_WINAPI = 0x0100;
        /// `cdecl` calling convention
        const CALL_CONV_CDECL = 0x0200;
        /// `stdcall` calling convention
        const CALL_CONV_STDCALL = 0x0300;
    }
}

/// A custom attribute application.
#[derive(Clone, Debug, Default)]
pub struct CustomAttribute {
    /// Attribute constructor
    pub constructor: NodeId,
    /// Positional arguments
    pub arguments: Vec<NodeId>,
    /// Named field and property assignments
    pub named_arguments: Vec<NodeId>,
}

/// A set of declarative security attributes.
#[derive(Clone, Debug, Default)]
pub struct SecurityAttribute {
    /// Security action
    pub action: SecurityAction,
    /// Permission attributes
    pub attributes: Vec<NodeId>,
}

/// A required or optional custom modifier.
#[derive(Clone, Debug, Default)]
pub struct CustomModifier {
    /// `modopt` when `true`, `modreq` otherwise
    pub is_optional: bool,
    /// The modifier type
    pub modifier: NodeId,
}

/// Marshalling description of a field, parameter or return value.
#[derive(Clone, Debug, Default)]
pub struct MarshallingInformation {
    /// Native type, one of [`NATIVE_TYPE`]
    pub unmanaged_type: u8,
    /// Custom marshaller type, meaningful for [`NATIVE_TYPE::CUSTOMMARSHALER`]
    pub custom_marshaller: NodeId,
    /// Cookie passed to the custom marshaller
    pub custom_marshaller_runtime_argument: String,
    /// Element variant type of a safe array, one of [`VARIANT_TYPE`]
    pub safe_array_element_subtype: u16,
    /// User defined element type of a safe array
    pub safe_array_element_user_defined_subtype: NodeId,
    /// Array element native type
    pub element_type: u8,
    /// Number of elements of a fixed array
    pub number_of_elements: u32,
    /// Index of the parameter holding the element count
    pub param_index: Option<u32>,
}

impl MarshallingInformation {
    /// Returns `true` if a custom marshaller type is referenced.
    #[must_use]
    pub fn uses_custom_marshaller(&self) -> bool {
        self.unmanaged_type == NATIVE_TYPE::CUSTOMMARSHALER
    }

    /// Returns `true` if a user defined safe array element type is referenced.
    #[must_use]
    pub fn uses_safe_array_user_subtype(&self) -> bool {
        self.unmanaged_type == NATIVE_TYPE::SAFEARRAY
            && matches!(
                self.safe_array_element_subtype,
                VARIANT_TYPE::DISPATCH | VARIANT_TYPE::UNKNOWN | VARIANT_TYPE::RECORD
            )
    }
}

/// P/Invoke import description.
#[derive(Clone, Debug, Default)]
pub struct PlatformInvokeInformation {
    /// Name of the imported entry point
    pub import_name: String,
    /// Module reference of the native library
    pub import_module: NodeId,
    /// Import attributes
    pub flags: PInvokeFlags,
}

/// PE section holding a block of initialized data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PeSection {
    /// `.text`
    #[default]
    Text,
    /// `.sdata` / `.data`
    Data,
    /// `.tls`
    Tls,
}

/// A block of initialized data, the target of a mapped field.
#[derive(Clone, Debug, Default)]
pub struct SectionBlock {
    /// Containing section
    pub section: PeSection,
    /// Offset within the section
    pub offset: u32,
    /// Raw data
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshalling_conditions() {
        let mut info = MarshallingInformation {
            unmanaged_type: NATIVE_TYPE::CUSTOMMARSHALER,
            ..Default::default()
        };
        assert!(info.uses_custom_marshaller());
        assert!(!info.uses_safe_array_user_subtype());

        info.unmanaged_type = NATIVE_TYPE::SAFEARRAY;
        info.safe_array_element_subtype = VARIANT_TYPE::I4;
        assert!(!info.uses_safe_array_user_subtype());

        for subtype in [VARIANT_TYPE::DISPATCH, VARIANT_TYPE::UNKNOWN, VARIANT_TYPE::RECORD] {
            info.safe_array_element_subtype = subtype;
            assert!(info.uses_safe_array_user_subtype());
        }
    }
}
