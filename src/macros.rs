#![allow(unused_macros)]

/// Implements [`crate::metadata::nodes::NodeData`] for a payload type.
///
/// Each arm names a [`crate::metadata::nodes::Node`] variant and, optionally, the field of
/// that variant's payload that holds the shared struct.
///
/// ```rust, ignore
///  node_data!(MemberCore => FieldDefinition.member, MethodDefinition.member);
///  node_data!(FieldReference => FieldReference, SpecializedFieldReference.reference);
/// ```
macro_rules! node_data {
    ($ty:ty => $($variant:ident $(. $field:ident)*),+ $(,)?) => {
        impl crate::metadata::nodes::NodeData for $ty {
            const NAME: &'static str = stringify!($ty);

            fn from_node(node: &crate::metadata::nodes::Node) -> Option<&Self> {
                match node {
                    $( crate::metadata::nodes::Node::$variant(inner) => Some(&(*inner) $(.$field)*), )+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }

            fn from_node_mut(node: &mut crate::metadata::nodes::Node) -> Option<&mut Self> {
                match node {
                    $( crate::metadata::nodes::Node::$variant(inner) => Some(&mut (*inner) $(.$field)*), )+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}

/// Reads a typed payload from the graph owned by a rewriter context.
///
/// ```rust, ignore
///  let field = read_node!(rw, FieldDefinition, id)?.clone();
/// ```
macro_rules! read_node {
    ($rw:expr, $ty:ty, $id:expr) => {
        $rw.context().graph().get::<$ty>($id)
    };
}

/// Writes a single slot of a typed payload in the graph owned by a rewriter context.
///
/// ```rust, ignore
///  write_slot!(rw, FieldDefinition, id, field_type = new_type);
/// ```
macro_rules! write_slot {
    ($rw:expr, $ty:ty, $id:expr, $($field:ident).+ = $value:expr) => {{
        let value = $value;
        $rw.context_mut().graph_mut().get_mut::<$ty>($id)?.$($field).+ = value;
    }};
}
