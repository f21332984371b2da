// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static message descriptors.
//!
//! A descriptor is the schema-compile-time layout of one logical message
//! type: its qualified name and the ordered list of scalar members with their
//! offsets inside the transport representation. Descriptors live in `static`
//! tables produced alongside the message structs and are never mutated.

/// Scalar field kinds supported by the descriptor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    pub const fn size_bytes(self) -> u32 {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::U8 | PrimitiveKind::I8 => 1,
            PrimitiveKind::U16 | PrimitiveKind::I16 => 2,
            PrimitiveKind::U32 | PrimitiveKind::I32 | PrimitiveKind::F32 => 4,
            PrimitiveKind::U64 | PrimitiveKind::I64 | PrimitiveKind::F64 => 8,
        }
    }

    /// CDR alignment equals the primitive size for scalars.
    pub const fn alignment(self) -> u8 {
        self.size_bytes() as u8
    }
}

/// One declared member of a message type.
#[derive(Debug, Clone, Copy)]
pub struct MessageMember {
    pub name: &'static str,
    pub kind: PrimitiveKind,
    /// Byte offset within the encoded payload (after encapsulation framing).
    pub offset_bytes: u32,
}

/// Schema-compile-time description of one message type.
#[derive(Debug, Clone, Copy)]
pub struct MessageDescriptor {
    /// Package-style namespace, e.g. `"typebind_msgs::msg"`.
    pub namespace: &'static str,
    pub name: &'static str,
    pub members: &'static [MessageMember],
}

impl MessageDescriptor {
    /// Fully-qualified name (`namespace::name`).
    pub fn fqn(&self) -> String {
        if self.namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static MEMBERS: [MessageMember; 2] = [
        MessageMember {
            name: "id",
            kind: PrimitiveKind::U32,
            offset_bytes: 0,
        },
        MessageMember {
            name: "value",
            kind: PrimitiveKind::F64,
            offset_bytes: 8,
        },
    ];

    #[test]
    fn fqn_joins_namespace_and_name() {
        let desc = MessageDescriptor {
            namespace: "demo::msg",
            name: "Reading",
            members: &MEMBERS,
        };
        assert_eq!(desc.fqn(), "demo::msg::Reading");
        assert_eq!(desc.member_count(), 2);

        let bare = MessageDescriptor {
            namespace: "",
            name: "Reading",
            members: &MEMBERS,
        };
        assert_eq!(bare.fqn(), "Reading");
    }

    #[test]
    fn primitive_sizes_match_cdr_alignment() {
        assert_eq!(PrimitiveKind::U8.size_bytes(), 1);
        assert_eq!(PrimitiveKind::F32.size_bytes(), 4);
        assert_eq!(PrimitiveKind::F64.alignment(), 8);
        assert_eq!(PrimitiveKind::Bool.alignment(), 1);
    }
}
