// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema model: the declaration tree consumed by the generator.
//!
//! A schema is an ordered list of [`CompositeDecl`]s. Field order is wire
//! order; the serialized form of a composite is the flat concatenation of
//! its fields with no padding. The declaration tree is delivered as data
//! (YAML/JSON through serde) by an external front end; nothing in this
//! crate parses source text.

use serde::{Deserialize, Serialize};

/// Fixed-width unsigned integer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    U8,
    U16,
    U32,
    U64,
}

impl PrimitiveKind {
    /// Serialized width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// C spelling of this kind in emitted struct definitions.
    pub const fn c_name(self) -> &'static str {
        match self {
            Self::U8 => "uint8_t",
            Self::U16 => "uint16_t",
            Self::U32 => "uint32_t",
            Self::U64 => "uint64_t",
        }
    }
}

/// Reference to a wire type. Closed variant: resolution happens once at
/// registry construction, never during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// Fixed-width unsigned integer.
    Primitive(PrimitiveKind),
    /// Named composite; must resolve in the registry.
    Composite(String),
    /// Fixed-count repetition of an element type. `len` is part of the
    /// schema, never read from the wire. Zero is legal and occupies no
    /// bytes.
    #[serde(rename = "array")]
    FixedArray { elem: Box<TypeRef>, len: usize },
}

impl TypeRef {
    /// Reference a composite by name.
    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite(name.into())
    }

    /// Fixed-length array of `elem`.
    pub fn array(elem: TypeRef, len: usize) -> Self {
        Self::FixedArray {
            elem: Box::new(elem),
            len,
        }
    }
}

impl From<PrimitiveKind> for TypeRef {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

/// A named field inside a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A named composite type with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl CompositeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is wire order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.fields.push(FieldDecl::new(name, ty));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_widths() {
        assert_eq!(PrimitiveKind::U8.width(), 1);
        assert_eq!(PrimitiveKind::U16.width(), 2);
        assert_eq!(PrimitiveKind::U32.width(), 4);
        assert_eq!(PrimitiveKind::U64.width(), 8);
    }

    #[test]
    fn test_builder_preserves_field_order() {
        let decl = CompositeDecl::new("Header")
            .field("version", PrimitiveKind::U16)
            .field("flags", PrimitiveKind::U8)
            .field("payload", TypeRef::array(PrimitiveKind::U8.into(), 2));

        let names: Vec<&str> = decl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["version", "flags", "payload"]);
    }

    #[test]
    fn test_schema_from_yaml() {
        let yaml = r#"
name: Header
fields:
  - name: version
    type: { primitive: u16 }
  - name: flags
    type: { primitive: u8 }
  - name: payload
    type: { array: { elem: { primitive: u8 }, len: 2 } }
"#;
        let decl: CompositeDecl = serde_yaml::from_str(yaml).expect("parse schema");
        assert_eq!(decl.name, "Header");
        assert_eq!(decl.fields.len(), 3);
        assert_eq!(
            decl.fields[2].ty,
            TypeRef::array(PrimitiveKind::U8.into(), 2)
        );
    }

    #[test]
    fn test_nested_composite_from_json() {
        let json = r#"{
            "name": "Outer",
            "fields": [
                { "name": "inner", "type": { "composite": "Inner" } }
            ]
        }"#;
        let decl: CompositeDecl = serde_json::from_str(json).expect("parse schema");
        assert_eq!(decl.fields[0].ty, TypeRef::composite("Inner"));
    }
}
