// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire-length calculation, memoized per composite.
//!
//! Lengths are purely static: primitive width, count times element length
//! for arrays, sum of field lengths for composites. The table is built
//! once per run, before any decoder is emitted, because every emitted
//! decoder performs one upfront whole-composite bounds check against it.

use crate::registry::{SchemaError, TypeRegistry};
use crate::schema::TypeRef;
use std::collections::HashMap;

/// Finalized per-composite wire lengths.
pub struct LengthTable {
    by_name: HashMap<String, usize>,
}

impl LengthTable {
    /// Compute the length of every composite in the registry.
    ///
    /// Each composite is computed once and reused by every reference to
    /// it; the registry is validated, so the recursion terminates.
    pub fn build(registry: &TypeRegistry) -> Result<Self, SchemaError> {
        let mut by_name = HashMap::with_capacity(registry.decls().len());
        for decl in registry.decls() {
            Self::composite_len(registry, &decl.name, &mut by_name)?;
        }
        Ok(Self { by_name })
    }

    /// Wire length of a composite by name.
    pub fn composite(&self, name: &str) -> Result<usize, SchemaError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Wire length of any type reference.
    pub fn wire_len(&self, ty: &TypeRef) -> Result<usize, SchemaError> {
        match ty {
            TypeRef::Primitive(kind) => Ok(kind.width()),
            TypeRef::FixedArray { len: 0, .. } => Ok(0),
            TypeRef::FixedArray { elem, len } => Ok(len * self.wire_len(elem)?),
            TypeRef::Composite(name) => self.composite(name),
        }
    }

    fn composite_len(
        registry: &TypeRegistry,
        name: &str,
        memo: &mut HashMap<String, usize>,
    ) -> Result<usize, SchemaError> {
        if let Some(&len) = memo.get(name) {
            return Ok(len);
        }
        let decl = registry.resolve(name)?;
        let mut total = 0;
        for field in &decl.fields {
            total += Self::ref_len(registry, &field.ty, memo)?;
        }
        memo.insert(name.to_string(), total);
        Ok(total)
    }

    fn ref_len(
        registry: &TypeRegistry,
        ty: &TypeRef,
        memo: &mut HashMap<String, usize>,
    ) -> Result<usize, SchemaError> {
        match ty {
            TypeRef::Primitive(kind) => Ok(kind.width()),
            // Zero-count arrays occupy no bytes; the element type is not
            // visited, so a zero-count self reference stays finite.
            TypeRef::FixedArray { len: 0, .. } => Ok(0),
            TypeRef::FixedArray { elem, len } => Ok(len * Self::ref_len(registry, elem, memo)?),
            TypeRef::Composite(name) => Self::composite_len(registry, name, memo),
        }
    }
}
