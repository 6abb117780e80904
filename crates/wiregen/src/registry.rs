// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: resolves composite names and validates the schema.
//!
//! Construction performs the whole validation pass up front. A registry
//! that exists is a registry whose references all resolve and whose
//! containment graph is acyclic, so the length table and the emitters
//! can recurse through it without re-checking.

use crate::schema::{CompositeDecl, TypeRef};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Generation-time schema errors. All of these are fatal: the schema
/// itself is unusable and the run produces no output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A composite reference does not resolve in the registry.
    #[error("unknown type `{0}`")]
    UnknownType(String),
    /// A composite transitively contains itself, so it has no finite
    /// wire length.
    #[error("cyclic type: {}", path.join(" -> "))]
    CyclicType { path: Vec<String> },
    /// Two composites share a name.
    #[error("duplicate composite `{0}`")]
    DuplicateType(String),
    /// Two fields of one composite share a name.
    #[error("duplicate field `{field}` in composite `{composite}`")]
    DuplicateField { composite: String, field: String },
}

/// Immutable name-to-declaration map, built once per generation run.
#[derive(Debug)]
pub struct TypeRegistry {
    decls: Vec<CompositeDecl>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Build and validate a registry from a declaration tree.
    ///
    /// Rejects duplicate composite and field names, unresolved composite
    /// references (including inside arrays), and containment cycles.
    pub fn from_decls(decls: Vec<CompositeDecl>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(decls.len());
        for (i, decl) in decls.iter().enumerate() {
            let mut seen = HashSet::new();
            for field in &decl.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        composite: decl.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            if index.insert(decl.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateType(decl.name.clone()));
            }
        }

        let registry = Self { decls, index };
        registry.validate()?;
        tracing::debug!(composites = registry.decls.len(), "schema validated");
        Ok(registry)
    }

    /// Look up a composite by name.
    pub fn resolve(&self, name: &str) -> Result<&CompositeDecl, SchemaError> {
        self.index
            .get(name)
            .map(|&i| &self.decls[i])
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// All declarations, in schema order.
    pub fn decls(&self) -> &[CompositeDecl] {
        &self.decls
    }

    /// Depth-first traversal of every composite's containment chains.
    ///
    /// The walk descends through array elements when the count is positive:
    /// a positive-count array of a self-containing composite has no finite
    /// length either. A zero-count array terminates the chain (it occupies
    /// no bytes and its element is never materialized), so only name
    /// resolution is checked below it.
    fn validate(&self) -> Result<(), SchemaError> {
        let mut path = Vec::new();
        let mut done = HashSet::new();
        for decl in &self.decls {
            self.check_composite(&decl.name, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn check_composite(
        &self,
        name: &str,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
    ) -> Result<(), SchemaError> {
        if done.contains(name) {
            return Ok(());
        }
        if path.iter().any(|p| p == name) {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            return Err(SchemaError::CyclicType { path: cycle });
        }
        let decl = self.resolve(name)?;
        path.push(name.to_string());
        for field in &decl.fields {
            self.check_ref(&field.ty, path, done)?;
        }
        path.pop();
        done.insert(name.to_string());
        Ok(())
    }

    fn check_ref(
        &self,
        ty: &TypeRef,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
    ) -> Result<(), SchemaError> {
        match ty {
            TypeRef::Primitive(_) => Ok(()),
            TypeRef::Composite(name) => self.check_composite(name, path, done),
            TypeRef::FixedArray { elem, len } => {
                if *len == 0 {
                    self.check_names(elem)
                } else {
                    self.check_ref(elem, path, done)
                }
            }
        }
    }

    /// Name resolution only, without cycle accounting.
    fn check_names(&self, ty: &TypeRef) -> Result<(), SchemaError> {
        match ty {
            TypeRef::Primitive(_) => Ok(()),
            TypeRef::Composite(name) => self.resolve(name).map(|_| ()),
            TypeRef::FixedArray { elem, .. } => self.check_names(elem),
        }
    }
}
