// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! C backend: emits struct definitions, length constants and decode
//! procedures as one translation unit.
//!
//! The emitted decoders are plain value-returning C with no allocation
//! and no shared state, suitable for minimal-runtime and embedded use.
//! Composites are emitted dependencies-first, so every `len_` constant
//! and `unmarshal_` function is defined before its first use regardless
//! of schema declaration order.

use crate::endian::ByteOrder;
use crate::layout::LengthTable;
use crate::registry::{SchemaError, TypeRegistry};
use crate::schema::{CompositeDecl, FieldDecl, PrimitiveKind, TypeRef};
use std::collections::HashSet;
use std::fmt::Write;

const PRELUDE: &str = "\
/* Generated by wiregen. Do not edit.
 *
 * Each composite T gets:
 *   - static const size_t len_T: exact serialized byte length
 *   - ssize_t unmarshal_T(T *t, const uint8_t *data, size_t n):
 *     decodes one T from the front of data, returning the bytes
 *     consumed (always len_T), or WIREGEN_ERR_SHORT when n < len_T.
 *     On any negative return the output struct is indeterminate and
 *     must be discarded by the caller.
 */

#include <stddef.h>
#include <stdint.h>
#include <sys/types.h>

#define WIREGEN_ERR_SHORT (-1)

";

/// Decoder emitter for a validated schema.
pub struct CBackend<'a> {
    registry: &'a TypeRegistry,
    lengths: &'a LengthTable,
    order: ByteOrder,
}

impl<'a> CBackend<'a> {
    pub fn new(registry: &'a TypeRegistry, lengths: &'a LengthTable, order: ByteOrder) -> Self {
        Self {
            registry,
            lengths,
            order,
        }
    }

    /// Emit the complete translation unit for every composite in the
    /// registry.
    pub fn emit_unit(&self) -> Result<String, SchemaError> {
        let order = self.emission_order()?;
        tracing::info!(
            composites = order.len(),
            byte_order = ?self.order,
            "emitting translation unit"
        );

        let mut out = String::from(PRELUDE);
        for decl in &order {
            out.push_str(&self.emit_struct(decl));
            out.push('\n');
        }
        for decl in &order {
            out.push_str(&self.emit_length(decl)?);
            out.push('\n');
        }
        out.push('\n');
        for decl in &order {
            out.push_str(&self.emit_decoder(decl)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Emit the struct typedef for one composite.
    pub fn emit_struct(&self, decl: &CompositeDecl) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "typedef struct {{");
        for field in &decl.fields {
            out.push_str(&Self::render_field(field));
        }
        let _ = writeln!(out, "}} {};", decl.name);
        out
    }

    /// Emit the wire-length constant for one composite.
    pub fn emit_length(&self, decl: &CompositeDecl) -> Result<String, SchemaError> {
        let len = self.lengths.composite(&decl.name)?;
        Ok(format!("static const size_t len_{} = {};\n", decl.name, len))
    }

    /// Emit the decode procedure for one composite.
    pub fn emit_decoder(&self, decl: &CompositeDecl) -> Result<String, SchemaError> {
        let mut body = String::new();
        for field in &decl.fields {
            self.render_ref(&mut body, &field.ty, &format!("t->{}", field.name), 0, 1)?;
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "ssize_t unmarshal_{name}({name} *t, const uint8_t *data, size_t n)",
            name = decl.name
        );
        let _ = writeln!(out, "{{");
        let _ = writeln!(out, "    const uint8_t *p = data;");
        if decl.fields.iter().any(|f| Self::calls_out(&f.ty)) {
            let _ = writeln!(out, "    ssize_t ret;");
        }
        let _ = writeln!(out, "    if (n < len_{}) {{", decl.name);
        let _ = writeln!(out, "        return WIREGEN_ERR_SHORT;");
        let _ = writeln!(out, "    }}");
        out.push_str(&body);
        let _ = writeln!(out, "    return (ssize_t)(p - data);");
        let _ = writeln!(out, "}}");
        Ok(out)
    }

    fn render_ref(
        &self,
        out: &mut String,
        ty: &TypeRef,
        target: &str,
        depth: usize,
        indent: usize,
    ) -> Result<(), SchemaError> {
        let pad = "    ".repeat(indent);
        match ty {
            TypeRef::Primitive(kind) => {
                self.render_primitive(out, *kind, target, &pad);
                Ok(())
            }
            // Zero-count arrays occupy no bytes; nothing to emit.
            TypeRef::FixedArray { len: 0, .. } => Ok(()),
            TypeRef::FixedArray { elem, len } => {
                let var = format!("i{depth}");
                let _ = writeln!(
                    out,
                    "{pad}for (size_t {var} = 0; {var} < {len}; {var}++) {{"
                );
                self.render_ref(out, elem, &format!("{target}[{var}]"), depth + 1, indent + 1)?;
                let _ = writeln!(out, "{pad}}}");
                Ok(())
            }
            TypeRef::Composite(name) => {
                // Registry is validated; resolve keeps the emitter honest
                // if it is ever handed a foreign declaration.
                self.registry.resolve(name)?;
                let _ = writeln!(out, "{pad}ret = unmarshal_{name}(&{target}, p, n);");
                let _ = writeln!(out, "{pad}if (ret < 0) {{");
                let _ = writeln!(out, "{pad}    return ret;");
                let _ = writeln!(out, "{pad}}}");
                let _ = writeln!(out, "{pad}p += (size_t)ret;");
                let _ = writeln!(out, "{pad}n -= (size_t)ret;");
                Ok(())
            }
        }
    }

    fn render_primitive(&self, out: &mut String, kind: PrimitiveKind, target: &str, pad: &str) {
        let width = kind.width();
        if width == 1 {
            let _ = writeln!(out, "{pad}{target} = p[0];");
        } else {
            let c = kind.c_name();
            let terms: Vec<String> = (0..width)
                .map(|i| {
                    let shift = match self.order {
                        ByteOrder::Little => 8 * i,
                        ByteOrder::Big => 8 * (width - 1 - i),
                    };
                    if shift == 0 {
                        format!("({c})p[{i}]")
                    } else {
                        format!("({c})p[{i}] << {shift}")
                    }
                })
                .collect();
            let _ = writeln!(out, "{pad}{target} = ({c})({});", terms.join(" | "));
        }
        let _ = writeln!(out, "{pad}p += {width};");
        let _ = writeln!(out, "{pad}n -= {width};");
    }

    fn render_field(field: &FieldDecl) -> String {
        let mut dims = String::new();
        let mut ty = &field.ty;
        while let TypeRef::FixedArray { elem, len } = ty {
            let _ = write!(dims, "[{len}]");
            ty = elem;
        }
        let base = match ty {
            TypeRef::Primitive(kind) => kind.c_name(),
            TypeRef::Composite(name) => name.as_str(),
            TypeRef::FixedArray { .. } => unreachable!("peeled above"),
        };
        format!("    {base} {}{dims};\n", field.name)
    }

    /// Whether decoding this reference calls into another decoder (and
    /// therefore needs the `ret` local).
    fn calls_out(ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Primitive(_) => false,
            TypeRef::Composite(_) => true,
            TypeRef::FixedArray { len: 0, .. } => false,
            TypeRef::FixedArray { elem, .. } => Self::calls_out(elem),
        }
    }

    /// Dependencies-first ordering over the registry (DFS postorder).
    fn emission_order(&self) -> Result<Vec<&'a CompositeDecl>, SchemaError> {
        let mut order = Vec::with_capacity(self.registry.decls().len());
        let mut visited = HashSet::new();
        for decl in self.registry.decls() {
            self.visit(&decl.name, &mut visited, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        order: &mut Vec<&'a CompositeDecl>,
    ) -> Result<(), SchemaError> {
        if !visited.insert(name.to_string()) {
            return Ok(());
        }
        let decl = self.registry.resolve(name)?;
        for field in &decl.fields {
            self.visit_ref(&field.ty, visited, order)?;
        }
        order.push(decl);
        Ok(())
    }

    fn visit_ref(
        &self,
        ty: &TypeRef,
        visited: &mut HashSet<String>,
        order: &mut Vec<&'a CompositeDecl>,
    ) -> Result<(), SchemaError> {
        match ty {
            TypeRef::Primitive(_) => Ok(()),
            TypeRef::Composite(name) => self.visit(name, visited, order),
            TypeRef::FixedArray { elem, .. } => self.visit_ref(elem, visited, order),
        }
    }
}
