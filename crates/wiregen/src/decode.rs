// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven decoder.
//!
//! Executes the same contract as the emitted C decoders, in-process:
//! one upfront whole-composite bounds check, then field dispatch in
//! declaration order, returning the consumed byte count. The result is
//! all-or-nothing: the [`Value`] is assembled privately and only handed
//! out on success, so a failed decode leaves nothing half-written.
//!
//! The decoder is pure and reentrant. It reads only the immutable
//! registry, length table and byte order it was constructed with, so one
//! instance may be shared across threads against independent buffers.

use crate::endian::ByteOrder;
use crate::layout::LengthTable;
use crate::registry::{SchemaError, TypeRegistry};
use crate::schema::{PrimitiveKind, TypeRef};
use crate::value::Value;
use thiserror::Error;

/// Decode-time errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer cannot hold the composite. Recoverable at the call
    /// site: the caller may wait for more data or reject the input.
    #[error("buffer too short: need {need} bytes, have {have}")]
    BufferTooShort { need: usize, have: usize },
    /// The requested type is not part of the schema this decoder was
    /// built from.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Interpretive decoder over a validated schema.
pub struct Decoder<'a> {
    registry: &'a TypeRegistry,
    lengths: &'a LengthTable,
    order: ByteOrder,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a TypeRegistry, lengths: &'a LengthTable, order: ByteOrder) -> Self {
        Self {
            registry,
            lengths,
            order,
        }
    }

    /// Decode one composite from the front of `bytes`.
    ///
    /// Returns the decoded value and the number of bytes consumed, which
    /// equals the composite's wire length. Trailing bytes are left
    /// unread.
    pub fn decode_composite(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<(Value, usize), DecodeError> {
        let decl = self.registry.resolve(name)?;
        let need = self.lengths.composite(name)?;
        // Single check covering the whole composite; no per-field checks
        // are needed past this point for directly held primitives.
        if bytes.len() < need {
            return Err(DecodeError::BufferTooShort {
                need,
                have: bytes.len(),
            });
        }

        let mut cursor = 0;
        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            let (value, used) = self.decode_ref(&field.ty, &bytes[cursor..])?;
            cursor += used;
            fields.push((field.name.clone(), value));
        }
        Ok((Value::Struct(fields), cursor))
    }

    fn decode_ref(&self, ty: &TypeRef, bytes: &[u8]) -> Result<(Value, usize), DecodeError> {
        match ty {
            TypeRef::Primitive(kind) => self.decode_primitive(*kind, bytes),
            TypeRef::FixedArray { elem, len } => {
                let mut cursor = 0;
                let mut slots = Vec::with_capacity(*len);
                // The count is part of the schema, never read from the wire.
                for _ in 0..*len {
                    let (value, used) = self.decode_ref(elem, &bytes[cursor..])?;
                    cursor += used;
                    slots.push(value);
                }
                Ok((Value::Array(slots), cursor))
            }
            // Nested composites run their own upfront check against the
            // remaining buffer; the first failure propagates immediately.
            TypeRef::Composite(name) => self.decode_composite(name, bytes),
        }
    }

    fn decode_primitive(
        &self,
        kind: PrimitiveKind,
        bytes: &[u8],
    ) -> Result<(Value, usize), DecodeError> {
        let width = kind.width();
        if bytes.len() < width {
            return Err(DecodeError::BufferTooShort {
                need: width,
                have: bytes.len(),
            });
        }
        let raw = self.order.read_uint(&bytes[..width]);
        let value = match kind {
            PrimitiveKind::U8 => Value::U8(raw as u8),
            PrimitiveKind::U16 => Value::U16(raw as u16),
            PrimitiveKind::U32 => Value::U32(raw as u32),
            PrimitiveKind::U64 => Value::U64(raw),
        };
        Ok((value, width))
    }
}
