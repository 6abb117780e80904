// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! wiregen: binary decoder generation from declarative type schemas.
//!
//! Given a declaration tree of fixed-layout composite types (unsigned
//! integer primitives, nested composites, fixed-count arrays), wiregen
//! produces two artifacts per type: its exact serialized byte length and
//! a C decode procedure that parses a buffer under a configurable byte
//! order, failing with a value-return error when the buffer is too short.
//!
//! # Pipeline
//!
//! Declaration tree -> [`TypeRegistry`] (resolution + acyclicity) ->
//! [`LengthTable`] (memoized wire lengths) -> [`CBackend`] (emitted
//! decoders). The [`Decoder`] executes the same decode contract
//! in-process against the schema, which is how the contract is tested
//! without compiling emitted C.
//!
//! # Example
//!
//! ```rust
//! use wiregen::{
//!     ByteOrder, CBackend, CompositeDecl, Decoder, LengthTable, PrimitiveKind, TypeRef,
//!     TypeRegistry, Value,
//! };
//!
//! let registry = TypeRegistry::from_decls(vec![CompositeDecl::new("Header")
//!     .field("version", PrimitiveKind::U16)
//!     .field("flags", PrimitiveKind::U8)
//!     .field("payload", TypeRef::array(PrimitiveKind::U8.into(), 2))])
//! .unwrap();
//! let lengths = LengthTable::build(&registry).unwrap();
//! assert_eq!(lengths.composite("Header").unwrap(), 4);
//!
//! // Decode in-process under the same contract the emitted C follows.
//! let decoder = Decoder::new(&registry, &lengths, ByteOrder::Little);
//! let (value, consumed) = decoder
//!     .decode_composite("Header", &[0x01, 0x00, 0xFF, 0x0A, 0x0B])
//!     .unwrap();
//! assert_eq!(consumed, 4);
//! assert_eq!(value.field("version").and_then(Value::as_u16), Some(1));
//!
//! // Emit the C translation unit.
//! let backend = CBackend::new(&registry, &lengths, ByteOrder::Little);
//! let unit = backend.emit_unit().unwrap();
//! assert!(unit.contains("ssize_t unmarshal_Header"));
//! ```

pub mod codegen;
pub mod decode;
pub mod endian;
pub mod layout;
pub mod registry;
pub mod schema;
pub mod value;

pub use codegen::CBackend;
pub use decode::{DecodeError, Decoder};
pub use endian::ByteOrder;
pub use layout::LengthTable;
pub use registry::{SchemaError, TypeRegistry};
pub use schema::{CompositeDecl, FieldDecl, PrimitiveKind, TypeRef};
pub use value::Value;
