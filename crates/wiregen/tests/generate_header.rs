// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end run over a schema delivered as YAML: registry, lengths,
//! in-process decode and C emission.

use wiregen::{
    ByteOrder, CBackend, CompositeDecl, DecodeError, Decoder, LengthTable, TypeRegistry, Value,
};

const SCHEMA: &str = r#"
- name: Header
  fields:
    - name: version
      type: { primitive: u16 }
    - name: flags
      type: { primitive: u8 }
    - name: payload
      type: { array: { elem: { primitive: u8 }, len: 2 } }
"#;

fn load() -> (TypeRegistry, LengthTable) {
    let decls: Vec<CompositeDecl> = serde_yaml::from_str(SCHEMA).expect("parse schema");
    let registry = TypeRegistry::from_decls(decls).expect("valid schema");
    let lengths = LengthTable::build(&registry).expect("lengths");
    (registry, lengths)
}

#[test]
fn test_header_wire_length() {
    let (_, lengths) = load();
    assert_eq!(lengths.composite("Header").expect("Header"), 4);
}

#[test]
fn test_header_decode_leaves_trailing_byte_unread() {
    let (registry, lengths) = load();
    let decoder = Decoder::new(&registry, &lengths, ByteOrder::Little);

    let bytes = [0x01, 0x00, 0xFF, 0x0A, 0x0B];
    let (value, consumed) = decoder.decode_composite("Header", &bytes).expect("decode");

    assert_eq!(consumed, 4);
    assert_eq!(value.field("version").and_then(Value::as_u16), Some(1));
    assert_eq!(value.field("flags").and_then(Value::as_u8), Some(255));
    let payload: Vec<u8> = value
        .field("payload")
        .and_then(Value::as_array)
        .expect("payload")
        .iter()
        .map(|v| v.as_u8().expect("u8"))
        .collect();
    assert_eq!(payload, [10, 11]);
}

#[test]
fn test_header_decode_rejects_short_buffer() {
    let (registry, lengths) = load();
    let decoder = Decoder::new(&registry, &lengths, ByteOrder::Little);

    let err = decoder
        .decode_composite("Header", &[0x01, 0x00, 0xFF])
        .unwrap_err();
    assert_eq!(err, DecodeError::BufferTooShort { need: 4, have: 3 });
}

#[test]
fn test_header_emitted_unit() {
    let (registry, lengths) = load();
    let backend = CBackend::new(&registry, &lengths, ByteOrder::Little);

    let unit = backend.emit_unit().expect("unit");
    assert!(unit.contains("static const size_t len_Header = 4;"));
    assert!(unit.contains("ssize_t unmarshal_Header(Header *t, const uint8_t *data, size_t n)"));
    assert!(unit.contains("if (n < len_Header) {"));
    assert!(unit.contains("t->version = (uint16_t)((uint16_t)p[0] | (uint16_t)p[1] << 8);"));
    assert!(unit.contains("for (size_t i0 = 0; i0 < 2; i0++) {"));
}

#[test]
fn test_big_endian_run_over_same_schema() {
    // Byte order is per run, not per process: both orders side by side.
    let (registry, lengths) = load();

    let le = Decoder::new(&registry, &lengths, ByteOrder::Little);
    let be = Decoder::new(&registry, &lengths, ByteOrder::Big);
    let bytes = [0x01, 0x00, 0x00, 0x00, 0x00];

    let (v, _) = le.decode_composite("Header", &bytes).expect("le decode");
    assert_eq!(v.field("version").and_then(Value::as_u16), Some(1));
    let (v, _) = be.decode_composite("Header", &bytes).expect("be decode");
    assert_eq!(v.field("version").and_then(Value::as_u16), Some(0x0100));
}
