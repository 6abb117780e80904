// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory values produced by the interpretive decoder.

/// A decoded value. Struct fields keep wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Struct(Vec<(String, Value)>),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Widen any unsigned primitive to u64.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(*v)),
            Self::U16(v) => Some(u64::from(*v)),
            Self::U32(v) => Some(u64::from(*v)),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Struct field lookup by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_reject_other_kinds() {
        let v = Value::from(7u16);
        assert_eq!(v.as_u16(), Some(7));
        assert_eq!(v.as_u32(), None);
        assert_eq!(v.as_uint(), Some(7));
    }

    #[test]
    fn test_struct_field_lookup() {
        let v = Value::Struct(vec![
            ("x".to_string(), Value::from(1u8)),
            ("y".to_string(), Value::from(2u8)),
        ]);
        assert_eq!(v.field("y").and_then(Value::as_u8), Some(2));
        assert!(v.field("z").is_none());
    }

    #[test]
    fn test_array_access() {
        let v = Value::Array(vec![Value::from(1u8), Value::from(2u8)]);
        let slots = v.as_array().expect("array");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].as_u8(), Some(2));
    }
}
