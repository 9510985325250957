//! `serde` serializer producing [`FieldValue`]s.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser;

use crate::bridge::display::Displayable;
use crate::document::field_value::FieldValue;
use crate::error::{FieldBridgeError, Result};

/// Serializes any value into a [`FieldValue`].
pub(super) struct FieldValueSerializer;

impl ser::Serializer for FieldValueSerializer {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeList;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<FieldValue> {
        Ok(FieldValue::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FieldValue> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<FieldValue> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<FieldValue> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<FieldValue> {
        Ok(FieldValue::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<FieldValue> {
        if let Ok(i) = i64::try_from(v) {
            Ok(FieldValue::Integer(i))
        } else if let Ok(u) = u64::try_from(v) {
            Ok(FieldValue::UnsignedInteger(u))
        } else {
            Ok(FieldValue::Text(v.to_string()))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<FieldValue> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<FieldValue> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<FieldValue> {
        self.serialize_u64(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<FieldValue> {
        Ok(FieldValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<FieldValue> {
        match u64::try_from(v) {
            Ok(u) => self.serialize_u64(u),
            Err(_) => Ok(FieldValue::Text(v.to_string())),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<FieldValue> {
        // Widen through the shortest f32 text so 0.1f32 stays "0.1".
        let widened = v.to_string().parse().unwrap_or(f64::from(v));
        Ok(FieldValue::Float(widened))
    }

    fn serialize_f64(self, v: f64) -> Result<FieldValue> {
        Ok(FieldValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<FieldValue> {
        Ok(FieldValue::Binary(v.to_vec()))
    }

    fn serialize_none(self) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<FieldValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldValue> {
        // `()` is the empty tuple.
        Ok(FieldValue::List(Vec::new()))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<FieldValue> {
        Ok(FieldValue::Enum(name.to_string()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FieldValue> {
        Ok(FieldValue::Enum(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<FieldValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<FieldValue> {
        let mut entries = BTreeMap::new();
        entries.insert(variant.to_string(), value.serialize(self)?);
        Ok(FieldValue::Map(entries))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeList> {
        Ok(SerializeList::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

/// Wraps a variant's content as `{variant: content}`.
fn tag_variant(variant: Option<&'static str>, content: FieldValue) -> FieldValue {
    match variant {
        Some(variant) => {
            let mut entries = BTreeMap::new();
            entries.insert(variant.to_string(), content);
            FieldValue::Map(entries)
        }
        None => content,
    }
}

pub(super) struct SerializeList {
    items: Vec<FieldValue>,
    variant: Option<&'static str>,
}

impl SerializeList {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeList {
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(FieldValueSerializer)?);
        Ok(())
    }

    fn finish(self) -> FieldValue {
        tag_variant(self.variant, FieldValue::List(self.items))
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeList {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

pub(super) struct SerializeMap {
    entries: BTreeMap<String, FieldValue>,
    next_key: Option<String>,
    variant: Option<&'static str>,
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            entries: BTreeMap::new(),
            next_key: None,
            variant,
        }
    }

    fn finish(self) -> FieldValue {
        tag_variant(self.variant, FieldValue::Map(self.entries))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        // Non-string keys are keyed by their rendered text.
        self.next_key = Some(key.serialize(FieldValueSerializer)?.to_text());
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| FieldBridgeError::other("Map value serialized before its key"))?;
        self.entries.insert(key, value.serialize(FieldValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.entries
            .insert(key.to_string(), value.serialize(FieldValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = FieldValue;
    type Error = FieldBridgeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}
