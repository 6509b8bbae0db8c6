//! Typed access to rebuilt values
//!
//! Scalars are stored as text, so numeric and boolean fields are parsed when
//! the target type asks for them. Everything else is driven by the shape of
//! the value.

use super::StructuredValue;
use crate::error::{Result, VersionerError};
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{self, Deserializer, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use std::fmt;

impl de::Error for VersionerError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        VersionerError::Codec(msg.to_string())
    }
}

impl<'de> IntoDeserializer<'de, VersionerError> for StructuredValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                match self {
                    StructuredValue::Scalar(text) => {
                        let parsed: $ty = text.trim().parse().map_err(|_| {
                            VersionerError::codec(format!(
                                "expected {} but found '{}'",
                                stringify!($ty),
                                text
                            ))
                        })?;
                        visitor.$visit(parsed)
                    }
                    other => other.deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for StructuredValue {
    type Error = VersionerError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            StructuredValue::Scalar(text) => visitor.visit_string(text),
            StructuredValue::List(items) => {
                let mut seq = SeqDeserializer::<_, VersionerError>::new(items.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            StructuredValue::Object(members) => {
                let mut map = MapDeserializer::<_, VersionerError>::new(members.into_iter());
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    /// Lists rebuilt from index keys can still fill a map or struct
    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            StructuredValue::List(items) => {
                let entries = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| ((i + 1).to_string(), item));
                let mut map = MapDeserializer::<_, VersionerError>::new(entries);
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_map(visitor)
    }

    /// Unit variants only, spelled as their serialized name
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self {
            StructuredValue::Scalar(text) => {
                visitor.visit_enum(<String as IntoDeserializer<'de, VersionerError>>::into_deserializer(text))
            }
            other => Err(VersionerError::codec(format!(
                "expected an enum variant name, found {}",
                other.kind_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        char str string bytes byte_buf unit_struct seq tuple tuple_struct
        identifier ignored_any
    }
}

impl StructuredValue {
    fn kind_name(&self) -> &'static str {
        match self {
            StructuredValue::Scalar(_) => "a scalar",
            StructuredValue::List(_) => "a list",
            StructuredValue::Object(_) => "an object",
        }
    }
}
