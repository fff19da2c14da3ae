//! Pickup items and load coercion.
//!
//! Upstream tables are noisy: a load can be a number, a string that may or
//! may not parse, or absent altogether. Items keep the raw value and the
//! packer decides validity through [`LoadValue::as_kg`].

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw load of a pickup as received from upstream.
///
/// Deserialization never fails on the value itself: numbers and strings are
/// kept, anything else (null, booleans, arrays, objects) becomes `Missing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl LoadValue {
    /// Coerce to kilograms.
    ///
    /// Returns `Some` only for finite, strictly positive values. Anything
    /// else marks the item as invalid and it is left out of packing.
    pub fn as_kg(&self) -> Option<f64> {
        let kg = match self {
            LoadValue::Number(kg) => *kg,
            LoadValue::Text(raw) => raw.trim().parse::<f64>().ok()?,
            LoadValue::Missing => return None,
        };
        (kg.is_finite() && kg > 0.0).then_some(kg)
    }
}

impl From<f64> for LoadValue {
    fn from(kg: f64) -> Self {
        LoadValue::Number(kg)
    }
}

impl<'de> Deserialize<'de> for LoadValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LoadValueVisitor)
    }
}

struct LoadValueVisitor;

impl<'de> Visitor<'de> for LoadValueVisitor {
    type Value = LoadValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a load in kilograms")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<LoadValue, E> {
        Ok(LoadValue::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LoadValue, E> {
        Ok(LoadValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LoadValue, E> {
        Ok(LoadValue::Number(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LoadValue, E> {
        Ok(LoadValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<LoadValue, E> {
        Ok(LoadValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<LoadValue, E> {
        Ok(LoadValue::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<LoadValue, E> {
        Ok(LoadValue::Missing)
    }

    fn visit_none<E: de::Error>(self) -> Result<LoadValue, E> {
        Ok(LoadValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<LoadValue, D::Error> {
        LoadValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LoadValue, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LoadValue::Missing)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LoadValue, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LoadValue::Missing)
    }
}

/// A single pickup to be assigned to a truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub load: LoadValue,
}

impl Item {
    pub fn new(id: impl Into<String>, kg: f64) -> Self {
        Self {
            id: id.into(),
            load: kg.into(),
        }
    }

    /// Item whose load is still the raw text from the source table.
    pub fn text(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            load: LoadValue::Text(raw.into()),
        }
    }

    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            load: LoadValue::Missing,
        }
    }

    pub fn load_kg(&self) -> Option<f64> {
        self.load.as_kg()
    }
}
