use std::fmt::{Display, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier the API emits sometimes as a JSON number and sometimes as a
/// string. The decimal text is kept as received, never through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FlexId(String);

impl FlexId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for FlexId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for FlexId {
    fn from(value: u64) -> Self {
        FlexId(value.to_string())
    }
}

impl From<&str> for FlexId {
    fn from(value: &str) -> Self {
        FlexId(value.to_string())
    }
}

impl From<String> for FlexId {
    fn from(value: String) -> Self {
        FlexId(value)
    }
}

impl Serialize for FlexId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlexIdVisitor)
    }
}

struct FlexIdVisitor;

impl<'de> Visitor<'de> for FlexIdVisitor {
    type Value = FlexId;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("an integer or a string identifier")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexId, E> {
        Ok(FlexId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexId, E> {
        Ok(FlexId(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexId, E> {
        Ok(FlexId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FlexId, E> {
        Ok(FlexId(v))
    }

    // a float has already lost digits
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlexId, E> {
        Err(E::invalid_type(de::Unexpected::Float(v), &self))
    }
}
