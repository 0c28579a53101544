use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_default;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GetDynamicDetailParam {
    pub dynamic_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicDetail {
    pub card: Option<DynamicCard>,
    pub result: i32,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

/// A dynamic as the vc host returns it. `desc`, `display` and
/// `activity_infos` change shape with the dynamic's type and are kept as
/// JSON objects; `card` is JSON text, see [`DynamicCard::content`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicCard {
    pub activity_infos: Option<Map<String, Value>>,
    pub card: String,
    #[serde(deserialize_with = "null_default")]
    pub desc: Map<String, Value>,
    pub display: Option<Map<String, Value>>,
    pub extend_json: String,
}

/// `card` parsed and tagged by `desc.type`.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    /// 1
    Forward(Value),
    /// 2
    Draw(Value),
    /// 4
    Text(Value),
    /// 8
    Video(Value),
    /// 64
    Article(Value),
    Other { kind: i64, value: Value },
}

impl DynamicCard {
    pub fn dynamic_type(&self) -> Option<i64> {
        self.desc.get("type").and_then(Value::as_i64)
    }

    pub fn dynamic_id_str(&self) -> Option<&str> {
        self.desc.get("dynamic_id_str").and_then(Value::as_str)
    }

    pub fn content(&self) -> Result<CardContent, serde_json::Error> {
        let value: Value = if self.card.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.card)?
        };

        Ok(match self.dynamic_type().unwrap_or(0) {
            1 => CardContent::Forward(value),
            2 => CardContent::Draw(value),
            4 => CardContent::Text(value),
            8 => CardContent::Video(value),
            64 => CardContent::Article(value),
            kind => CardContent::Other { kind, value },
        })
    }
}
