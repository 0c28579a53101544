use serde::{Deserialize, Serialize};

use super::null_default;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SearchDynamicAtParam {
    /// the caller's own uid
    pub uid: i64,
    pub keyword: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SearchDynamicAtResult {
    #[serde(deserialize_with = "null_default")]
    pub groups: Vec<DynamicGroup>,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicGroup {
    /// 2 for followed users, 4 for everyone else
    pub group_type: i32,
    pub group_name: String,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<DynamicGroupItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicGroupItem {
    pub uid: i64,
    pub uname: String,
    pub face: String,
    pub fans: i64,
    pub official_verify_type: i32,
}
