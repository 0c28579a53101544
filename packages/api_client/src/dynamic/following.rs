use serde::{Deserialize, Serialize};

use super::{null_default, UserProfile};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GetDynamicLiveUserListParam {
    /// page size, server default 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicLiveUserList {
    pub count: i32,
    pub group: String,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<LiveUser>,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LiveUser {
    pub uid: i64,
    pub uname: String,
    pub face: String,
    pub link: String,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GetDynamicUpListParam {
    /// 1 when teenager mode is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teenagers_mode: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicUpList {
    pub button_statement: String,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<UpListItem>,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct UpListItem {
    #[serde(deserialize_with = "null_default")]
    pub user_profile: UserProfile,
    pub has_update: i32,
}
