use serde::{Deserialize, Serialize};

use super::{null_default, LegacyVip, LevelInfo, OfficialVerify, Pendant};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GetDynamicLikeListParam {
    pub dynamic_id: i64,
    /// page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pn: Option<i64>,
    /// page size, at most 20
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicLikeList {
    #[serde(deserialize_with = "null_default")]
    pub item_likes: Vec<ItemLike>,
    pub has_more: i32,
    pub total_count: i64,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

impl DynamicLikeList {
    pub fn has_more(&self) -> bool {
        self.has_more != 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ItemLike {
    pub uid: i64,
    pub time: i64,
    pub face_url: String,
    pub uname: String,
    #[serde(deserialize_with = "null_default")]
    pub user_info: LikeUserInfo,
    pub attend: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LikeUserInfo {
    pub uid: i64,
    pub uname: String,
    pub face: String,
    pub rank: String,
    #[serde(deserialize_with = "null_default")]
    pub official_verify: OfficialVerify,
    #[serde(deserialize_with = "null_default")]
    pub vip: LegacyVip,
    #[serde(deserialize_with = "null_default")]
    pub pendant: Pendant,
    pub sign: String,
    #[serde(deserialize_with = "null_default")]
    pub level_info: LevelInfo,
}
