use serde::{Deserialize, Serialize};

use super::{null_default, Vip};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicPortal {
    #[serde(deserialize_with = "null_default")]
    pub my_info: PortalMyInfo,
    /// followed uploaders ordered by most recent update
    #[serde(deserialize_with = "null_default")]
    pub up_list: Vec<PortalUp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PortalMyInfo {
    pub dyns: i64,
    pub face: String,
    pub face_nft: i32,
    pub follower: i64,
    pub following: i64,
    #[serde(deserialize_with = "null_default")]
    pub level_info: PortalLevelInfo,
    pub mid: i64,
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub official: Official,
    pub space_bg: String,
    #[serde(deserialize_with = "null_default")]
    pub vip: Vip,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PortalLevelInfo {
    pub current_exp: i64,
    /// 0 to 6
    pub current_level: i32,
    pub current_min: i64,
    pub level_up: i64,
    pub next_exp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Official {
    pub desc: String,
    /// 0 none, 1 2 7 personal, 3 4 5 6 organisation
    pub role: i32,
    pub title: String,
    /// -1 none, 0 verified
    #[serde(rename = "type")]
    pub official_type: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PortalUp {
    pub face: String,
    pub has_update: bool,
    pub is_reserve_recall: bool,
    pub mid: i64,
    pub uname: String,
}
