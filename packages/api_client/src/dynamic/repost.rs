use serde::{Deserialize, Serialize};

use super::{null_default, Relation, UserProfile};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GetDynamicRepostDetailParam {
    pub dynamic_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicRepostDetail {
    pub has_more: i32,
    pub total: i64,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<RepostItem>,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

impl DynamicRepostDetail {
    pub fn has_more(&self) -> bool {
        self.has_more != 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RepostItem {
    #[serde(deserialize_with = "null_default")]
    pub desc: RepostDesc,
    /// JSON text, shape depends on `desc.dynamic_type`
    pub card: String,
    pub extend_json: String,
    #[serde(deserialize_with = "null_default")]
    pub display: RepostDisplay,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RepostDesc {
    pub uid: i64,
    #[serde(rename = "type")]
    pub dynamic_type: i32,
    pub rid: i64,
    pub acl: i32,
    pub view: i64,
    pub repost: i64,
    pub like: i64,
    pub is_liked: i32,
    pub dynamic_id: i64,
    pub timestamp: i64,
    pub pre_dy_id: i64,
    pub orig_dy_id: i64,
    pub orig_type: i32,
    #[serde(deserialize_with = "null_default")]
    pub user_profile: UserProfile,
    pub uid_type: i32,
    pub stype: i32,
    pub r_type: i32,
    pub inner_id: i64,
    pub status: i32,
    pub dynamic_id_str: String,
    pub pre_dy_id_str: String,
    pub orig_dy_id_str: String,
    pub rid_str: String,
    pub origin: Option<DescBrief>,
    pub previous: Option<DescBrief>,
}

/// Descriptor of the forwarded (`origin`) or previous dynamic in a repost chain.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DescBrief {
    pub uid: i64,
    #[serde(rename = "type")]
    pub dynamic_type: i32,
    pub rid: i64,
    pub acl: i32,
    pub view: i64,
    pub repost: i64,
    pub like: i64,
    pub dynamic_id: i64,
    pub timestamp: i64,
    pub pre_dy_id: i64,
    pub orig_dy_id: i64,
    pub uid_type: i32,
    pub stype: i32,
    pub r_type: i32,
    pub inner_id: i64,
    pub status: i32,
    pub dynamic_id_str: String,
    pub pre_dy_id_str: String,
    pub orig_dy_id_str: String,
    pub rid_str: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RepostDisplay {
    pub origin: Option<RepostDisplayOrigin>,
    #[serde(deserialize_with = "null_default")]
    pub relation: Relation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RepostDisplayOrigin {
    #[serde(deserialize_with = "null_default")]
    pub emoji_info: EmojiInfo,
    #[serde(deserialize_with = "null_default")]
    pub relation: Relation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EmojiInfo {
    #[serde(deserialize_with = "null_default")]
    pub emoji_details: Vec<EmojiDetail>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EmojiDetail {
    pub emoji_name: String,
    pub id: i64,
    pub package_id: i64,
    pub state: i32,
    #[serde(rename = "type")]
    pub emoji_type: i32,
    pub attr: i32,
    pub text: String,
    pub url: String,
    #[serde(deserialize_with = "null_default")]
    pub meta: EmojiMeta,
    pub mtime: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EmojiMeta {
    pub size: i32,
}
