//! Parameter and result schemas for the dynamics endpoints.
//!
//! Result structs default every missing field: the service drops fields
//! freely depending on account state and content type.

use serde::{Deserialize, Deserializer, Serialize};

pub use at_search::*;
pub use detail::*;
pub use following::*;
pub use like::*;
pub use portal::*;
pub use publish::*;
pub use repost::*;
pub use space::*;

mod at_search;
mod detail;
mod following;
mod like;
mod portal;
mod publish;
mod repost;
mod space;

/// `null` decodes like a missing field. The vc host sends empty lists and
/// absent blocks as `null`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OfficialVerify {
    #[serde(rename = "type")]
    pub verify_type: i32,
    pub desc: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VipLabel {
    pub path: String,
    pub text: String,
    pub label_theme: String,
    pub text_color: String,
    pub bg_style: i32,
    pub bg_color: String,
    pub border_color: String,
    pub use_img_label: bool,
    pub img_label_uri_hans: String,
    pub img_label_uri_hans_static: String,
    pub img_label_uri_hant: String,
    pub img_label_uri_hant_static: String,
}

/// Membership block as the vc host sends it (camelCase keys).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LegacyVip {
    #[serde(rename = "vipType")]
    pub vip_type: i32,
    #[serde(rename = "vipDueDate")]
    pub vip_due_date: i64,
    #[serde(rename = "dueRemark")]
    pub due_remark: String,
    #[serde(rename = "accessStatus")]
    pub access_status: i32,
    #[serde(rename = "vipStatus")]
    pub vip_status: i32,
    #[serde(rename = "vipStatusWarn")]
    pub vip_status_warn: String,
    #[serde(rename = "themeType")]
    pub theme_type: i32,
    #[serde(deserialize_with = "null_default")]
    pub label: VipLabel,
    pub avatar_subscript: i32,
    pub avatar_subscript_url: String,
    pub nickname_color: String,
    pub role: i32,
}

/// Membership block as the polymer host sends it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Vip {
    #[serde(rename = "type")]
    pub vip_type: i32,
    pub status: i32,
    /// unix millis
    pub due_date: i64,
    pub vip_pay_type: i32,
    pub theme_type: i32,
    #[serde(deserialize_with = "null_default")]
    pub label: VipLabel,
    pub avatar_subscript: i32,
    pub avatar_subscript_url: String,
    pub nickname_color: String,
    pub role: i32,
    pub tv_vip_status: i32,
    pub tv_vip_pay_type: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Pendant {
    pub pid: i64,
    pub n_pid: i64,
    pub name: String,
    pub image: String,
    pub expire: i64,
    pub image_enhance: String,
    pub image_enhance_frame: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LevelInfo {
    pub current_level: i32,
    pub current_min: i64,
    pub current_exp: i64,
    /// number, or a placeholder string at max level
    pub next_exp: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProfileInfo {
    pub uid: i64,
    pub uname: String,
    pub face: String,
    pub face_nft: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProfileCard {
    #[serde(deserialize_with = "null_default")]
    pub official_verify: OfficialVerify,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    #[serde(deserialize_with = "null_default")]
    pub info: ProfileInfo,
    #[serde(deserialize_with = "null_default")]
    pub card: ProfileCard,
    #[serde(deserialize_with = "null_default")]
    pub vip: LegacyVip,
    #[serde(deserialize_with = "null_default")]
    pub pendant: Pendant,
    pub rank: String,
    pub sign: String,
    #[serde(deserialize_with = "null_default")]
    pub level_info: LevelInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Relation {
    pub status: i32,
    pub is_follow: i32,
    pub is_followed: i32,
}
