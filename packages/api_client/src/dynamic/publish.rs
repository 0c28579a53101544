use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RemoveDynamicParam {
    pub dynamic_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateDynamicParam {
    pub dynamic_id: i64,
    /// 4 for plain text
    #[serde(rename = "type")]
    pub dynamic_type: i32,
    pub rid: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_choose_comment: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_close_comment: Option<i32>,
    /// location and similar extras, JSON text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// comma separated uids mentioned in `content`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at_uids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctrl: Option<Vec<FormatCtrl>>,
}

impl CreateDynamicParam {
    pub fn text<S: Into<String>>(content: S) -> Self {
        CreateDynamicParam {
            dynamic_type: 4,
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Formatting span in a dynamic's text, e.g. the link rendered for an "@".
/// `location` and `length` count characters of `content`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FormatCtrl {
    pub location: i32,
    /// 1 for a mention
    #[serde(rename = "type")]
    pub ctrl_type: i32,
    pub length: i32,
    /// uid of the mentioned user
    pub data: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CreateDynamicResult {
    pub result: i32,
    pub errmsg: String,
    pub dynamic_id: i64,
    pub create_result: i32,
    pub dynamic_id_str: String,
    #[serde(rename = "_gt_")]
    pub gt: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub url: String,
    pub size: Size,
}

/// Upload fields sent in the URL; the body carries only the file.
#[derive(Serialize, Debug)]
pub(crate) struct UploadBfsQuery<'a> {
    pub category: &'a str,
    pub csrf: &'a str,
}

#[derive(Deserialize, Debug)]
pub(crate) struct UploadBfsData {
    image_url: String,
    #[serde(default)]
    image_width: i32,
    #[serde(default)]
    image_height: i32,
}

impl From<UploadBfsData> for UploadedImage {
    fn from(data: UploadBfsData) -> Self {
        UploadedImage {
            url: data.image_url,
            size: Size {
                width: data.image_width,
                height: data.image_height,
            },
        }
    }
}
