use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{null_default, OfficialVerify, Pendant, Vip};
use crate::flex_id::FlexId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GetUserSpaceDynamicParam {
    /// cursor from the previous page, empty for the first
    pub offset: String,
    pub host_mid: String,
    pub timezone_offset: i32,
    pub features: String,
}

impl GetUserSpaceDynamicParam {
    /// First page with the values the web client sends.
    pub fn new<S: Into<String>>(host_mid: S) -> Self {
        GetUserSpaceDynamicParam {
            offset: String::new(),
            host_mid: host_mid.into(),
            timezone_offset: -480,
            features: "itemOpusStyle".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicInfo {
    pub has_more: bool,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<DynamicItem>,
    /// id of the last item, pass back to fetch the next page
    pub offset: String,
    /// id of the first item
    pub update_baseline: String,
    pub update_num: i32,
}

impl DynamicInfo {
    /// Parameters for the page after this one, `None` on the last page.
    pub fn next_page(&self, current: &GetUserSpaceDynamicParam) -> Option<GetUserSpaceDynamicParam> {
        if !self.has_more || self.offset.is_empty() {
            return None;
        }

        Some(GetUserSpaceDynamicParam {
            offset: self.offset.clone(),
            ..current.clone()
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicItem {
    #[serde(deserialize_with = "null_default")]
    pub basic: DynamicBasic,
    /// sent as a number or a string depending on the item
    pub id_str: Option<FlexId>,
    #[serde(deserialize_with = "null_default")]
    pub modules: DynamicModules,
    /// the forwarded dynamic, for `DYNAMIC_TYPE_FORWARD`
    pub orig: Option<Box<DynamicItem>>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub visible: bool,
}

impl DynamicItem {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.modules.module_author.pub_ts, 0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicBasic {
    pub comment_id_str: String,
    pub comment_type: i32,
    #[serde(deserialize_with = "null_default")]
    pub like_icon: LikeIcon,
    pub rid_str: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LikeIcon {
    pub action_url: String,
    pub end_url: String,
    pub id: i64,
    pub start_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicModules {
    #[serde(deserialize_with = "null_default")]
    pub module_author: ModuleAuthor,
    #[serde(deserialize_with = "null_default")]
    pub module_dynamic: ModuleDynamic,
    pub module_more: Option<ModuleMore>,
    pub module_stat: Option<ModuleStat>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ModuleAuthor {
    pub avatar: Option<Avatar>,
    pub decorate: Option<Decorate>,
    pub face: String,
    pub face_nft: bool,
    /// null for the viewer's own items
    pub following: Value,
    pub jump_url: String,
    pub label: String,
    pub mid: i64,
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub official_verify: OfficialVerify,
    #[serde(deserialize_with = "null_default")]
    pub pendant: Pendant,
    pub pub_action: String,
    pub pub_location_text: String,
    pub pub_time: String,
    pub pub_ts: i64,
    #[serde(rename = "type")]
    pub author_type: String,
    #[serde(deserialize_with = "null_default")]
    pub vip: Vip,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Avatar {
    #[serde(deserialize_with = "null_default")]
    pub container_size: LayerSize,
    #[serde(deserialize_with = "null_default")]
    pub fallback_layers: FallbackLayers,
    pub mid: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct LayerSize {
    pub height: f64,
    pub width: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FallbackLayers {
    pub is_critical_group: bool,
    #[serde(deserialize_with = "null_default")]
    pub layers: Vec<AvatarLayer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AvatarLayer {
    #[serde(deserialize_with = "null_default")]
    pub general_spec: GeneralSpec,
    #[serde(deserialize_with = "null_default")]
    pub layer_config: LayerConfig,
    #[serde(deserialize_with = "null_default")]
    pub resource: LayerResource,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GeneralSpec {
    #[serde(deserialize_with = "null_default")]
    pub pos_spec: PosSpec,
    #[serde(deserialize_with = "null_default")]
    pub render_spec: RenderSpec,
    #[serde(deserialize_with = "null_default")]
    pub size_spec: LayerSize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PosSpec {
    pub axis_x: f64,
    pub axis_y: f64,
    pub coordinate_pos: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RenderSpec {
    pub opacity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LayerConfig {
    pub is_critical: bool,
    /// keyed by layer kind (`AVATAR_LAYER`, `GENERAL_CFG`, `ICON_LAYER`, ...)
    #[serde(deserialize_with = "null_default")]
    pub tags: Map<String, Value>,
}

/// Image or animation source of a layer; which of the two is set follows `res_type`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LayerResource {
    pub res_type: i32,
    pub res_image: Option<Value>,
    pub res_animation: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Decorate {
    pub card_url: String,
    #[serde(deserialize_with = "null_default")]
    pub fan: DecorateFan,
    pub id: i64,
    pub jump_url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub decorate_type: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DecorateFan {
    pub color: String,
    pub is_fan: bool,
    pub num_str: String,
    pub number: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ModuleDynamic {
    pub additional: Value,
    pub desc: Option<DynamicDesc>,
    pub major: Option<DynamicMajor>,
    pub topic: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicDesc {
    #[serde(deserialize_with = "null_default")]
    pub rich_text_nodes: Vec<RichTextNode>,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RichTextNode {
    pub orig_text: String,
    pub text: String,
    /// `RICH_TEXT_NODE_TYPE_TEXT`, `RICH_TEXT_NODE_TYPE_AT`, `RICH_TEXT_NODE_TYPE_EMOJI`, ...
    #[serde(rename = "type")]
    pub node_type: String,
    pub jump_url: Option<String>,
    pub style: Value,
    pub emoji: Option<Emoji>,
    pub rid: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Emoji {
    pub icon_url: String,
    pub size: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub emoji_type: i32,
}

/// Main content block; `major_type` says which of the optional members is set.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DynamicMajor {
    #[serde(rename = "type")]
    pub major_type: String,
    pub draw: Option<MajorDraw>,
    pub archive: Option<MajorArchive>,
    pub opus: Option<MajorOpus>,
}

#[derive(Debug, Clone, Copy)]
pub enum MajorContent<'a> {
    Draw(&'a MajorDraw),
    Archive(&'a MajorArchive),
    Opus(&'a MajorOpus),
    Unknown(&'a str),
}

impl DynamicMajor {
    pub fn content(&self) -> MajorContent<'_> {
        let content = match self.major_type.as_str() {
            "MAJOR_TYPE_DRAW" => self.draw.as_ref().map(MajorContent::Draw),
            "MAJOR_TYPE_ARCHIVE" => self.archive.as_ref().map(MajorContent::Archive),
            "MAJOR_TYPE_OPUS" => self.opus.as_ref().map(MajorContent::Opus),
            _ => None,
        };

        content.unwrap_or(MajorContent::Unknown(&self.major_type))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MajorDraw {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<DrawItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DrawItem {
    pub height: i32,
    /// KiB
    pub size: f64,
    pub src: String,
    #[serde(deserialize_with = "null_default")]
    pub tags: Vec<Value>,
    pub width: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MajorArchive {
    pub aid: String,
    #[serde(deserialize_with = "null_default")]
    pub badge: Badge,
    pub bvid: String,
    pub cover: String,
    pub desc: String,
    pub disable_preview: i32,
    pub duration_text: String,
    pub jump_url: String,
    #[serde(deserialize_with = "null_default")]
    pub stat: ArchiveStat,
    pub title: String,
    #[serde(rename = "type")]
    pub archive_type: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Badge {
    pub bg_color: String,
    pub color: String,
    pub icon_url: Value,
    pub text: String,
}

/// Counts pre-formatted for display ("1.2万").
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ArchiveStat {
    pub danmaku: String,
    pub play: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MajorOpus {
    #[serde(deserialize_with = "null_default")]
    pub summary: DynamicDesc,
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ModuleMore {
    #[serde(deserialize_with = "null_default")]
    pub three_point_items: Vec<ThreePointItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ThreePointItem {
    pub label: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ModuleStat {
    #[serde(deserialize_with = "null_default")]
    pub comment: StatCount,
    #[serde(deserialize_with = "null_default")]
    pub forward: StatCount,
    #[serde(deserialize_with = "null_default")]
    pub like: StatCount,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StatCount {
    pub count: i64,
    pub forbidden: bool,
    /// only on `like`: whether the viewer liked it
    pub status: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    const SPACE_PAGE: &str = r##"{
        "has_more": true,
        "items": [
            {
                "basic": {"comment_id_str": "287777777", "comment_type": 11, "like_icon": {"action_url": "", "end_url": "", "id": 0, "start_url": ""}, "rid_str": "287777777"},
                "id_str": "936291735237509123",
                "modules": {
                    "module_author": {
                        "avatar": {
                            "container_size": {"height": 1.375, "width": 1.375},
                            "fallback_layers": {
                                "is_critical_group": true,
                                "layers": [{
                                    "general_spec": {"pos_spec": {"axis_x": 0.6875, "axis_y": 0.6875, "coordinate_pos": 2}, "render_spec": {"opacity": 1}, "size_spec": {"height": 1, "width": 1}},
                                    "layer_config": {"is_critical": true, "tags": {"AVATAR_LAYER": {}, "GENERAL_CFG": {"config_type": 1}}},
                                    "resource": {"res_image": {"image_src": {"remote": {"bfs_style": "widget-layer-avatar", "url": "https://i0.hdslb.com/face.jpg"}, "src_type": 1}}, "res_type": 3},
                                    "visible": true
                                }]
                            },
                            "mid": "672328094"
                        },
                        "face": "https://i0.hdslb.com/face.jpg",
                        "face_nft": false,
                        "following": null,
                        "jump_url": "//space.bilibili.com/672328094/dynamic",
                        "label": "",
                        "mid": 672328094,
                        "name": "嘉然今天吃什么",
                        "official_verify": {"desc": "", "type": 0},
                        "pendant": {"expire": 0, "image": "", "image_enhance": "", "image_enhance_frame": "", "n_pid": 0, "name": "", "pid": 0},
                        "pub_action": "",
                        "pub_location_text": "",
                        "pub_time": "2024-06-01",
                        "pub_ts": 1717200000,
                        "type": "AUTHOR_TYPE_NORMAL",
                        "vip": {"avatar_subscript": 1, "due_date": 1750000000000, "label": {"text": "年度大会员"}, "status": 1, "type": 2}
                    },
                    "module_dynamic": {
                        "additional": null,
                        "desc": {
                            "rich_text_nodes": [
                                {"orig_text": "晚上好", "text": "晚上好", "type": "RICH_TEXT_NODE_TYPE_TEXT"},
                                {"orig_text": "[嘉然_哇]", "text": "[嘉然_哇]", "type": "RICH_TEXT_NODE_TYPE_EMOJI", "emoji": {"icon_url": "https://i0.hdslb.com/e.png", "size": 2, "text": "[嘉然_哇]", "type": 3}}
                            ],
                            "text": "晚上好[嘉然_哇]"
                        },
                        "major": {
                            "type": "MAJOR_TYPE_DRAW",
                            "draw": {"id": 287777777, "items": [{"height": 1080, "size": 312.5, "src": "https://i0.hdslb.com/bfs/new_dyn/a.jpg", "tags": [], "width": 1920}]}
                        },
                        "topic": null
                    },
                    "module_more": {"three_point_items": [{"label": "举报", "type": "THREE_POINT_REPORT"}]},
                    "module_stat": {"comment": {"count": 12, "forbidden": false}, "forward": {"count": 3, "forbidden": false}, "like": {"count": 99, "forbidden": false, "status": false}}
                },
                "type": "DYNAMIC_TYPE_DRAW",
                "visible": true
            },
            {
                "basic": {"comment_id_str": "936291735237509000", "comment_type": 17, "rid_str": "936291735237509000"},
                "id_str": 936291735237509000,
                "modules": {
                    "module_author": {"mid": 672328094, "name": "嘉然今天吃什么", "pub_ts": 1717100000},
                    "module_dynamic": {"desc": null, "major": null, "topic": null}
                },
                "orig": {
                    "basic": {"comment_id_str": "1000", "comment_type": 1, "rid_str": "1000"},
                    "id_str": "936000000000000000",
                    "modules": {
                        "module_author": {"mid": 703007996, "name": "A-SOUL_Official", "pub_ts": 1717000000},
                        "module_dynamic": {
                            "major": {
                                "type": "MAJOR_TYPE_ARCHIVE",
                                "archive": {"aid": "1000", "badge": {"bg_color": "#FB7299", "color": "#FFFFFF", "icon_url": null, "text": "投稿视频"}, "bvid": "BV1xx411c7mD", "cover": "", "desc": "", "disable_preview": 0, "duration_text": "03:30", "jump_url": "//www.bilibili.com/video/BV1xx411c7mD/", "stat": {"danmaku": "1.2万", "play": "30万"}, "title": "title", "type": 1}
                            }
                        }
                    },
                    "type": "DYNAMIC_TYPE_AV",
                    "visible": true
                },
                "type": "DYNAMIC_TYPE_FORWARD",
                "visible": true
            }
        ],
        "offset": "936291735237509000",
        "update_baseline": "936291735237509123",
        "update_num": 0
    }"##;

    #[test]
    fn test_space_page() {
        let page: DynamicInfo = serde_json::from_str(SPACE_PAGE).unwrap();
        assert_eq!(page.items.len(), 2);

        let draw = &page.items[0];
        assert_eq!(draw.id_str.as_ref().unwrap().as_u64(), Some(936291735237509123));
        assert_eq!(draw.modules.module_author.name, "嘉然今天吃什么");
        assert_eq!(draw.modules.module_stat.as_ref().unwrap().like.count, 99);
        assert_eq!(draw.published_at().unwrap().timestamp(), 1717200000);

        let avatar = draw.modules.module_author.avatar.as_ref().unwrap();
        assert_eq!(avatar.fallback_layers.layers[0].resource.res_type, 3);
        assert!(avatar.fallback_layers.layers[0].layer_config.tags.contains_key("GENERAL_CFG"));

        let desc = draw.modules.module_dynamic.desc.as_ref().unwrap();
        assert_eq!(desc.rich_text_nodes[1].emoji.as_ref().unwrap().size, 2);

        match draw.modules.module_dynamic.major.as_ref().unwrap().content() {
            MajorContent::Draw(draw) => assert_eq!(draw.items[0].width, 1920),
            other => panic!("unexpected major: {:?}", other),
        }
    }

    #[test]
    fn test_forward_with_numeric_id() {
        let page: DynamicInfo = serde_json::from_str(SPACE_PAGE).unwrap();

        let forward = &page.items[1];
        assert_eq!(forward.id_str.as_ref().unwrap().as_str(), "936291735237509000");
        assert!(forward.modules.module_dynamic.major.is_none());

        let orig = forward.orig.as_ref().unwrap();
        match orig.modules.module_dynamic.major.as_ref().unwrap().content() {
            MajorContent::Archive(archive) => {
                assert_eq!(archive.bvid, "BV1xx411c7mD");
                assert_eq!(archive.stat.play, "30万");
            }
            other => panic!("unexpected major: {:?}", other),
        }
    }

    #[test]
    fn test_major_without_member_is_unknown() {
        let major = DynamicMajor {
            major_type: "MAJOR_TYPE_DRAW".to_string(),
            ..Default::default()
        };
        assert!(matches!(major.content(), MajorContent::Unknown("MAJOR_TYPE_DRAW")));
    }

    #[test]
    fn test_next_page() {
        let page: DynamicInfo = serde_json::from_str(SPACE_PAGE).unwrap();
        let first = GetUserSpaceDynamicParam::new("672328094");

        let next = page.next_page(&first).unwrap();
        assert_eq!(next.offset, "936291735237509000");
        assert_eq!(next.host_mid, "672328094");
        assert_eq!(next.timezone_offset, -480);

        let last = DynamicInfo { has_more: false, ..page };
        assert!(last.next_page(&next).is_none());
    }

    #[test]
    fn test_space_params_always_sent() {
        let pairs = crate::http::to_pairs(&GetUserSpaceDynamicParam::new("1")).unwrap();
        let offset = pairs.iter().find(|(name, _)| name == "offset").unwrap();
        assert_eq!(offset.1, "");
        assert_eq!(pairs.len(), 4);
    }
}
