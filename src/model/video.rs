use serde::{Deserialize, Serialize};

/// Summary of a video, as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Platform video id (`BV...`).
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub author: String,
    pub play_count: u64,
    /// Seconds.
    pub duration: u32,
    pub category: Option<String>,
    /// Unix seconds.
    pub publish_time: Option<i64>,
    pub description: Option<String>,
    /// Content id of the first part, needed to request streams.
    pub cid: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub video_info: VideoInfo,
    pub full_description: Option<String>,
    pub like_count: u64,
    pub coin_count: u64,
    pub favorite_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    pub author_info: AuthorInfo,
    pub parts: Vec<VideoPart>,
    pub available_qualities: Vec<VideoQuality>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub follower_count: Option<u64>,
    pub bio: Option<String>,
}

/// One part of a multi-part upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPart {
    /// The part's cid.
    pub id: String,
    pub title: String,
    pub duration: u32,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuality {
    pub id: u32,
    pub name: String,
    pub is_default: bool,
}
