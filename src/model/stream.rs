use serde::{Deserialize, Serialize};

/// Playable streams for one video part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    pub video_id: String,
    pub selected_quality_id: u32,
    pub streams: Vec<StreamItem>,
    /// Separate audio tracks (DASH only).
    pub audio_streams: Option<Vec<AudioStreamItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamItem {
    pub quality_id: u32,
    pub quality_name: String,
    pub resolution: Resolution,
    /// kbps.
    pub bitrate: u32,
    /// Container, e.g. `mp4`.
    pub format: String,
    pub url: String,
    /// Codec, e.g. `h264`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Bytes.
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStreamItem {
    pub quality_id: u32,
    pub quality_name: String,
    pub bitrate: u32,
    /// MIME type.
    pub format: String,
    pub url: String,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
