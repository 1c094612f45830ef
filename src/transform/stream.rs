//! `x/player/wbi/playurl`: DASH first, progressive (`durl`) as fallback.

use serde_json::Value;

use super::json::{
    array_field, count_field, ensure_success, field, id_field, int_like, non_empty_str,
    require_object, str_field,
};
use crate::{
    Error, Result,
    model::{AudioStreamItem, Resolution, StreamItem, VideoStream},
};

/// Quality reported when the response omits one.
const DEFAULT_QUALITY: u32 = 64;

/// Codec id for AVC, assumed when none is given.
const CODEC_AVC: i64 = 7;

/// Bitrate reported for progressive streams with no length.
const FALLBACK_BITRATE_KBPS: u32 = 1000;

/// Display label for a video quality code.
pub fn quality_name(quality_id: u32) -> String {
    let label = match quality_id {
        6 => "240P",
        16 => "360P",
        32 => "480P",
        64 => "720P",
        74 => "720P60",
        80 => "1080P",
        100 => "智能修复",
        112 => "1080P+",
        116 => "1080P60",
        120 => "4K",
        125 => "HDR",
        126 => "杜比视界",
        127 => "8K",
        129 => "HDR Vivid",
        _ => return format!("未知 ({quality_id})"),
    };
    label.to_string()
}

/// Display label for an audio quality code, falling back to a bandwidth tier.
pub fn audio_quality_name(audio_id: u32, bandwidth: u64) -> String {
    let label = match audio_id {
        30216 => "64K",
        30232 => "132K",
        30280 => "192K",
        30250 => "杜比全景声",
        30251 => "Hi-Res",
        30255 => "高音质",
        _ if bandwidth >= 320_000 => "高码率音频",
        _ if bandwidth >= 192_000 => "标准音频",
        _ if bandwidth >= 128_000 => "普通音频",
        _ => return format!("低码率音频 ({audio_id})"),
    };
    label.to_string()
}

/// `(container, codec)` from a DASH `codecs` string, else from the numeric codec id.
pub fn format_and_codec(codecs: &str, codec_id: i64) -> (&'static str, &'static str) {
    if !codecs.is_empty() {
        let codecs = codecs.to_ascii_lowercase();
        return if codecs.contains("avc") {
            ("mp4", "h264")
        } else if codecs.contains("hev") {
            ("mp4", "h265")
        } else if codecs.contains("av01") {
            ("mp4", "av1")
        } else if codecs.contains("vp9") {
            ("webm", "vp9")
        } else {
            ("mp4", "unknown")
        };
    }

    match codec_id {
        12 => ("mp4", "h265"),
        13 => ("mp4", "av1"),
        _ => ("mp4", "h264"),
    }
}

/// Nominal resolution for a quality code when the response carries none.
pub fn estimate_resolution(quality_id: u32) -> Resolution {
    match quality_id {
        6 => Resolution::new(426, 240),
        16 => Resolution::new(640, 360),
        32 => Resolution::new(854, 480),
        80 | 112 | 116 => Resolution::new(1920, 1080),
        120 => Resolution::new(3840, 2160),
        127 => Resolution::new(7680, 4320),
        _ => Resolution::new(1280, 720),
    }
}

pub fn video_stream(root: &Value) -> Result<VideoStream> {
    ensure_success(root)?;
    let data = require_object(root, "data", "data")?;

    let selected_quality_id = u32_field(data, "quality").unwrap_or(DEFAULT_QUALITY);

    let (streams, audio_streams) = match field(data, "dash") {
        Some(dash) => {
            let video: Vec<_> = array_field(dash, "video")
                .iter()
                .filter_map(dash_video)
                .collect();
            (video, Some(dash_audio(dash)))
        }
        None => (Vec::new(), None),
    };

    let streams = if streams.is_empty() {
        array_field(data, "durl")
            .iter()
            .filter_map(|segment| progressive(data, segment, selected_quality_id))
            .collect()
    } else {
        streams
    };

    if streams.is_empty() {
        return Err(Error::Shape(
            "no playable stream in `data.dash.video` or `data.durl`".to_string(),
        ));
    }

    Ok(VideoStream {
        video_id: str_field(data, "bvid").unwrap_or_default().to_string(),
        selected_quality_id,
        streams,
        audio_streams,
    })
}

fn u32_field(value: &Value, key: &str) -> Option<u32> {
    field(value, key)
        .and_then(int_like)
        .and_then(|n| u32::try_from(n).ok())
}

/// Primary URL, or the first backup when the primary is empty.
fn media_url(item: &Value) -> Option<String> {
    non_empty_str(item, "baseUrl")
        .or_else(|| non_empty_str(item, "base_url"))
        .or_else(|| {
            let backups = match array_field(item, "backupUrl") {
                [] => array_field(item, "backup_url"),
                list => list,
            };
            backups
                .iter()
                .find_map(|u| u.as_str().filter(|s| !s.is_empty()))
                .map(str::to_string)
        })
}

fn kbps(bandwidth: u64) -> u32 {
    u32::try_from(bandwidth / 1000).unwrap_or(u32::MAX)
}

fn dash_video(item: &Value) -> Option<StreamItem> {
    let url = media_url(item)?;
    let quality_id = u32_field(item, "id")?;
    let width = u32_field(item, "width")?;
    let height = u32_field(item, "height")?;

    let codecs = str_field(item, "codecs").unwrap_or_default();
    let codec_id = field(item, "codecid").and_then(int_like).unwrap_or(CODEC_AVC);
    let (format, codec) = format_and_codec(codecs, codec_id);

    Some(StreamItem {
        quality_id,
        quality_name: quality_name(quality_id),
        resolution: Resolution::new(width, height),
        bitrate: kbps(count_field(item, "bandwidth")),
        format: format.to_string(),
        url,
        kind: codec.to_string(),
        size: id_field(item, "size"),
    })
}

/// Regular tracks plus Dolby and FLAC tracks when offered.
fn dash_audio(dash: &Value) -> Vec<AudioStreamItem> {
    let extra = ["dolby", "flac"]
        .into_iter()
        .filter_map(|key| field(dash, key))
        .flat_map(|group| match field(group, "audio") {
            Some(Value::Array(list)) => list.iter().collect::<Vec<_>>(),
            Some(single @ Value::Object(_)) => vec![single],
            _ => Vec::new(),
        });

    array_field(dash, "audio")
        .iter()
        .chain(extra)
        .filter_map(|item| {
            let url = media_url(item)?;
            let quality_id = u32_field(item, "id")?;
            let bandwidth = count_field(item, "bandwidth");
            Some(AudioStreamItem {
                quality_id,
                quality_name: audio_quality_name(quality_id, bandwidth),
                bitrate: kbps(bandwidth),
                format: non_empty_str(item, "mimeType")
                    .or_else(|| non_empty_str(item, "mime_type"))
                    .unwrap_or_else(|| "audio/mp4".to_string()),
                url,
                size: id_field(item, "size"),
            })
        })
        .collect()
}

fn progressive(data: &Value, segment: &Value, quality_id: u32) -> Option<StreamItem> {
    let url = non_empty_str(segment, "url").or_else(|| {
        array_field(segment, "backup_url")
            .iter()
            .find_map(|u| u.as_str().filter(|s| !s.is_empty()))
            .map(str::to_string)
    })?;

    // `length` is in milliseconds, so bits per millisecond is kbps.
    let length_ms = count_field(segment, "length");
    let size = count_field(segment, "size");
    let bitrate = if length_ms > 0 {
        u32::try_from(size.saturating_mul(8) / length_ms).unwrap_or(u32::MAX)
    } else {
        FALLBACK_BITRATE_KBPS
    };

    let resolution = match (u32_field(data, "width"), u32_field(data, "height")) {
        (Some(width), Some(height)) => Resolution::new(width, height),
        _ => estimate_resolution(quality_id),
    };

    let container = if str_field(data, "format").is_some_and(|f| f.starts_with("flv")) {
        "flv"
    } else {
        "mp4"
    };
    let (_, codec) = format_and_codec("", CODEC_AVC);

    Some(StreamItem {
        quality_id,
        quality_name: quality_name(quality_id),
        resolution,
        bitrate,
        format: container.to_string(),
        url,
        kind: codec.to_string(),
        size: (size > 0).then_some(size),
    })
}
