//! Video list endpoints: home feed, hot ranking, related videos, search.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::json::{
    absolute_url, array_field, count_field, ensure_success, field, id_field, int_like,
    non_empty_str, parse_duration, require_object, seconds_field, str_field, truncate_chars,
};
use crate::{Error, Result, model::VideoInfo};

/// List descriptions are cut to this many characters.
pub const SHORT_DESCRIPTION_CHARS: usize = 100;

static HIGHLIGHT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"</?em[^>]*>"#).expect("highlight tag pattern is valid"));

/// `x/web-interface/wbi/index/top/feed/rcmd`: items under `data.item`.
pub fn home_recommendations(root: &Value) -> Result<Vec<VideoInfo>> {
    ensure_success(root)?;
    let data = require_object(root, "data", "data")?;
    let items = array_field(data, "item");

    // Ads and live rooms come through with an empty bvid.
    Ok(items.iter().filter_map(|item| archive(item, None)).collect())
}

/// `x/web-interface/ranking/v2`: items under `data.list`.
pub fn hot_ranking(root: &Value) -> Result<Vec<VideoInfo>> {
    ensure_success(root)?;
    let data = require_object(root, "data", "data")?;
    let list = array_field(data, "list");

    Ok(list
        .iter()
        .filter_map(|item| archive(item, Some(SHORT_DESCRIPTION_CHARS)))
        .collect())
}

/// `x/web-interface/archive/related`: `data` is the array itself.
pub fn related_videos(root: &Value) -> Result<Vec<VideoInfo>> {
    ensure_success(root)?;
    let list = field(root, "data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::missing("data"))?;

    Ok(list
        .iter()
        .filter_map(|item| archive(item, Some(SHORT_DESCRIPTION_CHARS)))
        .collect())
}

/// `x/web-interface/wbi/search/all/v2`: the `video` group inside `data.result`.
pub fn search_results(root: &Value) -> Result<Vec<VideoInfo>> {
    ensure_success(root)?;
    let data = require_object(root, "data", "data")?;
    let groups = array_field(data, "result");

    let Some(videos) = groups
        .iter()
        .find(|group| str_field(group, "result_type") == Some("video"))
    else {
        return Ok(Vec::new());
    };

    Ok(array_field(videos, "data")
        .iter()
        .filter_map(search_hit)
        .collect())
}

/// The archive shape shared by feed, ranking and related lists.
fn archive(item: &Value, description_chars: Option<usize>) -> Option<VideoInfo> {
    let id = non_empty_str(item, "bvid")?;
    let title = str_field(item, "title")?.to_string();
    let cover_url = absolute_url(str_field(item, "pic")?);
    let author = field(item, "owner")
        .and_then(|owner| str_field(owner, "name"))?
        .to_string();

    let play_count = field(item, "stat")
        .map(|stat| count_field(stat, "view"))
        .unwrap_or(0);

    let description = description_chars.map(|max| {
        truncate_chars(str_field(item, "desc").unwrap_or_default(), max)
    });

    Some(VideoInfo {
        id,
        title,
        cover_url,
        author,
        play_count,
        duration: seconds_field(item, "duration"),
        category: non_empty_str(item, "tname"),
        publish_time: field(item, "pubdate").and_then(int_like),
        description,
        cid: id_field(item, "cid"),
    })
}

fn search_hit(item: &Value) -> Option<VideoInfo> {
    let id = non_empty_str(item, "bvid")?;
    let title = HIGHLIGHT_TAG
        .replace_all(str_field(item, "title")?, "")
        .into_owned();
    let cover_url = absolute_url(str_field(item, "pic")?);
    let author = str_field(item, "author")?.to_string();

    // Durations are text here ("41:22"), unlike every other list endpoint.
    let duration = str_field(item, "duration")
        .map(parse_duration)
        .unwrap_or_else(|| seconds_field(item, "duration"));

    Some(VideoInfo {
        id,
        title,
        cover_url,
        author,
        play_count: count_field(item, "play"),
        duration,
        category: non_empty_str(item, "typename"),
        publish_time: field(item, "pubdate").and_then(int_like),
        description: Some(truncate_chars(
            str_field(item, "description").unwrap_or_default(),
            SHORT_DESCRIPTION_CHARS,
        )),
        cid: id_field(item, "cid"),
    })
}
