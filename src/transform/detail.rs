use serde_json::Value;

use super::{
    json::{
        array_field, count_field, ensure_success, field, id_field, int_like, non_empty_str,
        require_object, seconds_field, str_field, string_like,
    },
    stream::quality_name,
};
use crate::{
    Error, Result,
    model::{AuthorInfo, VideoDetail, VideoInfo, VideoPart, VideoQuality},
};

/// `x/web-interface/view`.
pub fn video_detail(root: &Value) -> Result<VideoDetail> {
    ensure_success(root)?;
    let data = require_object(root, "data", "data")?;

    let id = non_empty_str(data, "bvid").ok_or_else(|| Error::missing("data.bvid"))?;

    let empty = Value::Null;
    let stat = field(data, "stat").unwrap_or(&empty);
    let owner = field(data, "owner").unwrap_or(&empty);

    let author_name = str_field(owner, "name").unwrap_or_default().to_string();
    let description = str_field(data, "desc").map(str::to_string);

    let video_info = VideoInfo {
        id,
        title: str_field(data, "title").unwrap_or_default().to_string(),
        cover_url: str_field(data, "pic").unwrap_or_default().to_string(),
        author: author_name.clone(),
        play_count: count_field(stat, "view"),
        duration: seconds_field(data, "duration"),
        category: non_empty_str(data, "tname"),
        publish_time: field(data, "pubdate").and_then(int_like),
        description: description.clone(),
        cid: id_field(data, "cid"),
    };

    let author_info = AuthorInfo {
        id: field(owner, "mid").and_then(string_like).unwrap_or_default(),
        name: author_name,
        avatar_url: str_field(owner, "face").unwrap_or_default().to_string(),
        follower_count: None,
        bio: None,
    };

    // `reply` is the comment count; older payloads only carry `danmaku`.
    let comment_count = id_field(stat, "reply").unwrap_or_else(|| count_field(stat, "danmaku"));

    Ok(VideoDetail {
        video_info,
        full_description: description,
        like_count: count_field(stat, "like"),
        coin_count: count_field(stat, "coin"),
        favorite_count: count_field(stat, "favorite"),
        comment_count,
        share_count: count_field(stat, "share"),
        author_info,
        parts: array_field(data, "pages").iter().filter_map(part).collect(),
        available_qualities: qualities(data),
    })
}

fn part(page: &Value) -> Option<VideoPart> {
    Some(VideoPart {
        id: id_field(page, "cid")?.to_string(),
        title: str_field(page, "part").unwrap_or_default().to_string(),
        duration: seconds_field(page, "duration"),
        cover_url: non_empty_str(page, "first_frame"),
    })
}

fn qualities(data: &Value) -> Vec<VideoQuality> {
    let descriptions = array_field(data, "accept_description");
    array_field(data, "accept_quality")
        .iter()
        .enumerate()
        .filter_map(|(index, qn)| {
            let id = u32::try_from(int_like(qn)?).ok()?;
            let name = descriptions
                .get(index)
                .and_then(Value::as_str)
                .map_or_else(|| quality_name(id), str::to_string);
            Some(VideoQuality {
                id,
                name,
                is_default: index == 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view_response() -> Value {
        json!({
            "code": 0,
            "message": "0",
            "ttl": 1,
            "data": {
                "bvid": "BV1y7411Q7Eq",
                "aid": 99999999,
                "cid": 171776208,
                "title": "Title",
                "pic": "http://i0.hdslb.com/bfs/archive/p.jpg",
                "tname": "音乐",
                "pubdate": 1580000000,
                "desc": "full description",
                "duration": 300,
                "owner": { "mid": 123456789012u64, "name": "owner", "face": "http://face" },
                "stat": {
                    "view": 1000, "danmaku": 20, "reply": 30, "favorite": 40,
                    "coin": 50, "share": 60, "like": 70
                },
                "pages": [
                    { "cid": 171776208, "page": 1, "part": "P1", "duration": 200, "first_frame": "http://f1" },
                    { "cid": "171776209", "page": 2, "part": "P2", "duration": 100 }
                ]
            }
        })
    }

    #[test]
    fn test_video_detail() {
        let detail = video_detail(&view_response()).unwrap();

        assert_eq!(detail.video_info.id, "BV1y7411Q7Eq");
        assert_eq!(detail.video_info.cid, Some(171_776_208));
        assert_eq!(detail.video_info.play_count, 1000);
        assert_eq!(detail.video_info.category.as_deref(), Some("音乐"));
        assert_eq!(detail.like_count, 70);
        assert_eq!(detail.coin_count, 50);
        assert_eq!(detail.favorite_count, 40);
        assert_eq!(detail.comment_count, 30);
        assert_eq!(detail.share_count, 60);
        assert_eq!(detail.full_description.as_deref(), Some("full description"));
        assert_eq!(detail.author_info.id, "123456789012");
        assert_eq!(detail.author_info.avatar_url, "http://face");

        assert_eq!(detail.parts.len(), 2);
        assert_eq!(detail.parts[1].id, "171776209");
        assert_eq!(detail.parts[1].cover_url, None);
        assert!(detail.available_qualities.is_empty());
    }

    #[test]
    fn test_missing_optional_fields() {
        let mut root = view_response();
        let data = root["data"].as_object_mut().unwrap();
        data.remove("tname");
        data.remove("stat");
        data.remove("pages");

        let detail = video_detail(&root).unwrap();
        assert_eq!(detail.video_info.category, None);
        assert_eq!(detail.like_count, 0);
        assert!(detail.parts.is_empty());
    }

    #[test]
    fn test_missing_data() {
        let root = json!({ "code": 0, "message": "0" });
        assert!(matches!(video_detail(&root), Err(Error::Shape(_))));
    }

    #[test]
    fn test_missing_bvid() {
        let mut root = view_response();
        root["data"].as_object_mut().unwrap().remove("bvid");
        match video_detail(&root) {
            Err(Error::Shape(msg)) => assert!(msg.contains("data.bvid")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_platform_error() {
        let root = json!({ "code": -404, "message": "啥都木有", "ttl": 1 });
        assert!(matches!(video_detail(&root), Err(Error::Api { code: -404, .. })));
    }

    #[test]
    fn test_qualities_when_present() {
        let mut root = view_response();
        root["data"]["accept_quality"] = json!([80, 64, 9999]);
        root["data"]["accept_description"] = json!(["高清 1080P", "高清 720P"]);

        let qualities = video_detail(&root).unwrap().available_qualities;
        assert_eq!(qualities.len(), 3);
        assert_eq!(qualities[0].name, "高清 1080P");
        assert!(qualities[0].is_default);
        assert_eq!(qualities[2].name, "未知 (9999)");
    }
}
