//! `x/web-interface/nav`: the signed-in user and the session signing keys.
//!
//! An anonymous session answers with `-101` and still carries `wbi_img`, so
//! that code counts as success here. Any other non-zero code is an error.

use serde_json::Value;

use super::json::{
    envelope_message, field, int_like, non_empty_str, require_object, str_field, string_like,
};
use crate::{
    Error, Result,
    model::{PlatformConfig, PlatformContext, UserInfo},
    sign::SigningKeys,
};

/// Envelope code for "not logged in".
const NOT_LOGGED_IN: i64 = -101;

fn ensure_nav_success(root: &Value) -> Result<()> {
    let code = field(root, "code")
        .and_then(int_like)
        .ok_or_else(|| Error::missing("code"))?;
    if code == 0 || code == NOT_LOGGED_IN {
        return Ok(());
    }
    Err(Error::Api {
        code,
        message: envelope_message(root),
    })
}

pub fn platform_context(root: &Value) -> Result<PlatformContext> {
    ensure_nav_success(root)?;
    let user_info = field(root, "data").and_then(user_info);
    Ok(PlatformContext {
        user_info,
        platform_config: PlatformConfig::default(),
    })
}

fn user_info(data: &Value) -> Option<UserInfo> {
    if !field(data, "isLogin").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let level = field(data, "level_info")
        .and_then(|info| field(info, "current_level"))
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);

    Some(UserInfo {
        user_id: field(data, "mid").and_then(string_like)?,
        user_name: non_empty_str(data, "uname")?,
        avatar_url: non_empty_str(data, "face"),
        level,
        bio: non_empty_str(data, "sign"),
    })
}

/// Session keys from `data.wbi_img`.
pub fn signing_keys(root: &Value) -> Result<SigningKeys> {
    ensure_nav_success(root)?;
    let data = require_object(root, "data", "data")?;
    let wbi_img = require_object(data, "wbi_img", "data.wbi_img")?;
    let img_url = str_field(wbi_img, "img_url").ok_or_else(|| Error::missing("data.wbi_img.img_url"))?;
    let sub_url = str_field(wbi_img, "sub_url").ok_or_else(|| Error::missing("data.wbi_img.sub_url"))?;

    SigningKeys::from_urls(img_url, sub_url).map_err(|e| Error::Shape(e.to_string()))
}
