//! Lenient field access over `serde_json::Value`.
//!
//! Missing and `null` are the same thing here. Numeric fields may arrive as
//! JSON numbers or as numeric strings (large ids are often quoted), so the
//! `*_like` accessors accept both.

use serde_json::Value;

use crate::{Error, Result};

/// Non-null value at `key`.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// String at `key`.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    field(value, key).and_then(Value::as_str)
}

/// Non-empty string at `key`, owned.
pub fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    str_field(value, key)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A string, or a number rendered as one.
pub fn string_like(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unsigned integer from a number, an integral float, or a numeric string.
pub fn id_like(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Signed integer from a number or a numeric string.
pub fn int_like(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// ID-like field at `key`.
pub fn id_field(value: &Value, key: &str) -> Option<u64> {
    field(value, key).and_then(id_like)
}

/// Count at `key`, zero when absent or unparseable.
pub fn count_field(value: &Value, key: &str) -> u64 {
    id_field(value, key).unwrap_or(0)
}

/// Seconds at `key`, zero when absent.
pub fn seconds_field(value: &Value, key: &str) -> u32 {
    id_field(value, key)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Array at `key`, empty slice when absent.
pub fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    field(value, key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Object at `key` or a shape error naming `path`.
pub fn require_object<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    field(value, key)
        .filter(|v| v.is_object())
        .ok_or_else(|| Error::missing(path))
}

/// Check the `{code, message}` envelope. `code == 0` is success.
pub fn ensure_success(root: &Value) -> Result<()> {
    let code = field(root, "code")
        .and_then(int_like)
        .ok_or_else(|| Error::missing("code"))?;
    if code == 0 {
        return Ok(());
    }
    Err(Error::Api {
        code,
        message: envelope_message(root),
    })
}

/// `message` from the envelope, falling back to `msg`.
pub fn envelope_message(root: &Value) -> String {
    str_field(root, "message")
        .or_else(|| str_field(root, "msg"))
        .unwrap_or_default()
        .to_string()
}

/// Parse `"SS"`, `"MM:SS"` or `"HH:MM:SS"` into seconds.
///
/// Segments are weighted right to left by powers of 60. Unparseable segments
/// count as zero.
pub fn parse_duration(text: &str) -> u32 {
    text.trim()
        .split(':')
        .rev()
        .enumerate()
        .fold(0u32, |acc, (position, segment)| {
            let value: u32 = segment.trim().parse().unwrap_or(0);
            let weight = 60u32.saturating_pow(u32::try_from(position).unwrap_or(u32::MAX));
            acc.saturating_add(value.saturating_mul(weight))
        })
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Give protocol-relative URLs (`//host/path`) an `https:` scheme.
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("41:22"), 2482);
        assert_eq!(parse_duration("1:02:03"), 3723);
        assert_eq!(parse_duration("59"), 59);
        assert_eq!(parse_duration("0:0"), 0);
        assert_eq!(parse_duration("x:10"), 10);
        assert_eq!(parse_duration(""), 0);
    }

    #[test]
    fn test_id_like_accepts_numbers_and_strings() {
        assert_eq!(id_like(&json!(171776208)), Some(171_776_208));
        assert_eq!(id_like(&json!("171776208")), Some(171_776_208));
        assert_eq!(id_like(&json!("18446744073709551615")), Some(u64::MAX));
        assert_eq!(id_like(&json!(12.0)), Some(12));
        assert_eq!(id_like(&json!(12.5)), None);
        assert_eq!(id_like(&json!(-1)), None);
        assert_eq!(id_like(&json!("--")), None);
        assert_eq!(id_like(&json!(null)), None);
    }

    #[test]
    fn test_null_is_absent() {
        let value = json!({ "tname": null, "title": "t" });
        assert_eq!(str_field(&value, "tname"), None);
        assert_eq!(str_field(&value, "title"), Some("t"));
        assert!(array_field(&value, "tname").is_empty());
    }

    #[test]
    fn test_ensure_success() {
        assert!(ensure_success(&json!({ "code": 0 })).is_ok());
        assert!(ensure_success(&json!({ "code": "0" })).is_ok());

        let err = ensure_success(&json!({ "code": -404, "message": "啥都木有" })).unwrap_err();
        match err {
            Error::Api { code, message } => {
                assert_eq!(code, -404);
                assert_eq!(message, "啥都木有");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(ensure_success(&json!({})), Err(Error::Shape(_))));
    }

    #[test]
    fn test_require_object() {
        let root = json!({ "data": { "a": 1 }, "list": [] });
        assert!(require_object(&root, "data", "data").is_ok());
        assert!(matches!(require_object(&root, "list", "list"), Err(Error::Shape(_))));
        assert!(matches!(require_object(&root, "nope", "nope"), Err(Error::Shape(_))));
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("中文描述", 2), "中文");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("//i0.hdslb.com/a.jpg"), "https://i0.hdslb.com/a.jpg");
        assert_eq!(absolute_url("http://i0.hdslb.com/a.jpg"), "http://i0.hdslb.com/a.jpg");
    }
}
