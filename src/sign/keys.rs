use crate::{Error, Result};

/// Key fragments published by the nav endpoint, used to derive the mixin key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKeys {
    pub img_key: String,
    pub sub_key: String,
}

impl SigningKeys {
    pub const FALLBACK_IMG_KEY: &'static str = "7cd084941338484aae1ad9425b84077c";
    pub const FALLBACK_SUB_KEY: &'static str = "4932caff0ff746eab6f01bf08b70ac45";

    pub fn new(img_key: impl Into<String>, sub_key: impl Into<String>) -> Self {
        Self {
            img_key: img_key.into(),
            sub_key: sub_key.into(),
        }
    }

    /// Pair used until session keys have been fetched.
    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK_IMG_KEY, Self::FALLBACK_SUB_KEY)
    }

    /// Build keys from the `img_url` / `sub_url` pair in a nav response.
    pub fn from_urls(img_url: &str, sub_url: &str) -> Result<Self> {
        let img_key = extract_key_from_url(img_url);
        let sub_key = extract_key_from_url(sub_url);
        if img_key.is_empty() || sub_key.is_empty() {
            return Err(Error::InvalidSigningKeys(format!(
                "could not extract keys from {img_url:?} / {sub_url:?}"
            )));
        }
        Ok(Self::new(img_key, sub_key))
    }
}

impl Default for SigningKeys {
    fn default() -> Self {
        Self::fallback()
    }
}

/// File stem of the last path segment:
/// `https://i0.hdslb.com/bfs/wbi/7cd0...077c.png` -> `7cd0...077c`.
pub fn extract_key_from_url(url: &str) -> &str {
    let file = url.rsplit('/').next().unwrap_or(url);
    file.split('.').next().unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_key_from_url() {
        assert_eq!(
            extract_key_from_url("https://i0.hdslb.com/bfs/wbi/7cd084941338484aae1ad9425b84077c.png"),
            "7cd084941338484aae1ad9425b84077c"
        );
        assert_eq!(extract_key_from_url("plainkey"), "plainkey");
        assert_eq!(extract_key_from_url("https://host/dir/"), "");
    }

    #[test]
    fn test_from_urls() {
        let keys = SigningKeys::from_urls(
            "https://i0.hdslb.com/bfs/wbi/7cd084941338484aae1ad9425b84077c.png",
            "https://i0.hdslb.com/bfs/wbi/4932caff0ff746eab6f01bf08b70ac45.png",
        )
        .unwrap();
        assert_eq!(keys, SigningKeys::fallback());
    }

    #[test]
    fn test_from_urls_rejects_empty() {
        let result = SigningKeys::from_urls("", "https://host/a.png");
        assert!(matches!(result, Err(Error::InvalidSigningKeys(_))));
    }
}
