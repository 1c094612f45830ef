use reqwest::header::{
    ACCEPT_ENCODING, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};

use crate::{Error, Result, config::ClientConfig};

/// Headers sent with every upstream call.
///
/// Compression is disabled with `Accept-Encoding: identity`.
pub fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    insert(&mut headers, USER_AGENT, &config.user_agent)?;
    insert(&mut headers, REFERER, &config.referer)?;
    insert(&mut headers, ORIGIN, &config.origin)?;
    insert(&mut headers, ACCEPT_ENCODING, "identity")?;
    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::Internal(format!("invalid {name} header value: {e}")))?;
    headers.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let headers = default_headers(&ClientConfig::default()).unwrap();

        assert_eq!(headers[REFERER], "https://www.bilibili.com/");
        assert_eq!(headers[ORIGIN], "https://www.bilibili.com");
        assert_eq!(headers[ACCEPT_ENCODING], "identity");
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_invalid_header_value() {
        let config = ClientConfig {
            user_agent: "bad\nagent".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(default_headers(&config), Err(Error::Internal(_))));
    }
}
