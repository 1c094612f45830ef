use super::params::Params;

/// Bytes passed through unescaped. Wider than RFC 3986 "unreserved": `!()*'`
/// are left raw to match what the server hashes.
fn is_unescaped(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'!' | b'(' | b')' | b'*' | b'\'')
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode `value` byte by byte (UTF-8), space as `%20`.
pub fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for &byte in value.as_bytes() {
        if is_unescaped(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
            out.push(char::from(HEX_UPPER[usize::from(byte & 0x0F)]));
        }
    }
    out
}

/// Serialize present parameters as `k=v&k=v`, keys ascending by byte value.
pub fn canonicalize(params: &Params) -> String {
    params
        .present()
        .map(|(key, value)| format!("{key}={}", percent_encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_independent_of_insertion() {
        let a = Params::new().with("b", 2).with("a", 1);
        let b = Params::new().with("a", 1).with("b", 2);
        assert_eq!(canonicalize(&a), "a=1&b=2");
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_encoding_exceptions() {
        let params = Params::new().with("q", "a b!c*d");
        assert_eq!(canonicalize(&params), "q=a%20b!c*d");
    }

    #[test]
    fn test_reserved_and_multibyte() {
        assert_eq!(percent_encode("a+b=c&d/é"), "a%2Bb%3Dc%26d%2F%C3%A9");
        assert_eq!(percent_encode("中文"), "%E4%B8%AD%E6%96%87");
        assert_eq!(percent_encode("(x)'~-_."), "(x)'~-_.");
    }

    #[test]
    fn test_absent_values_dropped() {
        let params = Params::new()
            .with("keyword", "test")
            .with_opt("uniq_id", None::<String>)
            .with("page", 1);
        assert_eq!(canonicalize(&params), "keyword=test&page=1");
    }

    #[test]
    fn test_byte_order_sorting() {
        // Uppercase sorts before lowercase, underscore between them.
        let params = Params::new().with("b", 1).with("_a", 2).with("Z", 3);
        assert_eq!(canonicalize(&params), "Z=3&_a=2&b=1");
    }

    #[test]
    fn test_empty() {
        assert_eq!(canonicalize(&Params::new()), "");
    }
}
