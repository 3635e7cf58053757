//! Byte-size extraction from the `clen` query parameter or `Content-Length`.

use serde::{Deserialize, Serialize};

/// One response header as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

impl ResponseHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Best-known size of the resource behind `url`, or 0 if unknown.
///
/// A positive `clen` query parameter wins; otherwise the first
/// `Content-Length` header is used if it is positive.
pub fn extract_size(url: &str, headers: Option<&[ResponseHeader]>) -> u64 {
    size_from_clen(url)
        .or_else(|| headers.and_then(size_from_headers))
        .unwrap_or(0)
}

/// Total size from the first `clen` query parameter. `None` for unparseable
/// URLs, a missing or empty parameter, or a non-positive value.
pub fn size_from_clen(url: &str) -> Option<u64> {
    let parsed = url::Url::parse(url).ok()?;
    let clen = parsed
        .query_pairs()
        .find(|(k, _)| k == "clen")
        .map(|(_, v)| v.into_owned())?;
    if clen.is_empty() {
        return None;
    }
    parse_leading_int(&clen).filter(|n| *n > 0)
}

/// Size from the first `Content-Length` header (case-insensitive name).
/// Only the first such header is considered, even if its value is bad.
pub fn size_from_headers(headers: &[ResponseHeader]) -> Option<u64> {
    let header = headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-length"))?;
    parse_leading_int(&header.value).filter(|n| *n > 0)
}

/// Lenient base-10 parse: skips leading whitespace, accepts an optional sign
/// and reads the leading run of ASCII digits, ignoring anything after it.
///
/// Returns `None` when there are no digits, the value is negative, or it does
/// not fit in a `u64`.
pub fn parse_leading_int(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: u64 = rest[..digits_len].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<ResponseHeader> {
        pairs.iter().map(|(n, v)| ResponseHeader::new(*n, *v)).collect()
    }

    #[test]
    fn clen_wins_over_content_length() {
        let h = headers(&[("Content-Length", "500")]);
        assert_eq!(
            extract_size("https://r1.example.com/videoplayback?clen=1000&itag=140", Some(h.as_slice())),
            1000
        );
    }

    #[test]
    fn content_length_used_without_clen() {
        let h = headers(&[("Content-Length", "500")]);
        assert_eq!(extract_size("https://r1.example.com/videoplayback?itag=18", Some(h.as_slice())), 500);
    }

    #[test]
    fn neither_source_gives_zero() {
        assert_eq!(extract_size("https://r1.example.com/videoplayback", None), 0);
        assert_eq!(extract_size("https://r1.example.com/videoplayback", Some(&[][..])), 0);
    }

    #[test]
    fn malformed_url_falls_through_to_headers() {
        let h = headers(&[("content-length", "42")]);
        assert_eq!(extract_size("not a url ?clen=99", Some(h.as_slice())), 42);
    }

    #[test]
    fn non_positive_clen_falls_through() {
        let h = headers(&[("Content-Length", "7")]);
        assert_eq!(extract_size("https://x/videoplayback?clen=0", Some(h.as_slice())), 7);
        assert_eq!(extract_size("https://x/videoplayback?clen=-5", Some(h.as_slice())), 7);
        assert_eq!(extract_size("https://x/videoplayback?clen=abc", Some(h.as_slice())), 7);
        assert_eq!(extract_size("https://x/videoplayback?clen=", Some(h.as_slice())), 7);
    }

    #[test]
    fn first_clen_parameter_is_used() {
        assert_eq!(size_from_clen("https://x/v?clen=10&clen=20"), Some(10));
    }

    #[test]
    fn header_scan_stops_at_first_content_length() {
        let h = headers(&[
            ("Content-Type", "video/mp4"),
            ("CONTENT-LENGTH", "bogus"),
            ("Content-Length", "900"),
        ]);
        assert_eq!(size_from_headers(&h), None);
        assert_eq!(extract_size("https://x/videoplayback", Some(h.as_slice())), 0);
    }

    #[test]
    fn lenient_integer_parsing() {
        assert_eq!(parse_leading_int("123"), Some(123));
        assert_eq!(parse_leading_int("  77 bytes"), Some(77));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-3"), None);
        assert_eq!(parse_leading_int("-0"), Some(0));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }
}
