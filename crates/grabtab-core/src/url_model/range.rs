//! Byte-range query stripping.

/// Removes a `range=` query fragment and everything after it.
///
/// `?range=` takes priority over `&range=`; only the first occurrence of the
/// chosen marker matters. The result is not re-validated as a URL.
pub fn strip_trailing_range(url: &str) -> String {
    let cut = url.find("?range=").or_else(|| url.find("&range="));
    match cut {
        Some(idx) => url[..idx].to_string(),
        None => url.to_string(),
    }
}
