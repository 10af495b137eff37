//! URL fragment codec for deep links.
//!
//! `#<percent-encoded item id>` means "viewer open on this item". Encoding
//! follows `encodeURIComponent`: ASCII alphanumerics and `-_.!~*'()` stay
//! literal, everything else is UTF-8 percent-encoded with upper-case hex.

const UNRESERVED_MARKS: &[u8] = b"-_.!~*'()";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || UNRESERVED_MARKS.contains(&byte)
}

/// Percent-encodes an item id for use in a fragment.
///
/// # Examples
///
/// ```
/// use vitrine::viewer::deeplink::encode_component;
///
/// assert_eq!(encode_component("sunset-over-hills"), "sunset-over-hills");
/// assert_eq!(encode_component("a b/ü"), "a%20b%2F%C3%BC");
/// ```
#[must_use]
pub fn encode_component(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for &byte in id.as_bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decodes a percent-encoded component.
///
/// Returns `None` for truncated escapes or byte sequences that are not UTF-8;
/// a malformed deep link is left inert rather than reported.
#[must_use]
pub fn decode_component(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Builds the fragment that deep-links to `id`, including the leading `#`.
#[must_use]
pub fn fragment_for(id: &str) -> String {
    format!("#{}", encode_component(id))
}

/// Extracts the item id from a location fragment.
///
/// Accepts the fragment with or without its leading `#`. An empty fragment
/// carries no deep link.
///
/// # Examples
///
/// ```
/// use vitrine::viewer::deeplink::parse_fragment;
///
/// assert_eq!(parse_fragment("#a%20b").as_deref(), Some("a b"));
/// assert_eq!(parse_fragment("#"), None);
/// ```
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<String> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return None;
    }
    decode_component(raw).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_component("#?&="), "%23%3F%26%3D");
        assert_eq!(encode_component("it's(1)"), "it's(1)");
    }

    #[test]
    fn test_decode_accepts_lower_case_hex() {
        assert_eq!(decode_component("%c3%bc").as_deref(), Some("ü"));
    }

    #[test]
    fn test_malformed_fragments_are_inert() {
        assert_eq!(parse_fragment("#%E0%A4"), None);
        assert_eq!(parse_fragment("#abc%2"), None);
        assert_eq!(parse_fragment("#%zz"), None);
        assert_eq!(parse_fragment(""), None);
    }

    #[test]
    fn test_fragment_for_round_trips_unicode_id() {
        let id = "café nocturne";
        assert_eq!(parse_fragment(&fragment_for(id)).as_deref(), Some(id));
    }
}
