use axum::http::HeaderMap;

// Shared bucket for callers without forwarding headers
pub const UNKNOWN_CLIENT: &str = "unknown";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Rate limit key for the caller.
///
/// First address of `x-forwarded-for`, then `cf-connecting-ip`, then
/// [`UNKNOWN_CLIENT`]. Only ever used as a bucket key, never for auth.
pub fn client_identity(headers: &HeaderMap) -> String {
    let forwarded = header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    forwarded
        .or_else(|| header_value(headers, "cf-connecting-ip"))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn takes_first_forwarded_address() {
        let map = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1, 10.0.0.2"),
            ("cf-connecting-ip", "198.51.100.1"),
        ]);
        assert_eq!(client_identity(&map), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_connecting_ip() {
        let map = headers(&[("cf-connecting-ip", "198.51.100.1")]);
        assert_eq!(client_identity(&map), "198.51.100.1");
    }

    #[test]
    fn blank_forwarded_header_is_skipped() {
        let map = headers(&[("x-forwarded-for", " , 10.0.0.1"), ("cf-connecting-ip", "198.51.100.1")]);
        assert_eq!(client_identity(&map), "198.51.100.1");
    }

    #[test]
    fn unknown_without_headers() {
        assert_eq!(client_identity(&HeaderMap::new()), UNKNOWN_CLIENT);
    }
}
