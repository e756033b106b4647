//! Input normalisation: target, headers, request body

use anyhow::{Context, Result};
use bytes::Bytes;
use std::net::IpAddr;
use std::path::Path;

/// Turn a positional target into an absolute URL
///
/// Explicit `http://`/`https://` targets are kept as-is; bare IPs,
/// `host:port` and plain hostnames get an `http://` prefix.
pub fn normalize_target(candidate: &str) -> String {
    let candidate = candidate.trim();
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return candidate.to_string();
    }
    if candidate.contains(':') || candidate.parse::<IpAddr>().is_ok() {
        tracing::debug!(target = candidate, "Assuming http:// for address");
    }
    format!("http://{candidate}")
}

/// Parse a `Key: Value` header flag
///
/// Splits on the first colon and trims both sides. Returns `None` for
/// entries without a colon or with an empty name.
pub fn parse_header(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Parse every header flag, warning about and skipping malformed ones
pub fn parse_headers(raw: &[String]) -> Vec<(String, String)> {
    raw.iter()
        .filter_map(|h| {
            let parsed = parse_header(h);
            if parsed.is_none() {
                tracing::warn!(header = %h, "Ignoring malformed header, expected 'Key: Value'");
            }
            parsed
        })
        .collect()
}

/// Read the request body file, or an empty body when no path is given
pub fn load_body(path: Option<&Path>) -> Result<Bytes> {
    match path {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read body file: {}", path.display()))?;
            Ok(Bytes::from(data))
        }
        None => Ok(Bytes::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_keeps_scheme() {
        assert_eq!(
            normalize_target("https://example.com/a"),
            "https://example.com/a"
        );
        assert_eq!(normalize_target("http://10.0.0.1:81"), "http://10.0.0.1:81");
    }

    #[test]
    fn test_normalize_bare_ip() {
        assert_eq!(normalize_target("192.0.2.5"), "http://192.0.2.5");
    }

    #[test]
    fn test_normalize_ip_port() {
        assert_eq!(normalize_target("192.0.2.5:8080"), "http://192.0.2.5:8080");
    }

    #[test]
    fn test_normalize_hostname() {
        assert_eq!(normalize_target(" example.com "), "http://example.com");
    }

    #[test]
    fn test_parse_header_splits_on_first_colon() {
        assert_eq!(
            parse_header("Authorization: Bearer a:b"),
            Some(("Authorization".to_string(), "Bearer a:b".to_string()))
        );
        assert_eq!(
            parse_header("X-Empty:"),
            Some(("X-Empty".to_string(), String::new()))
        );
    }

    #[test]
    fn test_parse_header_rejects_malformed() {
        assert_eq!(parse_header("no-colon-here"), None);
        assert_eq!(parse_header(" : value"), None);
    }

    #[test]
    fn test_parse_headers_keeps_duplicates() {
        let raw = vec![
            "X-Tag: a".to_string(),
            "garbage".to_string(),
            "X-Tag: b".to_string(),
        ];
        let parsed = parse_headers(&raw);
        assert_eq!(
            parsed,
            vec![
                ("X-Tag".to_string(), "a".to_string()),
                ("X-Tag".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"hello\": \"world\"}\n").unwrap();

        let body = load_body(Some(file.path())).unwrap();
        assert_eq!(&body[..], b"{\"hello\": \"world\"}\n");
    }

    #[test]
    fn test_load_body_none_is_empty() {
        assert!(load_body(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_body_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_body(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read body file"));
    }
}
