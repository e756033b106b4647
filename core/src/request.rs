//! Request template shared read-only by every worker

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use std::time::Duration;

use crate::config::ConfigError;

/// Immutable description of the one request shape sent during a run
///
/// Built and validated once before the pool starts, then shared through an
/// `Arc`. The body is a [`Bytes`] handle, so attaching it to each request
/// is a reference-count bump, not a copy.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestTemplate {
    /// Create a template with no headers and an empty body
    ///
    /// # Errors
    /// The method must be a valid HTTP token and the URL an absolute
    /// `http` or `https` URL with a host.
    pub fn new(method: &str, url: &str) -> Result<Self, ConfigError> {
        let method = Method::from_bytes(method.trim().as_bytes())
            .map_err(|_| ConfigError::InvalidMethod(method.to_string()))?;

        let url = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    /// Append a header; repeated names keep every value in insertion order
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(format!("bad name `{name}`")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::InvalidHeader(format!("bad value for `{name}`")))?;
        self.headers.append(header_name, header_value);
        Ok(self)
    }

    /// Append every `(name, value)` pair
    pub fn with_headers<I, K, V>(self, headers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .try_fold(self, |template, (name, value)| {
                template.with_header(name.as_ref(), value.as_ref())
            })
    }

    /// Set the request body, sent verbatim
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers attached to every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body (empty when none was configured)
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Build one concrete request bounded by `timeout`
    pub fn build_request(
        &self,
        client: &reqwest::Client,
        timeout: Duration,
    ) -> reqwest::Result<reqwest::Request> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone())
            .timeout(timeout);
        if !self.body.is_empty() {
            builder = builder.body(self.body.clone());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_defaults() {
        let template = RequestTemplate::new("GET", "http://localhost:8000/").unwrap();
        assert_eq!(template.method(), Method::GET);
        assert_eq!(template.url().as_str(), "http://localhost:8000/");
        assert!(template.headers().is_empty());
        assert!(template.body().is_empty());
    }

    #[test]
    fn test_invalid_method() {
        let result = RequestTemplate::new("GE T", "http://localhost/");
        assert!(matches!(result, Err(ConfigError::InvalidMethod(_))));
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = RequestTemplate::new("GET", "/just/a/path");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = RequestTemplate::new("GET", "ftp://example.com/file");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_duplicate_headers_kept_in_order() {
        let template = RequestTemplate::new("GET", "http://localhost/")
            .unwrap()
            .with_headers([("X-Tag", "a"), ("X-Tag", "b"), ("Accept", "*/*")])
            .unwrap();

        let values: Vec<_> = template
            .headers()
            .get_all("x-tag")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, ["a", "b"]);
        assert_eq!(template.headers().len(), 3);
    }

    #[test]
    fn test_invalid_header_name() {
        let result = RequestTemplate::new("GET", "http://localhost/")
            .unwrap()
            .with_header("bad header", "v");
        assert!(matches!(result, Err(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn test_build_request_carries_body_and_timeout() {
        let client = reqwest::Client::new();
        let template = RequestTemplate::new("POST", "http://localhost/submit")
            .unwrap()
            .with_header("Content-Type", "application/json")
            .unwrap()
            .with_body(&b"{\"k\":1}"[..]);

        let request = template
            .build_request(&client, Duration::from_secs(3))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.timeout(), Some(&Duration::from_secs(3)));
        assert_eq!(
            request.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"{\"k\":1}");
    }

    #[test]
    fn test_build_request_without_body() {
        let client = reqwest::Client::new();
        let template = RequestTemplate::new("GET", "http://localhost/").unwrap();
        let request = template
            .build_request(&client, Duration::from_secs(1))
            .unwrap();
        assert!(request.body().is_none());
    }
}
