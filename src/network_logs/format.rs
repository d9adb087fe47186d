//! Presentation helpers for captured requests.

use core::fmt::Display;

use chrono::TimeZone;
use indexmap::IndexMap;
use url::Url;

use super::NetworkRequest;

/// Response status buckets, coloured by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    ///
    Unknown,

    ///
    Success,

    ///
    Redirect,

    ///
    ClientError,

    ///
    ServerError,
}

impl StatusClass {
    ///
    pub fn of(status: Option<u16>) -> Self {
        match status {
            Some(200..=299) => StatusClass::Success,
            Some(300..=399) => StatusClass::Redirect,
            Some(400..=499) => StatusClass::ClientError,
            Some(500..) => StatusClass::ServerError,
            Some(_) | None => StatusClass::Unknown,
        }
    }
}

///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlParts {
    ///
    pub protocol: String,

    /// Host with the port, when it is not the scheme default.
    pub host: String,

    ///
    pub pathname: String,

    /// Query string including the leading `?`.
    pub search: String,

    /// Fragment including the leading `#`.
    pub hash: String,
}

/// Splits an absolute URL; relative ones only get a path and a query.
pub fn parse_url(raw: &str) -> UrlParts {
    if let Ok(url) = Url::parse(raw) {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => String::new(),
        };

        return UrlParts {
            protocol: format!("{}:", url.scheme()),
            host,
            pathname: url.path().to_owned(),
            search: url.query().map(|query| format!("?{query}")).unwrap_or_default(),
            hash: url.fragment().map(|hash| format!("#{hash}")).unwrap_or_default(),
        };
    }

    let (pathname, query) = raw.split_once('?').unwrap_or((raw, ""));

    UrlParts {
        pathname: pathname.to_owned(),
        search: if query.is_empty() {
            String::new()
        } else {
            format!("?{query}")
        },
        ..UrlParts::default()
    }
}

/// Decoded query parameters in order of appearance; a repeated key keeps its
/// last value.
pub fn parse_query_params(raw: &str) -> IndexMap<String, String> {
    if let Ok(url) = Url::parse(raw) {
        return url.query_pairs().into_owned().collect();
    }

    let Some((_, query)) = raw.split_once('?') else {
        return IndexMap::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key.is_empty() {
                return None;
            }

            Some((decode(key), decode(value)))
        })
        .collect()
}

///
fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |decoded| decoded.into_owned())
}

/// Renders a request as a shell-ready curl command.
pub fn generate_curl_command(request: &NetworkRequest) -> String {
    let method = request.method.to_uppercase();
    let mut curl = format!("curl -X {method}");

    for (key, value) in &request.headers {
        curl.push_str(&format!(" \\\n  -H \"{key}: {value}\""));
    }

    if method != "GET" {
        match request.data {
            Some(serde_json::Value::String(ref data)) if !data.is_empty() => {
                curl.push_str(&format!(" \\\n  -d '{data}'"));
            }
            Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => {}
            Some(ref data) => {
                curl.push_str(&format!(" \\\n  -d '{data}'"));
            }
        }
    }

    curl.push_str(&format!(" \\\n  \"{}\"", request.url));

    curl
}

/// Pretty JSON; strings holding JSON are parsed first, other strings are
/// returned as they are.
pub fn format_json(data: &serde_json::Value) -> String {
    let parsed: serde_json::Value;
    let value = match *data {
        serde_json::Value::String(ref raw) => match serde_json::from_str(raw) {
            Ok(value) => {
                parsed = value;
                &parsed
            }
            Err(_) => return raw.clone(),
        },
        _ => data,
    };

    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Request headers with the defaults a client would have added.
pub fn enhance_request_headers(request: &NetworkRequest) -> IndexMap<String, String> {
    let mut headers = request.headers.clone();
    let method = request.method.to_uppercase();

    let app_version = headers
        .get("app-version")
        .cloned()
        .unwrap_or_else(|| "unknown".to_owned());

    let defaults = [
        ("Accept", "application/json, text/plain, */*".to_owned()),
        ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8".to_owned()),
        ("Accept-Encoding", "gzip, deflate, br".to_owned()),
        ("Connection", "keep-alive".to_owned()),
        ("User-Agent", format!("React-Native/{app_version}")),
    ];

    for (key, value) in defaults {
        headers.entry(key.to_owned()).or_insert(value);
    }

    if matches!(method.as_str(), "POST" | "PUT" | "PATCH") && request.body.is_some() {
        headers
            .entry("Content-Type".to_owned())
            .or_insert_with(|| "application/json".to_owned());
    }

    if request.url.starts_with("https://") {
        headers.insert("Protocol".to_owned(), "HTTPS/1.1".to_owned());
    } else if request.url.starts_with("http://") {
        headers.insert("Protocol".to_owned(), "HTTP/1.1".to_owned());
    }

    headers
}

///
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        None | Some(0) => "0 B".to_owned(),
        Some(bytes) if bytes < 1024 => format!("{bytes} B"),
        Some(bytes) if bytes < 1024 * 1024 => format!("{:.2} KB", bytes as f64 / 1024.0),
        Some(bytes) => format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)),
    }
}

///
#[allow(clippy::cast_precision_loss)]
pub fn format_duration(ms: Option<u64>) -> String {
    match ms {
        None | Some(0) => "-".to_owned(),
        Some(ms) if ms < 1000 => format!("{ms} ms"),
        Some(ms) => format!("{:.2} s", ms as f64 / 1000.0),
    }
}

/// Milliseconds since the epoch, to the millisecond, in `tz`.
pub fn format_timestamp<Tz>(ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| "-".to_owned(), |time| time.format("%Y/%m/%d %H:%M:%S%.3f").to_string())
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn post() -> NetworkRequest {
        let mut headers = IndexMap::new();
        headers.insert("Authorization".to_owned(), "Bearer abc".to_owned());

        NetworkRequest {
            id: 7,
            method: "post".to_owned(),
            url: "https://api.example.com/users".to_owned(),
            headers,
            data: Some(json!({"name": "ada"})),
            body: Some(json!({"name": "ada"})),
            ..NetworkRequest::default()
        }
    }

    #[test]
    fn test_status_class() {
        assert_eq!(StatusClass::Unknown, StatusClass::of(None));
        assert_eq!(StatusClass::Unknown, StatusClass::of(Some(0)));
        assert_eq!(StatusClass::Success, StatusClass::of(Some(204)));
        assert_eq!(StatusClass::Redirect, StatusClass::of(Some(304)));
        assert_eq!(StatusClass::ClientError, StatusClass::of(Some(404)));
        assert_eq!(StatusClass::ServerError, StatusClass::of(Some(503)));
    }

    #[test]
    fn test_parse_absolute_url() {
        let parts = parse_url("http://localhost:8080/api/users?page=2#top");

        let expected = UrlParts {
            protocol: "http:".to_owned(),
            host: "localhost:8080".to_owned(),
            pathname: "/api/users".to_owned(),
            search: "?page=2".to_owned(),
            hash: "#top".to_owned(),
        };

        assert_eq!(expected, parts);
    }

    #[test]
    fn test_parse_default_port_hidden() {
        assert_eq!("example.com", parse_url("https://example.com:443/").host);
    }

    #[test]
    fn test_parse_relative_url() {
        let parts = parse_url("/api/users?page=2");

        assert_eq!("", parts.protocol);
        assert_eq!("/api/users", parts.pathname);
        assert_eq!("?page=2", parts.search);
    }

    #[test]
    fn test_query_params() {
        let params = parse_query_params("https://example.com/search?q=rust%20lang&page=2&q=last");

        assert_eq!(Some("last"), params.get("q").map(String::as_str));
        assert_eq!(Some("2"), params.get("page").map(String::as_str));
        assert_eq!(2, params.len());
    }

    #[test]
    fn test_query_params_relative() {
        let params = parse_query_params("/items?name=%E6%97%A5%E5%BF%97&flag");

        assert_eq!(Some("日志"), params.get("name").map(String::as_str));
        assert_eq!(Some(""), params.get("flag").map(String::as_str));
        assert!(parse_query_params("/items").is_empty());
    }

    #[test]
    fn test_curl_post() {
        let expected = "curl -X POST \\\n  -H \"Authorization: Bearer abc\" \\\n  -d '{\"name\":\"ada\"}' \\\n  \"https://api.example.com/users\"";

        assert_eq!(expected, generate_curl_command(&post()));
    }

    #[test]
    fn test_curl_get_drops_body() {
        let request = NetworkRequest {
            method: "GET".to_owned(),
            ..post()
        };

        assert!(!generate_curl_command(&request).contains("-d"));
    }

    #[test]
    fn test_curl_string_body_verbatim() {
        let request = NetworkRequest {
            data: Some(json!("a=1&b=2")),
            headers: IndexMap::new(),
            ..post()
        };

        assert_eq!(
            "curl -X POST \\\n  -d 'a=1&b=2' \\\n  \"https://api.example.com/users\"",
            generate_curl_command(&request)
        );
    }

    #[test]
    fn test_format_json() {
        assert_eq!("{\n  \"a\": 1\n}", format_json(&json!({"a": 1})));
        assert_eq!("{\n  \"a\": 1\n}", format_json(&json!("{\"a\":1}")));
        assert_eq!("plain text", format_json(&json!("plain text")));
    }

    #[test]
    fn test_enhanced_headers() {
        let headers = enhance_request_headers(&post());

        assert_eq!(Some("Bearer abc"), headers.get("Authorization").map(String::as_str));
        assert_eq!(Some("application/json"), headers.get("Content-Type").map(String::as_str));
        assert_eq!(Some("HTTPS/1.1"), headers.get("Protocol").map(String::as_str));
        assert_eq!(Some("React-Native/unknown"), headers.get("User-Agent").map(String::as_str));
    }

    #[test]
    fn test_enhanced_headers_keep_existing() {
        let mut request = post();
        request.headers.insert("Accept".to_owned(), "text/html".to_owned());
        request.headers.insert("app-version".to_owned(), "1.2.0".to_owned());

        let headers = enhance_request_headers(&request);

        assert_eq!(Some("text/html"), headers.get("Accept").map(String::as_str));
        assert_eq!(Some("React-Native/1.2.0"), headers.get("User-Agent").map(String::as_str));
    }

    #[test]
    fn test_format_size() {
        assert_eq!("0 B", format_size(None));
        assert_eq!("512 B", format_size(Some(512)));
        assert_eq!("1.50 KB", format_size(Some(1536)));
        assert_eq!("2.00 MB", format_size(Some(2 * 1024 * 1024)));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!("-", format_duration(None));
        assert_eq!("-", format_duration(Some(0)));
        assert_eq!("250 ms", format_duration(Some(250)));
        assert_eq!("1.50 s", format_duration(Some(1500)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!("2024/01/02 03:04:05.006", format_timestamp(1_704_164_645_006, &Utc));
    }
}
