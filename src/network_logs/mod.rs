#![allow(clippy::module_name_repetitions)]

//! Request inspector shown on the network log page: captured rows, filters,
//! and the detail tabs of the selected request.

use chrono::Local;
use indexmap::IndexMap;
use serde_json::json;

pub mod format;

use self::format::{
    enhance_request_headers, format_duration, format_json, format_size, format_timestamp,
    generate_curl_command, parse_query_params, parse_url, StatusClass,
};

/// Port the capture server would listen on.
pub const DEFAULT_PORT: u16 = 8082;

/// Methods the method filter steps through.
pub const METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];

///
const DEMO_URL: &str = "http://localhost:8080/asdnajnsd/asdnajsdnjas/asdnahjsbdhajbsdhbahsbdhabsdhbashdbahsbdha";

/// One captured request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkRequest {
    ///
    pub id: u64,

    /// As captured; compared case-insensitively.
    pub method: String,

    ///
    pub url: String,

    ///
    pub headers: IndexMap<String, String>,

    /// Payload as sent.
    pub data: Option<serde_json::Value>,

    /// `None` until a response arrives; `Some(0)` for a failed connection.
    pub status: Option<u16>,

    ///
    pub response_headers: IndexMap<String, String>,

    ///
    pub response_data: Option<serde_json::Value>,

    /// Milliseconds since the epoch.
    pub start_time: i64,

    ///
    pub duration: Option<u64>,

    ///
    pub response_size: Option<u64>,

    /// Transport, `xhr` when unknown.
    pub kind: Option<String>,

    ///
    pub error: Option<String>,

    ///
    pub completed: bool,

    /// Body as the client built it, before serialisation.
    pub body: Option<serde_json::Value>,
}

impl NetworkRequest {
    /// Text for the status column.
    pub fn status_label(&self) -> String {
        if self.error.is_some() {
            "错误".to_owned()
        } else if !self.completed {
            "进行中".to_owned()
        } else {
            self.status
                .map_or_else(|| "-".to_owned(), |status| status.to_string())
        }
    }

    ///
    pub fn kind_label(&self) -> String {
        self.kind.as_deref().unwrap_or("xhr").to_uppercase()
    }

    ///
    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    ///
    fn is_success(&self) -> bool {
        self.completed
            && self.error.is_none()
            && matches!(self.status_class(), StatusClass::Success | StatusClass::Redirect)
    }

    ///
    fn is_failure(&self) -> bool {
        self.error.is_some()
            || matches!(self.status_class(), StatusClass::ClientError | StatusClass::ServerError)
            || (self.completed && matches!(self.status, None | Some(0)))
    }
}

/// Demo rows shown until live capture exists.
pub fn sample_requests() -> Vec<NetworkRequest> {
    let started = 1_717_200_000_000;

    let mut json_headers = IndexMap::new();
    json_headers.insert("Content-Type".to_owned(), "application/json".to_owned());

    vec![
        NetworkRequest {
            id: 1,
            method: "GET".to_owned(),
            url: format!("{DEMO_URL}?page=1&size=20"),
            status: Some(200),
            response_headers: json_headers.clone(),
            response_data: Some(json!({"items": [], "total": 0})),
            start_time: started,
            duration: Some(128),
            response_size: Some(2_356),
            completed: true,
            ..NetworkRequest::default()
        },
        NetworkRequest {
            id: 2,
            method: "POSt".to_owned(),
            url: DEMO_URL.to_owned(),
            headers: json_headers.clone(),
            data: Some(json!({"name": "demo"})),
            body: Some(json!({"name": "demo"})),
            status: Some(400),
            response_headers: json_headers,
            response_data: Some(json!({"message": "Bad Request"})),
            start_time: started + 1_500,
            duration: Some(1_730),
            response_size: Some(512),
            completed: true,
            ..NetworkRequest::default()
        },
        NetworkRequest {
            id: 3,
            method: "DELETE".to_owned(),
            url: DEMO_URL.to_owned(),
            status: Some(0),
            start_time: started + 3_000,
            error: Some("Network Error".to_owned()),
            completed: true,
            ..NetworkRequest::default()
        },
        NetworkRequest {
            id: 4,
            method: "PUT".to_owned(),
            url: DEMO_URL.to_owned(),
            data: Some(json!("id=4&enabled=true")),
            body: Some(json!("id=4&enabled=true")),
            start_time: started + 4_200,
            ..NetworkRequest::default()
        },
    ]
}

///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    ///
    #[default]
    All,

    ///
    Success,

    ///
    Error,
}

impl StatusFilter {
    ///
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "全部",
            StatusFilter::Success => "成功",
            StatusFilter::Error => "错误",
        }
    }

    ///
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Success,
            StatusFilter::Success => StatusFilter::Error,
            StatusFilter::Error => StatusFilter::All,
        }
    }
}

/// Method, status and free-text criteria; a row must meet all three.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// `None` accepts every method.
    pub method: Option<&'static str>,

    ///
    pub status: StatusFilter,

    /// Matched against the URL and the method, ignoring case.
    pub text: String,
}

impl LogFilter {
    ///
    pub fn matches(&self, request: &NetworkRequest) -> bool {
        let method_ok = self
            .method
            .map_or(true, |method| request.method.eq_ignore_ascii_case(method));

        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Success => request.is_success(),
            StatusFilter::Error => request.is_failure(),
        };

        let needle = self.text.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || request.url.to_lowercase().contains(&needle)
            || request.method.to_lowercase().contains(&needle);

        method_ok && status_ok && text_ok
    }

    /// Steps the method filter through `METHODS`, then back to all.
    pub fn cycle_method(&mut self) {
        self.method = match self.method {
            None => METHODS.first().copied(),
            Some(current) => METHODS
                .iter()
                .position(|&method| method == current)
                .and_then(|position| METHODS.get(position.saturating_add(1)))
                .copied(),
        };
    }
}

///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailTab {
    ///
    #[default]
    Overview,

    ///
    Headers,

    ///
    Payload,

    ///
    Response,

    ///
    Curl,
}

impl DetailTab {
    ///
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Overview,
        DetailTab::Headers,
        DetailTab::Payload,
        DetailTab::Response,
        DetailTab::Curl,
    ];

    ///
    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Overview => "概览",
            DetailTab::Headers => "请求头",
            DetailTab::Payload => "请求载荷",
            DetailTab::Response => "响应",
            DetailTab::Curl => "cURL",
        }
    }

    ///
    pub fn next(self) -> Self {
        match self {
            DetailTab::Overview => DetailTab::Headers,
            DetailTab::Headers => DetailTab::Payload,
            DetailTab::Payload => DetailTab::Response,
            DetailTab::Response => DetailTab::Curl,
            DetailTab::Curl => DetailTab::Overview,
        }
    }

    ///
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&tab| tab == self).unwrap_or(0)
    }
}

/// Rows, filters, cursor and selection of the inspector.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLogsState {
    ///
    requests: Vec<NetworkRequest>,

    ///
    filter: LogFilter,

    /// Highlighted row among the filtered rows.
    cursor: usize,

    /// Id of the request shown in the detail pane.
    selected: Option<u64>,

    ///
    tab: DetailTab,

    /// Live capture is not wired, so this stays false.
    connected: bool,
}

impl NetworkLogsState {
    ///
    pub fn new(requests: Vec<NetworkRequest>) -> Self {
        Self {
            requests,
            filter: LogFilter::default(),
            cursor: 0,
            selected: None,
            tab: DetailTab::default(),
            connected: false,
        }
    }

    ///
    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    ///
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    ///
    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    ///
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    ///
    pub fn total(&self) -> usize {
        self.requests.len()
    }

    /// Rows passing the filter, in capture order.
    pub fn visible(&self) -> Vec<&NetworkRequest> {
        self.requests
            .iter()
            .filter(|request| self.filter.matches(request))
            .collect()
    }

    ///
    pub fn selected_request(&self) -> Option<&NetworkRequest> {
        let id = self.selected?;
        self.requests.iter().find(|request| request.id == id)
    }

    ///
    pub fn cursor_down(&mut self) {
        let count = self.visible().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.saturating_add(1) % count
        };
    }

    ///
    pub fn cursor_up(&mut self) {
        let count = self.visible().len();
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            count.saturating_sub(1)
        };
    }

    /// Shows the highlighted row in the detail pane, starting on the overview.
    pub fn select_cursor(&mut self) -> bool {
        let id = self.visible().get(self.cursor).map(|request| request.id);

        if let Some(id) = id {
            log::debug!("Inspecting request {id}");
            self.selected = Some(id);
            self.tab = DetailTab::Overview;
            true
        } else {
            false
        }
    }

    ///
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    ///
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    ///
    pub fn cycle_method(&mut self) {
        self.filter.cycle_method();
        self.clamp();
    }

    ///
    pub fn cycle_status(&mut self) {
        self.filter.status = self.filter.status.next();
        self.clamp();
    }

    ///
    pub fn set_filter_text(&mut self, text: String) {
        self.filter.text = text;
        self.clamp();
    }

    /// Drops every captured row and the selection.
    pub fn clear(&mut self) {
        log::info!("Cleared {} captured requests", self.requests.len());
        self.requests.clear();
        self.selected = None;
        self.cursor = 0;
    }

    /// Keeps the cursor inside the filtered rows.
    pub fn clamp(&mut self) {
        let count = self.visible().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }
}

impl Default for NetworkLogsState {
    fn default() -> Self {
        Self::new(sample_requests())
    }
}

/// Text of one detail tab, line by line.
pub fn detail_lines(request: &NetworkRequest, tab: DetailTab) -> Vec<String> {
    let mut lines = vec![];

    match tab {
        DetailTab::Overview => {
            let parts = parse_url(&request.url);

            lines.push(format!("URL: {}", request.url));
            lines.push(format!("Method: {}", request.method.to_uppercase()));
            lines.push(format!("Status: {}", request.status_label()));
            lines.push(format!("Type: {}", request.kind_label()));
            lines.push(format!("Started: {}", format_timestamp(request.start_time, &Local)));
            lines.push(format!("Duration: {}", format_duration(request.duration)));
            lines.push(format!("Size: {}", format_size(request.response_size)));
            if let Some(ref error) = request.error {
                lines.push(format!("Error: {error}"));
            }

            lines.push(String::new());
            lines.push(format!("Protocol: {}", parts.protocol));
            lines.push(format!("Host: {}", parts.host));
            lines.push(format!("Path: {}", parts.pathname));
            if !parts.search.is_empty() {
                lines.push(format!("Query: {}", parts.search));
            }
            if !parts.hash.is_empty() {
                lines.push(format!("Hash: {}", parts.hash));
            }
        }
        DetailTab::Headers => {
            lines.push("Request headers".to_owned());
            push_headers(&mut lines, &enhance_request_headers(request));

            lines.push(String::new());
            lines.push("Response headers".to_owned());
            push_headers(&mut lines, &request.response_headers);
        }
        DetailTab::Payload => {
            let params = parse_query_params(&request.url);
            if !params.is_empty() {
                lines.push("Query parameters".to_owned());
                push_headers(&mut lines, &params);
            }

            match request.body.as_ref().or(request.data.as_ref()) {
                Some(body) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push("Body".to_owned());
                    lines.extend(format_json(body).lines().map(str::to_owned));
                }
                None if lines.is_empty() => lines.push("(no payload)".to_owned()),
                None => {}
            }
        }
        DetailTab::Response => {
            if let Some(ref error) = request.error {
                lines.push(format!("Error: {error}"));
            }

            match request.response_data {
                Some(ref data) => lines.extend(format_json(data).lines().map(str::to_owned)),
                None if lines.is_empty() => lines.push("(no response)".to_owned()),
                None => {}
            }
        }
        DetailTab::Curl => {
            lines.extend(generate_curl_command(request).lines().map(str::to_owned));
        }
    }

    lines
}

///
fn push_headers(lines: &mut Vec<String>, headers: &IndexMap<String, String>) {
    if headers.is_empty() {
        lines.push("  (none)".to_owned());
    }

    for (key, value) in headers {
        lines.push(format!("  {key}: {value}"));
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn ids(state: &NetworkLogsState) -> Vec<u64> {
        state.visible().iter().map(|request| request.id).collect()
    }

    #[test]
    fn test_sample_rows() {
        let state = NetworkLogsState::default();

        assert_eq!(vec![1, 2, 3, 4], ids(&state));
        assert!(!state.is_connected());
        assert!(state.selected_request().is_none());
    }

    #[test]
    fn test_status_labels() {
        let requests = sample_requests();
        let labels: Vec<String> = requests.iter().map(NetworkRequest::status_label).collect();

        assert_eq!(vec!["200", "400", "错误", "进行中"], labels);
        assert_eq!("XHR", requests[0].kind_label());
    }

    #[test]
    fn test_method_filter_ignores_case() {
        let mut state = NetworkLogsState::default();

        state.cycle_method();
        assert_eq!(Some("GET"), state.filter().method);
        assert_eq!(vec![1], ids(&state));

        state.cycle_method();
        assert_eq!(Some("POST"), state.filter().method);
        assert_eq!(vec![2], ids(&state));
    }

    #[test]
    fn test_method_filter_wraps_to_all() {
        let mut filter = LogFilter::default();

        for _ in 0..METHODS.len() {
            filter.cycle_method();
        }
        assert_eq!(Some("PATCH"), filter.method);

        filter.cycle_method();
        assert_eq!(None, filter.method);
    }

    #[test]
    fn test_status_filter() {
        let mut state = NetworkLogsState::default();

        state.cycle_status();
        assert_eq!(StatusFilter::Success, state.filter().status);
        assert_eq!(vec![1], ids(&state));

        state.cycle_status();
        assert_eq!(StatusFilter::Error, state.filter().status);
        assert_eq!(vec![2, 3], ids(&state));

        state.cycle_status();
        assert_eq!(StatusFilter::All, state.filter().status);
        assert_eq!(4, state.visible().len());
    }

    #[test]
    fn test_text_filter() {
        let mut state = NetworkLogsState::default();

        state.set_filter_text("PAGE=1".to_owned());
        assert_eq!(vec![1], ids(&state));

        state.set_filter_text("delete".to_owned());
        assert_eq!(vec![3], ids(&state));

        state.set_filter_text("   ".to_owned());
        assert_eq!(4, state.visible().len());
    }

    #[test]
    fn test_cursor_clamped_by_filter() {
        let mut state = NetworkLogsState::default();
        state.cursor_up();
        assert_eq!(3, state.cursor());

        state.cycle_status();
        assert_eq!(0, state.cursor());

        state.cursor_down();
        assert_eq!(0, state.cursor());
    }

    #[test]
    fn test_select_and_tabs() {
        let mut state = NetworkLogsState::default();
        state.cursor_down();

        assert!(state.select_cursor());
        assert_eq!(Some(2), state.selected_request().map(|request| request.id));
        assert_eq!(DetailTab::Overview, state.tab());

        state.next_tab();
        state.next_tab();
        assert_eq!(DetailTab::Payload, state.tab());
        assert_eq!(2, state.tab().index());

        state.close_detail();
        assert!(state.selected_request().is_none());
    }

    #[test]
    fn test_clear() {
        let mut state = NetworkLogsState::default();
        assert!(state.select_cursor());

        state.clear();

        assert_eq!(0, state.total());
        assert!(state.selected_request().is_none());
        assert!(!state.select_cursor());
    }

    #[test]
    fn test_overview_lines() {
        let request = sample_requests().remove(0);
        let lines = detail_lines(&request, DetailTab::Overview);

        assert_eq!(format!("URL: {}", request.url), lines[0]);
        assert!(lines.contains(&"Host: localhost:8080".to_owned()));
        assert!(lines.contains(&"Query: ?page=1&size=20".to_owned()));
        assert!(lines.contains(&"Duration: 128 ms".to_owned()));
        assert!(lines.contains(&"Size: 2.30 KB".to_owned()));
    }

    #[test]
    fn test_payload_lines() {
        let requests = sample_requests();

        let lines = detail_lines(&requests[0], DetailTab::Payload);
        assert_eq!(
            vec!["Query parameters", "  page: 1", "  size: 20"],
            lines
        );

        let lines = detail_lines(&requests[2], DetailTab::Payload);
        assert_eq!(vec!["(no payload)"], lines);

        let lines = detail_lines(&requests[3], DetailTab::Payload);
        assert_eq!(vec!["Body", "id=4&enabled=true"], lines);
    }

    #[test]
    fn test_response_lines() {
        let requests = sample_requests();

        let lines = detail_lines(&requests[2], DetailTab::Response);
        assert_eq!(vec!["Error: Network Error"], lines);

        let lines = detail_lines(&requests[3], DetailTab::Response);
        assert_eq!(vec!["(no response)"], lines);
    }

    #[test]
    fn test_curl_lines() {
        let requests = sample_requests();
        let lines = detail_lines(&requests[1], DetailTab::Curl);

        assert_eq!("curl -X POST \\", lines[0]);
        assert_eq!("  -H \"Content-Type: application/json\" \\", lines[1]);
        assert_eq!("  -d '{\"name\":\"demo\"}' \\", lines[2]);
        assert_eq!(format!("  \"{DEMO_URL}\""), lines[3]);
    }

    #[test]
    fn test_header_lines() {
        let requests = sample_requests();
        let lines = detail_lines(&requests[2], DetailTab::Headers);

        assert_eq!("Request headers", lines[0]);
        assert!(lines.contains(&"  Protocol: HTTP/1.1".to_owned()));
        assert_eq!(Some(&"  (none)".to_owned()), lines.last());
    }
}
