//! Local HTTP server and fixtures for exercising the API clients offline.
use std::io::Write;
use std::sync::{Arc, Mutex};

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::sheets;

pub const TEST_KEY: &str = include_str!("sheets/testdata/service_account_key.pem");
pub const ACCESS_TOKEN: &str = "ya29.local-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Method and request target, e.g. `GET /drive/v3/files?q=...`
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.target)
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Canned reply for one method + path (query string ignored)
#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
}

impl Route {
    pub fn new(method: &'static str, path: &str, status: u16, body: impl Into<String>) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.into(),
        }
    }
}

pub struct FakeServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let Some(request) = read_request(&mut socket).await else {
                    continue;
                };

                let (status, body) = routes
                    .iter()
                    .find(|route| route.method == request.method && route.path == request.path())
                    .map(|route| (route.status, route.body.clone()))
                    .unwrap_or((404, "no route".to_string()));

                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { url, requests }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(RecordedRequest::line).collect()
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// Client that never routes through an environment proxy
pub fn test_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "token-sheets",
        "private_key": TEST_KEY,
        "client_email": "sync@token-sheets.iam.gserviceaccount.com",
        "token_uri": token_uri
    })
    .to_string()
}

pub fn service_account_file(token_uri: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(service_account_json(token_uri).as_bytes())
        .unwrap();
    file
}

pub fn sheets_config(server: &FakeServer) -> sheets::Config {
    sheets::Config {
        sheets_api_url: server.url_for("/v4"),
        drive_api_url: server.url_for("/drive/v3"),
        ..sheets::Config::default()
    }
}

/// Token exchange, Drive lookup of "Book" (id `sid`) and its metadata with a
/// single "Token list" tab
pub fn google_routes() -> Vec<Route> {
    vec![
        Route::new(
            "POST",
            "/token",
            200,
            format!(
                r#"{{"access_token": "{}", "expires_in": 3599, "token_type": "Bearer"}}"#,
                ACCESS_TOKEN
            ),
        ),
        Route::new(
            "GET",
            "/drive/v3/files",
            200,
            r#"{"files": [{"id": "sid", "name": "Book"}]}"#,
        ),
        Route::new(
            "GET",
            "/v4/spreadsheets/sid",
            200,
            r#"{"sheets": [{"properties": {"sheetId": 7, "title": "Token list"}}]}"#,
        ),
    ]
}
