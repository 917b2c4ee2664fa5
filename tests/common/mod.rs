//! Shared utilities for integration testing: a programmable mock Notion API.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tool_directory::config::DirectoryConfig;

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockNotion {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl MockNotion {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock backend answering every request with `status` and `body`.
pub async fn start_mock_notion(status: u16, body: &'static str) -> MockNotion {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let mock = MockNotion {
        addr,
        calls: Arc::new(AtomicU32::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let handle = mock.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let handle = handle.clone();
            tokio::spawn(async move {
                serve_one(socket, &handle, status, body).await;
            });
        }
    });

    mock
}

async fn serve_one(mut socket: TcpStream, mock: &MockNotion, status: u16, body: &str) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    mock.calls.fetch_add(1, Ordering::SeqCst);
    mock.requests.lock().unwrap().push(request);

    let status = StatusCode::from_u16(status).expect("mock status must be a valid HTTP status");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Read one HTTP/1.1 request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (body_start + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[body_start..body_end]).to_string();

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Config pointing at `base_url` with the given credentials.
pub fn config_for(
    base_url: &str,
    api_key: Option<&str>,
    database_id: Option<&str>,
) -> DirectoryConfig {
    let mut config = DirectoryConfig::default();
    config.notion.api_base_url = base_url.to_string();
    config.notion.api_key = api_key.map(str::to_string);
    config.notion.database_id = database_id.map(str::to_string);
    config.notion.use_system_proxy = false;
    config
}
