//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use grant_proxy::{HttpServer, ProxyConfig, Shutdown};

/// A request captured by the mock upstream, decoded just enough for
/// assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response the mock upstream writes back.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Start a programmable mock authorization server.
///
/// The handler sees every captured request and decides the response.
pub async fn start_mock_upstream<F>(addr: SocketAddr, handler: F)
where
    F: Fn(CapturedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(&mut socket).await {
                            let response = handler(request);
                            let mut wire = format!(
                                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                                status_line(response.status),
                                response.body.len(),
                            );
                            for (name, value) in &response.headers {
                                wire.push_str(&format!("{}: {}\r\n", name, value));
                            }
                            wire.push_str("\r\n");
                            wire.push_str(&response.body);

                            let _ = socket.write_all(wire.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Build a proxy config pointing at a mock upstream over plain HTTP.
pub fn proxy_config(proxy_addr: SocketAddr, upstream_addr: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.scheme = "http".into();
    config.upstream.host = upstream_addr.to_string();
    config.observability.metrics_enabled = false;
    config
}

/// Spawn the proxy server and wait for it to start accepting.
pub async fn start_proxy(config: ProxyConfig) -> Shutdown {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let server = HttpServer::new(config).expect("endpoint map should build from test config");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

/// Non-pooled HTTP client, so each test drives fresh connections.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            line.split_once(':')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&tmp[..n]);
    }
    body.truncate(content_length);

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}
