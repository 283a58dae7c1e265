//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Start a programmable mock policy API on an ephemeral port.
///
/// `f` receives the request head (request line plus headers) and returns
/// the status code and JSON body to send back.
pub async fn start_policy_server<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(socket);
                        let mut head = String::new();
                        loop {
                            let mut line = String::new();
                            match reader.read_line(&mut line).await {
                                Ok(0) | Err(_) => return,
                                Ok(_) if line == "\r\n" => break,
                                Ok(_) => head.push_str(&line),
                            }
                        }

                        let (status, body) = f(head).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let mut socket = reader.into_inner();
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Where a stalling server stops answering.
#[derive(Debug, Clone, Copy)]
pub enum Stall {
    /// Read the request, never send a status line.
    BeforeHeaders,
    /// Send headers announcing more body than is ever written.
    MidBody,
}

/// Start a mock policy API that accepts requests and then hangs.
///
/// Every request received bumps `requests`. Connections are held open until
/// the runtime shuts down.
pub async fn start_stalling_server(stall: Stall, requests: Arc<AtomicU32>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let requests = requests.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(socket);
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => return,
                        Ok(_) if line == "\r\n" => break,
                        Ok(_) => {}
                    }
                }
                requests.fetch_add(1, Ordering::SeqCst);

                let mut socket = reader.into_inner();
                if let Stall::MidBody = stall {
                    let partial = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"groups\": {";
                    let _ = socket.write_all(partial.as_bytes()).await;
                    let _ = socket.flush().await;
                }

                std::future::pending::<()>().await;
                drop(socket);
            });
        }
    });

    addr
}

/// A policy document containing a single group.
pub fn policy_with_group(name: &str, members: &[&str]) -> String {
    serde_json::json!({
        "acls": [{"action": "accept", "src": ["*"], "dst": ["*:*"]}],
        "groups": { name: members },
    })
    .to_string()
}

/// A policy document without any groups.
pub fn empty_policy() -> String {
    serde_json::json!({
        "acls": [{"action": "accept", "src": ["*"], "dst": ["*:*"]}],
    })
    .to_string()
}
