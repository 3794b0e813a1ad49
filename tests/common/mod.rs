//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock backbone that accepts any request with the given status.
/// Returns the bound address.
async fn start_backbone_with_status(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain what the client sent before responding.
                        let mut buf = vec![0u8; 64 * 1024];
                        let _ = socket.read(&mut buf).await;
                        let body = "{}";
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line,
                            body.len(),
                            body
                        );
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

/// Mock backbone that accepts every worker submission.
pub async fn start_mock_backbone() -> SocketAddr {
    start_backbone_with_status("200 OK").await
}

/// Mock backbone that rejects every worker submission.
#[allow(dead_code)]
pub async fn start_failing_backbone() -> SocketAddr {
    start_backbone_with_status("500 Internal Server Error").await
}
