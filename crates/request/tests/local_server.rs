//! Requests against a one-shot server on localhost

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use retain_theme_request::{Method, Request, RequestError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `response` to the first connection and return the base url
async fn serve_once(response: impl Into<Vec<u8>>) -> String {
    let response = response.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket.write_all(&response).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_json_body_with_content_range() {
    let base = serve_once(
        "HTTP/1.1 206 Partial Content\r\n\
         Content-Type: application/json\r\n\
         Content-Range: bytes 0-10/200\r\n\
         Content-Length: 11\r\n\
         Connection: close\r\n\r\n\
         {\"ok\":true}",
    )
    .await;

    let response = Request::new(base).param("q", "x").get_json_value().await.unwrap();

    assert_eq!(response.status, 206);
    assert_eq!(response.data, serde_json::json!({ "ok": true }));
    assert_eq!(response.content_range.as_ref().map(|r| r.range_end), Some(10));
    assert_eq!(response.content_length, Some(200));
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_string_body() {
    let base = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
    )
    .await;

    let response = Request::new(base).get_string().await.unwrap();
    assert_eq!(response.data, "hello");
    assert_eq!(response.content_length, Some(5));
    assert_eq!(response.status_message.as_deref(), Some("OK"));
}

#[tokio::test]
async fn test_error_status() {
    let base = serve_once(
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;

    let err = Request::new(format!("{}/missing", base))
        .method(Method::Post)
        .body("x")
        .get_bytes()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.method(), Method::Post);
    assert!(err.url().ends_with("/missing"));
    assert!(err.is_connection_error());
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let base = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\nnah",
    )
    .await;

    let err = Request::new(base).get_json_value().await.unwrap_err();
    assert!(matches!(err, RequestError::Decode { .. }));
}

/// Log output collected by a thread-local subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn get_json_opt_logs(suppress_logs: bool) -> (bool, String) {
    let base = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let response = Request::new(base)
        .suppress_logs(suppress_logs)
        .get_json_opt::<serde_json::Value>()
        .await;
    (response.is_none(), logs.contents())
}

#[tokio::test]
async fn test_get_json_opt_swallows_errors() {
    let (swallowed, logs) = get_json_opt_logs(false).await;
    assert!(swallowed);
    assert!(logs.contains("get_json_opt(): GET"));
    assert!(logs.contains("500"));
}

#[tokio::test]
async fn test_get_json_opt_respects_suppress_logs() {
    let (swallowed, logs) = get_json_opt_logs(true).await;
    assert!(swallowed);
    assert!(!logs.contains("get_json_opt()"));
}

fn png_1x1() -> Vec<u8> {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(1, 1))
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .unwrap();
    png
}

#[tokio::test]
async fn test_image_body() {
    let png = png_1x1();
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        png.len()
    )
    .into_bytes();
    response.extend_from_slice(&png);
    let base = serve_once(response).await;

    let response = Request::new(base).get_image().await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!((response.data.width(), response.data.height()), (1, 1));
}

#[tokio::test]
async fn test_garbage_image_is_decode_error() {
    let base = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope",
    )
    .await;

    let err = Request::new(base).get_image().await.unwrap_err();
    assert!(matches!(err, RequestError::Decode { .. }));
    assert!(!err.is_connection_error());
}

#[tokio::test]
async fn test_refused_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Request::new(format!("http://{}", addr))
        .connect_timeout(Duration::from_millis(500))
        .get_bytes()
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Connection { .. }));
    assert!(err.is_connection_error());
    assert_eq!(err.status(), None);
}
