//! Tests de integración para el servidor de archivos
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, con un
//! directorio raíz temporal, y le habla por TCP como lo haría un cliente.

use http_file_server::config::ServerConfig;
use http_file_server::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const STYLE_CSS: &str = "body {\n  font-family: sans-serif;\n  color: #333;\n}\n";

/// Helper: arma un root con algunos archivos y levanta el servidor
fn start_server(ini: &str) -> (TempDir, SocketAddr) {
    let root = tempfile::tempdir().expect("tempdir");
    fill_root(root.path());

    let mut config = ServerConfig::from_ini_str(ini);
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.root_dir = root.path().to_path_buf();
    config.validate().expect("valid config");

    let server = Server::bind(config).expect("bind");
    let addr = server.local_addr().expect("local addr");

    // El loop nunca termina; el thread muere con el proceso de test
    thread::spawn(move || server.run());

    (root, addr)
}

fn fill_root(root: &Path) {
    fs::write(root.join("index.html"), "<h1>index</h1>").unwrap();
    fs::write(root.join("home.html"), "<h1>home</h1>").unwrap();
    fs::write(root.join("style.css"), STYLE_CSS).unwrap();
    fs::write(root.join("logo.png"), [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00]).unwrap();
    fs::create_dir(root.join("blog")).unwrap();
    fs::write(root.join("blog").join("index.html"), "<h1>blog</h1>").unwrap();
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).expect("write");
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    response
}

fn send_request(addr: SocketAddr, method: &str, path: &str) -> String {
    let raw = format!("{} {} HTTP/1.1\r\nHost: localhost\r\n\r\n", method, path);
    String::from_utf8_lossy(&send_raw(addr, raw.as_bytes())).into_owned()
}

/// Helper: separa headers y body
fn split_response(response: &[u8]) -> (String, &[u8]) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    (
        String::from_utf8_lossy(&response[..pos]).into_owned(),
        &response[pos + 4..],
    )
}

fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (n, v) = line.split_once(": ")?;
        (n.eq_ignore_ascii_case(name)).then_some(v)
    })
}

#[test]
fn test_root_serves_default_file() {
    let (_root, addr) = start_server("");
    let response = send_request(addr, "GET", "/");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert!(response.ends_with("<h1>index</h1>"));
}

#[test]
fn test_root_uses_configured_default_file() {
    let (_root, addr) = start_server("[Server]\nDefaultFile = home.html\n");
    let response = send_request(addr, "GET", "/");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.ends_with("<h1>home</h1>"));
}

#[test]
fn test_css_content_type_and_exact_length() {
    let (root, addr) = start_server("");
    let raw = send_raw(addr, b"GET /style.css HTTP/1.1\r\n\r\n");
    let (head, body) = split_response(&raw);

    let size = fs::metadata(root.path().join("style.css")).unwrap().len();
    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert_eq!(header(&head, "Content-Type"), Some("text/css"));
    assert_eq!(header(&head, "Content-Length"), Some(size.to_string().as_str()));
    assert_eq!(header(&head, "Connection"), Some("close"));
    assert_eq!(body, STYLE_CSS.as_bytes());
}

#[test]
fn test_binary_file_is_byte_exact() {
    let (root, addr) = start_server("");
    let raw = send_raw(addr, b"GET /logo.png HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&raw);

    assert!(head.starts_with("HTTP/1.0 200 OK"));
    assert_eq!(header(&head, "Content-Type"), Some("image/png"));
    assert_eq!(body, fs::read(root.path().join("logo.png")).unwrap().as_slice());
}

#[test]
fn test_directory_serves_its_index() {
    let (_root, addr) = start_server("");

    assert!(send_request(addr, "GET", "/blog/").ends_with("<h1>blog</h1>"));
    assert!(send_request(addr, "GET", "/blog").ends_with("<h1>blog</h1>"));
}

#[test]
fn test_traversal_yields_400() {
    let (_root, addr) = start_server("");

    for path in ["/../etc/passwd", "/blog/../../secret", "/%2e%2e/etc/passwd"] {
        let response = send_request(addr, "GET", path);
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"), "path {}: {}", path, response);
    }
}

#[test]
fn test_non_get_yields_501() {
    let (_root, addr) = start_server("");

    for method in ["POST", "PUT", "DELETE", "HEAD"] {
        let response = send_request(addr, method, "/index.html");
        assert!(response.starts_with("HTTP/1.1 501 Not Implemented\r\n"), "{}", method);
        assert!(response.contains("Only GET method is supported."));
    }
}

#[test]
fn test_missing_file_yields_404() {
    let (_root, addr) = start_server("");
    let raw = send_raw(addr, b"GET /nonexistent.html HTTP/1.1\r\n\r\n");
    let (head, body) = split_response(&raw);

    assert!(head.starts_with("HTTP/1.1 404 Not Found"));
    assert_eq!(header(&head, "Content-Type"), Some("text/html"));
    assert_eq!(header(&head, "Content-Length"), Some(body.len().to_string().as_str()));
}

#[test]
fn test_oversized_tokens_yield_400() {
    let (_root, addr) = start_server("");

    let long_method = format!("{} / HTTP/1.1\r\n\r\n", "M".repeat(40));
    let response = String::from_utf8_lossy(&send_raw(addr, long_method.as_bytes())).into_owned();
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));

    let long_path = format!("GET /{} HTTP/1.1\r\n\r\n", "p".repeat(300));
    let response = String::from_utf8_lossy(&send_raw(addr, long_path.as_bytes())).into_owned();
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_malformed_request_line_yields_400() {
    let (_root, addr) = start_server("");
    let response = String::from_utf8_lossy(&send_raw(addr, b"HELLO\r\n\r\n")).into_owned();

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_large_file_with_long_headers_arrives_whole() {
    // Headers que no entran en el buffer de lectura quedan sin leer en el socket
    let (root, addr) = start_server("");
    let data: Vec<u8> = (0..4 * 1024 * 1024u32).map(|i| (i % 253) as u8).collect();
    fs::write(root.path().join("big.bin"), &data).unwrap();

    let request = format!(
        "GET /big.bin HTTP/1.1\r\nHost: localhost\r\nCookie: session={}\r\n\r\n",
        "x".repeat(3000)
    );
    for i in 0..5 {
        let raw = send_raw(addr, request.as_bytes());
        let (head, body) = split_response(&raw);

        assert_eq!(header(&head, "Content-Type"), Some("application/octet-stream"));
        assert_eq!(body.len(), data.len(), "request {} truncated", i);
        assert!(body == data.as_slice(), "request {} corrupted", i);
    }
}

#[test]
fn test_multiple_requests_sequentially() {
    // Verificar que el servidor sigue aceptando después de cada respuesta
    let (_root, addr) = start_server("");
    for i in 0..5 {
        let response = send_request(addr, "GET", "/style.css");
        assert!(response.starts_with("HTTP/1.1 200 OK"), "Request {} failed", i);
    }
}

#[test]
fn test_silent_client_does_not_stop_server() {
    let (_root, addr) = start_server("");

    // Conecta y cierra sin mandar nada
    drop(TcpStream::connect(addr).unwrap());

    let response = send_request(addr, "GET", "/");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
}
