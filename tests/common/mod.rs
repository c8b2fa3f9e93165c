#![allow(dead_code)]

use std::{
    fs,
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
    path::Path,
    sync::Arc,
};

use rustls::{Certificate, ClientConfig, ClientConnection, RootCertStore, ServerName, Stream};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net,
};

pub const REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";

pub fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>deck</h1>").unwrap();
    fs::create_dir(dir.path().join("icons")).unwrap();
    fs::write(dir.path().join("icons").join("icon-16x16.png"), b"png").unwrap();
    dir
}

pub async fn get(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = net::TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// DER of the first certificate in a PEM file.
pub fn cert_der(pem: &Path) -> Vec<u8> {
    let pem = fs::read(pem).unwrap();
    rustls_pemfile::certs(&mut pem.as_slice()).unwrap().remove(0)
}

/// Blocking HTTPS `GET /` trusting only `cert_der`.
pub fn tls_get(addr: SocketAddr, cert_der: Vec<u8>) -> String {
    let mut roots = RootCertStore::empty();
    roots.add(&Certificate(cert_der)).unwrap();
    let cfg = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let name = ServerName::try_from("localhost").unwrap();
    let mut conn = ClientConnection::new(Arc::new(cfg), name).unwrap();
    let mut sock = TcpStream::connect(addr).unwrap();
    let mut tls = Stream::new(&mut conn, &mut sock);
    tls.write_all(REQUEST).unwrap();

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    while !response.windows(4).any(|w| w == b"\r\n\r\n") {
        match tls.read(&mut buf) {
            Ok(0) | Err(..) => break,
            Ok(n) => response.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&response).into_owned()
}
