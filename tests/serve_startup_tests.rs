//! `start` changes the process working directory, so these run one at a time.

mod common;

use std::{
    fs,
    net::{SocketAddr, TcpListener},
    sync::{Mutex, MutexGuard},
};

use actix_web::rt;
use common::{get, site, tls_get, REQUEST};
use pwa_devtools::{
    cert::{CertBackend, CertTool, CertificatePair},
    error::ServeError,
    server::{start, ServeConfig, ServerState, Started},
};

static CWD: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    CWD.lock().unwrap_or_else(|e| e.into_inner())
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port()
}

fn missing_tool() -> CertBackend {
    CertBackend::External(CertTool::new("pwa-devtools-no-such-cert-tool", ["req"]))
}

fn local(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[actix_web::test]
async fn missing_cert_tool_falls_back_to_plain_on_requested_port() {
    let _cwd = serial();
    let site = site();
    let port = free_port();

    let config = ServeConfig { root: site.path().to_owned(), port, backend: missing_tool() };
    let Started { server, addrs, state, root } = start(&config).unwrap();
    let handle = server.handle();
    rt::spawn(server);

    assert_eq!(state, ServerState::ServingPlain);
    assert!(addrs.iter().all(|a| a.port() == port), "{addrs:?}");
    assert!(!CertificatePair::in_dir(&root).cert.exists());

    let response = get(local(port), REQUEST).await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("<h1>deck</h1>"));

    handle.stop(false).await;
}

#[actix_web::test]
async fn created_certificate_serves_tls_on_requested_port() {
    let _cwd = serial();
    let site = site();
    let port = free_port();

    let config = ServeConfig { root: site.path().to_owned(), port, backend: CertBackend::Native };
    let Started { server, addrs, state, root } = start(&config).unwrap();
    let handle = server.handle();
    rt::spawn(server);

    assert_eq!(state, ServerState::ServingEncrypted);
    assert!(addrs.iter().all(|a| a.port() == port), "{addrs:?}");

    let pair = CertificatePair::in_dir(&root);
    assert!(pair.exists());
    let cert_der = common::cert_der(&pair.cert);

    let response = tokio::task::spawn_blocking(move || tls_get(local(port), cert_der)).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");

    handle.stop(false).await;
}

#[actix_web::test]
async fn reused_pair_is_not_regenerated() {
    let _cwd = serial();
    let site = site();
    let port = free_port();

    assert!(pwa_devtools::cert::ensure_certificate(site.path(), &CertBackend::Native));
    let pair = CertificatePair::in_dir(site.path());
    let before = fs::read(&pair.cert).unwrap();

    // the tool would fail if it ran, forcing plain HTTP
    let config = ServeConfig { root: site.path().to_owned(), port, backend: missing_tool() };
    let Started { server, state, .. } = start(&config).unwrap();
    let handle = server.handle();
    rt::spawn(server);

    assert_eq!(state, ServerState::ServingEncrypted);
    assert_eq!(fs::read(&pair.cert).unwrap(), before);

    handle.stop(false).await;
}

#[test]
fn unreadable_existing_pair_is_a_server_error() {
    let _cwd = serial();
    let site = site();
    let pair = CertificatePair::in_dir(site.path());
    fs::write(&pair.cert, "garbage").unwrap();
    fs::write(&pair.key, "garbage").unwrap();

    let config = ServeConfig { root: site.path().to_owned(), port: free_port(), backend: missing_tool() };
    assert!(matches!(start(&config), Err(ServeError::Tls(..))));
}

#[actix_web::test]
async fn occupied_port_surfaces_as_io_error() {
    let _cwd = serial();
    let site = site();
    let taken = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let config = ServeConfig { root: site.path().to_owned(), port, backend: missing_tool() };
    assert!(matches!(start(&config), Err(ServeError::Io(..))));
}
