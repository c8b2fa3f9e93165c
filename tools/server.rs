//! Static-file dev server: `Idle -> CertificateCheck -> {ServingEncrypted | ServingPlain} -> Stopped`.

use {
    std::{
        env, fmt, io,
        net::{SocketAddr, ToSocketAddrs},
        path::{Path, PathBuf},
    },
    actix_files::Files,
    actix_web::{dev::Server, middleware::Logger, App, HttpServer},
    rustls::ServerConfig,
    crate::{
        cert::{ensure_certificate, CertBackend, CertificatePair},
        error::ServeError,
        paths::DEFAULT_PORT,
        tls::load_server_config,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    CertificateCheck,
    ServingEncrypted,
    ServingPlain,
    Stopped,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::CertificateCheck => "certificate-check",
            Self::ServingEncrypted => "serving-encrypted",
            Self::ServingPlain => "serving-plain",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

pub enum Transport {
    Plain,
    Tls(ServerConfig),
}

impl Transport {
    #[inline]
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Plain => "http",
            Self::Tls(..) => "https",
        }
    }

    #[inline]
    fn state(&self) -> ServerState {
        match self {
            Self::Plain => ServerState::ServingPlain,
            Self::Tls(..) => ServerState::ServingEncrypted,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub root: PathBuf,
    pub port: u16,
    pub backend: CertBackend,
}

/// The project directory the binary was built from, or `.` once that is gone
/// (an installed or copied binary).
pub fn default_root(built_in: &Path) -> PathBuf {
    if built_in.is_dir() {
        built_in.to_owned()
    } else {
        tracing::debug!("{} no longer exists, serving the current directory", built_in.display());
        PathBuf::from(".")
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            root: default_root(Path::new(env!("CARGO_MANIFEST_DIR"))),
            port: DEFAULT_PORT,
            backend: CertBackend::default(),
        }
    }
}

/// Binds a static-file server for `root` on `addr` without starting to poll it.
///
/// Directories serve their `index.html` when there is one and a listing otherwise.
pub fn bind(
    root: impl Into<PathBuf>,
    addr: impl ToSocketAddrs,
    transport: Transport,
) -> io::Result<(Server, Vec::<SocketAddr>)> {
    let root = root.into();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%a \"%r\" %s %b"))
            .service(Files::new("/", &root).index_file("index.html").show_files_listing())
    });

    let server = match transport {
        Transport::Plain => server.bind(addr)?,
        Transport::Tls(cfg) => server.bind_rustls_021(addr, cfg)?,
    };

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}

/// Enters `root` and returns it as an absolute path.
fn enter(root: &Path) -> Result::<PathBuf, ServeError> {
    let chdir = |source| ServeError::Chdir { path: root.to_owned(), source };
    let abs = root.canonicalize().map_err(chdir)?;
    env::set_current_dir(&abs).map_err(chdir)?;
    Ok(abs)
}

#[inline]
fn transition(state: &mut ServerState, next: ServerState) {
    tracing::debug!(from = %state, to = %next, "server state");
    *state = next;
}

#[inline]
fn print_rule() {
    println!("{}", "-".repeat(50));
}

/// A bound server that has not been awaited yet.
pub struct Started {
    pub server: Server,
    pub addrs: Vec::<SocketAddr>,
    pub state: ServerState,
    pub root: PathBuf,
}

/// Everything up to the first accepted connection: enter the root, ensure the
/// certificate, pick the transport, bind `0.0.0.0:port`.
pub fn start(config: &ServeConfig) -> Result::<Started, ServeError> {
    let mut state = ServerState::Idle;
    let port = config.port;
    let root = enter(&config.root)?;

    println!("🃏 MTG Collection Tracker - Local HTTPS Server");
    println!("📁 Serving from: {}", root.display());
    println!("🌐 Port: {port}");
    print_rule();

    transition(&mut state, ServerState::CertificateCheck);
    let transport = if ensure_certificate(&root, &config.backend) {
        Transport::Tls(load_server_config(&CertificatePair::in_dir(&root))?)
    } else {
        Transport::Plain
    };

    match &transport {
        Transport::Plain => {
            tracing::warn!("serving without TLS");
            println!("\n⚠️  Falling back to HTTP server (limited PWA functionality)");
            println!("🌐 Starting HTTP server on http://localhost:{port}");
        }
        Transport::Tls(..) => {
            println!("🚀 Starting HTTPS server on https://localhost:{port}");
            println!("📱 Open this URL in your browser to test PWA functionality");
            println!("⚠️  You may need to accept the self-signed certificate warning");
            println!("\n🛑 Press Ctrl+C to stop the server");
            print_rule();
        }
    }

    let next = transport.state();
    let scheme = transport.scheme();
    let (server, addrs) = bind(&root, ("0.0.0.0", port), transport)?;
    transition(&mut state, next);
    tracing::info!(?addrs, "listening");

    if state == ServerState::ServingEncrypted {
        println!("✅ HTTPS server running at {scheme}://localhost:{port}");
        println!("📋 Test your PWA features:");
        println!("   • Service Worker registration");
        println!("   • Offline functionality");
        println!("   • Install prompt");
        println!("   • Manifest validation");
    }

    Ok(Started { server, addrs, state, root })
}

/// Serves `config.root` until interrupted.
///
/// Changes the process working directory, so relative paths below resolve against the root.
pub async fn run(config: ServeConfig) -> Result::<(), ServeError> {
    let Started { server, mut state, .. } = start(&config)?;

    // actix installs its own SIGINT/SIGTERM handlers and stops gracefully.
    let result = server.await;
    transition(&mut state, ServerState::Stopped);
    result?;

    println!("\n👋 Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serves_crate_root_on_8443() {
        let cfg = ServeConfig::default();
        assert_eq!(cfg.port, 8443);
        assert!(cfg.root.join("Cargo.toml").exists());
        assert_eq!(cfg.backend, CertBackend::default());
    }

    #[test]
    fn vanished_build_dir_falls_back_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("moved-away");
        assert_eq!(default_root(&gone), PathBuf::from("."));
        assert_eq!(default_root(dir.path()), dir.path());
    }

    #[test]
    fn missing_root_is_a_chdir_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = enter(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ServeError::Chdir { .. }));
    }

    #[test]
    fn transport_states() {
        assert_eq!(Transport::Plain.state(), ServerState::ServingPlain);
        assert_eq!(Transport::Plain.scheme(), "http");
        assert_eq!(ServerState::CertificateCheck.to_string(), "certificate-check");
    }
}
