//! Lazily creates the self-signed certificate pair the dev server needs.
//!
//! Existing files are reused as-is: expiry and authenticity are never checked.

use {
    std::{
        ffi::OsString,
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
        process::{Command, ExitStatus},
    },
    rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair},
    time::{Duration, OffsetDateTime},
    crate::paths::{CERT_FILE, KEY_FILE},
};

pub const VALIDITY_DAYS: i64 = 365;
pub const SUBJECT: &str = "/C=US/ST=Local/L=Local/O=MTG Tracker/CN=localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatePair {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl CertificatePair {
    #[inline]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self { cert: dir.join(CERT_FILE), key: dir.join(KEY_FILE) }
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.cert.exists() && self.key.exists()
    }
}

/// An external certificate generator and the arguments it is run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertTool {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CertTool {
    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self { program: program.into(), args: args.into_iter().map(Into::into).collect::<Vec::<_>>() }
    }

    /// RSA-4096, 365 days, no passphrase, written as `server.key` / `server.crt`.
    pub fn openssl() -> Self {
        let days = VALIDITY_DAYS.to_string();
        Self::new("openssl", [
            "req", "-x509", "-newkey", "rsa:4096",
            "-keyout", KEY_FILE,
            "-out", CERT_FILE,
            "-days", days.as_str(),
            "-nodes",
            "-subj", SUBJECT,
        ])
    }

    /// Runs the tool to completion in `dir`. No timeout.
    pub fn run(&self, dir: &Path) -> std::io::Result::<ToolOutcome> {
        let output = Command::new(&self.program).args(&self.args).current_dir(dir).output()?;
        Ok(ToolOutcome {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug)]
pub struct ToolOutcome {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// How a missing pair gets created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertBackend {
    External(CertTool),
    /// In-process generation, for machines without the external tool.
    Native,
}

impl Default for CertBackend {
    fn default() -> Self {
        Self::External(CertTool::openssl())
    }
}

/// `true` when `dir` holds a usable-looking pair afterwards.
pub fn ensure_certificate(dir: impl AsRef<Path>, backend: &CertBackend) -> bool {
    let dir = dir.as_ref();
    let pair = CertificatePair::in_dir(dir);

    if pair.exists() {
        println!("✅ Using existing SSL certificate");
        return true
    }

    println!("🔐 Creating self-signed SSL certificate...");

    match backend {
        CertBackend::External(tool) => match tool.run(dir) {
            Ok(outcome) if outcome.status.success() => {
                tracing::debug!(
                    stdout = %outcome.stdout.trim(),
                    stderr = %outcome.stderr.trim(),
                    "certificate tool finished"
                );
                println!("✅ SSL certificate created successfully");
                true
            }
            Ok(outcome) => {
                tracing::warn!(
                    status = %outcome.status,
                    stdout = %outcome.stdout.trim(),
                    stderr = %outcome.stderr.trim(),
                    "certificate tool failed"
                );
                println!("❌ Failed to create SSL certificate");
                println!("Please install OpenSSL or create certificates manually");
                false
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("❌ OpenSSL not found. Please install OpenSSL to create SSL certificates.");
                println!("Alternative: run `serve --cert-backend native` or accept plain HTTP (limited PWA functionality)");
                false
            }
            Err(e) => {
                tracing::warn!("could not run {:?}: {e}", tool.program);
                println!("❌ Failed to create SSL certificate");
                false
            }
        },
        CertBackend::Native => match write_native(&pair) {
            Ok(()) => {
                println!("✅ SSL certificate created successfully");
                true
            }
            Err(e) => {
                tracing::warn!("native certificate generation failed: {e}");
                println!("❌ Failed to create SSL certificate");
                false
            }
        },
    }
}

fn write_native(pair: &CertificatePair) -> Result::<(), Box::<dyn std::error::Error>> {
    let mut params = CertificateParams::new(vec!["localhost".to_owned(), "127.0.0.1".to_owned()])?;

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CountryName, "US");
    dn.push(DnType::StateOrProvinceName, "Local");
    dn.push(DnType::LocalityName, "Local");
    dn.push(DnType::OrganizationName, "MTG Tracker");
    dn.push(DnType::CommonName, "localhost");
    params.distinguished_name = dn;

    let now = OffsetDateTime::now_utc();
    params.not_before = now;
    params.not_after = now + Duration::days(VALIDITY_DAYS);

    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;

    fs::write(&pair.cert, cert.pem())?;
    fs::write(&pair.key, key_pair.serialize_pem())?;
    Ok(())
}
