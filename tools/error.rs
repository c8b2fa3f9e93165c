use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("icon size must be a positive integer, got {0}")]
    InvalidSize(u32),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TlsError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificates found in {0}")]
    NoCertificates(PathBuf),

    #[error("no valid private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("failed to create server config: {0}")]
    Config(#[from] rustls::Error),
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("could not enter {path}: {source}")]
    Chdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
