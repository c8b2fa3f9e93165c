use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    cert::{CertBackend, CertTool},
    icons::IconFormat,
    paths::{DEFAULT_ICON_SIZES, DEFAULT_PORT, ICONS_DIR},
    server::ServeConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendChoice {
    /// Shell out to `openssl req`
    #[default]
    Openssl,
    /// Generate the pair in-process
    Native,
}

impl From<BackendChoice> for CertBackend {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Openssl => CertBackend::External(CertTool::openssl()),
            BackendChoice::Native => CertBackend::Native,
        }
    }
}

/// Simple HTTPS server for testing PWA functionality locally
#[derive(Parser, Debug)]
#[command(name = "serve", version)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory to serve; defaults to the project root
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// How to create server.crt / server.key when they are missing
    #[arg(long, value_enum, default_value_t)]
    pub cert_backend: BackendChoice,

    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    pub fn into_config(self) -> ServeConfig {
        let defaults = ServeConfig::default();
        ServeConfig {
            root: self.dir.unwrap_or(defaults.root),
            port: self.port,
            backend: self.cert_backend.into(),
        }
    }
}

/// Generate PWA icons for MTG Collection Tracker
#[derive(Parser, Debug)]
#[command(name = "generate_icons", version)]
pub struct IconArgs {
    #[arg(long, default_value = ICONS_DIR)]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: IconFormat,

    /// Icon side in pixels; repeat for several. Defaults to every manifest size
    #[arg(long = "size", value_parser = clap::value_parser!(u32).range(1..))]
    pub sizes: Vec<u32>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl IconArgs {
    pub fn sizes(&self) -> Vec<u32> {
        if self.sizes.is_empty() {
            DEFAULT_ICON_SIZES.to_vec()
        } else {
            self.sizes.clone()
        }
    }
}

/// Create server.crt and server.key for the dev server
#[derive(Parser, Debug)]
#[command(name = "generate_certs", version)]
pub struct CertArgs {
    /// Where to write the pair
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub cert_backend: BackendChoice,

    #[arg(short, long)]
    pub verbose: bool,
}
