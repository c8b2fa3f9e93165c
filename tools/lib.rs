//! Developer utilities for the MTG Collection Tracker web app: placeholder PWA icons and a
//! local static-file server with a self-signed certificate.

pub mod cert;
pub mod config;
pub mod error;
pub mod icons;
pub mod logger;
pub mod paths;
pub mod server;
pub mod tls;
