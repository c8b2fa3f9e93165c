use std::process::ExitCode;

use clap::Parser;
use pwa_devtools::{
    cert::{ensure_certificate, CertificatePair},
    config::CertArgs,
    logger,
};

fn main() -> ExitCode {
    let args = CertArgs::parse();
    logger::init_cli_logger(args.verbose);

    if !ensure_certificate(&args.dir, &args.cert_backend.into()) {
        return ExitCode::FAILURE
    }

    let CertificatePair { cert, key } = CertificatePair::in_dir(&args.dir);
    println!("  - {}", cert.display());
    println!("  - {}", key.display());
    ExitCode::SUCCESS
}
