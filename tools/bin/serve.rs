use std::process::ExitCode;

use clap::Parser;
use pwa_devtools::{config::ServeArgs, logger, server};

#[actix_web::main]
async fn main() -> ExitCode {
    let args = ServeArgs::parse();
    logger::init_cli_logger(args.verbose);

    match server::run(args.into_config()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("server failed: {e}");
            println!("\n❌ Server error: {e}");
            println!("💡 Try running with a different port: serve 8080");
            ExitCode::FAILURE
        }
    }
}
