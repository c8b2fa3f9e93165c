use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// `init()` also bridges `log` records, which is how actix's request logger ends up here.
pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { "pwa_devtools=debug,info" } else { "pwa_devtools=info,actix_web=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
