use phonebook::prelude::{AppError, run_app};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<(), AppError> {
    init_tracing();

    run_app().inspect_err(|e| tracing::error!(error = %e, "phonebook stopped"))
}

/// Logs go to stderr so they never interleave with the session on stdout.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
