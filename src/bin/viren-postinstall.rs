use anyhow::Result;
use tracing_subscriber::EnvFilter;
use viren_postinstall::output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = viren_postinstall::run_from_env() {
        output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
