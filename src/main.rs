use ci_shellcheck::{
    cli::{Cli, CliHandler},
    error::CheckError,
};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {}", e);
            process::exit(2);
        }
    };

    // RUST_LOG wins over the verbosity flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Check failed: {}", e);
            match e {
                CheckError::Yaml(_) | CheckError::InvalidDocument(_) | CheckError::IoError(_) => 3,
                CheckError::ShellcheckUnavailable(_) => 4,
                _ => 5,
            }
        }
    };

    process::exit(exit_code);
}
