use anyhow::Result;
use tracing_subscriber::EnvFilter;

use gql_defs::cli::CommandLineInterface;

fn main() -> Result<()> {
    let command_line_interface = CommandLineInterface::load();

    // Logs go to stderr so JSON on stdout stays pipeable.
    let filter = match command_line_interface.verbose {
        0 => EnvFilter::new("gql_defs=warn"),
        1 => EnvFilter::new("gql_defs=info"),
        _ => EnvFilter::new("gql_defs=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    command_line_interface.run()
}
