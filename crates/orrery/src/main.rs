//! Command-line front end that runs the orrery's setup-time geometry and
//! prints the results as JSON.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    cli::exec(args)
}
