//! check_jbod - monitoring plugin for JBOD enclosures
//!
//! Prints one status line and exits with the plugin status code.

use clap::Parser;
use jbodcheck::cli::args::{generate_completions, Cli};
use jbodcheck::cli::output::{print_output, UnknownResult};
use jbodcheck::commands::run_check;
use jbodcheck::config::ConfigBuilder;
use jbodcheck::domain::PluginStatus;
use jbodcheck::error::AppError;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    let status = match run(&cli) {
        Ok(status) => status,
        Err(e) => {
            log::error!("{}", e);
            let _ = print_output(&UnknownResult::new(&e), cli.format);
            PluginStatus::Unknown
        }
    };

    std::process::exit(status.exit_code());
}

fn run(cli: &Cli) -> Result<PluginStatus, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_logical_ids(Cli::flag(cli.logical))
        .with_timeout(cli.timeout)
        .build()?;

    run_check(cli, &config)
}
