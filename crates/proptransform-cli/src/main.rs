//! proptransform CLI - Command-line interface for property transformations
//!
//! This is the main entry point for the proptransform binary, providing
//! commands for applying transformations, listing the available types and
//! managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration feeds both logging and color, so it loads first
    let config = Config::load_with_file(cli.config.as_deref());

    let use_color = cli.use_color() && config.as_ref().map_or(true, |c| c.output.color);
    control::set_override(use_color);

    let guard = match init_logging(&cli, config.as_ref().ok()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = config.and_then(|config| run(cli, &config, use_color));

    if let Err(e) = result {
        eprintln!("{}", error::format_error(&e, use_color));

        if e.should_show_help() {
            eprintln!("\nFor more information, try '--help'");
        }

        // process::exit skips destructors; flush the log file first
        drop(guard);
        process::exit(e.exit_code());
    }
}

/// Main application logic
#[instrument(skip_all)]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli.output.unwrap_or_else(|| {
        OutputFormat::from_name(&config.output.format).unwrap_or_else(|| {
            tracing::warn!(format = %config.output.format, "Unknown output format, using human");
            OutputFormat::Human
        })
    });
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Apply(args) => {
            let registry = config.build_registry()?;
            handlers::handle_apply(args, config, registry, &mut output)
        }
        Commands::List => {
            let registry = config.build_registry()?;
            handlers::handle_list(&registry, &mut output)
        }
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<Option<WorkerGuard>> {
    // Create logging configuration from CLI args, the config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    if let Some(config) = config {
        logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    }
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::sync::{Arc, Mutex};
    use tracing::span;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["proptransform", "list"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["proptransform", "-vv", "list"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["proptransform", "--quiet", "list"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(cli.quiet);
    }

    /// Collects the field names of every span and event it sees
    #[derive(Clone, Default)]
    struct FieldNames(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for FieldNames {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            let names = attrs.metadata().fields().iter().map(|f| f.name().to_string());
            self.0.lock().unwrap().extend(names);
        }

        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let names = event.metadata().fields().iter().map(|f| f.name().to_string());
            self.0.lock().unwrap().extend(names);
        }
    }

    #[test]
    fn test_command_recorded_once() {
        let names = FieldNames::default();
        let subscriber = tracing_subscriber::registry().with(names.clone());
        let cli = Cli::parse_from(["proptransform", "-o", "json", "list"]);

        tracing::subscriber::with_default(subscriber, || run(cli, &Config::default(), false))
            .unwrap();

        let recorded = names.0.lock().unwrap();
        assert_eq!(recorded.iter().filter(|n| *n == "command").count(), 1);
    }

    #[test]
    fn test_output_flag_overrides_config() {
        let cli = Cli::parse_from(["proptransform", "--output", "json", "list"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }
}
