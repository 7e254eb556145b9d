use clap::{CommandFactory, Parser};

use grun::cli::Cli;
use grun::error::{GrunError, FAILURE_EXIT_CODE};
use grun::{cli_utils, config, logging, Orchestrator, Settings};

fn main() {
    // Usage errors exit with 1 like every other failure; --help and --version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { FAILURE_EXIT_CODE } else { 0 });
        }
    };

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            cli_utils::report(&err);
            if matches!(err, GrunError::Usage(_)) {
                print_usage();
            }
            err.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, GrunError> {
    let (source, args) = cli.invocation()?;

    let file_config = config::load(cli.config.as_deref())?;
    let settings = Settings::merge(&cli, file_config);

    logging::init(&settings.log_level);

    tracing::debug!(
        cache_dir = %settings.cache_dir.display(),
        toolchain = %settings.toolchain,
        source = %source.display(),
        "starting invocation"
    );

    let orchestrator = Orchestrator::from_settings(&settings)?;
    let outcome = orchestrator.execute(&source, args)?;

    Ok(outcome.exit_code)
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_help());
}
