/*!
 * Command-line interface for bctx
 */

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use bctx::config::{Cli, Command, Config};
use bctx::error::ResultExt;
use bctx::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    if let Some(shell) = cli.generate {
        clap_complete::generate(shell, &mut Cli::command(), "bctx", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let result = match cli.command {
        Some(Command::Dump(args)) => {
            let config = Config::from_args(args);
            config
                .validate()
                .and_then(|()| bctx::run(&config, io::stdout().lock(), io::stderr().lock()))
                .map(drop)
        }
        None => Cli::command().print_help().output_context(|| "writing help"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
