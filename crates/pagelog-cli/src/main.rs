//! Pagelog CLI entry point.
//!
//! Exit codes: 0 when nothing above the allowed severity was captured (or
//! `--report-only` is set), 1 when the threshold was exceeded, 2 when
//! configuration or I/O failed.

use clap::Parser;
use pagelog_cli::{cli, commands, error, logger, ui};
use std::process::ExitCode;

const EXIT_THRESHOLD_EXCEEDED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Capture(capture_args) => {
            let report_only = capture_args.report_only;
            commands::capture_execute(capture_args, args.quiet)
                .map(|outcome| outcome.is_failed() && !report_only)
        }
        cli::Command::Check(check_args) => {
            commands::check_execute(check_args, args.quiet).map(|()| false)
        }
    };

    match result {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_THRESHOLD_EXCEEDED),
        Err(err) => {
            eprintln!("{:?}", error::cli_error_to_miette(err));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
