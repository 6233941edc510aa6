//! check_haproxy_state - version 0.1.0
//!
//! Nagios-style plugin for HAProxy. Parses arguments, sets up logging, runs a
//! single check and exits with the verdict's exit code. This is the only
//! place the process exits. Stdout carries only the status line; usage text
//! and diagnostics go to stderr.

mod cli;
mod logging;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use haproxy_state_check::config::{load_or_default, render_config};
use haproxy_state_check::{run_check, CheckError, Invocation, Report, Verdict};
use tracing::{debug, error};

use cli::{Args, LogLevel};
use logging::setup_logging;

fn init_logging(level: LogLevel, syslog: bool) {
    if let Err(e) = setup_logging(level, syslog) {
        eprintln!("{:#}", e);
    }
}

/// Emits the report through the log sink and exits with its code.
fn finish(report: Report) -> ! {
    report.emit();
    std::process::exit(report.exit_code());
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            init_logging(LogLevel::Info, true);
            let reason = e.kind().as_str().unwrap_or("invalid arguments");
            finish(Report::from_error(&CheckError::Argument(reason.to_string())))
        }
    };

    init_logging(args.log_level, !args.no_syslog);

    if args.show_config {
        let config = load_or_default(args.config_path());
        match render_config(&config, args.config_format) {
            Ok(output) => {
                println!("{}", output);
                std::process::exit(Verdict::Ok.exit_code());
            }
            Err(e) => {
                error!("Failed to render configuration: {}", e);
                std::process::exit(Verdict::Error.exit_code());
            }
        }
    }

    let resolved = Invocation::resolve(
        args.sockets_path.as_deref(),
        args.section_type.as_deref(),
        args.config_path(),
    );

    let report = match resolved {
        Ok(invocation) => {
            debug!(
                "Checking {} via sockets in {}",
                invocation.section,
                invocation.sockets_path.display()
            );
            run_check(&invocation)
        }
        Err(e) => {
            eprintln!("{}", Args::command().render_help());
            Report::from_error(&e)
        }
    };

    finish(report)
}
