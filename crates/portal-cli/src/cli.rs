use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::commands;
use crate::context::CliSession;
use crate::error::CliError;
use crate::formatter::{OutputFormat, emit_result};
use crate::util::Verbosity;

const NAME: &str = "portal";

pub fn run() -> ExitCode {
    init_tracing();
    match run_cli(std::env::args()) {
        Ok(code) => code,
        Err(err) => {
            err.print();
            err.exit_code()
        }
    }
}

/// Parses arguments, resolves the site source and dispatches the subcommand.
/// Failures map to `sysexits` codes.
pub fn run_cli<I, S>(args: I) -> Result<ExitCode, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let command = build_cli();
    let matches = command.try_get_matches_from(args)?;

    let verbosity = Verbosity {
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    };
    let output = if verbosity.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    if let Some(("contact", sub)) = matches.subcommand() {
        return emit_result(commands::contact::run(sub)?, output);
    }

    let site = matches.get_one::<String>("site").cloned();
    let base_url = matches.get_one::<String>("base-url").cloned();
    let session = CliSession::bootstrap(site, base_url, verbosity)?;
    if session.verbosity.verbose {
        tracing::info!(
            source = %session.source.describe(),
            detail_page = %session.config.detail_page,
            fragments = session.config.fragments.len(),
            "resolved site"
        );
    }

    let result = dispatch(&session, &matches)?;
    emit_result(result, output)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    Command::new(NAME)
        .about("Preview a catalog portal site")
        .arg(
            Arg::new("site")
                .long("site")
                .value_name("DIR")
                .global(true)
                .conflicts_with("base-url")
                .help("Site root holding the data files and fragments. Defaults to the current directory."),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Fetch site files over HTTP relative to URL instead of a directory."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit a JSON line instead of human-readable text."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log the resolved site source and page lifecycle."),
        )
        .subcommand_required(true)
        .subcommand(commands::render::command())
        .subcommand(commands::search::command())
        .subcommand(commands::contact::command())
}

fn dispatch(
    session: &CliSession,
    matches: &ArgMatches,
) -> Result<commands::CommandResult, CliError> {
    match matches.subcommand() {
        Some(("render", sub)) => commands::render::run(session, sub),
        Some(("search", sub)) => commands::search::run(session, sub),
        Some(("contact", sub)) => commands::contact::run(sub),
        _ => Err(CliError::usage("missing command")),
    }
}
